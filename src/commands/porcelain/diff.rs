use crate::areas::session::Session;
use crate::areas::workspace::WorkingTreeNode;
use crate::artifacts::entries::tracked_entry::TrackedEntry;
use crate::commands::Invocation;
use crate::commands::dispatch::forward;
use crate::commands::porcelain::{SplitArgs, notice};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

const DEFAULT_SWITCHES: &[&str] = &["-u"];

/// Switches whose value is the following token
const VALUED_SWITCHES: &[&str] = &["-U", "-C", "-I", "-F", "-L", "-x", "-X", "-S"];

/// `cvs diff` switches selecting revisions or dates; only the server can answer these
const REVISION_SWITCHES: &[&str] = &["-r", "-D"];

impl Session {
    pub fn diff(&self, invocation: &Invocation) -> anyhow::Result<i32> {
        let split = split_diff_args(&invocation.args);
        if split.switches.iter().any(|switch| selects_revision(switch)) {
            tracing::debug!(switches = ?split.switches, "revision diff, asking the server");
            return forward(self, invocation);
        }

        let switches: Vec<String> = if split.switches.is_empty() {
            DEFAULT_SWITCHES.iter().map(|switch| switch.to_string()).collect()
        } else {
            split.switches
        };
        let paths: Vec<PathBuf> = split.operands.iter().map(PathBuf::from).collect();

        let mut worst = 0;
        for node in self.walk(&paths) {
            let node = node?;

            let cached = match &node.entry {
                Some(entry) if entry.is_added() => None,
                _ => match self.locally_modified(&node) {
                    Some(entry) => {
                        self.texts().capture(entry);
                        self.texts().lookup(entry)
                    }
                    None => continue,
                },
            };

            let code = match cached {
                Some(cached) => {
                    writeln!(self.writer(), "Index: {}", node.path.display())?;

                    let mut diff_args: Vec<OsString> =
                        switches.iter().map(OsString::from).collect();
                    diff_args.push(cached.into_os_string());
                    diff_args.push(node.path.clone().into_os_string());

                    self.tool(&self.tools().diff)?.run(diff_args)?
                }
                None => {
                    notice(&format!(
                        "no reference text for {}, contacting the server",
                        node.path.display()
                    ));
                    let cvs_args = [OsString::from("diff"), node.path.clone().into_os_string()];

                    self.tool(&self.tools().cvs)?.run(cvs_args)?
                }
            };

            worst = worst.max(code);
        }

        Ok(worst)
    }

    /// The record of a committed file that has been edited since checkout
    pub(crate) fn locally_modified<'n>(
        &self,
        node: &'n WorkingTreeNode,
    ) -> Option<&'n TrackedEntry> {
        let entry = node.entry.as_ref().filter(|entry| entry.is_committed())?;
        let live_seconds = self.workspace().mtime_seconds(&node.path)?;

        entry.is_modified_at(live_seconds).then_some(entry)
    }
}

fn selects_revision(switch: &str) -> bool {
    REVISION_SWITCHES
        .iter()
        .any(|revision| switch.starts_with(revision))
}

/// Like `split_switches`, except valued switches take the next token with them
fn split_diff_args(args: &[String]) -> SplitArgs {
    let mut split = SplitArgs::default();
    let mut rest = args.iter();

    while let Some(arg) = rest.next() {
        if arg == "--" {
            break;
        }
        if !arg.starts_with('-') || arg == "-" {
            split.operands.push(arg.clone());
            break;
        }

        split.switches.push(arg.clone());
        let takes_value = VALUED_SWITCHES.contains(&arg.as_str())
            || REVISION_SWITCHES.contains(&arg.as_str());
        if takes_value && let Some(value) = rest.next() {
            split.switches.push(value.clone());
        }
    }

    split.operands.extend(rest.cloned());
    split
}
