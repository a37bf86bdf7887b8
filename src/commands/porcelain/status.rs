use crate::areas::session::Session;
use crate::artifacts::status::file_change::FileChange;
use crate::commands::porcelain::parse_args;
use crate::error::VcError;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "status", no_binary_name = true)]
struct StatusArgs {
    /// Per-file revision details (not available offline)
    #[arg(short, long)]
    verbose: bool,
    paths: Vec<PathBuf>,
}

// Terminology:
// - untracked files: files CVS has no record for in their directory
// - added/removed files: scheduled with `cvs add`/`cvs remove`, not yet committed
// - modified files: newer on disk than the time CVS recorded at checkout
impl Session {
    pub fn status(&self, args: &[String]) -> anyhow::Result<i32> {
        let Some(args) = parse_args::<StatusArgs>(self, "status", args)? else {
            return Ok(0);
        };

        if args.verbose {
            return Err(VcError::Unsupported {
                command: "status".to_string(),
                detail: "verbose status needs the server; run 'cvs status -v' instead"
                    .to_string(),
            }
            .into());
        }

        for node in self.walk_pruned(&args.paths) {
            let node = node?;

            let change = match &node.entry {
                None if self.ignores().is_ignored(&node.path)? => None,
                None => Some(FileChange::Untracked),
                Some(entry) => {
                    FileChange::of_tracked(entry, self.workspace().mtime_seconds(&node.path))
                }
            };

            if let Some(change) = change {
                writeln!(self.writer(), "{}", change.line(&node.path))?;
            }
        }

        Ok(0)
    }
}
