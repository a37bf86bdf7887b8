use crate::areas::session::Session;
use crate::commands::porcelain::{notice, parse_args};
use crate::error::EXIT_FAILURE;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "revert", no_binary_name = true)]
struct RevertArgs {
    paths: Vec<PathBuf>,
}

impl Session {
    /// Throw away local edits of committed files.
    ///
    /// The restored file gets the server time back, so a following `status`
    /// sees it as unmodified.
    pub fn revert(&self, args: &[String]) -> anyhow::Result<i32> {
        let Some(args) = parse_args::<RevertArgs>(self, "revert", args)? else {
            return Ok(0);
        };

        let mut failed = false;
        for node in self.walk(&args.paths) {
            let node = node?;
            let Some(entry) = self.locally_modified(&node) else {
                continue;
            };
            let Some(server_time) = entry.server_time() else {
                notice(&format!(
                    "{}: no checkout time recorded, use 'cvs update -C' instead",
                    node.path.display()
                ));
                continue;
            };

            self.texts().capture(entry);

            match self.texts().lookup(entry) {
                Some(cached) => self.workspace().restore_from(&node.path, &cached)?,
                None => {
                    self.writer().flush()?;
                    match self.texts().fetch_revision(entry, false)? {
                        Some(data) => self.workspace().write_file(&node.path, &data)?,
                        None => {
                            notice(&format!(
                                "{}: could not fetch from the server",
                                node.path.display()
                            ));
                            failed = true;
                            continue;
                        }
                    }
                }
            }

            self.workspace().set_mtime(&node.path, &server_time)?;
            writeln!(self.writer(), "Reverted '{}'", node.path.display())?;
        }

        Ok(if failed { EXIT_FAILURE } else { 0 })
    }
}
