use crate::areas::session::Session;
use crate::commands::porcelain::parse_args;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "get-texts", no_binary_name = true)]
struct GetTextsArgs {
    paths: Vec<PathBuf>,
}

impl Session {
    pub fn get_texts(&self, args: &[String]) -> anyhow::Result<i32> {
        let Some(args) = parse_args::<GetTextsArgs>(self, "get-texts", args)? else {
            return Ok(0);
        };

        self.capture_texts(&args.paths)?;

        Ok(0)
    }

    /// Capture a reference copy of every tracked file below `paths`
    pub(crate) fn capture_texts(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        for node in self.walk(paths) {
            if let Some(entry) = node?.entry {
                self.texts().capture(&entry);
            }
        }

        Ok(())
    }
}
