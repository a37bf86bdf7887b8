//! Simulated commands
//!
//! Each one is a single pass over the tree walk, implemented on [`Session`].
//!
//! ## Commands
//!
//! - `status`: offline status from CVS metadata and modification times
//! - `get_texts`: fill the reference cache
//! - `update`: `cvs update`, then refresh the reference cache
//! - `diff`: diff against the reference cache, or the server as a fallback
//! - `revert`: restore locally modified files
//! - `search`: grep every file below the working directory
//! - `version`: vc's own version

pub mod diff;
pub mod get_texts;
pub mod revert;
pub mod search;
pub mod status;
pub mod update;
pub mod version;

use crate::areas::session::Session;
use crate::error::VcError;
use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;
use std::io::Write;

/// Parse the arguments of a simulated command.
///
/// `Ok(None)` means help was requested and already printed.
pub(crate) fn parse_args<T: Parser>(
    session: &Session,
    command: &str,
    args: &[String],
) -> anyhow::Result<Option<T>> {
    match T::try_parse_from(args) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(session.writer(), "{}", err.render())?;
            Ok(None)
        }
        Err(err) => Err(VcError::Usage {
            command: command.to_string(),
            message: err
                .to_string()
                .trim()
                .trim_start_matches("error: ")
                .to_string(),
        }
        .into()),
    }
}

/// Tell the user something on stderr without disturbing stdout
pub(crate) fn notice(message: &str) {
    eprintln!("{} {}", "vc:".yellow().bold(), message);
}

/// Switches given before the first operand (or before `--`), and everything after
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SplitArgs {
    pub switches: Vec<String>,
    pub operands: Vec<String>,
}

pub(crate) fn split_switches(args: &[String]) -> SplitArgs {
    let mut split = SplitArgs::default();
    let mut rest = args.iter();

    for arg in rest.by_ref() {
        if arg == "--" {
            break;
        }
        if arg.starts_with('-') && arg != "-" {
            split.switches.push(arg.clone());
        } else {
            split.operands.push(arg.clone());
            break;
        }
    }

    split.operands.extend(rest.cloned());
    split
}
