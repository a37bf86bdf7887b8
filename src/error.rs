//! Error types for vc
//!
//! [`VcError`] covers the failures a user is expected to act on. Anything else
//! travels as an `anyhow::Error` with context attached at the failing call.

use std::path::PathBuf;
use thiserror::Error;

/// Exit status for usage and capability errors
pub const EXIT_FAILURE: i32 = 1;

/// Exit status when an external binary cannot be started
pub const EXIT_TOOL_MISSING: i32 = 127;

#[derive(Debug, Error)]
pub enum VcError {
    /// Neither a git nor a CVS control directory governs the working directory.
    #[error("{}: not under version control", dir.display())]
    NotUnderVersionControl { dir: PathBuf },

    /// The command exists but the requested mode cannot be simulated.
    #[error("{command}: {detail}")]
    Unsupported { command: String, detail: String },

    /// Malformed invocation of a simulated command.
    #[error("{command}: {message}")]
    Usage { command: String, message: String },

    /// An external binary could not be spawned.
    #[error("cannot run '{tool}'")]
    ToolLaunch {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

impl VcError {
    pub fn exit_code(&self) -> i32 {
        match self {
            VcError::ToolLaunch { .. } => EXIT_TOOL_MISSING,
            _ => EXIT_FAILURE,
        }
    }
}

/// Pick the process exit status for an error bubbling out of a command.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<VcError>())
        .map(VcError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
