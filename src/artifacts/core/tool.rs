//! External process invocation
//!
//! Every external tool runs as a blocking child of vc. Its standard output is
//! either inherited (so it interleaves with vc's own output in traversal
//! order) or captured when vc needs the bytes, e.g. a fetched revision.
//! There are no timeouts: a hung child hangs vc.

use crate::error::VcError;
use derive_new::new;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Status reported for a child killed by a signal, added to the signal number
const SIGNAL_EXIT_BASE: i32 = 128;

#[derive(Debug, Clone, new)]
pub struct ExternalTool<'a> {
    program: &'a str,
    cwd: &'a Path,
}

impl ExternalTool<'_> {
    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(self.program);
        command.current_dir(self.cwd).args(args);
        command
    }

    /// Run with inherited stdio and return the child's exit code.
    pub fn run<I, S>(&self, args: I) -> anyhow::Result<i32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = self.command(args);
        tracing::debug!(?command, "running");

        let status = command.status().map_err(|source| VcError::ToolLaunch {
            tool: self.program.to_string(),
            source,
        })?;

        Ok(exit_code(status))
    }

    /// Run and collect standard output.
    ///
    /// Returns `None` when the child exits unsuccessfully. With `quiet` the
    /// child's stderr is discarded, otherwise it reaches the user.
    pub fn capture<I, S>(&self, args: I, quiet: bool) -> anyhow::Result<Option<Vec<u8>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = self.command(args);
        command
            .stdin(Stdio::null())
            .stderr(if quiet { Stdio::null() } else { Stdio::inherit() });
        tracing::debug!(?command, "capturing");

        let output = command.output().map_err(|source| VcError::ToolLaunch {
            tool: self.program.to_string(),
            source,
        })?;

        if output.status.success() {
            Ok(Some(output.stdout))
        } else {
            tracing::debug!(status = ?output.status, program = self.program, "child failed");
            Ok(None)
        }
    }
}

/// Exit code of a finished child, shell style for signal deaths
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return SIGNAL_EXIT_BASE + signal;
        }
    }

    SIGNAL_EXIT_BASE
}
