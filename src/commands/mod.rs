//! vc command implementations
//!
//! - `dispatch`: detects the controlling VCS and routes an invocation
//! - `registry`: which commands vc simulates, and under which VCS
//! - `porcelain`: the simulated commands themselves
//!
//! Everything the registry does not know is forwarded to the real tool.

pub mod dispatch;
pub mod porcelain;
pub mod registry;

use crate::areas::session::Session;
use std::ffi::OsString;

/// One command line, as typed after `vc`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Arguments exactly as received, used when forwarding
    pub raw: Vec<OsString>,
    pub command: Option<String>,
    /// Arguments after the command
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(raw: Vec<OsString>) -> Self {
        let mut lossy = raw.iter().map(|arg| arg.to_string_lossy().into_owned());
        let command = lossy.next();
        let args = lossy.collect();

        Invocation { raw, command, args }
    }

    pub fn command(&self) -> &str {
        self.command.as_deref().unwrap_or_default()
    }
}

/// A simulated command: runs against a session and returns the exit status
pub trait Handler {
    fn run(&self, session: &Session, invocation: &Invocation) -> anyhow::Result<i32>;
}

impl<F> Handler for F
where
    F: Fn(&Session, &Invocation) -> anyhow::Result<i32>,
{
    fn run(&self, session: &Session, invocation: &Invocation) -> anyhow::Result<i32> {
        self(session, invocation)
    }
}
