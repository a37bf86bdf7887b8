#![allow(dead_code)]

pub mod command;
pub mod file;

/// Checkout time CVS recorded for every fixture file: Sun Jan  1 12:00:00 2006 UTC
pub const SERVER_TIME: i64 = 1_136_116_800;

/// A minute after checkout, enough to count as a local edit
pub const EDIT_TIME: i64 = SERVER_TIME + 60;

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
