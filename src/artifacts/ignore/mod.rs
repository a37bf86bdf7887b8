//! `.cvsignore` patterns
//!
//! Each whitespace-separated token is a shell glob matched against a bare file
//! name. A lone `!` throws away every pattern read before it.

pub mod glob;

pub const IGNORE_FILE: &str = ".cvsignore";
pub const RESET_TOKEN: &str = "!";
