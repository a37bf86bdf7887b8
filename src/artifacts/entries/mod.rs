//! CVS bookkeeping records
//!
//! Every CVS-controlled directory carries a `CVS/Entries` file with one line
//! per tracked file or subdirectory:
//!
//! ```text
//! /hello.c/1.4/Sun Jan  1 12:00:00 2006//
//! /logo.png/1.1/Mon Feb  6 08:30:00 2006/-kb/
//! /new.c/0/dummy timestamp//
//! D/lib////
//! ```
//!
//! Pending changes not yet folded into `Entries` live in `CVS/Entries.Log`,
//! as the same records prefixed with `A ` (add) or `R ` (remove).

pub mod tracked_entry;

/// Control directory CVS keeps in every checked-out directory
pub const CONTROL_DIR: &str = "CVS";
pub const ENTRIES_FILE: &str = "Entries";
pub const ENTRIES_LOG_FILE: &str = "Entries.Log";

pub const FIELD_SEPARATOR: char = '/';
pub const DIRECTORY_MARKER: &str = "D";

/// Timestamp layout CVS writes (asctime, always UTC), after whitespace is collapsed
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Layout used when writing timestamps the way CVS does
pub const TIMESTAMP_WRITE_FORMAT: &str = "%a %b %e %H:%M:%S %Y";
