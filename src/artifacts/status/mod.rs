//! Working tree status codes
//!
//! The single-letter codes printed by the simulated `status` command.

pub mod file_change;
