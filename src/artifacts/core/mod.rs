//! Core utilities shared by the commands
//!
//! - `tool`: blocking invocation of the external binaries (VCS clients, diff, grep)

pub mod tool;
