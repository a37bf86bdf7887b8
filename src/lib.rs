//! vc: one command line over git and CVS
//!
//! Invocations are routed to whichever VCS controls the current directory.
//! Subcommands CVS lacks (or only offers over the network) are simulated from
//! CVS's own per-directory metadata:
//!
//! - `areas`: session state, metadata reader, ignore matcher, tree walker, reference cache
//! - `artifacts`: parsed records, glob rules, status codes and external tool plumbing
//! - `commands`: simulated commands and the dispatcher
//! - `config`: names of the external binaries
//! - `error`: user-facing error taxonomy

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod error;
