//! Data structures behind the simulated commands
//!
//! - `core`: external tool invocation
//! - `entries`: `CVS/Entries` records
//! - `ignore`: `.cvsignore` glob rules
//! - `status`: status codes
//! - `vcs`: supported tools and working copy detection

pub mod core;
pub mod entries;
pub mod ignore;
pub mod status;
pub mod vcs;
