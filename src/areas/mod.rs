//! Working copy components
//!
//! Everything a single invocation needs to look at the working tree:
//!
//! - `session`: request-scoped state tying the pieces below together
//! - `metadata`: `CVS/Entries` reader with a per-run cache
//! - `ignore`: `.cvsignore` matcher with a per-run cache
//! - `workspace`: file access and the tree walker
//! - `texts`: reference cache of last-known-good file contents

pub mod ignore;
pub mod metadata;
pub mod session;
pub mod texts;
pub mod workspace;
