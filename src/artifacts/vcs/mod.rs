//! Supported version-control tools and working copy detection

use crate::artifacts::entries::CONTROL_DIR as CVS_CONTROL_DIR;
use std::path::Path;

const GIT_CONTROL_DIR: &str = ".git";

/// Control directories the tree walker never descends into
pub const CONTROL_DIRS: [&str; 2] = [GIT_CONTROL_DIR, CVS_CONTROL_DIR];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VcsKind {
    Git,
    Cvs,
}

impl VcsKind {
    pub fn control_dir(&self) -> &'static str {
        match self {
            VcsKind::Git => GIT_CONTROL_DIR,
            VcsKind::Cvs => CVS_CONTROL_DIR,
        }
    }

    /// Find the tool controlling `dir`: `.git` first, then `CVS`.
    ///
    /// Only `dir` itself is looked at, never its ancestors.
    pub fn detect(dir: &Path) -> Option<Self> {
        [VcsKind::Git, VcsKind::Cvs]
            .into_iter()
            .find(|kind| dir.join(kind.control_dir()).exists())
    }
}

impl std::fmt::Display for VcsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VcsKind::Git => write!(f, "git"),
            VcsKind::Cvs => write!(f, "cvs"),
        }
    }
}
