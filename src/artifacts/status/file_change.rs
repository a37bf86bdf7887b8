use crate::artifacts::entries::tracked_entry::TrackedEntry;
use std::path::Path;

/// How a working file differs from what CVS last recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChange {
    Untracked,
    Added,
    Removed,
    Modified,
}

impl FileChange {
    /// Classify a tracked file given its live modification time in unix seconds.
    ///
    /// Returns `None` when the file is up to date.
    pub fn of_tracked(entry: &TrackedEntry, live_seconds: Option<i64>) -> Option<Self> {
        if entry.is_directory() {
            return None;
        }
        if entry.is_added() {
            return Some(FileChange::Added);
        }
        if entry.is_removed() {
            return Some(FileChange::Removed);
        }

        match live_seconds {
            Some(seconds) if entry.is_modified_at(seconds) => Some(FileChange::Modified),
            _ => None,
        }
    }

    pub fn line(&self, path: &Path) -> String {
        format!("{} {}", self, path.display())
    }
}

impl From<&FileChange> for &str {
    fn from(change: &FileChange) -> Self {
        match change {
            FileChange::Untracked => "?",
            FileChange::Added => "A",
            FileChange::Removed => "R",
            FileChange::Modified => "M",
        }
    }
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let change_str: &str = self.into();
        write!(f, "{}", change_str)
    }
}
