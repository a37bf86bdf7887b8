//! A single parsed `CVS/Entries` record

use crate::artifacts::entries::{
    DIRECTORY_MARKER, FIELD_SEPARATOR, TIMESTAMP_FORMAT, TIMESTAMP_WRITE_FORMAT,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use derive_new::new;
use std::path::{Path, PathBuf};

/// Revision CVS records for a file that was added but never committed
const ADDED_REVISION: &str = "0";

/// What a record describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File {
        revision: String,
        /// `None` when the time field is not a timestamp (`Result of merge`, `dummy timestamp`)
        server_time: Option<DateTime<Utc>>,
        options: String,
        tag: String,
    },
    Directory,
}

/// A file or subdirectory CVS knows about
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TrackedEntry {
    pub name: String,
    /// Containing directory, relative to the working root
    pub directory: PathBuf,
    pub kind: EntryKind,
}

impl TrackedEntry {
    /// Parse one `Entries` line (without the `A `/`R ` log prefix).
    ///
    /// Returns `None` for lines that do not describe an entry, including the
    /// bare `D` line CVS writes for "no subdirectories".
    pub fn parse(line: &str, directory: &Path) -> Option<Self> {
        let mut fields = line.trim_end_matches(['\r', '\n']).split(FIELD_SEPARATOR);

        let marker = fields.next()?;
        let name = fields.next().filter(|name| !name.is_empty())?;

        let kind = match marker {
            "" => {
                let revision = fields.next()?;
                let time = fields.next()?;
                EntryKind::File {
                    revision: revision.to_string(),
                    server_time: parse_timestamp(time),
                    options: fields.next().unwrap_or_default().to_string(),
                    tag: fields.next().unwrap_or_default().to_string(),
                }
            }
            DIRECTORY_MARKER => EntryKind::Directory,
            _ => return None,
        };

        Some(TrackedEntry::new(
            name.to_string(),
            directory.to_path_buf(),
            kind,
        ))
    }

    /// Lookup key: containing directory joined with the name
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.name)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    pub fn revision(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { revision, .. } => Some(revision),
            EntryKind::Directory => None,
        }
    }

    pub fn server_time(&self) -> Option<DateTime<Utc>> {
        match &self.kind {
            EntryKind::File { server_time, .. } => *server_time,
            EntryKind::Directory => None,
        }
    }

    /// Scheduled with `cvs add`, not yet committed
    pub fn is_added(&self) -> bool {
        self.revision()
            .is_some_and(|rev| rev.is_empty() || rev == ADDED_REVISION)
    }

    /// Scheduled with `cvs remove`, not yet committed
    pub fn is_removed(&self) -> bool {
        self.revision().is_some_and(|rev| rev.starts_with('-'))
    }

    /// A file with a real revision on the server
    pub fn is_committed(&self) -> bool {
        self.revision().is_some() && !self.is_added() && !self.is_removed()
    }

    /// Whether a live modification time (unix seconds) means local edits.
    ///
    /// CVS records whole seconds, so sub-second precision is ignored. An
    /// unparseable server time means CVS itself considers the file changed.
    pub fn is_modified_at(&self, live_seconds: i64) -> bool {
        match self.server_time() {
            Some(server_time) => live_seconds > server_time.timestamp(),
            None => true,
        }
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");

    NaiveDateTime::parse_from_str(&normalized, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Render a timestamp the way CVS writes it in `Entries`
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format(TIMESTAMP_WRITE_FORMAT).to_string()
}
