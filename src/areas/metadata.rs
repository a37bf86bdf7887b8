//! CVS metadata reader
//!
//! Parses `CVS/Entries` (then replays `CVS/Entries.Log`) for one directory at
//! a time. Each directory is read at most once per session: later calls return
//! the first snapshot even if CVS rewrote the file in between.

use crate::artifacts::entries::tracked_entry::TrackedEntry;
use crate::artifacts::entries::{CONTROL_DIR, ENTRIES_FILE, ENTRIES_LOG_FILE};
use anyhow::Context;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Tracked records of one directory, keyed by name
pub type DirectoryEntries = BTreeMap<String, TrackedEntry>;

#[derive(Debug)]
pub struct MetadataReader {
    root: Box<Path>,
    cache: RefCell<HashMap<PathBuf, Rc<DirectoryEntries>>>,
}

impl MetadataReader {
    pub fn new(root: Box<Path>) -> Self {
        MetadataReader {
            root,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Records for `dir` (relative to the working root).
    ///
    /// A directory without CVS metadata simply has no records.
    pub fn entries(&self, dir: &Path) -> anyhow::Result<Rc<DirectoryEntries>> {
        if let Some(entries) = self.cache.borrow().get(dir) {
            return Ok(entries.clone());
        }

        let entries = Rc::new(self.read(dir)?);
        tracing::debug!(dir = %dir.display(), count = entries.len(), "parsed CVS entries");
        self.cache
            .borrow_mut()
            .insert(dir.to_path_buf(), entries.clone());

        Ok(entries)
    }

    /// The record for a relative path, looked up by name in its own directory
    pub fn entry(&self, path: &Path) -> anyhow::Result<Option<TrackedEntry>> {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return Ok(None);
        };
        let dir = path.parent().unwrap_or(Path::new(""));

        Ok(self.entries(dir)?.get(name).cloned())
    }

    fn read(&self, dir: &Path) -> anyhow::Result<DirectoryEntries> {
        let control_dir = self.root.join(dir).join(CONTROL_DIR);
        let mut entries = DirectoryEntries::new();

        let Some(content) = read_optional(&control_dir.join(ENTRIES_FILE))? else {
            return Ok(entries);
        };

        for line in content.lines().filter(|line| !line.is_empty()) {
            match TrackedEntry::parse(line, dir) {
                Some(entry) => {
                    entries.insert(entry.name.clone(), entry);
                }
                None => tracing::debug!(line, "skipping unrecognised Entries line"),
            }
        }

        if let Some(log) = read_optional(&control_dir.join(ENTRIES_LOG_FILE))? {
            apply_log(&mut entries, &log, dir);
        }

        Ok(entries)
    }
}

/// Replay pending `A`/`R` records on top of the parsed entries
fn apply_log(entries: &mut DirectoryEntries, log: &str, dir: &Path) {
    for line in log.lines() {
        let (op, record) = match line.split_once(' ') {
            Some((op, record)) => (op, record),
            None => continue,
        };

        match (op, TrackedEntry::parse(record, dir)) {
            ("A", Some(entry)) => {
                entries.insert(entry.name.clone(), entry);
            }
            ("R", Some(entry)) => {
                entries.remove(&entry.name);
            }
            _ => tracing::debug!(line, "skipping unrecognised Entries.Log line"),
        }
    }
}

fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}
