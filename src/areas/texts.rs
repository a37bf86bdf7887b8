//! Reference cache
//!
//! Offline copies of tracked files as of a given revision, so `diff` and
//! `revert` work without the server. Each copy lives next to the CVS metadata
//! of its directory:
//!
//! ```text
//! <dir>/CVS/vc-texts/<name>@<revision>
//! ```
//!
//! The copy's modification time is the server time CVS recorded for that
//! revision. Copies are never rewritten; a new revision gets a new file and
//! superseded ones stay where they are.

use crate::artifacts::core::tool::ExternalTool;
use crate::artifacts::entries::CONTROL_DIR;
use crate::artifacts::entries::tracked_entry::TrackedEntry;
use anyhow::Context;
use filetime::FileTime;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub const TEXTS_DIR: &str = "vc-texts";
const REVISION_SEPARATOR: char = '@';
const PARTIAL_SUFFIX: &str = ".partial";

#[derive(Debug)]
pub struct ReferenceCache {
    root: Box<Path>,
    cvs: String,
}

impl ReferenceCache {
    pub fn new(root: Box<Path>, cvs: String) -> Self {
        ReferenceCache { root, cvs }
    }

    /// Where the copy of `entry` lives, whether or not it exists yet
    pub fn cache_path(&self, entry: &TrackedEntry) -> Option<PathBuf> {
        let revision = entry.revision()?;

        Some(
            self.root
                .join(&entry.directory)
                .join(CONTROL_DIR)
                .join(TEXTS_DIR)
                .join(format!("{}{}{}", entry.name, REVISION_SEPARATOR, revision)),
        )
    }

    pub fn lookup(&self, entry: &TrackedEntry) -> Option<PathBuf> {
        self.cache_path(entry).filter(|path| path.is_file())
    }

    /// Make sure a reference copy of `entry` exists.
    ///
    /// Failures leave the cache without a copy; callers fall back to asking
    /// the server.
    pub fn capture(&self, entry: &TrackedEntry) {
        match self.try_capture(entry) {
            Ok(true) => tracing::debug!(path = %entry.path().display(), "captured reference text"),
            Ok(false) => {}
            Err(err) => tracing::debug!(
                path = %entry.path().display(),
                "no reference text captured: {err:#}"
            ),
        }
    }

    fn try_capture(&self, entry: &TrackedEntry) -> anyhow::Result<bool> {
        if !entry.is_committed() {
            return Ok(false);
        }
        let (Some(server_time), Some(target)) = (entry.server_time(), self.cache_path(entry))
        else {
            return Ok(false);
        };
        if target.is_file() {
            return Ok(false);
        }

        let live = self.root.join(entry.path());
        let live_seconds = std::fs::metadata(&live)
            .ok()
            .map(|metadata| FileTime::from_last_modification_time(&metadata).unix_seconds());

        let partial = target.with_file_name(format!(
            "{}{}",
            target
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            PARTIAL_SUFFIX
        ));
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        match live_seconds {
            Some(seconds) if !entry.is_modified_at(seconds) => {
                std::fs::copy(&live, &partial)
                    .with_context(|| format!("failed to copy {}", live.display()))?;
            }
            _ => {
                let Some(data) = self.fetch_revision(entry, true)? else {
                    return Ok(false);
                };
                std::fs::write(&partial, data)
                    .with_context(|| format!("failed to write {}", partial.display()))?;
            }
        }

        std::fs::rename(&partial, &target)
            .with_context(|| format!("failed to store {}", target.display()))?;
        filetime::set_file_mtime(&target, FileTime::from_unix_time(server_time.timestamp(), 0))
            .with_context(|| format!("failed to stamp {}", target.display()))?;

        Ok(true)
    }

    /// Ask CVS for the content of `entry` at its recorded revision.
    ///
    /// `None` when CVS could not provide it.
    pub fn fetch_revision(
        &self,
        entry: &TrackedEntry,
        quiet: bool,
    ) -> anyhow::Result<Option<Vec<u8>>> {
        let Some(revision) = entry.revision() else {
            return Ok(None);
        };
        let path = entry.path();

        let args = [
            OsStr::new("-Q"),
            OsStr::new("update"),
            OsStr::new("-p"),
            OsStr::new("-r"),
            OsStr::new(revision),
            path.as_os_str(),
        ];

        ExternalTool::new(&self.cvs, &self.root).capture(args, quiet)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::PermissionsExt;

    const SERVER_TIME: i64 = 1_136_116_800; // Sun Jan  1 12:00:00 2006 UTC
    const RECORD: &str = "/a.txt/1.1/Sun Jan  1 12:00:00 2006//";

    fn entry() -> TrackedEntry {
        TrackedEntry::parse(RECORD, Path::new("")).unwrap()
    }

    /// A stand-in `cvs` that prints fixed content, counting its invocations
    fn fake_cvs(dir: &TempDir, body: &str) -> anyhow::Result<String> {
        let script = dir.child("fake-cvs");
        script.write_str(&format!(
            "#!/bin/sh\necho run >> \"{}\"\n{}\n",
            dir.child("cvs-calls").path().display(),
            body
        ))?;
        std::fs::set_permissions(script.path(), std::fs::Permissions::from_mode(0o755))?;
        Ok(script.path().display().to_string())
    }

    fn calls(dir: &TempDir) -> usize {
        std::fs::read_to_string(dir.child("cvs-calls").path())
            .map(|log| log.lines().count())
            .unwrap_or(0)
    }

    fn stamp(path: &Path, seconds: i64) {
        filetime::set_file_mtime(path, FileTime::from_unix_time(seconds, 0)).unwrap();
    }

    #[test]
    fn unmodified_file_is_copied_without_calling_cvs() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let cache = ReferenceCache::new(dir.path().into(), fake_cvs(&dir, "printf server")?);
        dir.child("a.txt").write_str("local copy")?;
        stamp(dir.child("a.txt").path(), SERVER_TIME);

        cache.capture(&entry());

        let cached = cache.lookup(&entry()).expect("captured");
        assert_eq!(cached, dir.path().join("CVS/vc-texts/a.txt@1.1"));
        assert_eq!(std::fs::read_to_string(&cached)?, "local copy");
        assert_eq!(
            FileTime::from_last_modification_time(&std::fs::metadata(&cached)?).unix_seconds(),
            SERVER_TIME
        );
        assert_eq!(calls(&dir), 0);
        Ok(())
    }

    #[test]
    fn modified_file_is_fetched_from_cvs() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let cache = ReferenceCache::new(dir.path().into(), fake_cvs(&dir, "printf pristine")?);
        dir.child("a.txt").write_str("edited")?;
        stamp(dir.child("a.txt").path(), SERVER_TIME + 3600);

        cache.capture(&entry());

        let cached = cache.lookup(&entry()).expect("captured");
        assert_eq!(std::fs::read_to_string(cached)?, "pristine");
        assert_eq!(calls(&dir), 1);
        Ok(())
    }

    #[test]
    fn capture_is_idempotent() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let cache = ReferenceCache::new(dir.path().into(), fake_cvs(&dir, "printf pristine")?);
        dir.child("a.txt").write_str("edited")?;
        stamp(dir.child("a.txt").path(), SERVER_TIME + 3600);

        cache.capture(&entry());
        let cached = cache.lookup(&entry()).expect("captured");
        let before = std::fs::metadata(&cached)?.modified()?;
        dir.child("a.txt").write_str("edited again")?;
        cache.capture(&entry());

        assert_eq!(calls(&dir), 1);
        assert_eq!(std::fs::read_to_string(&cached)?, "pristine");
        assert_eq!(std::fs::metadata(&cached)?.modified()?, before);
        Ok(())
    }

    #[test]
    fn failed_fetch_leaves_no_copy() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let cache = ReferenceCache::new(
            dir.path().into(),
            fake_cvs(&dir, "echo 'cannot reach server' >&2\nexit 1")?,
        );
        dir.child("a.txt").write_str("edited")?;
        stamp(dir.child("a.txt").path(), SERVER_TIME + 3600);

        cache.capture(&entry());

        assert_eq!(cache.lookup(&entry()), None);
        assert!(!dir.path().join("CVS/vc-texts/a.txt@1.1.partial").exists());
        Ok(())
    }

    #[test]
    fn added_files_are_never_captured() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let cache = ReferenceCache::new(dir.path().into(), fake_cvs(&dir, "printf x")?);
        dir.child("n.c").write_str("new")?;
        let added = TrackedEntry::parse("/n.c/0/dummy timestamp//", Path::new("")).unwrap();

        cache.capture(&added);

        assert_eq!(cache.lookup(&added), None);
        assert_eq!(calls(&dir), 0);
        Ok(())
    }

    #[test]
    fn each_revision_gets_its_own_copy() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let cache = ReferenceCache::new(dir.path().into(), "cvs".to_string());
        let older = entry();
        let newer = TrackedEntry::parse("/a.txt/1.2/Sun Jan  1 12:00:00 2006//", Path::new(""))
            .unwrap();

        assert_ne!(cache.cache_path(&older), cache.cache_path(&newer));
        Ok(())
    }
}
