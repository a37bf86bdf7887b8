//! Working tree access and traversal
//!
//! The walk visits the tree the way CVS does: every ordinary subdirectory is
//! entered, control directories never are, and each regular file is paired
//! with the record CVS keeps for it in its own directory.

use crate::areas::ignore::IgnoreMatcher;
use crate::areas::metadata::MetadataReader;
use crate::artifacts::entries::tracked_entry::TrackedEntry;
use crate::artifacts::vcs::CONTROL_DIRS;
use anyhow::Context;
use chrono::{DateTime, Utc};
use derive_new::new;
use filetime::FileTime;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A visited file and what CVS knows about it
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkingTreeNode {
    /// Relative to the working root
    pub path: PathBuf,
    pub entry: Option<TrackedEntry>,
}

impl WorkingTreeNode {
    pub fn is_tracked(&self) -> bool {
        self.entry.is_some()
    }
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily walk `starts` (relative to the root), or the whole root when empty.
    ///
    /// With `prune` set, untracked directories ignored by their parent's
    /// `.cvsignore` are not entered.
    pub fn walk<'s>(
        &'s self,
        starts: &[PathBuf],
        metadata: &'s MetadataReader,
        prune: Option<&'s IgnoreMatcher>,
    ) -> TreeWalk<'s> {
        let starts = if starts.is_empty() {
            vec![PathBuf::new()]
        } else {
            starts.to_vec()
        };

        TreeWalk {
            workspace: self,
            metadata,
            prune,
            starts: starts.into_iter(),
            current: None,
        }
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.path.as_ref())
            .unwrap_or(path)
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect()
    }

    pub fn absolute(&self, path: &Path) -> PathBuf {
        self.path.join(path)
    }

    /// Modification time in whole unix seconds, `None` if the file is gone
    pub fn mtime_seconds(&self, path: &Path) -> Option<i64> {
        std::fs::metadata(self.absolute(path))
            .ok()
            .map(|metadata| FileTime::from_last_modification_time(&metadata).unix_seconds())
    }

    pub fn set_mtime(&self, path: &Path, time: &DateTime<Utc>) -> anyhow::Result<()> {
        let file_path = self.absolute(path);
        filetime::set_file_mtime(&file_path, FileTime::from_unix_time(time.timestamp(), 0))
            .with_context(|| format!("failed to set modification time of {}", path.display()))
    }

    pub fn write_file(&self, path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.absolute(path))
            .with_context(|| format!("failed to open file: {}", path.display()))?;

        file.write_all(data)
            .with_context(|| format!("failed to write to file: {}", path.display()))
    }

    /// Overwrite a working file with the content of `source`.
    ///
    /// The working file is rewritten in place so it keeps its own mode.
    pub fn restore_from(&self, path: &Path, source: &Path) -> anyhow::Result<()> {
        let mut reader = std::fs::File::open(source)
            .with_context(|| format!("failed to open {}", source.display()))?;
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.absolute(path))
            .with_context(|| format!("failed to open file: {}", path.display()))?;

        std::io::copy(&mut reader, &mut file)
            .with_context(|| format!("failed to restore {}", path.display()))?;

        Ok(())
    }
}

pub struct TreeWalk<'s> {
    workspace: &'s Workspace,
    metadata: &'s MetadataReader,
    prune: Option<&'s IgnoreMatcher>,
    starts: std::vec::IntoIter<PathBuf>,
    current: Option<walkdir::IntoIter>,
}

impl Iterator for TreeWalk<'_> {
    type Item = anyhow::Result<WorkingTreeNode>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(walker) = self.current.as_mut() else {
                let start = self.starts.next()?;
                self.current = Some(
                    WalkDir::new(self.workspace.absolute(&start))
                        .sort_by_file_name()
                        .into_iter(),
                );
                continue;
            };

            let dir_entry = match walker.next() {
                Some(Ok(dir_entry)) => dir_entry,
                Some(Err(err)) => {
                    return Some(
                        Err::<WorkingTreeNode, _>(err).context("failed to walk the working tree"),
                    );
                }
                None => {
                    self.current = None;
                    continue;
                }
            };

            let relative = self.workspace.relative(dir_entry.path());

            if dir_entry.file_type().is_dir() {
                match skip_dir(self.metadata, self.prune, &relative, dir_entry.depth()) {
                    Ok(true) => walker.skip_current_dir(),
                    Ok(false) => {}
                    Err(err) => return Some(Err(err)),
                }
                continue;
            }

            if !dir_entry.path().is_file() {
                continue;
            }

            return Some(
                self.metadata
                    .entry(&relative)
                    .map(|entry| WorkingTreeNode::new(relative, entry)),
            );
        }
    }
}

fn skip_dir(
    metadata: &MetadataReader,
    prune: Option<&IgnoreMatcher>,
    relative: &Path,
    depth: usize,
) -> anyhow::Result<bool> {
    let is_control_dir = relative
        .file_name()
        .is_some_and(|name| CONTROL_DIRS.iter().any(|control| name == *control));
    if is_control_dir {
        return Ok(true);
    }

    // explicitly requested starting points are always entered
    let Some(ignores) = prune.filter(|_| depth > 0) else {
        return Ok(false);
    };

    let tracked = metadata
        .entry(relative)?
        .is_some_and(|entry| entry.is_directory());

    Ok(!tracked && ignores.is_ignored(relative)?)
}
