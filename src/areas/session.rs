use crate::areas::ignore::IgnoreMatcher;
use crate::areas::metadata::MetadataReader;
use crate::areas::texts::ReferenceCache;
use crate::areas::workspace::{TreeWalk, Workspace};
use crate::artifacts::core::tool::ExternalTool;
use crate::artifacts::vcs::VcsKind;
use crate::config::Tools;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::{Path, PathBuf};

/// State for one vc invocation.
///
/// The parsed-metadata and ignore caches live here and die with the session.
pub struct Session {
    vcs: Option<VcsKind>,
    tools: Tools,
    writer: RefCell<Box<dyn Write>>,
    workspace: Workspace,
    metadata: MetadataReader,
    ignores: IgnoreMatcher,
    texts: ReferenceCache,
}

impl Session {
    pub fn new(
        path: &Path,
        vcs: Option<VcsKind>,
        tools: Tools,
        writer: Box<dyn Write>,
    ) -> Self {
        let root: Box<Path> = path.into();

        Session {
            vcs,
            writer: RefCell::new(writer),
            workspace: Workspace::new(root.clone()),
            metadata: MetadataReader::new(root.clone()),
            ignores: IgnoreMatcher::new(root.clone()),
            texts: ReferenceCache::new(root, tools.cvs.clone()),
            tools,
        }
    }

    pub fn path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn vcs(&self) -> Option<VcsKind> {
        self.vcs
    }

    pub fn tools(&self) -> &Tools {
        &self.tools
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn metadata(&self) -> &MetadataReader {
        &self.metadata
    }

    pub fn ignores(&self) -> &IgnoreMatcher {
        &self.ignores
    }

    pub fn texts(&self) -> &ReferenceCache {
        &self.texts
    }

    /// Walk the working tree with this session's metadata cache
    pub fn walk(&'_ self, starts: &[PathBuf]) -> TreeWalk<'_> {
        self.workspace.walk(starts, &self.metadata, None)
    }

    /// Like [`Session::walk`], without entering ignored untracked directories
    pub fn walk_pruned(&'_ self, starts: &[PathBuf]) -> TreeWalk<'_> {
        self.workspace
            .walk(starts, &self.metadata, Some(&self.ignores))
    }

    /// An external binary running in the working root.
    ///
    /// Pending output is flushed first so it stays ahead of the child's.
    pub fn tool<'s>(&'s self, program: &'s str) -> anyhow::Result<ExternalTool<'s>> {
        self.writer().flush()?;
        Ok(ExternalTool::new(program, self.path()))
    }

    /// The binary of the controlling VCS, if any
    pub fn vcs_program(&self) -> Option<&str> {
        self.vcs.map(|kind| match kind {
            VcsKind::Git => self.tools.git.as_str(),
            VcsKind::Cvs => self.tools.cvs.as_str(),
        })
    }
}
