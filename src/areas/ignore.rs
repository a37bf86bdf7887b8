//! Ignore matcher
//!
//! Rules come from the `.cvsignore` of the file's own directory only; a
//! parent's patterns never apply below it.

use crate::artifacts::ignore::glob::IgnoreRule;
use crate::artifacts::ignore::{IGNORE_FILE, RESET_TOKEN};
use anyhow::Context;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug)]
pub struct IgnoreMatcher {
    root: Box<Path>,
    cache: RefCell<HashMap<PathBuf, Rc<Vec<IgnoreRule>>>>,
}

impl IgnoreMatcher {
    pub fn new(root: Box<Path>) -> Self {
        IgnoreMatcher {
            root,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Compiled rules of `dir` (relative to the working root)
    pub fn rules(&self, dir: &Path) -> anyhow::Result<Rc<Vec<IgnoreRule>>> {
        if let Some(rules) = self.cache.borrow().get(dir) {
            return Ok(rules.clone());
        }

        let rules = Rc::new(self.read(dir)?);
        self.cache.borrow_mut().insert(dir.to_path_buf(), rules.clone());

        Ok(rules)
    }

    /// Whether the basename of `path` matches a rule of its own directory
    pub fn is_ignored(&self, path: &Path) -> anyhow::Result<bool> {
        let Some(name) = path.file_name().map(|name| name.to_string_lossy()) else {
            return Ok(false);
        };
        let dir = path.parent().unwrap_or(Path::new(""));

        Ok(self.rules(dir)?.iter().any(|rule| rule.matches(&name)))
    }

    fn read(&self, dir: &Path) -> anyhow::Result<Vec<IgnoreRule>> {
        let file = self.root.join(dir).join(IGNORE_FILE);
        let content = match std::fs::read(&file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", file.display()));
            }
        };

        Ok(parse_rules(&content))
    }
}

/// Compile every pattern token, skipping the ones that do not compile
fn parse_rules(content: &str) -> Vec<IgnoreRule> {
    let mut rules = Vec::new();

    for token in content.split_whitespace() {
        if token == RESET_TOKEN {
            rules.clear();
            continue;
        }

        match IgnoreRule::try_parse(token) {
            Ok(rule) => rules.push(rule),
            Err(err) => tracing::warn!(token, "skipping ignore pattern: {err:#}"),
        }
    }

    rules
}
