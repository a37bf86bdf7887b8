//! Simulated command registry
//!
//! Handlers are keyed by the scope they apply to and the command name.
//! Lookup tries the detected VCS first, then commands valid under any VCS,
//! then commands that need no working copy at all. A miss means the
//! invocation belongs to the real tool.

use crate::areas::session::Session;
use crate::artifacts::vcs::VcsKind;
use crate::commands::{Handler, Invocation};
use std::collections::HashMap;

/// Short forms that resolve to the same handler
pub const COMMAND_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "st" => "status",
    "up" => "update",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Vcs(VcsKind),
    AnyVcs,
    /// Runs even outside a working copy
    Anywhere,
}

pub enum Dispatch<'r> {
    Simulated(&'r dyn Handler),
    Forward,
}

impl std::fmt::Debug for Dispatch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dispatch::Simulated(_) => write!(f, "Simulated"),
            Dispatch::Forward => write!(f, "Forward"),
        }
    }
}

#[derive(Default)]
pub struct Registry {
    handlers: HashMap<Scope, HashMap<&'static str, Box<dyn Handler>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands vc simulates
    pub fn standard() -> Self {
        let mut registry = Registry::new();
        let cvs = Scope::Vcs(VcsKind::Cvs);

        registry.register(cvs, "status", |session: &Session, invocation: &Invocation| {
            session.status(&invocation.args)
        });
        registry.register(cvs, "get-texts", |session: &Session, invocation: &Invocation| {
            session.get_texts(&invocation.args)
        });
        registry.register(cvs, "update", |session: &Session, invocation: &Invocation| {
            session.update(invocation)
        });
        registry.register(cvs, "diff", |session: &Session, invocation: &Invocation| {
            session.diff(invocation)
        });
        registry.register(cvs, "revert", |session: &Session, invocation: &Invocation| {
            session.revert(&invocation.args)
        });

        // git keeps its pristine copies itself
        registry.register(
            Scope::Vcs(VcsKind::Git),
            "get-texts",
            |_: &Session, _: &Invocation| -> anyhow::Result<i32> { Ok(0) },
        );

        registry.register(
            Scope::AnyVcs,
            "rgrep",
            |session: &Session, invocation: &Invocation| session.search(&invocation.args),
        );
        registry.register(
            Scope::Anywhere,
            "version",
            |session: &Session, _: &Invocation| session.version(),
        );

        registry
    }

    pub fn register<H>(&mut self, scope: Scope, name: &'static str, handler: H)
    where
        H: Handler + 'static,
    {
        self.handlers
            .entry(scope)
            .or_default()
            .insert(name, Box::new(handler));
    }

    pub fn lookup(&self, vcs: Option<VcsKind>, command: &str) -> Dispatch<'_> {
        let name = COMMAND_ALIASES.get(command).copied().unwrap_or(command);

        let scopes = match vcs {
            Some(kind) => vec![Scope::Vcs(kind), Scope::AnyVcs, Scope::Anywhere],
            None => vec![Scope::Anywhere],
        };

        scopes
            .into_iter()
            .find_map(|scope| self.handlers.get(&scope)?.get(name))
            .map(|handler| Dispatch::Simulated(handler.as_ref()))
            .unwrap_or(Dispatch::Forward)
    }
}
