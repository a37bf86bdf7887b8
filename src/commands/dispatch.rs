//! Routing of one invocation
//!
//! The controlling VCS is detected from the working directory, the registry
//! is asked for a simulated command, and anything it does not know goes to
//! the real tool with the arguments untouched. The forwarded tool runs as a
//! child and its exit status becomes vc's own.

use crate::areas::session::Session;
use crate::artifacts::vcs::VcsKind;
use crate::commands::Invocation;
use crate::commands::registry::{Dispatch, Registry};
use crate::config::Tools;
use crate::error::VcError;
use derive_new::new;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

#[derive(new)]
pub struct Dispatcher {
    registry: Registry,
    tools: Tools,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new(Registry::standard(), Tools::default())
    }
}

impl Dispatcher {
    /// Run `raw` (the arguments after the program name) from `cwd`, writing
    /// vc's own output to `writer`. Returns the exit status.
    pub fn run(
        &self,
        cwd: &Path,
        raw: Vec<OsString>,
        writer: Box<dyn Write>,
    ) -> anyhow::Result<i32> {
        let invocation = Invocation::new(raw);
        let vcs = VcsKind::detect(cwd);
        let session = Session::new(cwd, vcs, self.tools.clone(), writer);

        let dispatch = self.registry.lookup(vcs, invocation.command());
        tracing::debug!(?vcs, command = invocation.command(), ?dispatch, "dispatching");

        let result = match dispatch {
            Dispatch::Simulated(handler) => handler.run(&session, &invocation),
            Dispatch::Forward => forward(&session, &invocation),
        };
        session.writer().flush()?;

        result
    }
}

/// Hand the invocation to the controlling VCS unchanged
pub fn forward(session: &Session, invocation: &Invocation) -> anyhow::Result<i32> {
    let program = session
        .vcs_program()
        .ok_or_else(|| VcError::NotUnderVersionControl {
            dir: session.path().to_path_buf(),
        })?;

    session.tool(program)?.run(&invocation.raw)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &TempDir, name: &str, body: &str) -> anyhow::Result<String> {
        let file = dir.child(name);
        file.write_str(&format!("#!/bin/sh\n{body}\n"))?;
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o755))?;
        Ok(file.path().display().to_string())
    }

    #[test]
    fn unknown_commands_are_forwarded_with_their_exit_code() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("CVS").create_dir_all()?;
        let log = dir.child("args.log");
        let cvs = script(
            &dir,
            "fake-cvs",
            &format!("printf '%s\\n' \"$@\" > \"{}\"\nexit 7", log.path().display()),
        )?;
        let tools = Tools::new("git".into(), cvs, "diff".into(), "grep".into());
        let dispatcher = Dispatcher::new(Registry::standard(), tools);

        let code = dispatcher.run(
            dir.path(),
            vec!["log".into(), "-r".into(), "1.2".into(), "--".into()],
            Box::new(std::io::sink()),
        )?;

        assert_eq!(code, 7);
        assert_eq!(std::fs::read_to_string(log.path())?, "log\n-r\n1.2\n--\n");
        Ok(())
    }

    #[test]
    fn simulated_commands_do_not_reach_the_vcs() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("CVS").create_dir_all()?;
        let cvs = script(&dir, "fake-cvs", "exit 99")?;
        let tools = Tools::new("git".into(), cvs, "diff".into(), "grep".into());
        let dispatcher = Dispatcher::new(Registry::standard(), tools);

        let code = dispatcher.run(dir.path(), vec!["version".into()], Box::new(std::io::sink()))?;

        assert_eq!(code, 0);
        Ok(())
    }
}
