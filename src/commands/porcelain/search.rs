use crate::areas::session::Session;
use crate::commands::porcelain::split_switches;
use crate::error::VcError;
use std::ffi::OsString;
use std::path::PathBuf;

// grep's own conventions
const MATCHED: i32 = 0;
const NO_MATCH: i32 = 1;
const TROUBLE: i32 = 2;

impl Session {
    /// `grep` over every file below the given paths, control directories excluded
    pub fn search(&self, args: &[String]) -> anyhow::Result<i32> {
        let split = split_switches(args);
        let mut operands = split.operands.into_iter();
        let Some(pattern) = operands.next() else {
            return Err(VcError::Usage {
                command: "rgrep".to_string(),
                message: "usage: vc rgrep [grep switches…] PATTERN [path…]".to_string(),
            }
            .into());
        };
        let paths: Vec<PathBuf> = operands.map(PathBuf::from).collect();

        let mut matched = false;
        let mut trouble = false;
        for node in self.walk(&paths) {
            let node = node?;

            // `-H` first so a `-h` from the user still wins
            let mut grep_args: Vec<OsString> = vec!["-H".into()];
            grep_args.extend(split.switches.iter().map(OsString::from));
            grep_args.extend(["-e".into(), OsString::from(&pattern)]);
            grep_args.push(node.path.into_os_string());

            match self.tool(&self.tools().grep)?.run(grep_args)? {
                MATCHED => matched = true,
                NO_MATCH => {}
                code => {
                    tracing::debug!(code, "grep reported trouble");
                    trouble = true;
                }
            }
        }

        Ok(if trouble {
            TROUBLE
        } else if matched {
            MATCHED
        } else {
            NO_MATCH
        })
    }
}
