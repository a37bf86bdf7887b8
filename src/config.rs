//! External tool configuration
//!
//! vc shells out to four binaries. Each can be overridden through an
//! environment variable, which is read once in `main` and never by the
//! command engine itself.

use derive_new::new;

const GIT_VAR: &str = "VC_GIT";
const CVS_VAR: &str = "VC_CVS";
const DIFF_VAR: &str = "VC_DIFF";
const GREP_VAR: &str = "VC_GREP";

/// Names (or paths) of the external binaries vc runs.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Tools {
    pub git: String,
    pub cvs: String,
    pub diff: String,
    pub grep: String,
}

impl Default for Tools {
    fn default() -> Self {
        Tools::new(
            "git".to_string(),
            "cvs".to_string(),
            "diff".to_string(),
            "grep".to_string(),
        )
    }
}

impl Tools {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key))
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Unset or empty variables keep the default binary name.
    pub fn from_env_with<F, E>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, E>,
    {
        let defaults = Tools::default();
        let pick = |key: &str, default: String| {
            lookup(key)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(default)
        };

        Tools {
            git: pick(GIT_VAR, defaults.git),
            cvs: pick(CVS_VAR, defaults.cvs),
            diff: pick(DIFF_VAR, defaults.diff),
            grep: pick(GREP_VAR, defaults.grep),
        }
    }
}
