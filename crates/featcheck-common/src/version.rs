//! ---
//! fc_section: "01-core-functionality"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Build metadata surfaced by the CLI version flag."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::fmt;

use serde::Serialize;

const UNKNOWN: &str = "unknown";

/// Resolves a `vergen` variable at compile time, `unknown` when it was not emitted.
macro_rules! build_var {
    ($name:literal) => {
        match option_env!($name) {
            Some(value) => value,
            None => UNKNOWN,
        }
    };
}

/// Build metadata captured by the `featcheck-common` build script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    /// Workspace semantic version.
    pub semver: &'static str,
    /// Commit the binary was built from.
    pub git_sha: &'static str,
    pub build_timestamp: &'static str,
    pub target: &'static str,
    pub opt_level: &'static str,
}

impl VersionInfo {
    /// Metadata of the running build.
    pub const fn current() -> Self {
        Self {
            semver: env!("CARGO_PKG_VERSION"),
            git_sha: build_var!("VERGEN_GIT_SHA"),
            build_timestamp: build_var!("VERGEN_BUILD_TIMESTAMP"),
            target: build_var!("VERGEN_CARGO_TARGET_TRIPLE"),
            opt_level: build_var!("VERGEN_CARGO_OPT_LEVEL"),
        }
    }

    /// One-line `featcheck vX (git SHA)` form used in log records.
    #[must_use]
    pub fn banner(&self) -> String {
        self.to_string()
    }

    /// Multi-line form printed by `--version`.
    #[must_use]
    pub fn extended(&self) -> String {
        let mut rendered = self.to_string();
        for (label, value) in [
            ("Built", self.build_timestamp),
            ("Target", self.target),
            ("Opt-level", self.opt_level),
        ] {
            rendered.push('\n');
            rendered.push_str(label);
            rendered.push_str(": ");
            rendered.push_str(value);
        }
        rendered
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "featcheck v{} (git {})", self.semver, self.git_sha)
    }
}
