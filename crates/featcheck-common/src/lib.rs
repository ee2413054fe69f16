//! ---
//! fc_section: "01-core-functionality"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Shared primitives for featcheck crates."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
//! Shared primitives for the featcheck workspace: configuration loading,
//! tracing initialisation, and build metadata.

pub mod config;
pub mod logging;
pub mod version;

pub use config::{
    HarnessConfig, LoadedConfig, LoggingConfig, ReportConfig, ReportFormat, RunnerConfig,
    DEFAULT_CONFIG_FILE,
};
pub use logging::{init_tracing, LogFormat, LoggingGuard};
pub use version::VersionInfo;
