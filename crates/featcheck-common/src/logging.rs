//! ---
//! fc_section: "01-core-functionality"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Tracing subscriber initialisation for featcheck binaries."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const LOG_ENV: &str = "FEATCHECK_LOG";

/// Available log formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    #[default]
    Pretty,
    StructuredJson,
}

/// Keeps the non-blocking writers alive. Dropping it flushes pending records.
#[must_use = "dropping the guard stops log delivery"]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

/// Initialise the tracing subscriber from configuration and environment.
///
/// * `FEATCHECK_LOG` overrides the filter (e.g. `info`, `featcheck_harness=debug`).
///   When unset `RUST_LOG` is honoured, finally falling back to `config.level`.
/// * Records go to stderr so that stdout carries nothing but the report.
/// * A rolling daily JSON file is added when `config.directory` is set.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let mut guards = Vec::new();

    let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    guards.push(stderr_guard);

    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!(
                "invalid {} directive ({}); defaulting to {}",
                LOG_ENV, err, config.level
            );
            EnvFilter::new(&config.level)
        }),
        Err(_) => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
        }
    };

    let fmt_layer = match config.format {
        LogFormat::StructuredJson => fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .with_writer(stderr_writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(stderr_writer)
            .boxed(),
    };

    let file_layer = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).with_context(|| {
                format!("unable to create log directory {}", directory.display())
            })?;
            let prefix = config
                .file_prefix
                .clone()
                .unwrap_or_else(|| service_name.to_owned());
            let (file_writer, file_guard) =
                tracing_appender::non_blocking(daily(directory, format!("{prefix}.log")));
            guards.push(file_guard);
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .json()
                    .with_writer(file_writer)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(file_layer)
        .try_init()
        .ok();

    info!(service = %service_name, format = ?config.format, file_sink = config.directory.is_some(), "tracing initialised");
    Ok(LoggingGuard { _guards: guards })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_with_file_sink_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let config = LoggingConfig {
            directory: Some(logs.clone()),
            ..LoggingConfig::default()
        };
        let guard = init_tracing("featcheck-test", &config).unwrap();
        assert!(logs.is_dir());
        drop(guard);
    }

    #[test]
    fn log_format_uses_kebab_case() {
        let config: LoggingConfig = toml::from_str("format = \"structured-json\"").unwrap();
        assert_eq!(config.format, LogFormat::StructuredJson);
        assert!(toml::from_str::<LoggingConfig>("format = \"StructuredJson\"").is_err());
    }
}
