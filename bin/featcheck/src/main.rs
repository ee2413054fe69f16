//! ---
//! fc_section: "05-cli"
//! fc_subsection: "binary"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Command-line entry point running the feature catalog."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::fs;
use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use featcheck_common::config::{HarnessConfig, LoadedConfig, ReportFormat, DEFAULT_CONFIG_FILE};
use featcheck_common::logging::init_tracing;
use featcheck_common::version::VersionInfo;
use featcheck_harness::{report, Category, HarnessMetrics, Runner, RunnerSettings, Selection};
use prometheus::{Encoder, TextEncoder};
use tracing::{debug, info, warn};

/// Exit code for configuration and registration failures, distinct from case failures.
const SETUP_FAILURE: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Feature-conformance harness for the language and library tour",
    long_about = None
)]
struct Cli {
    #[arg(long, value_name = "SUBSTRING", help = "Run only cases whose name contains SUBSTRING")]
    filter: Option<String>,

    #[arg(long, value_name = "FILE", help = "Path to configuration file")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "MS", help = "Per-case deadline in milliseconds (0 disables)")]
    deadline_ms: Option<u64>,

    #[arg(long, value_name = "N", help = "Worker threads; more than one runs cases in parallel")]
    workers: Option<usize>,

    #[arg(long, value_enum, help = "Report format on standard output")]
    format: Option<CliFormat>,

    #[arg(long, value_enum, help = "Restrict the run to one half of the tour")]
    category: Option<CliCategory>,

    #[arg(long, help = "List the selected cases instead of running them")]
    list: bool,

    #[arg(long, value_name = "FILE", help = "Write Prometheus metrics for the run to FILE")]
    metrics_file: Option<PathBuf>,

    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print extended version information and exit"
    )]
    version: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Text,
    Json,
}

impl From<CliFormat> for ReportFormat {
    fn from(value: CliFormat) -> Self {
        match value {
            CliFormat::Text => ReportFormat::Text,
            CliFormat::Json => ReportFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliCategory {
    Language,
    Library,
}

impl From<CliCategory> for Category {
    fn from(value: CliCategory) -> Self {
        match value {
            CliCategory::Language => Category::Language,
            CliCategory::Library => Category::Library,
        }
    }
}

impl Cli {
    fn load_config(&self) -> Result<LoadedConfig> {
        match &self.config {
            Some(path) => Ok(LoadedConfig {
                config: HarnessConfig::from_path(path)?,
                source: Some(path.clone()),
            }),
            None => HarnessConfig::load_with_source(&[DEFAULT_CONFIG_FILE]),
        }
    }

    /// Flags take precedence over file values.
    fn apply_overrides(&self, config: &mut HarnessConfig) {
        if let Some(filter) = &self.filter {
            config.runner.filter = Some(filter.clone());
        }
        if let Some(deadline_ms) = self.deadline_ms {
            config.runner.deadline = Duration::from_millis(deadline_ms);
        }
        if let Some(workers) = self.workers {
            config.runner.workers = workers;
        }
        if let Some(format) = self.format {
            config.report.format = format.into();
        }
    }

    fn selection(&self, config: &HarnessConfig) -> Selection {
        let mut selection = Selection::everything();
        if let Some(filter) = &config.runner.filter {
            selection = selection.with_filter(filter.clone());
        }
        if let Some(category) = self.category {
            selection = selection.with_category(category.into());
        }
        selection
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", VersionInfo::current().extended());
        return ExitCode::SUCCESS;
    }
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("featcheck: {err:#}");
            ExitCode::from(SETUP_FAILURE)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let loaded = cli.load_config()?;
    let mut config = loaded.config;
    cli.apply_overrides(&mut config);
    config.validate().context("invalid configuration")?;

    let _guard = init_tracing("featcheck", &config.logging)?;
    let source = loaded
        .source
        .as_deref()
        .map_or_else(|| "defaults".to_owned(), |path| path.display().to_string());
    info!(%source, version = %VersionInfo::current().banner(), "configuration loaded");

    let registry =
        featcheck_catalog::build_registry().context("failed to register the feature catalog")?;
    let selection = cli.selection(&config);

    if cli.list {
        let mut stdout = io::stdout().lock();
        for case in registry.select(&selection) {
            writeln!(
                stdout,
                "{}\t{}\t{}",
                case.name(),
                case.category(),
                case.description()
            )?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let settings = RunnerSettings::default()
        .with_deadline(config.runner.effective_deadline())
        .with_workers(config.runner.workers);
    let metrics_registry = Arc::new(prometheus::Registry::new());
    let metrics = HarnessMetrics::new(Arc::clone(&metrics_registry))?;
    let runner = Runner::new(settings)?.with_metrics(metrics);

    let outcomes = {
        let _quiet = QuietPanics::install();
        runner.run_all(registry.select(&selection))?
    };
    if outcomes.is_empty() {
        warn!(filter = ?config.runner.filter, "selection matched no cases");
    }
    let report = report(outcomes);
    info!(
        total = report.summary.total,
        passed = report.summary.passed,
        failed = report.summary.failed,
        errored = report.summary.errored,
        "run complete"
    );

    let rendered = match config.report.format {
        ReportFormat::Text => report.render_text(),
        ReportFormat::Json => {
            let mut json = report.render_json()?;
            json.push('\n');
            json
        }
    };
    io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .context("failed to write report")?;

    if let Some(path) = &cli.metrics_file {
        write_metrics(&metrics_registry, path)?;
    }

    Ok(ExitCode::from(report.summary.exit_code()))
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Demotes panic messages to debug logs while cases run; the runner already
/// reports each caught panic as an outcome. The previous hook comes back on drop.
struct QuietPanics {
    previous: Option<PanicHook>,
}

impl QuietPanics {
    fn install() -> Self {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|info| {
            debug!(panic = %info, "case panicked");
        }));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(previous);
        }
    }
}

fn write_metrics(registry: &prometheus::Registry, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    fs::write(path, buffer)
        .with_context(|| format!("unable to write metrics to {}", path.display()))?;
    info!(path = %path.display(), "metrics written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn quiet_panics_restores_the_previous_hook() {
        let reported = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&reported);
        panic::set_hook(Box::new(move |_| flag.store(true, Ordering::SeqCst)));

        {
            let _quiet = QuietPanics::install();
            let _ = panic::catch_unwind(|| panic!("inside the run"));
        }
        assert!(!reported.load(Ordering::SeqCst));

        let _ = panic::catch_unwind(|| panic!("after the run"));
        assert!(reported.load(Ordering::SeqCst));
        let _ = panic::take_hook();
    }
}
