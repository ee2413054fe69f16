//! ---
//! fc_section: "06-testing"
//! fc_subsection: "integration-tests"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Configuration file to catalog run to report, across crates."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use featcheck_catalog::build_registry;
use featcheck_common::{HarnessConfig, ReportFormat};
use featcheck_harness::{report, HarnessMetrics, Runner, RunnerSettings, Selection};
use tempfile::tempdir;

fn settings_from(config: &HarnessConfig) -> RunnerSettings {
    RunnerSettings::default()
        .with_deadline(config.runner.effective_deadline())
        .with_workers(config.runner.workers)
}

fn selection_from(config: &HarnessConfig) -> Selection {
    match &config.runner.filter {
        Some(filter) => Selection::everything().with_filter(filter.clone()),
        None => Selection::everything(),
    }
}

#[test]
fn configured_parallel_run_produces_json_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("featcheck.toml");
    fs::write(
        &path,
        r#"
        [runner]
        deadline_ms = 2000
        workers = 2
        filter = "pointers"

        [report]
        format = "json"
        "#,
    )
    .unwrap();

    let config = HarnessConfig::from_path(&path).unwrap();
    assert_eq!(config.report.format, ReportFormat::Json);
    let settings = settings_from(&config);
    assert_eq!(settings.deadline, Some(Duration::from_millis(2000)));

    let registry = build_registry().unwrap();
    let selection = selection_from(&config);
    let runner = Runner::new(settings).unwrap();
    let run = report(runner.run_all(registry.select(&selection)).unwrap());

    let doc: serde_json::Value = serde_json::from_str(&run.render_json().unwrap()).unwrap();
    let names: Vec<_> = doc["outcomes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|outcome| outcome["case_name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(
        names,
        ["smart_pointers_unique", "shared_pointers", "weak_pointers"]
    );
    assert_eq!(doc["summary"]["passed"], 3);
    assert_eq!(doc["summary"]["failed"], 0);
    assert!(doc["outcomes"][0]["elapsed_ms"].is_u64());
}

#[test]
fn disabled_deadline_runs_cases_inline() {
    let config: HarnessConfig = "[runner]\ndeadline_ms = 0\nfilter = \"std_thread\"\n"
        .parse()
        .unwrap();
    let settings = settings_from(&config);
    assert_eq!(settings.deadline, None);

    let registry = build_registry().unwrap();
    let runner = Runner::new(settings).unwrap();
    let run = report(runner.run(registry.select(&selection_from(&config))));
    assert_eq!(run.render_text(), "1/1 passed\n");
}

#[test]
fn metrics_track_a_full_catalog_run() {
    let metrics_registry = Arc::new(prometheus::Registry::new());
    let metrics = HarnessMetrics::new(Arc::clone(&metrics_registry)).unwrap();
    let runner = Runner::new(RunnerSettings::default().with_workers(4))
        .unwrap()
        .with_metrics(metrics.clone());

    let registry = build_registry().unwrap();
    let run = report(runner.run_all(registry.all()).unwrap());
    assert_eq!(metrics.count("Passed"), run.summary.passed as u64);
    assert_eq!(metrics.count("Failed"), 0);

    let families = metrics_registry.gather();
    assert!(families
        .iter()
        .any(|family| family.get_name() == "featcheck_case_duration_seconds"));
}

#[test]
fn repeated_runs_agree() {
    let registry = build_registry().unwrap();
    let runner = Runner::new(RunnerSettings::default()).unwrap();
    let first = report(runner.run(registry.all())).summary;
    let second = report(runner.run(registry.all())).summary;
    assert_eq!(first, second);
    assert_eq!(first.total, first.passed + first.failed + first.errored);
}
