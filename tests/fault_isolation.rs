//! ---
//! fc_section: "06-testing"
//! fc_subsection: "integration-tests"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Misbehaving cases mixed into the real catalog stay contained."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::fs;
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use featcheck_catalog::{build_registry, cases};
use featcheck_common::{init_tracing, LoggingConfig};
use featcheck_harness::{
    report, ExampleCase, HarnessError, Registry, Runner, RunnerSettings, Status, Verdict,
};
use tempfile::tempdir;

fn misbehaving() -> Vec<ExampleCase> {
    vec![
        ExampleCase::expect_eq(
            "to_string_precision",
            "float text keeps two decimals",
            "1.20".to_owned(),
            || Ok(1.2_f64.to_string()),
        ),
        ExampleCase::new("raises", "returns an error", || {
            Err(anyhow!("resource unavailable").context("opening fixture"))
        }),
        ExampleCase::new("panics", "panics mid-check", || -> anyhow::Result<Verdict> {
            panic!("index out of bounds")
        }),
        ExampleCase::new("overruns", "sleeps past the deadline", || {
            thread::sleep(Duration::from_secs(3));
            Ok(Verdict::Pass)
        }),
    ]
}

fn mixed_registry() -> Registry {
    let mut registry = build_registry().unwrap();
    registry.register_all(misbehaving()).unwrap();
    registry
}

#[test]
fn faults_are_recorded_and_catalog_still_passes() {
    let registry = mixed_registry();
    let runner = Runner::new(
        RunnerSettings::default()
            .with_deadline(Some(Duration::from_millis(1000)))
            .with_workers(4),
    )
    .unwrap();
    let run = report(runner.run_all(registry.all()).unwrap());

    assert_eq!(run.summary.total, 46);
    assert_eq!(run.summary.passed, 42);
    assert_eq!(run.summary.failed, 1);
    assert_eq!(run.summary.errored, 3);
    assert_eq!(run.summary.exit_code(), 1);

    let diagnostics: Vec<_> = run.diagnostics().collect();
    assert_eq!(
        diagnostics,
        [
            "to_string_precision: Failed — expected \"1.20\", got \"1.2\"",
            "raises: Errored — opening fixture: resource unavailable",
            "panics: Errored — panicked: index out of bounds",
            "overruns: Errored — exceeded deadline of 1000ms",
        ]
    );
}

#[test]
fn sequential_and_parallel_runs_agree_on_statuses() {
    let registry = mixed_registry();
    let settings = RunnerSettings::default().with_deadline(Some(Duration::from_millis(1000)));
    let sequential: Vec<Status> = Runner::new(settings.clone())
        .unwrap()
        .run(registry.all())
        .map(|outcome| outcome.status)
        .collect();
    let parallel: Vec<Status> = Runner::new(settings.with_workers(8))
        .unwrap()
        .run_all(registry.all())
        .unwrap()
        .into_iter()
        .map(|outcome| outcome.status)
        .collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn catalog_name_cannot_be_registered_twice() {
    let mut registry = build_registry().unwrap();
    let before: Vec<String> = registry.names().map(str::to_owned).collect();

    let clash = cases().into_iter().next().unwrap();
    let err = registry.register(clash).unwrap_err();
    assert_eq!(
        err,
        HarnessError::DuplicateName {
            name: "smart_pointers_unique".into()
        }
    );
    assert_eq!(registry.names().collect::<Vec<_>>(), before);

    let batch = vec![
        ExampleCase::new("fresh", "new case", || Ok(Verdict::Pass)),
        ExampleCase::new("tuples", "clashes with the catalog", || Ok(Verdict::Pass)),
    ];
    assert!(registry.register_all(batch).is_err());
    assert!(registry.get("fresh").is_none(), "batch registration is atomic");
}

#[test]
fn case_events_reach_the_file_sink() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    let config = LoggingConfig {
        level: "info".into(),
        directory: Some(logs.clone()),
        ..LoggingConfig::default()
    };
    let guard = init_tracing("featcheck-it", &config).unwrap();

    let registry = build_registry().unwrap();
    let runner = Runner::new(RunnerSettings::default()).unwrap();
    let run = report(runner.run(registry.filtered("lambda_basics")));
    assert_eq!(run.summary.passed, 1);
    drop(guard);

    let written: String = fs::read_dir(&logs)
        .unwrap()
        .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    assert!(written.contains("case.finished"));
    assert!(written.contains("lambda_basics"));
}
