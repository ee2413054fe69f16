//! ---
//! fc_section: "02-harness"
//! fc_subsection: "integration-tests"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Registry to runner to reporter pipeline properties."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::time::Duration;

use featcheck_harness::{
    report, ExampleCase, HarnessError, Registry, Runner, RunnerSettings, Selection, Status,
    Verdict,
};

fn runner() -> Runner {
    Runner::new(RunnerSettings::default().with_deadline(Some(Duration::from_secs(2)))).unwrap()
}

fn passing(name: &str) -> ExampleCase {
    ExampleCase::new(name, "always passes", || Ok(Verdict::Pass))
}

#[test]
fn erroring_case_does_not_affect_neighbours() {
    let mut registry = Registry::new();
    registry.register(passing("A")).unwrap();
    registry
        .register(ExampleCase::new("B", "always errors", || {
            Err(anyhow::anyhow!("unexpected failure in B"))
        }))
        .unwrap();
    registry.register(passing("C")).unwrap();

    let outcomes: Vec<_> = runner().run(registry.all()).collect();
    let observed: Vec<_> = outcomes
        .iter()
        .map(|o| (o.case_name.as_str(), o.status))
        .collect();
    assert_eq!(
        observed,
        [
            ("A", Status::Passed),
            ("B", Status::Errored),
            ("C", Status::Passed)
        ]
    );
    assert_eq!(
        outcomes[1].detail.as_deref(),
        Some("unexpected failure in B")
    );
}

#[test]
fn one_outcome_per_case_in_registration_order() {
    let mut registry = Registry::new();
    let names = ["zeta", "alpha", "mu", "beta", "omega"];
    for name in names {
        registry.register(passing(name)).unwrap();
    }
    let outcomes: Vec<_> = runner().run(registry.all()).collect();
    assert_eq!(outcomes.len(), names.len());
    for (outcome, name) in outcomes.iter().zip(names) {
        assert_eq!(outcome.case_name, name);
    }
}

#[test]
fn passing_case_increments_passed_by_exactly_one() {
    let mut registry = Registry::new();
    registry
        .register(ExampleCase::expect_eq("mismatch", "wrong", 1, || Ok(2)))
        .unwrap();
    let before = report(runner().run(registry.all())).summary;

    registry
        .register(ExampleCase::expect_eq("square", "5 squared", 25, || Ok(5 * 5)))
        .unwrap();
    let after = report(runner().run(registry.all())).summary;

    assert_eq!(after.passed, before.passed + 1);
    assert_eq!(after.total, before.total + 1);
    assert_eq!(after.failed, before.failed);
}

#[test]
fn failed_detail_mentions_expected_and_actual() {
    let mut registry = Registry::new();
    registry
        .register(ExampleCase::expect_eq(
            "to_string",
            "renders a float",
            "1.2".to_owned(),
            || Ok(format!("{:.2}", 1.2)),
        ))
        .unwrap();
    let report = report(runner().run(registry.all()));
    let lines: Vec<_> = report.diagnostics().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("to_string: Failed — "));
    assert!(lines[0].contains("\"1.2\""));
    assert!(lines[0].contains("\"1.20\""));
}

#[test]
fn rerunning_the_same_registry_is_idempotent() {
    let mut registry = Registry::new();
    registry.register(passing("one")).unwrap();
    registry
        .register(ExampleCase::expect_eq("two", "mismatch", 'a', || Ok('b')))
        .unwrap();
    registry
        .register(ExampleCase::new("three", "panics", || panic!("kaput")))
        .unwrap();

    let runner = runner();
    let first = report(runner.run(registry.all())).summary;
    let second = report(runner.run(registry.all())).summary;
    assert_eq!(first, second);
    assert_eq!((first.passed, first.failed, first.errored), (1, 1, 1));
}

#[test]
fn filter_selects_only_matching_cases() {
    let mut registry = Registry::new();
    for name in ["move_semantics", "lambda_basics", "variadic_templates"] {
        registry.register(passing(name)).unwrap();
    }
    let selection = Selection::everything().with_filter("lambda");
    let report = report(runner().run(registry.select(&selection)));
    assert_eq!(report.summary.total, 1);
    assert_eq!(report.outcomes[0].case_name, "lambda_basics");
    assert_eq!(report.render_text(), "1/1 passed\n");
}

#[test]
fn duplicate_registration_aborts_before_execution() {
    let mut registry = Registry::new();
    registry.register(passing("tuples")).unwrap();
    let err = registry.register(passing("tuples")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "example case `tuples` is already registered"
    );
    assert!(matches!(err, HarnessError::DuplicateName { .. }));
    assert_eq!(registry.len(), 1);
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let mut registry = Registry::new();
    for i in 0..10 {
        registry
            .register(ExampleCase::expect_eq(
                format!("square_{i}"),
                "squares",
                i * i,
                move || Ok(if i == 3 { 0 } else { i * i }),
            ))
            .unwrap();
    }
    let sequential = runner().run_all(registry.all()).unwrap();
    let parallel = Runner::new(RunnerSettings::default().with_workers(3))
        .unwrap()
        .run_all(registry.all())
        .unwrap();

    let strip = |outcomes: &[featcheck_harness::Outcome]| {
        outcomes
            .iter()
            .map(|o| (o.case_name.clone(), o.status, o.detail.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(&sequential), strip(&parallel));
}
