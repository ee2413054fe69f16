//! ---
//! fc_section: "04-catalog"
//! fc_subsection: "integration-tests"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Catalog registration and execution checks."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::collections::HashSet;

use featcheck_catalog::{build_registry, cases};
use featcheck_harness::{report, Category, Runner, RunnerSettings, Selection, Status};

#[test]
fn catalog_registers_without_conflicts() {
    let registry = build_registry().unwrap();
    assert_eq!(registry.len(), 42);

    let unique: HashSet<_> = registry.names().collect();
    assert_eq!(unique.len(), registry.len());
}

#[test]
fn language_tour_precedes_library_tour() {
    let registry = build_registry().unwrap();
    let categories: Vec<_> = registry.all().map(|case| case.category()).collect();
    let first_library = categories
        .iter()
        .position(|category| *category == Category::Library)
        .unwrap();
    assert_eq!(first_library, 27);
    assert!(categories[first_library..]
        .iter()
        .all(|category| *category == Category::Library));
    assert_eq!(registry.names().next(), Some("smart_pointers_unique"));
}

#[test]
fn every_case_passes_behind_the_runner() {
    let registry = build_registry().unwrap();
    let runner = Runner::new(RunnerSettings::default()).unwrap();
    let report = report(runner.run(registry.all()));
    let failures: Vec<_> = report.diagnostics().collect();
    assert!(failures.is_empty(), "{failures:#?}");
    assert_eq!(report.summary.passed, 42);
}

#[test]
fn descriptions_are_present() {
    for case in cases() {
        assert!(
            !case.description().trim().is_empty(),
            "{} has no description",
            case.name()
        );
    }
}

#[test]
fn category_selection_splits_the_tour() {
    let registry = build_registry().unwrap();
    let language = Selection::everything().with_category(Category::Language);
    let library = Selection::everything().with_category(Category::Library);
    assert_eq!(registry.select(&language).count(), 27);
    assert_eq!(registry.select(&library).count(), 15);
}

#[test]
fn lambda_filter_matches_the_closure_cases() {
    let registry = build_registry().unwrap();
    let names: Vec<_> = registry.filtered("lambda").map(|case| case.name()).collect();
    assert_eq!(
        names,
        ["lambda_basics", "lambda_captures", "lambda_mutable_capture"]
    );

    let runner = Runner::new(RunnerSettings::default().with_workers(3)).unwrap();
    let outcomes = runner.run_all(registry.filtered("lambda")).unwrap();
    assert!(outcomes.iter().all(|outcome| outcome.status == Status::Passed));
}

#[test]
fn registries_are_independent() {
    let first = build_registry().unwrap();
    let second = build_registry().unwrap();
    assert_eq!(
        first.names().collect::<Vec<_>>(),
        second.names().collect::<Vec<_>>()
    );
}
