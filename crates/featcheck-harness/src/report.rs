//! ---
//! fc_section: "02-harness"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Outcome aggregation and report rendering."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::outcome::{Outcome, Status};

/// Pass/fail counts derived from an outcome sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of executed cases.
    pub total: usize,
    /// Cases that passed.
    pub passed: usize,
    /// Cases whose result did not match.
    pub failed: usize,
    /// Cases that raised, panicked or overran.
    pub errored: usize,
}

impl Summary {
    /// Recompute counts from `outcomes`.
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a Outcome>) -> Self {
        outcomes
            .into_iter()
            .fold(Self::default(), |mut summary, outcome| {
                summary.record(outcome.status);
                summary
            })
    }

    fn record(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Passed => self.passed += 1,
            Status::Failed => self.failed += 1,
            Status::Errored => self.errored += 1,
        }
    }

    /// Whether every executed case passed.
    pub fn is_success(&self) -> bool {
        self.passed == self.total
    }

    /// Process exit code for this summary: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} passed", self.passed, self.total)
    }
}

/// Aggregated result of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Derived counts.
    pub summary: Summary,
    /// Every outcome in execution order.
    pub outcomes: Vec<Outcome>,
    /// When the report was assembled.
    pub generated_at: DateTime<Utc>,
}

/// Consume an outcome sequence into a [`Report`].
pub fn report(outcomes: impl IntoIterator<Item = Outcome>) -> Report {
    let outcomes: Vec<Outcome> = outcomes.into_iter().collect();
    Report {
        summary: Summary::from_outcomes(&outcomes),
        outcomes,
        generated_at: Utc::now(),
    }
}

/// `<case_name>: <status> — <detail>` for a non-passed outcome, `None` for passes.
pub fn diagnostic_line(outcome: &Outcome) -> Option<String> {
    if outcome.is_passed() {
        return None;
    }
    Some(format!(
        "{}: {} — {}",
        outcome.case_name,
        outcome.status,
        outcome.detail.as_deref().unwrap_or("no detail recorded")
    ))
}

impl Report {
    /// Diagnostic lines for every non-passed outcome, in execution order.
    pub fn diagnostics(&self) -> impl Iterator<Item = String> + '_ {
        self.outcomes.iter().filter_map(diagnostic_line)
    }

    /// Summary line followed by one diagnostic line per non-passed case.
    pub fn render_text(&self) -> String {
        let mut rendered = format!("{}\n", self.summary);
        for line in self.diagnostics() {
            rendered.push_str(&line);
            rendered.push('\n');
        }
        rendered
    }

    /// Pretty-printed JSON document.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
