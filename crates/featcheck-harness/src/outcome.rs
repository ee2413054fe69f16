//! ---
//! fc_section: "02-harness"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Per-case outcome records."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::time::Duration;

use serde::Serialize;
use serde_with::{serde_as, DurationMilliSeconds};
use strum::Display;

use crate::error::CaseError;

/// Recorded status of one executed case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Status {
    /// The case behaved as documented.
    Passed,
    /// The case ran but its result did not satisfy the predicate.
    Failed,
    /// The case raised an error, panicked or overran its deadline.
    Errored,
}

/// Result of executing one example case. Never mutated after creation.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Name of the case this outcome belongs to.
    pub case_name: String,
    /// Recorded status.
    pub status: Status,
    /// Failure message or captured error; `None` for passes.
    pub detail: Option<String>,
    /// Wall-clock time spent waiting on the action.
    #[serde(rename = "elapsed_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub elapsed: Duration,
}

impl Outcome {
    /// Outcome for a case that passed.
    pub fn passed(case_name: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            case_name: case_name.into(),
            status: Status::Passed,
            detail: None,
            elapsed,
        }
    }

    /// Outcome derived from a case-level error.
    pub fn from_error(case_name: impl Into<String>, error: &CaseError, elapsed: Duration) -> Self {
        Self {
            case_name: case_name.into(),
            status: error.status(),
            detail: Some(error.to_string()),
            elapsed,
        }
    }

    /// Whether the case passed.
    pub fn is_passed(&self) -> bool {
        self.status == Status::Passed
    }
}
