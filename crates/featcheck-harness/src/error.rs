//! ---
//! fc_section: "02-harness"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Registration and case-level error taxonomy."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::time::Duration;

use thiserror::Error;

use crate::case::Mismatch;
use crate::outcome::Status;

/// Result alias for registration and run-level operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Errors that abort a run. Case-level problems never surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// Two cases share a name.
    #[error("example case `{name}` is already registered")]
    DuplicateName {
        /// The contested name.
        name: String,
    },
    /// A case name is empty or only whitespace.
    #[error("example case names must not be empty")]
    InvalidName,
    /// Runner settings that cannot be honoured.
    #[error("invalid runner settings: {0}")]
    InvalidSettings(String),
    /// A parallel run finished without recording an outcome for a case.
    #[error("no outcome recorded for case `{case}`")]
    MissingOutcome {
        /// Case whose outcome slot stayed empty.
        case: String,
    },
}

/// Why a single case did not pass. Always recovered by the runner.
#[derive(Debug, Error)]
pub enum CaseError {
    /// The action completed but its result did not satisfy the predicate.
    #[error("{0}")]
    AssertionMismatch(Mismatch),
    /// The action returned an error.
    #[error("{0:#}")]
    Unexpected(anyhow::Error),
    /// The action panicked.
    #[error("panicked: {0}")]
    Panicked(String),
    /// The action did not finish within the configured deadline.
    #[error("exceeded deadline of {}ms", .0.as_millis())]
    DeadlineExceeded(Duration),
}

impl CaseError {
    /// Outcome status this error is recorded as.
    pub fn status(&self) -> Status {
        match self {
            CaseError::AssertionMismatch(_) => Status::Failed,
            CaseError::Unexpected(_) | CaseError::Panicked(_) | CaseError::DeadlineExceeded(_) => {
                Status::Errored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn unexpected_detail_includes_context_chain() {
        let err = Err::<(), _>(anyhow::anyhow!("disk on fire"))
            .context("while reading fixture")
            .unwrap_err();
        let case_err = CaseError::Unexpected(err);
        assert_eq!(case_err.to_string(), "while reading fixture: disk on fire");
        assert_eq!(case_err.status(), Status::Errored);
    }

    #[test]
    fn deadline_detail_reports_milliseconds() {
        let err = CaseError::DeadlineExceeded(Duration::from_millis(250));
        assert_eq!(err.to_string(), "exceeded deadline of 250ms");
    }

    #[test]
    fn mismatch_maps_to_failed() {
        let err = CaseError::AssertionMismatch(Mismatch::new("3", "4"));
        assert_eq!(err.status(), Status::Failed);
        assert_eq!(err.to_string(), "expected 3, got 4");
    }
}
