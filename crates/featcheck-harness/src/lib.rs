//! ---
//! fc_section: "02-harness"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Registry, runner and reporter exports."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! The harness crate registers named example cases, executes each one behind
//! a failure boundary, and aggregates the outcomes into a report.
//!
//! The pipeline is explicit: build a [`Registry`], hand its cases to a
//! [`Runner`], feed the resulting [`Outcome`]s to [`report`].

pub mod case;
pub mod error;
pub mod metrics;
pub mod outcome;
pub mod registry;
pub mod report;
pub mod runner;

pub use case::{CaseAction, Category, ExampleCase, Mismatch, Verdict};
pub use error::{CaseError, HarnessError, Result};
pub use metrics::HarnessMetrics;
pub use outcome::{Outcome, Status};
pub use registry::{Registry, Selection};
pub use report::{diagnostic_line, report, Report, Summary};
pub use runner::{Outcomes, Runner, RunnerSettings};

/// Crate prelude collecting the types needed to define and run cases.
pub mod prelude {
    pub use super::case::{Category, ExampleCase, Verdict};
    pub use super::registry::{Registry, Selection};
    pub use super::report::report;
    pub use super::runner::{Runner, RunnerSettings};
}
