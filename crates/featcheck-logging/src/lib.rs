//! ---
//! fc_section: "03-logging"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Structured logging context and case lifecycle events."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! Structured logging helpers shared by the harness crates.

use tracing::Level;

pub mod macros;

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Suite (catalog section or test group) the event belongs to.
    pub suite: Option<&'a str>,
    /// Name of the example case being executed.
    pub case: Option<&'a str>,
    /// Worker index when cases execute in parallel.
    pub worker: Option<usize>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a suite label.
    pub fn with_suite(mut self, suite: &'a str) -> Self {
        self.suite = Some(suite);
        self
    }

    /// Attach a case name.
    pub fn with_case(mut self, case: &'a str) -> Self {
        self.case = Some(case);
        self
    }

    /// Attach a worker index.
    pub fn with_worker(mut self, worker: usize) -> Self {
        self.worker = Some(worker);
        self
    }
}

/// Outcome attached to a case lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseEventOutcome {
    /// The case behaved as documented.
    Success,
    /// The case ran but its result did not match.
    Failure,
    /// The case raised, panicked or overran its deadline.
    Fault,
}

impl CaseEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            CaseEventOutcome::Success => "success",
            CaseEventOutcome::Failure => "failure",
            CaseEventOutcome::Fault => "fault",
        }
    }
}

macro_rules! case_event {
    ($level:expr, $ctx:expr, $event:expr, $outcome:expr, $message:expr) => {
        tracing::event!(
            $level,
            event = $event,
            outcome = $outcome,
            suite = $ctx.suite.unwrap_or(""),
            case = $ctx.case.unwrap_or(""),
            worker = $ctx.worker,
            message = %$message
        )
    };
}

/// Emit a standardised case lifecycle event.
///
/// Successes log at `INFO`, failures at `WARN` and faults at `ERROR`.
pub fn log_case_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: CaseEventOutcome,
) {
    let fallback = LogContext::default();
    let ctx = context.unwrap_or(&fallback);
    let label = outcome.as_str();
    match outcome {
        CaseEventOutcome::Success => case_event!(Level::INFO, ctx, event, label, message),
        CaseEventOutcome::Failure => case_event!(Level::WARN, ctx, event, label, message),
        CaseEventOutcome::Fault => case_event!(Level::ERROR, ctx, event, label, message),
    }
}
