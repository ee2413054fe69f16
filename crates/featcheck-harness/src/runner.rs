//! ---
//! fc_section: "02-harness"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Fault-isolating case runner."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
//! Executes example cases behind a failure boundary.
//!
//! Every case yields exactly one [`Outcome`]: errors returned by the action,
//! panics, and deadline overruns are all folded into `Errored` outcomes so
//! that one misbehaving case cannot abort the run.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use featcheck_logging::{fc_debug, fc_warn, log_case_event, CaseEventOutcome, LogContext};
use parking_lot::Mutex;

use crate::case::{CaseAction, ExampleCase, Verdict};
use crate::error::{CaseError, HarnessError, Result};
use crate::metrics::HarnessMetrics;
use crate::outcome::{Outcome, Status};

/// Default per-case deadline.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Execution settings for a [`Runner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerSettings {
    /// Upper bound on a single case. `None` runs actions inline with no bound.
    pub deadline: Option<Duration>,
    /// Number of worker threads used by [`Runner::run_all`].
    pub workers: usize,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            deadline: Some(DEFAULT_DEADLINE),
            workers: 1,
        }
    }
}

impl RunnerSettings {
    /// Override the deadline.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Override the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(HarnessError::InvalidSettings(
                "workers must be at least 1".into(),
            ));
        }
        if self.deadline.is_some_and(|deadline| deadline.is_zero()) {
            return Err(HarnessError::InvalidSettings(
                "deadline must be positive; use no deadline to disable it".into(),
            ));
        }
        Ok(())
    }
}

/// Executes cases one at a time (or on a bounded worker pool) with per-case isolation.
#[derive(Debug, Clone)]
pub struct Runner {
    settings: RunnerSettings,
    metrics: Option<HarnessMetrics>,
}

impl Runner {
    /// Construct a runner after validating `settings`.
    pub fn new(settings: RunnerSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            metrics: None,
        })
    }

    /// Record every outcome into `metrics`.
    pub fn with_metrics(mut self, metrics: HarnessMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Active settings.
    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Lazily execute `cases` sequentially, yielding one outcome per case in input order.
    ///
    /// A case only runs when the iterator is advanced to it.
    pub fn run<'c, I>(&self, cases: I) -> Outcomes<'_, I::IntoIter>
    where
        I: IntoIterator<Item = &'c ExampleCase>,
    {
        Outcomes {
            runner: self,
            cases: cases.into_iter(),
        }
    }

    /// Execute every case and collect outcomes in input order.
    ///
    /// With more than one worker, cases are claimed from a shared cursor by
    /// scoped threads and their outcomes are slotted back by input index.
    pub fn run_all<'c, I>(&self, cases: I) -> Result<Vec<Outcome>>
    where
        I: IntoIterator<Item = &'c ExampleCase>,
    {
        if self.settings.workers <= 1 {
            return Ok(self.run(cases).collect());
        }

        let cases: Vec<&ExampleCase> = cases.into_iter().collect();
        let cursor = AtomicUsize::new(0);
        let slots: Mutex<Vec<Option<Outcome>>> = Mutex::new(vec![None; cases.len()]);
        let workers = self.settings.workers.min(cases.len());

        thread::scope(|scope| {
            for worker in 0..workers {
                let (cases, cursor, slots) = (&cases, &cursor, &slots);
                scope.spawn(move || loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(case) = cases.get(index) else {
                        break;
                    };
                    let outcome = self.execute(case, Some(worker));
                    slots.lock()[index] = Some(outcome);
                });
            }
        });

        slots
            .into_inner()
            .into_iter()
            .zip(&cases)
            .map(|(slot, case)| {
                slot.ok_or_else(|| HarnessError::MissingOutcome {
                    case: case.name().to_owned(),
                })
            })
            .collect()
    }

    /// Execute a single case behind the failure boundary.
    pub fn execute(&self, case: &ExampleCase, worker: Option<usize>) -> Outcome {
        let category = case.category().to_string();
        let mut ctx = LogContext::new().with_suite(&category).with_case(case.name());
        if let Some(worker) = worker {
            ctx = ctx.with_worker(worker);
        }
        fc_debug!(context = ctx, "executing case");

        let started = Instant::now();
        let result = match self.settings.deadline {
            Some(deadline) => invoke_with_deadline(&ctx, case.name(), case.action(), deadline),
            None => invoke(&case.action()),
        };
        let elapsed = started.elapsed();

        let outcome = match &result {
            Ok(()) => Outcome::passed(case.name(), elapsed),
            Err(error) => Outcome::from_error(case.name(), error, elapsed),
        };
        let (event_outcome, message) = match outcome.status {
            Status::Passed => (CaseEventOutcome::Success, "case passed"),
            Status::Failed => (CaseEventOutcome::Failure, "case failed"),
            Status::Errored => (CaseEventOutcome::Fault, "case errored"),
        };
        log_case_event(Some(&ctx), "case.finished", message, event_outcome);
        if let Some(metrics) = &self.metrics {
            metrics.observe(&outcome);
        }
        outcome
    }
}

/// Lazy outcome sequence returned by [`Runner::run`].
#[derive(Debug)]
pub struct Outcomes<'r, I> {
    runner: &'r Runner,
    cases: I,
}

impl<'r, 'c, I> Iterator for Outcomes<'r, I>
where
    I: Iterator<Item = &'c ExampleCase>,
{
    type Item = Outcome;

    fn next(&mut self) -> Option<Self::Item> {
        let case = self.cases.next()?;
        Some(self.runner.execute(case, None))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cases.size_hint()
    }
}

fn invoke(action: &CaseAction) -> std::result::Result<(), CaseError> {
    match panic::catch_unwind(AssertUnwindSafe(|| action())) {
        Ok(Ok(Verdict::Pass)) => Ok(()),
        Ok(Ok(Verdict::Mismatch(mismatch))) => Err(CaseError::AssertionMismatch(mismatch)),
        Ok(Err(error)) => Err(CaseError::Unexpected(error)),
        Err(payload) => Err(CaseError::Panicked(panic_message(payload.as_ref()))),
    }
}

// A case that overruns keeps its thread; std offers no way to cancel it.
fn invoke_with_deadline(
    ctx: &LogContext<'_>,
    name: &str,
    action: CaseAction,
    deadline: Duration,
) -> std::result::Result<(), CaseError> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name(format!("case-{name}"))
        .spawn(move || {
            let _ = tx.send(invoke(&action));
        });
    if let Err(err) = spawned {
        return Err(CaseError::Unexpected(
            anyhow::Error::new(err).context("unable to spawn case thread"),
        ));
    }

    match rx.recv_timeout(deadline) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            fc_warn!(
                context = ctx,
                "case overran its {}ms deadline, abandoning its thread",
                deadline.as_millis()
            );
            Err(CaseError::DeadlineExceeded(deadline))
        }
        Err(RecvTimeoutError::Disconnected) => Err(CaseError::Panicked(
            "case thread exited without reporting a result".into(),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else {
        "non-string panic payload".to_owned()
    }
}
