//! ---
//! fc_section: "02-harness"
//! fc_subsection: "module"
//! fc_type: "source"
//! fc_scope: "code"
//! fc_description: "Prometheus instrumentation for case execution."
//! fc_version: "v0.1.0"
//! fc_owner: "tbd"
//! ---
use std::fmt;
use std::sync::Arc;

use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry as MetricsRegistry};

use crate::outcome::Outcome;

/// Case execution metrics exported via Prometheus.
#[derive(Clone)]
pub struct HarnessMetrics {
    registry: Arc<MetricsRegistry>,
    cases_total: IntCounterVec,
    case_duration_seconds: Histogram,
}

impl HarnessMetrics {
    /// Register metrics with the provided registry.
    pub fn new(registry: Arc<MetricsRegistry>) -> anyhow::Result<Self> {
        let cases_total = IntCounterVec::new(
            Opts::new("featcheck_cases_total", "Executed example cases by status"),
            &["status"],
        )?;
        let case_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "featcheck_case_duration_seconds",
                "Wall-clock time spent on a single example case",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        )?;

        registry.register(Box::new(cases_total.clone()))?;
        registry.register(Box::new(case_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            cases_total,
            case_duration_seconds,
        })
    }

    /// Access the underlying registry.
    pub fn registry(&self) -> Arc<MetricsRegistry> {
        self.registry.clone()
    }

    /// Count an outcome and record its duration.
    pub fn observe(&self, outcome: &Outcome) {
        let status = outcome.status.to_string();
        self.cases_total.with_label_values(&[status.as_str()]).inc();
        self.case_duration_seconds
            .observe(outcome.elapsed.as_secs_f64());
    }

    /// Current count for a status label.
    pub fn count(&self, status: &str) -> u64 {
        self.cases_total.with_label_values(&[status]).get()
    }
}

impl fmt::Debug for HarnessMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarnessMetrics").finish_non_exhaustive()
    }
}
