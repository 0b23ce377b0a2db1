// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram_vec, register_int_counter_vec, HistogramVec,
    IntCounterVec,
};

// --- Metric Statics ---
// We use OnceCell to hold the metric collectors. They are initialized
// exactly once by the `install` function.

static SUBMISSIONS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static SUBMISSION_OUTCOMES_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static INCLUSION_LATENCY_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

/// The Prometheus-backed sink. Recording before [`install`] is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

impl SubmissionMetricsSink for PrometheusSink {
    fn inc_submissions(&self, kind: &'static str) {
        if let Some(metric) = SUBMISSIONS_TOTAL.get() {
            metric.with_label_values(&[kind]).inc();
        }
    }
    fn inc_outcome(&self, kind: &'static str, outcome: &'static str) {
        if let Some(metric) = SUBMISSION_OUTCOMES_TOTAL.get() {
            metric.with_label_values(&[kind, outcome]).inc();
        }
    }
    fn observe_inclusion_latency(&self, kind: &'static str, duration_secs: f64) {
        if let Some(metric) = INCLUSION_LATENCY_SECONDS.get() {
            metric.with_label_values(&[kind]).observe(duration_secs);
        }
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        if let Some(metric) = ERRORS_TOTAL.get() {
            metric.with_label_values(&[kind, variant]).inc();
        }
    }
}

static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;

fn already_installed() -> prometheus::Error {
    prometheus::Error::Msg("prometheus sink already installed".to_string())
}

/// Registers all collectors with the default registry and installs the
/// Prometheus sink as the global metrics sink.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    SUBMISSIONS_TOTAL
        .set(register_int_counter_vec!(
            "evm_mapping_submissions_total",
            "Total number of extrinsic submissions started.",
            &["kind"]
        )?)
        .map_err(|_| already_installed())?;
    SUBMISSION_OUTCOMES_TOTAL
        .set(register_int_counter_vec!(
            "evm_mapping_submission_outcomes_total",
            "Total number of settled submissions by terminal outcome.",
            &["kind", "outcome"]
        )?)
        .map_err(|_| already_installed())?;
    INCLUSION_LATENCY_SECONDS
        .set(register_histogram_vec!(
            "evm_mapping_inclusion_latency_seconds",
            "Time from submission to the terminal status.",
            &["kind"],
            exponential_buckets(0.25, 2.0, 10)?
        )?)
        .map_err(|_| already_installed())?;
    ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "evm_mapping_errors_total",
            "Total number of errors by kind and variant.",
            &["kind", "variant"]
        )?)
        .map_err(|_| already_installed())?;

    let sink: &'static dyn MetricsSink = &PROMETHEUS_SINK;
    SINK.set(sink).map_err(|_| already_installed())?;
    Ok(sink)
}
