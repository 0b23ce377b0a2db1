// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured submission metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn submission_metrics() -> &'static dyn SubmissionMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics about extrinsic submissions.
///
/// `kind` is `native` or `meta`; `outcome` is a terminal outcome label such as
/// `included`, `failed`, `invalid`, `cancelled`, or `error`.
pub trait SubmissionMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of submissions started.
    fn inc_submissions(&self, kind: &'static str);
    /// Increments the counter of settled submissions, labeled by outcome.
    fn inc_outcome(&self, kind: &'static str, outcome: &'static str);
    /// Observes the time from submission to the terminal status.
    fn observe_inclusion_latency(&self, kind: &'static str, duration_secs: f64);
}
impl SubmissionMetricsSink for NopSink {
    fn inc_submissions(&self, _kind: &'static str) {}
    fn inc_outcome(&self, _kind: &'static str, _outcome: &'static str) {}
    fn observe_inclusion_latency(&self, _kind: &'static str, _duration_secs: f64) {}
}

/// A sink for tracking the frequency of specific, categorized errors.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A unified trait for a sink that can handle all metric types.
pub trait MetricsSink: SubmissionMetricsSink + ErrorMetricsSink {}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T where T: SubmissionMetricsSink + ErrorMetricsSink {}
