// Path: crates/telemetry/src/time.rs
use crate::sinks::SubmissionMetricsSink;
use std::time::Instant;

/// Observes the inclusion latency of one submission when dropped.
pub struct Timer<'a> {
    sink: &'a dyn SubmissionMetricsSink,
    kind: &'static str,
    start: Instant,
}

impl<'a> Timer<'a> {
    /// Starts timing a submission of the given kind.
    pub fn new(sink: &'a dyn SubmissionMetricsSink, kind: &'static str) -> Self {
        Self {
            sink,
            kind,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_inclusion_latency(self.kind, self.start.elapsed().as_secs_f64());
    }
}
