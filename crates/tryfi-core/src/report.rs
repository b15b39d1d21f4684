// ── Fault reporting ──
//
// Entity updates that "report and swallow" hand their error to a
// `FaultReporter`. The orchestrator owns one and lends it to entities
// per call; nothing here is process-global.

use tracing::warn;

use crate::error::CoreError;

/// Sink for errors that are absorbed rather than returned.
///
/// Implementations must not block or fail: reporting is fire-and-forget.
pub trait FaultReporter: Send + Sync {
    fn report(&self, error: &CoreError);
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl FaultReporter for NoopReporter {
    fn report(&self, _error: &CoreError) {}
}

/// Emits each report as a `warn` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl FaultReporter for TracingReporter {
    fn report(&self, error: &CoreError) {
        warn!(fault = ?error, "{error}");
    }
}
