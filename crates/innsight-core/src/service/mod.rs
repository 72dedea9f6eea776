// ── Mock data-access layer ──
//
// Async services over the shared fixture store. Every call first waits out
// its simulated latency, then does its work inside a short synchronous
// critical section. Faults outside an operation's contract are re-signalled
// as `OperationFailed`.

mod alerts;
mod metrics;
mod reports;

use std::sync::Arc;

use tracing::{debug, warn};

pub use alerts::AlertService;
pub use metrics::MetricsService;
pub use reports::{ReportService, summary_data};

use crate::config::{Clock, LatencyProfile};
use crate::error::{CoreError, Resource, Verb};
use crate::store::FixtureStore;

/// What every service shares: the store, the latency table, the clock.
#[derive(Clone)]
pub(crate) struct ServiceContext {
    pub(crate) store: Arc<FixtureStore>,
    pub(crate) latency: LatencyProfile,
    pub(crate) clock: Clock,
}

impl ServiceContext {
    pub(crate) fn new(store: Arc<FixtureStore>, latency: LatencyProfile, clock: Clock) -> Self {
        Self {
            store,
            latency,
            clock,
        }
    }

    /// Wait out the simulated latency for `(resource, verb)`.
    async fn pause(&self, resource: Resource, verb: Verb) {
        let delay = self.latency.delay(resource, verb);
        debug!(%resource, %verb, delay_ms = delay.as_millis(), "simulating backend call");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Map a failed operation to the caller-facing error, logging it once.
fn fail(resource: Resource, verb: Verb, err: CoreError) -> CoreError {
    let err = err.into_operation_failed(resource, verb);
    warn!(%resource, %verb, error = %err, "operation failed");
    err
}
