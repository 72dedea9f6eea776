// ── Metrics service ──

use tracing::debug;

use super::{ServiceContext, fail};
use crate::error::{CoreError, Resource, Verb};
use crate::metrics::{self, ChartSeriesSet, KpiSummary};
use crate::model::DateRange;

const RESOURCE: Resource = Resource::Metrics;

/// Read-only KPI and chart data. Cheap to clone.
#[derive(Clone)]
pub struct MetricsService {
    ctx: ServiceContext,
}

impl MetricsService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Headline KPIs for the dashboard cards.
    ///
    /// `range` is accepted but not yet applied: figures always come from
    /// the newest daily records.
    pub async fn dashboard_metrics(&self, range: &DateRange) -> Result<KpiSummary, CoreError> {
        self.ctx.pause(RESOURCE, Verb::Dashboard).await;
        log_unapplied_range(range);
        let daily = self.ctx.store.daily_metrics();
        metrics::dashboard_metrics(&daily).map_err(|e| fail(RESOURCE, Verb::Dashboard, e))
    }

    /// Series for the charts grid. `range` is not applied, as above.
    pub async fn chart_data(&self, range: &DateRange) -> Result<ChartSeriesSet, CoreError> {
        self.ctx.pause(RESOURCE, Verb::Charts).await;
        log_unapplied_range(range);
        let daily = self.ctx.store.daily_metrics();
        let room_types = self.ctx.store.room_type_revenue();
        Ok(metrics::chart_series(&daily, &room_types))
    }
}

fn log_unapplied_range(range: &DateRange) {
    debug!(
        start = %range.start,
        end = %range.end,
        preset = %range.preset,
        "date range accepted but not applied to metrics"
    );
}
