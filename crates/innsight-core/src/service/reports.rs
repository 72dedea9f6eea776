// ── Report service ──

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use super::{ServiceContext, fail};
use crate::error::{CoreError, Resource, Verb};
use crate::model::{
    DateSpan, RecordId, Report, ReportPatch, ReportRequest, ReportStatus, ReportType, ReportValue,
};

const RESOURCE: Resource = Resource::Reports;

/// Report history plus generation. Cheap to clone.
#[derive(Clone)]
pub struct ReportService {
    ctx: ServiceContext,
}

impl ReportService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// All reports, newest `generatedAt` first. Equal timestamps keep
    /// store order.
    pub async fn get_all(&self) -> Result<Vec<Report>, CoreError> {
        self.ctx.pause(RESOURCE, Verb::GetAll).await;
        let mut reports: Vec<Report> = self
            .ctx
            .store
            .reports_snapshot()
            .map_err(|e| fail(RESOURCE, Verb::GetAll, e))?
            .iter()
            .map(|r| r.as_ref().clone())
            .collect();
        reports.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(reports)
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Report, CoreError> {
        self.ctx.pause(RESOURCE, Verb::GetById).await;
        self.ctx
            .store
            .reports
            .get(id)
            .and_then(|found| found.ok_or_else(|| not_found(id)))
            .map(Arc::unwrap_or_clone)
            .map_err(|e| fail(RESOURCE, Verb::GetById, e))
    }

    /// Produce a completed report for the request and store it at the
    /// front. The slowest call in the system.
    pub async fn generate(&self, request: ReportRequest) -> Result<Report, CoreError> {
        self.ctx.pause(RESOURCE, Verb::Generate).await;
        let generated_at = self.ctx.clock.now();
        let report = self
            .ctx
            .store
            .reports
            .insert_front_with(|id| Report {
                id,
                report_type: request.report_type,
                title: request.report_type.report_title().to_owned(),
                date_range: DateSpan::from(&request.date_range),
                generated_at,
                format: request.format,
                status: ReportStatus::Completed,
                data: summary_data(request.report_type),
            })
            .map(Arc::unwrap_or_clone)
            .map_err(|e| fail(RESOURCE, Verb::Generate, e))?;
        info!(
            id = %report.id,
            report_type = %report.report_type,
            format = %report.format,
            "report generated"
        );
        Ok(report)
    }

    /// Merge `patch` into an existing report. The Id never changes.
    pub async fn update(&self, id: RecordId, patch: ReportPatch) -> Result<Report, CoreError> {
        self.ctx.pause(RESOURCE, Verb::Update).await;
        let updated = self
            .ctx
            .store
            .reports
            .modify(id, |report| patch.apply(report))
            .and_then(|found| found.ok_or_else(|| not_found(id)))
            .map(Arc::unwrap_or_clone)
            .map_err(|e| fail(RESOURCE, Verb::Update, e))?;
        info!(%id, "report updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: RecordId) -> Result<Report, CoreError> {
        self.ctx.pause(RESOURCE, Verb::Delete).await;
        let removed = self
            .ctx
            .store
            .reports
            .remove(id)
            .and_then(|found| found.ok_or_else(|| not_found(id)))
            .map(Arc::unwrap_or_clone)
            .map_err(|e| fail(RESOURCE, Verb::Delete, e))?;
        info!(%id, "report deleted");
        Ok(removed)
    }
}

fn not_found(id: RecordId) -> CoreError {
    CoreError::NotFound {
        resource: RESOURCE,
        id,
    }
}

/// The canned summary figures a generated report carries for its type.
pub fn summary_data(report_type: ReportType) -> IndexMap<String, ReportValue> {
    let entries: Vec<(&str, ReportValue)> = match report_type {
        ReportType::Occupancy => vec![
            ("averageOccupancy", 84.7.into()),
            ("peakOccupancy", 96.2.into()),
            ("lowOccupancy", 67.8.into()),
            ("totalRoomNights", 2145.0.into()),
            (
                "trends",
                "Steady upward trend with peak performance on weekends".into(),
            ),
        ],
        ReportType::Revenue => vec![
            ("totalRevenue", 892_500.0.into()),
            ("roomRevenue", 714_750.0.into()),
            ("restaurantRevenue", 123_800.0.into()),
            ("otherRevenue", 53_950.0.into()),
            ("growthRate", 12.3.into()),
        ],
        ReportType::GuestSatisfaction => vec![
            ("averageRating", 4.4.into()),
            ("totalReviews", 1247.0.into()),
            ("recommendationRate", 94.2.into()),
            ("responseTime", 1.8.into()),
            (
                "topComplaints",
                ReportValue::List(vec![
                    "WiFi Speed".into(),
                    "Room Temperature".into(),
                    "Checkout Wait".into(),
                ]),
            ),
        ],
        ReportType::StaffPerformance => vec![
            ("averagePerformance", 87.3.into()),
            ("topPerformers", 15.0.into()),
            ("trainingNeeded", 8.0.into()),
            ("customerServiceRating", 4.6.into()),
            ("taskCompletionRate", 91.2.into()),
        ],
    };
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}
