// ── Alert service ──

use std::sync::Arc;

use tracing::info;

use super::{ServiceContext, fail};
use crate::error::{CoreError, Resource, Verb};
use crate::model::{Alert, AlertPatch, NewAlert, RecordId};

const RESOURCE: Resource = Resource::Alerts;

/// CRUD over the alert collection. Cheap to clone.
#[derive(Clone)]
pub struct AlertService {
    ctx: ServiceContext,
}

impl AlertService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// All alerts, newest `timestamp` first. Equal timestamps keep store
    /// order.
    pub async fn get_all(&self) -> Result<Vec<Alert>, CoreError> {
        self.ctx.pause(RESOURCE, Verb::GetAll).await;
        let mut alerts: Vec<Alert> = self
            .ctx
            .store
            .alerts_snapshot()
            .map_err(|e| fail(RESOURCE, Verb::GetAll, e))?
            .iter()
            .map(|a| a.as_ref().clone())
            .collect();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(alerts)
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Alert, CoreError> {
        self.ctx.pause(RESOURCE, Verb::GetById).await;
        self.ctx
            .store
            .alerts
            .get(id)
            .and_then(|found| found.ok_or_else(|| not_found(id)))
            .map(unwrap_arc)
            .map_err(|e| fail(RESOURCE, Verb::GetById, e))
    }

    /// Store a new alert at the front, stamped with the current time and
    /// `Id = max + 1`.
    pub async fn create(&self, new: NewAlert) -> Result<Alert, CoreError> {
        self.ctx.pause(RESOURCE, Verb::Create).await;
        let timestamp = self.ctx.clock.now();
        let created = self
            .ctx
            .store
            .alerts
            .insert_front_with(|id| Alert {
                id,
                alert_type: new.alert_type,
                severity: new.severity,
                metric: new.metric,
                current_value: new.current_value,
                threshold: new.threshold,
                timestamp,
            })
            .map(unwrap_arc)
            .map_err(|e| fail(RESOURCE, Verb::Create, e))?;
        info!(id = %created.id, severity = %created.severity, "alert created");
        Ok(created)
    }

    /// Merge `patch` into an existing alert. The Id never changes.
    pub async fn update(&self, id: RecordId, patch: AlertPatch) -> Result<Alert, CoreError> {
        self.ctx.pause(RESOURCE, Verb::Update).await;
        let updated = self
            .ctx
            .store
            .alerts
            .modify(id, |alert| patch.apply(alert))
            .and_then(|found| found.ok_or_else(|| not_found(id)))
            .map(unwrap_arc)
            .map_err(|e| fail(RESOURCE, Verb::Update, e))?;
        info!(%id, "alert updated");
        Ok(updated)
    }

    /// Remove an alert, returning what was removed.
    pub async fn delete(&self, id: RecordId) -> Result<Alert, CoreError> {
        self.ctx.pause(RESOURCE, Verb::Delete).await;
        let removed = self
            .ctx
            .store
            .alerts
            .remove(id)
            .and_then(|found| found.ok_or_else(|| not_found(id)))
            .map(unwrap_arc)
            .map_err(|e| fail(RESOURCE, Verb::Delete, e))?;
        info!(%id, "alert deleted");
        Ok(removed)
    }

    /// Same as [`delete`](Self::delete).
    pub async fn dismiss(&self, id: RecordId) -> Result<Alert, CoreError> {
        self.delete(id).await
    }
}

fn not_found(id: RecordId) -> CoreError {
    CoreError::NotFound {
        resource: RESOURCE,
        id,
    }
}

fn unwrap_arc(alert: Arc<Alert>) -> Alert {
    Arc::unwrap_or_clone(alert)
}
