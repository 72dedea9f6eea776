// ── Core error types ──
//
// Every failure a presenter can observe. Services never leak raw faults:
// anything that is not a missing record or a rejected input is wrapped
// into `OperationFailed` naming the resource and the verb.

use serde::Serialize;
use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::model::RecordId;

/// The fixture-backed resource an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    Alerts,
    Reports,
    Metrics,
}

impl Resource {
    /// Singular noun used in record-level messages.
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Alerts => "alert",
            Self::Reports => "report",
            Self::Metrics => "metric",
        }
    }
}

/// The data-access verb that was being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Verb {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
    Generate,
    Dashboard,
    Charts,
}

/// Human summary for a failed `(resource, verb)` pair, e.g.
/// "Failed to fetch alerts" or "Failed to generate report".
pub fn failure_message(resource: Resource, verb: Verb) -> String {
    match verb {
        Verb::GetAll => format!("Failed to fetch {resource}"),
        Verb::GetById => format!("Failed to fetch {}", resource.singular()),
        Verb::Create => format!("Failed to create {}", resource.singular()),
        Verb::Update => format!("Failed to update {}", resource.singular()),
        Verb::Delete => format!("Failed to delete {}", resource.singular()),
        Verb::Generate => format!("Failed to generate {}", resource.singular()),
        Verb::Dashboard => "Failed to fetch dashboard metrics".into(),
        Verb::Charts => "Failed to fetch chart data".into(),
    }
}

// thiserror hands fields to format args by reference.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn describe_failure(resource: &Resource, verb: &Verb) -> String {
    failure_message(*resource, *verb)
}

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Record errors ────────────────────────────────────────────────
    #[error("{} {id} not found", .resource.singular())]
    NotFound { resource: Resource, id: RecordId },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("{}: {reason}", describe_failure(.resource, .verb))]
    OperationFailed {
        resource: Resource,
        verb: Verb,
        reason: String,
    },

    // ── Fixture errors ───────────────────────────────────────────────
    #[error("Fixture '{name}' could not be loaded: {reason}")]
    Fixture { name: String, reason: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// A required input was not supplied.
    pub fn missing(field: &str) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            reason: "required field is missing".into(),
        }
    }

    /// Wrap any fault that is not part of the operation's contract.
    ///
    /// `NotFound` and `ValidationFailed` pass through untouched; everything
    /// else becomes `OperationFailed` for the given resource and verb.
    #[must_use]
    pub fn into_operation_failed(self, resource: Resource, verb: Verb) -> Self {
        match self {
            Self::NotFound { .. } | Self::ValidationFailed { .. } | Self::OperationFailed { .. } => {
                self
            }
            Self::Fixture { reason, .. } | Self::Internal(reason) => Self::OperationFailed {
                resource,
                verb,
                reason,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_faults_become_operation_failed() {
        let err = CoreError::Internal("store poisoned".into())
            .into_operation_failed(Resource::Alerts, Verb::GetAll);
        assert_eq!(err.to_string(), "Failed to fetch alerts: store poisoned");
    }

    #[test]
    fn not_found_passes_through() {
        let err = CoreError::NotFound {
            resource: Resource::Reports,
            id: RecordId::new(9),
        }
        .into_operation_failed(Resource::Reports, Verb::Delete);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "report 9 not found");
    }

    #[test]
    fn failure_messages_match_verbs() {
        assert_eq!(
            failure_message(Resource::Reports, Verb::Generate),
            "Failed to generate report"
        );
        assert_eq!(
            failure_message(Resource::Metrics, Verb::Charts),
            "Failed to fetch chart data"
        );
    }
}
