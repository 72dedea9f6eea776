// ── User-facing notifications ──
//
// Controllers report the outcome of user actions as fire-and-forget
// toasts. Where they end up (log, channel, nowhere) is the presenter's
// choice.

use std::fmt;

use serde::Serialize;
use strum::Display;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::error::{Resource, Verb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// The action a notification reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Operation {
    pub resource: Resource,
    pub verb: Verb,
}

impl Operation {
    pub const fn new(resource: Resource, verb: Verb) -> Self {
        Self { resource, verb }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.verb)
    }
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub operation: Operation,
    pub message: String,
}

impl Notification {
    pub fn success(operation: Operation, msg: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            operation,
            message: msg.into(),
        }
    }

    pub fn error(operation: Operation, msg: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            operation,
            message: msg.into(),
        }
    }

    pub fn info(operation: Operation, msg: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            operation,
            message: msg.into(),
        }
    }
}

/// Destination for notifications. Must never block or fail loudly.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes every notification to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, n: Notification) {
        match n.level {
            NotificationLevel::Error => error!(operation = %n.operation, "{}", n.message),
            NotificationLevel::Warning => warn!(operation = %n.operation, "{}", n.message),
            NotificationLevel::Info | NotificationLevel::Success => {
                info!(operation = %n.operation, "{}", n.message);
            }
        }
    }
}

/// Forwards notifications over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, notification: Notification) {
        // A dropped receiver means nobody is listening any more.
        let _ = self.tx.send(notification);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DISMISS: Operation = Operation::new(Resource::Alerts, Verb::Delete);

    #[test]
    fn operation_reads_as_resource_dot_verb() {
        assert_eq!(DISMISS.to_string(), "alerts.delete");
        assert_eq!(
            Operation::new(Resource::Reports, Verb::GetAll).to_string(),
            "reports.get_all"
        );
    }

    #[test]
    fn channel_sink_delivers_in_order() {
        let (sink, mut rx) = ChannelSink::new();
        sink.notify(Notification::success(DISMISS, "Alert dismissed"));
        sink.notify(Notification::error(DISMISS, "Failed to dismiss alert"));

        let first = rx.try_recv().unwrap();
        assert_eq!(first.level, NotificationLevel::Success);
        assert_eq!(first.message, "Alert dismissed");
        assert_eq!(rx.try_recv().unwrap().level, NotificationLevel::Error);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_sink_survives_dropped_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.notify(Notification::info(DISMISS, "ignored"));
    }
}
