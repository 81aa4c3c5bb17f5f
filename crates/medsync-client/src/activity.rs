//! # Activity Logger
//!
//! Best-effort audit sink. `record` returns immediately; the write happens
//! on a spawned task and every failure is swallowed after a diagnostic
//! `warn!`. Logging must never block or fail the user-visible action it
//! annotates.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::service::SupplyService;

/// One audit event as emitted by a view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    /// Short action label ("Login", "Inventory Update").
    pub action: String,
    /// Email of the acting user.
    pub user: String,
    pub details: String,
}

impl ActivityEvent {
    pub fn new(
        action: impl Into<String>,
        user: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        ActivityEvent {
            action: action.into(),
            user: user.into(),
            details: details.into(),
        }
    }
}

/// Fire-and-forget sink for [`ActivityEvent`]s.
pub struct ActivityLogger {
    service: Arc<SupplyService>,
    client: String,
}

impl ActivityLogger {
    pub fn new(service: Arc<SupplyService>) -> Self {
        ActivityLogger {
            service,
            client: format!("medsync-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Records an event. Returns immediately; never fails the caller.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn record(&self, event: ActivityEvent) {
        let service = self.service.clone();
        let payload = json!({
            "action": event.action,
            "user": event.user,
            "details": event.details,
            "timestamp": Utc::now().to_rfc3339(),
            "client": self.client,
        });

        tokio::spawn(async move {
            service.log_activity(payload).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::gateway::ScriptTransport;
    use crate::protocol::Action;
    use crate::testing::StubTransport;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_record_stamps_context_and_sends() {
        let stub = StubTransport::new();
        let logger = ActivityLogger::new(Arc::new(SupplyService::new(
            stub.clone() as Arc<dyn ScriptTransport>,
        )));

        logger.record(ActivityEvent::new(
            "Transfer Approved",
            "admin@rama.com",
            "Transfer TR-001 approved",
        ));
        // Let the spawned task run.
        tokio::time::sleep(Duration::from_millis(1)).await;

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        let (action, payload) = &calls[0];
        assert_eq!(*action, Action::LogActivity);
        assert_eq!(payload["activity"]["action"], "Transfer Approved");
        assert_eq!(payload["activity"]["user"], "admin@rama.com");
        assert!(payload["activity"]["timestamp"].is_string());
        assert!(payload["activity"]["client"]
            .as_str()
            .unwrap()
            .starts_with("medsync-client/"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_never_reach_the_caller() {
        let stub = StubTransport::new();
        stub.push_err(SyncError::Timeout(30));
        stub.push_rejected("audit sheet full");
        let logger = ActivityLogger::new(Arc::new(SupplyService::new(
            stub.clone() as Arc<dyn ScriptTransport>,
        )));

        // Both failures are swallowed inside the spawned tasks.
        logger.record(ActivityEvent::new("Login", "admin@rama.com", ""));
        logger.record(ActivityEvent::new("Login", "admin@rama.com", ""));
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(stub.calls().len(), 2);
    }
}
