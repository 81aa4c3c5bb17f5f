//! # Settings Store
//!
//! Holds the singleton organization settings record. Updates are
//! optimistic: a confirmed patch merges into the cached record without a
//! re-fetch.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use medsync_core::{Settings, SettingsPatch};

use crate::error::SyncResult;
use crate::service::{DataSource, SupplyService};
use crate::store::collection::Slot;

/// Owns the in-memory settings record.
pub struct SettingsStore {
    service: Arc<SupplyService>,
    state: RwLock<Slot<Settings>>,
}

impl SettingsStore {
    pub fn new(service: Arc<SupplyService>) -> Self {
        SettingsStore {
            service,
            state: RwLock::new(Slot::new()),
        }
    }

    /// The cached settings, or defaults when nothing has been fetched.
    pub async fn settings(&self) -> Settings {
        self.state.read().await.value().cloned().unwrap_or_default()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error().map(String::from)
    }

    pub async fn clear_error(&self) {
        self.state.write().await.clear_error();
    }

    pub async fn fetch(&self) -> SyncResult<DataSource> {
        let token = self.state.write().await.begin_fetch();

        match self.service.get_settings().await {
            Ok(fetched) => {
                if !self.state.write().await.finish_fetch(token, fetched.data) {
                    debug!(token, "Discarding stale settings fetch response");
                }
                Ok(fetched.source)
            }
            Err(e) => {
                self.state.write().await.fail_fetch(token, e.to_string());
                Err(e)
            }
        }
    }

    /// Updates settings; on confirmation the patch merges into the cached
    /// record (or into defaults when none is cached yet).
    pub async fn update(&self, patch: SettingsPatch) -> SyncResult<()> {
        self.state.write().await.begin_mutation();

        match self.service.update_settings(&patch).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                let mut settings = state.value().cloned().unwrap_or_default();
                patch.apply(&mut settings);
                state.finish_mutation(settings);
                Ok(())
            }
            Err(e) => {
                self.state.write().await.fail_mutation(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;
    use crate::gateway::ScriptTransport;
    use crate::testing::StubTransport;
    use serde_json::Value;

    fn store(stub: &Arc<StubTransport>) -> SettingsStore {
        SettingsStore::new(Arc::new(SupplyService::new(
            stub.clone() as Arc<dyn ScriptTransport>
        )))
    }

    #[tokio::test]
    async fn test_fetch_then_patch_merges() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::settings()).unwrap());
        stub.push_ok(Value::Null);
        let store = store(&stub);

        store.fetch().await.unwrap();
        assert_eq!(store.settings().await.organization_name, "Rama Medical Supply");

        let patch = SettingsPatch {
            expiry_warning_days: Some(14),
            ..Default::default()
        };
        store.update(patch).await.unwrap();

        let settings = store.settings().await;
        assert_eq!(settings.expiry_warning_days, 14);
        // Untouched fields keep the fetched values.
        assert_eq!(settings.organization_name, "Rama Medical Supply");
        assert_eq!(settings.currency, "USD");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_cached_settings() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::settings()).unwrap());
        stub.push_rejected("read-only sheet");
        let store = store(&stub);
        store.fetch().await.unwrap();
        let before = store.settings().await;

        let patch = SettingsPatch {
            currency: Some("EUR".into()),
            ..Default::default()
        };
        assert!(store.update(patch).await.is_err());
        assert_eq!(store.settings().await, before);
        assert_eq!(store.error().await.as_deref(), Some("read-only sheet"));
    }
}
