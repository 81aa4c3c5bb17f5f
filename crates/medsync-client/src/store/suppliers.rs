//! # Supplier Store
//!
//! State container for the supplier collection. Same contract as the
//! inventory store: full replacement on fetch, optimistic merge on update,
//! untouched records on any failure.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use medsync_core::{Supplier, SupplierPatch};

use crate::error::SyncResult;
use crate::service::{DataSource, SupplyService};
use crate::store::collection::{Collection, StoreView};

/// Owns the in-memory supplier collection.
pub struct SupplierStore {
    service: Arc<SupplyService>,
    state: RwLock<Collection<Supplier>>,
}

impl SupplierStore {
    pub fn new(service: Arc<SupplyService>) -> Self {
        SupplierStore {
            service,
            state: RwLock::new(Collection::new()),
        }
    }

    pub async fn suppliers(&self) -> Vec<Supplier> {
        self.state.read().await.records().to_vec()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error().map(String::from)
    }

    pub async fn view(&self) -> StoreView<Supplier> {
        self.state.read().await.view()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.clear_error();
    }

    pub async fn fetch(&self) -> SyncResult<DataSource> {
        let token = self.state.write().await.begin_fetch();

        match self.service.get_suppliers().await {
            Ok(fetched) => {
                if !self.state.write().await.finish_fetch(token, fetched.data) {
                    debug!(token, "Discarding stale supplier fetch response");
                }
                Ok(fetched.source)
            }
            Err(e) => {
                self.state.write().await.fail_fetch(token, e.to_string());
                Err(e)
            }
        }
    }

    pub async fn add(&self, supplier: Supplier) -> SyncResult<Supplier> {
        self.state.write().await.begin_mutation();

        match self.service.add_supplier(&supplier).await {
            Ok(echo) => {
                let record = match echo {
                    Some(record) => record,
                    None => {
                        let mut record = supplier;
                        if record.id.trim().is_empty() {
                            record.id = Uuid::new_v4().to_string();
                        }
                        record
                    }
                };
                self.state.write().await.finish_append(record.clone());
                Ok(record)
            }
            Err(e) => {
                self.state.write().await.fail_mutation(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: &str, patch: SupplierPatch) -> SyncResult<()> {
        self.state.write().await.begin_mutation();

        match self.service.update_supplier(id, &patch).await {
            Ok(()) => {
                if !self
                    .state
                    .write()
                    .await
                    .finish_merge(id, |supplier| patch.apply(supplier))
                {
                    debug!(id, "Updated supplier not cached locally");
                }
                Ok(())
            }
            Err(e) => {
                self.state.write().await.fail_mutation(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> SyncResult<()> {
        self.state.write().await.begin_mutation();

        match self.service.delete_supplier(id).await {
            Ok(()) => {
                self.state.write().await.finish_remove(id);
                Ok(())
            }
            Err(e) => {
                self.state.write().await.fail_mutation(e.to_string());
                Err(e)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::fallback;
    use crate::gateway::ScriptTransport;
    use crate::testing::StubTransport;
    use medsync_core::EntityStatus;
    use serde_json::Value;

    fn store(stub: &Arc<StubTransport>) -> SupplierStore {
        SupplierStore::new(Arc::new(SupplyService::new(
            stub.clone() as Arc<dyn ScriptTransport>
        )))
    }

    #[tokio::test]
    async fn test_timeout_fetch_yields_two_row_fallback() {
        let stub = StubTransport::new();
        stub.push_err(SyncError::Timeout(30));
        let store = store(&stub);

        let source = store.fetch().await.unwrap();

        assert_eq!(source, DataSource::Fallback);
        assert_eq!(store.suppliers().await, fallback::suppliers());
        assert_eq!(store.suppliers().await.len(), 2);
        // A substituted read settles as success: no error, not loading.
        assert!(store.error().await.is_none());
        assert!(!store.loading().await);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_supplier_and_sets_error() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::suppliers()).unwrap());
        stub.push_rejected("Supplier has open orders");
        let store = store(&stub);
        store.fetch().await.unwrap();

        let err = store.delete("SUP001").await.unwrap_err();
        assert_eq!(err.to_string(), "Supplier has open orders");

        let suppliers = store.suppliers().await;
        assert!(suppliers.iter().any(|s| s.id == "SUP001"));
        assert_eq!(
            store.error().await.as_deref(),
            Some("Supplier has open orders")
        );
    }

    #[tokio::test]
    async fn test_successful_delete_removes_supplier() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::suppliers()).unwrap());
        stub.push_ok(Value::Null);
        let store = store(&stub);
        store.fetch().await.unwrap();

        store.delete("SUP001").await.unwrap();
        let suppliers = store.suppliers().await;
        assert!(suppliers.iter().all(|s| s.id != "SUP001"));
        assert_eq!(suppliers.len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_status_change() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::suppliers()).unwrap());
        stub.push_ok(Value::Null);
        let store = store(&stub);
        store.fetch().await.unwrap();

        let patch = SupplierPatch {
            status: Some(EntityStatus::Inactive),
            ..Default::default()
        };
        store.update("SUP002", patch).await.unwrap();

        let suppliers = store.suppliers().await;
        let updated = suppliers.iter().find(|s| s.id == "SUP002").unwrap();
        assert_eq!(updated.status, EntityStatus::Inactive);
        assert_eq!(updated.name, "MediSupply");
    }

    #[tokio::test]
    async fn test_add_appends_to_end() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::suppliers()).unwrap());
        stub.push_ok(Value::Null);
        let store = store(&stub);
        store.fetch().await.unwrap();

        let mut supplier = fallback::suppliers()[0].clone();
        supplier.id = "SUP003".into();
        supplier.name = "SafetyFirst".into();
        store.add(supplier).await.unwrap();

        let suppliers = store.suppliers().await;
        assert_eq!(suppliers.last().unwrap().id, "SUP003");
        assert_eq!(suppliers.len(), 3);
    }
}
