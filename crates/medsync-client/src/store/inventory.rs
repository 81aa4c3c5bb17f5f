//! # Inventory Store
//!
//! State container for the inventory collection.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Inventory Store Operations                             │
//! │                                                                         │
//! │  View action            Store call             Local state change      │
//! │  ───────────            ──────────             ──────────────────      │
//! │  Open inventory ──────► fetch()  ────────────► records = server rows   │
//! │  Save new item ───────► add(item) ───────────► records.push(echo)      │
//! │  Edit stock ──────────► update(id, patch) ───► merge patch into record │
//! │  Remove item ─────────► delete(id) ──────────► drop record by id       │
//! │                                                                         │
//! │  Confirmed updates merge into the cached record without re-fetching    │
//! │  the canonical row; untouched fields may be stale until the next       │
//! │  full fetch.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use medsync_core::{InventoryItem, InventoryPatch};

use crate::error::SyncResult;
use crate::service::{DataSource, SupplyService};
use crate::store::collection::{Collection, StoreView};

/// Owns the in-memory inventory collection.
pub struct InventoryStore {
    service: Arc<SupplyService>,
    state: RwLock<Collection<InventoryItem>>,
}

impl InventoryStore {
    pub fn new(service: Arc<SupplyService>) -> Self {
        InventoryStore {
            service,
            state: RwLock::new(Collection::new()),
        }
    }

    /// Cloned records currently held.
    pub async fn items(&self) -> Vec<InventoryItem> {
        self.state.read().await.records().to_vec()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error().map(String::from)
    }

    /// Records plus flags in one consistent snapshot.
    pub async fn view(&self) -> StoreView<InventoryItem> {
        self.state.read().await.view()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.clear_error();
    }

    /// Fetches the full collection, replacing local rows on success.
    pub async fn fetch(&self) -> SyncResult<DataSource> {
        let token = self.state.write().await.begin_fetch();

        match self.service.get_inventory().await {
            Ok(fetched) => {
                if !self.state.write().await.finish_fetch(token, fetched.data) {
                    debug!(token, "Discarding stale inventory fetch response");
                }
                Ok(fetched.source)
            }
            Err(e) => {
                self.state.write().await.fail_fetch(token, e.to_string());
                Err(e)
            }
        }
    }

    /// Adds an item; the confirmed record is appended to the collection.
    ///
    /// When the endpoint acknowledges without echoing the stored row, the
    /// submitted record is appended with a client-synthesized id.
    pub async fn add(&self, item: InventoryItem) -> SyncResult<InventoryItem> {
        self.state.write().await.begin_mutation();

        match self.service.add_inventory_item(&item).await {
            Ok(echo) => {
                let record = match echo {
                    Some(record) => record,
                    None => {
                        let mut record = item;
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

    /// Updates an item; on confirmation the patch is shallow-merged into
    /// the cached record.
    pub async fn update(&self, id: &str, patch: InventoryPatch) -> SyncResult<()> {
        self.state.write().await.begin_mutation();

        match self.service.update_inventory_item(id, &patch).await {
            Ok(()) => {
                if !self
                    .state
                    .write()
                    .await
                    .finish_merge(id, |item| patch.apply(item))
                {
                    debug!(id, "Updated item not cached locally");
                }
                Ok(())
            }
            Err(e) => {
                self.state.write().await.fail_mutation(e.to_string());
                Err(e)
            }
        }
    }

    /// Deletes an item; on confirmation the record is dropped locally.
    pub async fn delete(&self, id: &str) -> SyncResult<()> {
        self.state.write().await.begin_mutation();

        match self.service.delete_inventory_item(id).await {
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
    use serde_json::Value;
    use std::time::Duration;

    fn store(stub: &Arc<StubTransport>) -> InventoryStore {
        InventoryStore::new(Arc::new(SupplyService::new(
            stub.clone() as Arc<dyn ScriptTransport>
        )))
    }

    #[tokio::test]
    async fn test_fetch_replaces_collection() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::inventory()).unwrap());
        let store = store(&stub);

        let source = store.fetch().await.unwrap();
        assert_eq!(source, DataSource::Live);
        assert_eq!(store.items().await, fallback::inventory());
        assert!(!store.loading().await);
        assert!(store.error().await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_twice_is_idempotent() {
        let stub = StubTransport::new();
        let rows = serde_json::to_value(fallback::inventory()).unwrap();
        stub.push_ok(rows.clone());
        stub.push_ok(rows);
        let store = store(&stub);

        store.fetch().await.unwrap();
        let first = store.items().await;
        store.fetch().await.unwrap();
        let second = store.items().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_update_merges_patch_into_cached_record() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::inventory()).unwrap());
        stub.push_ok(Value::Null);
        let store = store(&stub);
        store.fetch().await.unwrap();

        let before: Vec<_> = store.items().await;
        let patch = InventoryPatch {
            current_stock: Some(40),
            ..Default::default()
        };
        store.update("INV002", patch).await.unwrap();

        let after = store.items().await;
        let updated = after.iter().find(|i| i.id == "INV002").unwrap();
        let original = before.iter().find(|i| i.id == "INV002").unwrap();

        assert_eq!(updated.current_stock, 40);
        // All other fields keep the pre-update values.
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.min_stock, original.min_stock);
        assert_eq!(updated.location, original.location);
        assert_eq!(updated.supplier, original.supplier);
        assert_eq!(updated.cost, original.cost);
        // Untouched rows are untouched.
        assert_eq!(
            after.iter().filter(|i| i.id != "INV002").count(),
            before.len() - 1
        );
    }

    #[tokio::test]
    async fn test_failed_update_leaves_collection_unchanged() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::inventory()).unwrap());
        stub.push_rejected("row locked");
        let store = store(&stub);
        store.fetch().await.unwrap();
        let before = store.items().await;

        let patch = InventoryPatch {
            current_stock: Some(0),
            ..Default::default()
        };
        let err = store.update("INV002", patch).await.unwrap_err();
        assert_eq!(err.to_string(), "row locked");

        assert_eq!(store.items().await, before);
        assert_eq!(store.error().await.as_deref(), Some("row locked"));
    }

    #[tokio::test]
    async fn test_add_appends_server_echo() {
        let stub = StubTransport::new();
        let mut echoed = fallback::inventory()[0].clone();
        echoed.id = "INV100".into();
        stub.push_ok(serde_json::to_value(&echoed).unwrap());
        let store = store(&stub);

        let submitted = InventoryItem {
            id: String::new(),
            ..fallback::inventory()[0].clone()
        };
        let added = store.add(submitted).await.unwrap();

        assert_eq!(added.id, "INV100");
        assert_eq!(store.items().await.last().unwrap().id, "INV100");
    }

    #[tokio::test]
    async fn test_add_without_echo_synthesizes_id() {
        let stub = StubTransport::new();
        stub.push_ok(Value::Null);
        let store = store(&stub);

        let submitted = InventoryItem {
            id: "  ".into(),
            ..fallback::inventory()[0].clone()
        };
        let added = store.add(submitted).await.unwrap();

        assert!(Uuid::parse_str(&added.id).is_ok());
        assert_eq!(store.items().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::inventory()).unwrap());
        stub.push_ok(Value::Null);
        let store = store(&stub);
        store.fetch().await.unwrap();

        store.delete("INV001").await.unwrap();
        assert!(store.items().await.iter().all(|i| i.id != "INV001"));
        assert_eq!(store.items().await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_order_fetch_resolves_to_latest_issued() {
        let stub = StubTransport::new();

        let slow_rows = fallback::inventory();
        let fast_rows = vec![fallback::inventory()[2].clone()];

        // First fetch parks for 100ms; the second answers after 10ms, so
        // the first response arrives last in wall-clock order.
        stub.push_ok_delayed(
            Duration::from_millis(100),
            serde_json::to_value(&slow_rows).unwrap(),
        );
        stub.push_ok_delayed(
            Duration::from_millis(10),
            serde_json::to_value(&fast_rows).unwrap(),
        );

        let store = Arc::new(store(&stub));

        let first = {
            let store = store.clone();
            tokio::spawn(async move { store.fetch().await })
        };
        // Let the first fetch issue its token and park in the transport.
        tokio::time::sleep(Duration::from_millis(1)).await;
        let second = {
            let store = store.clone();
            tokio::spawn(async move { store.fetch().await })
        };

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        // The slower, earlier-issued response is discarded: the collection
        // reflects the latest-issued request, not the last to resolve.
        assert_eq!(store.items().await, fast_rows);
        assert!(!store.loading().await);
        assert!(store.error().await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_timeout_substitutes_fallback_rows() {
        let stub = StubTransport::new();
        stub.push_err(SyncError::Timeout(30));
        let store = store(&stub);

        let source = store.fetch().await.unwrap();
        assert_eq!(source, DataSource::Fallback);
        assert_eq!(store.items().await, fallback::inventory());
        assert!(store.error().await.is_none());
        assert!(!store.loading().await);

        // The stub recorded the attempted action.
        assert_eq!(stub.calls()[0].0, crate::protocol::Action::GetInventory);
    }
}
