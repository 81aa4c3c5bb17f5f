//! # Transaction Store
//!
//! State container for the stock-movement ledger.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use medsync_core::{Transaction, TransactionPatch};

use crate::error::SyncResult;
use crate::service::{DataSource, SupplyService};
use crate::store::collection::{Collection, StoreView};

/// Owns the in-memory transaction collection.
pub struct TransactionStore {
    service: Arc<SupplyService>,
    state: RwLock<Collection<Transaction>>,
}

impl TransactionStore {
    pub fn new(service: Arc<SupplyService>) -> Self {
        TransactionStore {
            service,
            state: RwLock::new(Collection::new()),
        }
    }

    pub async fn transactions(&self) -> Vec<Transaction> {
        self.state.read().await.records().to_vec()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error().map(String::from)
    }

    pub async fn view(&self) -> StoreView<Transaction> {
        self.state.read().await.view()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.clear_error();
    }

    pub async fn fetch(&self) -> SyncResult<DataSource> {
        let token = self.state.write().await.begin_fetch();

        match self.service.get_transactions().await {
            Ok(fetched) => {
                if !self.state.write().await.finish_fetch(token, fetched.data) {
                    debug!(token, "Discarding stale transaction fetch response");
                }
                Ok(fetched.source)
            }
            Err(e) => {
                self.state.write().await.fail_fetch(token, e.to_string());
                Err(e)
            }
        }
    }

    pub async fn add(&self, transaction: Transaction) -> SyncResult<Transaction> {
        self.state.write().await.begin_mutation();

        match self.service.add_transaction(&transaction).await {
            Ok(echo) => {
                let record = match echo {
                    Some(record) => record,
                    None => {
                        let mut record = transaction;
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

    pub async fn update(&self, id: &str, patch: TransactionPatch) -> SyncResult<()> {
        self.state.write().await.begin_mutation();

        match self.service.update_transaction(id, &patch).await {
            Ok(()) => {
                if !self
                    .state
                    .write()
                    .await
                    .finish_merge(id, |transaction| patch.apply(transaction))
                {
                    debug!(id, "Updated transaction not cached locally");
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

        match self.service.delete_transaction(id).await {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::fallback;
    use crate::gateway::ScriptTransport;
    use crate::testing::StubTransport;
    use serde_json::Value;

    fn store(stub: &Arc<StubTransport>) -> TransactionStore {
        TransactionStore::new(Arc::new(SupplyService::new(
            stub.clone() as Arc<dyn ScriptTransport>
        )))
    }

    #[tokio::test]
    async fn test_fetch_and_append() {
        let stub = StubTransport::new();
        stub.push_ok(serde_json::to_value(fallback::transactions()).unwrap());
        stub.push_ok(Value::Null);
        let store = store(&stub);
        store.fetch().await.unwrap();

        let mut txn = fallback::transactions()[0].clone();
        txn.id = "TXN100".into();
        store.add(txn).await.unwrap();

        let transactions = store.transactions().await;
        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions.last().unwrap().id, "TXN100");
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let stub = StubTransport::new();
        stub.push_err(SyncError::Timeout(30));
        let store = store(&stub);

        assert_eq!(store.fetch().await.unwrap(), DataSource::Fallback);
        assert_eq!(store.transactions().await, fallback::transactions());
    }
}
