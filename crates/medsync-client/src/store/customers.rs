//! # Customer Store
//!
//! State container for the customer collection.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use medsync_core::{Customer, CustomerPatch};

use crate::error::SyncResult;
use crate::service::{DataSource, SupplyService};
use crate::store::collection::{Collection, StoreView};

/// Owns the in-memory customer collection.
pub struct CustomerStore {
    service: Arc<SupplyService>,
    state: RwLock<Collection<Customer>>,
}

impl CustomerStore {
    pub fn new(service: Arc<SupplyService>) -> Self {
        CustomerStore {
            service,
            state: RwLock::new(Collection::new()),
        }
    }

    pub async fn customers(&self) -> Vec<Customer> {
        self.state.read().await.records().to_vec()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error().map(String::from)
    }

    pub async fn view(&self) -> StoreView<Customer> {
        self.state.read().await.view()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.clear_error();
    }

    pub async fn fetch(&self) -> SyncResult<DataSource> {
        let token = self.state.write().await.begin_fetch();

        match self.service.get_customers().await {
            Ok(fetched) => {
                if !self.state.write().await.finish_fetch(token, fetched.data) {
                    debug!(token, "Discarding stale customer fetch response");
                }
                Ok(fetched.source)
            }
            Err(e) => {
                self.state.write().await.fail_fetch(token, e.to_string());
                Err(e)
            }
        }
    }

    pub async fn add(&self, customer: Customer) -> SyncResult<Customer> {
        self.state.write().await.begin_mutation();

        match self.service.add_customer(&customer).await {
            Ok(echo) => {
                let record = match echo {
                    Some(record) => record,
                    None => {
                        let mut record = customer;
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

    pub async fn update(&self, id: &str, patch: CustomerPatch) -> SyncResult<()> {
        self.state.write().await.begin_mutation();

        match self.service.update_customer(id, &patch).await {
            Ok(()) => {
                if !self
                    .state
                    .write()
                    .await
                    .finish_merge(id, |customer| patch.apply(customer))
                {
                    debug!(id, "Updated customer not cached locally");
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

        match self.service.delete_customer(id).await {
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
