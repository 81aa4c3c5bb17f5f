//! # Branch Store
//!
//! State container for the branch directory.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use medsync_core::{Branch, BranchPatch};

use crate::error::SyncResult;
use crate::service::{DataSource, SupplyService};
use crate::store::collection::{Collection, StoreView};

/// Owns the in-memory branch collection.
pub struct BranchStore {
    service: Arc<SupplyService>,
    state: RwLock<Collection<Branch>>,
}

impl BranchStore {
    pub fn new(service: Arc<SupplyService>) -> Self {
        BranchStore {
            service,
            state: RwLock::new(Collection::new()),
        }
    }

    pub async fn branches(&self) -> Vec<Branch> {
        self.state.read().await.records().to_vec()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error().map(String::from)
    }

    pub async fn view(&self) -> StoreView<Branch> {
        self.state.read().await.view()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.clear_error();
    }

    /// The designated main warehouse branch, if cached.
    pub async fn main_branch(&self) -> Option<Branch> {
        self.state
            .read()
            .await
            .records()
            .iter()
            .find(|b| b.is_main)
            .cloned()
    }

    pub async fn fetch(&self) -> SyncResult<DataSource> {
        let token = self.state.write().await.begin_fetch();

        match self.service.get_branches().await {
            Ok(fetched) => {
                if !self.state.write().await.finish_fetch(token, fetched.data) {
                    debug!(token, "Discarding stale branch fetch response");
                }
                Ok(fetched.source)
            }
            Err(e) => {
                self.state.write().await.fail_fetch(token, e.to_string());
                Err(e)
            }
        }
    }

    pub async fn add(&self, branch: Branch) -> SyncResult<Branch> {
        self.state.write().await.begin_mutation();

        match self.service.add_branch(&branch).await {
            Ok(echo) => {
                let record = match echo {
                    Some(record) => record,
                    None => {
                        let mut record = branch;
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

    pub async fn update(&self, id: &str, patch: BranchPatch) -> SyncResult<()> {
        self.state.write().await.begin_mutation();

        match self.service.update_branch(id, &patch).await {
            Ok(()) => {
                if !self
                    .state
                    .write()
                    .await
                    .finish_merge(id, |branch| patch.apply(branch))
                {
                    debug!(id, "Updated branch not cached locally");
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

        match self.service.delete_branch(id).await {
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
