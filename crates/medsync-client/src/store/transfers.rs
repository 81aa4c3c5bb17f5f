//! # Transfer Store
//!
//! State container for branch-to-branch transfer requests. Besides the
//! generic fetch/add/update operations it carries the two shortcuts every
//! view needs: approve and reject, which stamp the acting user and the
//! decision time into the status patch.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use medsync_core::{Transfer, TransferPatch, TransferStatus};

use crate::error::SyncResult;
use crate::service::{DataSource, SupplyService};
use crate::store::collection::{Collection, StoreView};

/// Owns the in-memory transfer collection.
pub struct TransferStore {
    service: Arc<SupplyService>,
    state: RwLock<Collection<Transfer>>,
}

impl TransferStore {
    pub fn new(service: Arc<SupplyService>) -> Self {
        TransferStore {
            service,
            state: RwLock::new(Collection::new()),
        }
    }

    pub async fn transfers(&self) -> Vec<Transfer> {
        self.state.read().await.records().to_vec()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error().map(String::from)
    }

    pub async fn view(&self) -> StoreView<Transfer> {
        self.state.read().await.view()
    }

    pub async fn clear_error(&self) {
        self.state.write().await.clear_error();
    }

    pub async fn fetch(&self) -> SyncResult<DataSource> {
        let token = self.state.write().await.begin_fetch();

        match self.service.get_transfers().await {
            Ok(fetched) => {
                if !self.state.write().await.finish_fetch(token, fetched.data) {
                    debug!(token, "Discarding stale transfer fetch response");
                }
                Ok(fetched.source)
            }
            Err(e) => {
                self.state.write().await.fail_fetch(token, e.to_string());
                Err(e)
            }
        }
    }

    pub async fn add(&self, transfer: Transfer) -> SyncResult<Transfer> {
        self.state.write().await.begin_mutation();

        match self.service.add_transfer(&transfer).await {
            Ok(echo) => {
                let record = match echo {
                    Some(record) => record,
                    None => {
                        let mut record = transfer;
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

    pub async fn update(&self, id: &str, patch: TransferPatch) -> SyncResult<()> {
        self.state.write().await.begin_mutation();

        match self.service.update_transfer(id, &patch).await {
            Ok(()) => {
                if !self
                    .state
                    .write()
                    .await
                    .finish_merge(id, |transfer| patch.apply(transfer))
                {
                    debug!(id, "Updated transfer not cached locally");
                }
                Ok(())
            }
            Err(e) => {
                self.state.write().await.fail_mutation(e.to_string());
                Err(e)
            }
        }
    }

    /// Approves a pending transfer, stamping approver and decision time.
    pub async fn approve(&self, id: &str, approver: &str) -> SyncResult<()> {
        let patch = TransferPatch {
            status: Some(TransferStatus::Approved),
            approved_by: Some(approver.to_string()),
            approved_date: Some(Utc::now()),
            ..Default::default()
        };
        self.update(id, patch).await
    }

    /// Rejects a pending transfer, stamping who declined it.
    pub async fn reject(&self, id: &str, approver: &str) -> SyncResult<()> {
        let patch = TransferPatch {
            status: Some(TransferStatus::Rejected),
            approved_by: Some(approver.to_string()),
            approved_date: Some(Utc::now()),
            ..Default::default()
        };
        self.update(id, patch).await
    }
}
