//! # Dashboard Store
//!
//! Holds the single dashboard snapshot (stat counters, recent activity,
//! alerts) and offers a periodic refresher so the overview stays current
//! while mounted.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use medsync_core::DashboardSnapshot;

use crate::error::SyncResult;
use crate::refresh::Refresher;
use crate::service::{DataSource, SupplyService};
use crate::store::collection::Slot;

/// Owns the in-memory dashboard snapshot.
pub struct DashboardStore {
    service: Arc<SupplyService>,
    state: RwLock<Slot<DashboardSnapshot>>,
}

impl DashboardStore {
    pub fn new(service: Arc<SupplyService>) -> Self {
        DashboardStore {
            service,
            state: RwLock::new(Slot::new()),
        }
    }

    /// The last-known snapshot, if any fetch has settled.
    pub async fn snapshot(&self) -> Option<DashboardSnapshot> {
        self.state.read().await.value().cloned()
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

        match self.service.get_dashboard_stats().await {
            Ok(fetched) => {
                if !self.state.write().await.finish_fetch(token, fetched.data) {
                    debug!(token, "Discarding stale dashboard fetch response");
                }
                Ok(fetched.source)
            }
            Err(e) => {
                self.state.write().await.fail_fetch(token, e.to_string());
                Err(e)
            }
        }
    }

    /// Spawns the fixed-interval refresh loop for this store.
    ///
    /// Runs until [`Refresher::stop`] is called, even if the handle or the
    /// owning view goes away first.
    pub fn spawn_refresher(self: &Arc<Self>, interval: Duration) -> Refresher {
        let store = Arc::clone(self);
        Refresher::spawn(interval, move || {
            let store = Arc::clone(&store);
            async move {
                let _ = store.fetch().await;
            }
        })
    }
}
