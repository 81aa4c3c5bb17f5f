//! # Connection Monitor
//!
//! Tracks endpoint reachability. The monitor holds the last observed
//! [`ConnectionState`] in a watch channel so any number of views can
//! subscribe; `probe` issues a `testConnection` round trip, and external
//! online/offline signals re-test connectivity opportunistically.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::service::SupplyService;

/// Last observed endpoint reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No probe has completed yet.
    #[default]
    Unknown,
    Online,
    Offline,
}

/// Connectivity state shared across views.
pub struct ConnectionMonitor {
    service: Arc<SupplyService>,
    state: watch::Sender<ConnectionState>,
}

impl ConnectionMonitor {
    pub fn new(service: Arc<SupplyService>) -> Self {
        let (state, _) = watch::channel(ConnectionState::default());
        ConnectionMonitor { service, state }
    }

    /// The last observed state.
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Subscribes to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Issues a `testConnection` round trip and records the outcome.
    pub async fn probe(&self) -> bool {
        let online = self.service.test_connection().await;
        let next = if online {
            ConnectionState::Online
        } else {
            ConnectionState::Offline
        };
        if self.state.send_replace(next) != next {
            info!(state = ?next, "Connection state changed");
        }
        online
    }

    /// External went-online signal; re-tests connectivity opportunistically
    /// instead of trusting the signal.
    pub async fn notify_online(&self) -> bool {
        self.probe().await
    }

    /// External went-offline signal. Recorded as-is; there is nothing to
    /// probe without a network.
    pub fn notify_offline(&self) {
        if self.state.send_replace(ConnectionState::Offline) != ConnectionState::Offline {
            info!("Connection state changed to offline");
        }
    }
}
