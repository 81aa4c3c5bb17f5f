//! # medsync-client: Data-Sync Layer for MedSync
//!
//! This crate is the client-side data-synchronization layer for the MedSync
//! dashboard: every remote call, every in-memory entity collection, and the
//! session/audit/connectivity plumbing around them.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Data-Sync Architecture                             │
//! │                                                                         │
//! │  view ──► store operation ──► SupplyService ──► HttpGateway ──► POST   │
//! │                │                   │                                    │
//! │                │                   └── read failure? substitute the    │
//! │                │                       fallback dataset (provenance    │
//! │                │                       reported as DataSource)         │
//! │                │                                                        │
//! │                └── merges the confirmed result into its collection:    │
//! │                    fetch replaces, add appends, update shallow-merges, │
//! │                    delete removes; failures leave records untouched    │
//! │                                                                         │
//! │  AUXILIARY:                                                            │
//! │  • SessionStore / AuthStore  - durable current user + remembered name  │
//! │  • ActivityLogger            - fire-and-forget audit sink              │
//! │  • ConnectionMonitor         - online/offline probe + watch channel    │
//! │  • Refresher                 - fixed-interval dashboard re-fetch       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - endpoint URL, timeout, refresh cadence (TOML + env)
//! - [`protocol`] - the action catalog and request/response envelopes
//! - [`gateway`] - the one HTTP adapter and the transport seam
//! - [`fallback`] - hard-coded substitute datasets per read action
//! - [`service`] - the facade: one method per action, fallback policy
//! - [`store`] - per-entity state containers
//! - [`session`] - durable session state
//! - [`activity`] - best-effort audit sink
//! - [`probe`] - connectivity monitor
//! - [`refresh`] - fixed-interval refresher
//! - [`export`] - local CSV assembly and server-rendered export decoding
//! - [`error`] - the transport/protocol/domain error taxonomy
//!
//! ## Usage
//! ```rust,ignore
//! use std::sync::Arc;
//! use medsync_client::{ClientConfig, SupplyService};
//! use medsync_client::store::InventoryStore;
//!
//! let config = ClientConfig::load_or_default(None);
//! let service = Arc::new(SupplyService::from_config(&config)?);
//!
//! let inventory = InventoryStore::new(service.clone());
//! let source = inventory.fetch().await?;
//! println!("{} items ({:?})", inventory.items().await.len(), source);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod activity;
pub mod config;
pub mod error;
pub mod export;
pub mod fallback;
pub mod gateway;
pub mod probe;
pub mod protocol;
pub mod refresh;
pub mod service;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use activity::{ActivityEvent, ActivityLogger};
pub use config::ClientConfig;
pub use error::{SyncError, SyncResult};
pub use export::{csv_document, ExportFile};
pub use gateway::{HttpGateway, ScriptTransport};
pub use probe::{ConnectionMonitor, ConnectionState};
pub use protocol::{Action, ScriptRequest, ScriptResponse};
pub use refresh::Refresher;
pub use service::{DataSource, Fetched, SupplyService};
pub use session::SessionStore;
