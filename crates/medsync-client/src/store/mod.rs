//! # Entity Stores
//!
//! Per-entity reactive state containers.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Ownership                                  │
//! │                                                                         │
//! │  Each store exclusively owns ONE in-memory collection and fetches it   │
//! │  independently. There is no cross-store cache: the same supplier can   │
//! │  appear inconsistently across stores until each refetches.             │
//! │                                                                         │
//! │  InventoryStore   SupplierStore   CustomerStore   TransferStore        │
//! │  TransactionStore BranchStore     DashboardStore  SettingsStore        │
//! │  ReportStore      AuthStore                                            │
//! │                                                                         │
//! │  All share the Collection/Slot state machine (collection.rs):          │
//! │  loading flag, error string, monotonic fetch token.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod collection;

pub mod auth;
pub mod branches;
pub mod customers;
pub mod dashboard;
pub mod inventory;
pub mod reports;
pub mod settings;
pub mod suppliers;
pub mod transactions;
pub mod transfers;

pub use auth::AuthStore;
pub use branches::BranchStore;
pub use collection::{Collection, Keyed, Slot, StoreView};
pub use customers::CustomerStore;
pub use dashboard::DashboardStore;
pub use inventory::InventoryStore;
pub use reports::ReportStore;
pub use settings::SettingsStore;
pub use suppliers::SupplierStore;
pub use transactions::TransactionStore;
pub use transfers::TransferStore;
