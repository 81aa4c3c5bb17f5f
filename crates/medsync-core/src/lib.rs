//! # medsync-core: Pure Domain Logic for MedSync
//!
//! This crate contains the pure, I/O-free domain layer of MedSync: the
//! record types for a medical supply-chain operation, the partial-update
//! (patch) merge rules, centralized status derivation, and input validation.
//!
//! ## Crate Map
//! - [`types`] - flat domain records as they cross the wire
//! - [`patch`] - Option-field partial updates and the shallow-merge law
//! - [`status`] - stock/expiry classification, derived, never stored
//! - [`validation`] - pre-submission input checks
//! - [`error`] - domain error types
//!
//! ## Golden Rule
//! No I/O. Everything here is testable without a network, a file system, or
//! a mock. The companion crate `medsync-client` owns every remote call.

pub mod error;
pub mod patch;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use patch::{
    BranchPatch, CustomerPatch, InventoryPatch, SettingsPatch, SupplierPatch, TransactionPatch,
    TransferPatch,
};
pub use status::{
    count_below_minimum, count_expiring, expires_within, is_below_minimum, is_expired,
    stock_status, total_stock_value, StockStatus,
};
pub use types::{
    ActivityEntry, AlertSeverity, Branch, Customer, DashboardAlert, DashboardSnapshot,
    DashboardStats, DateRange, EntityStatus, InventoryItem, NewUser, Priority, Report, ReportType,
    Settings, Supplier, Transaction, TransactionType, Transfer, TransferItem, TransferStatus,
    User, UserRole,
};

/// Default expiring-soon window, in days, when settings are unavailable.
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 30;
