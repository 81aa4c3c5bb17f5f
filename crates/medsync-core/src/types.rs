//! # Domain Records
//!
//! Core domain records used throughout MedSync.
//!
//! ## Record Landscape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Records                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InventoryItem   │   │   Supplier /    │   │    Transfer     │       │
//! │  │  ─────────────  │   │   Customer      │   │  ─────────────  │       │
//! │  │  id (business)  │   │  ─────────────  │   │  id             │       │
//! │  │  currentStock   │   │  id             │   │  fromBranch     │       │
//! │  │  minStock       │   │  contact info   │   │  toBranch       │       │
//! │  │  expiryDate     │   │  status         │   │  items[]        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Transaction │ Branch │ Settings │ User │ ActivityEntry │ Dashboard    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Every record serializes as camelCase JSON because the script endpoint and
//! the dashboard frontend both speak JavaScript conventions. Records are flat
//! and carry no relational integrity: an `InventoryItem` references its
//! supplier by *name*, not id, and aggregate metrics on partners are
//! display-only (never recomputed from transactions client-side).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Shared Enums
// =============================================================================

/// Lifecycle status shared by suppliers, customers, and branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    /// Record is in active use.
    #[default]
    Active,
    /// Record is awaiting approval or onboarding.
    Pending,
    /// Record is retired but kept for history.
    Inactive,
}

impl EntityStatus {
    /// Returns true for records the dashboard treats as operational.
    pub fn is_active(&self) -> bool {
        matches!(self, EntityStatus::Active)
    }
}

/// The status of a stock transfer between branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Requested, waiting for a manager decision.
    #[default]
    #[serde(rename = "pending")]
    PendingApproval,
    /// Approved, goods not yet moved.
    Approved,
    /// Goods received at the destination branch.
    Completed,
    /// Request declined.
    Rejected,
}

impl TransferStatus {
    /// Returns true while the transfer still needs action.
    pub fn is_open(&self) -> bool {
        matches!(self, TransferStatus::PendingApproval | TransferStatus::Approved)
    }
}

/// Transfer priority as requested by the originating branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

// =============================================================================
// Inventory
// =============================================================================

/// A stocked item at a location.
///
/// ## Invariants assumed by views
/// - `current_stock` and `min_stock` are non-negative
/// - there is no stored status field: stock status is always derived by
///   comparing `current_stock` against `min_stock`/`max_stock`
///   (see [`crate::status::stock_status`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Business identifier (e.g. "INV001").
    pub id: String,

    /// Display name shown in inventory tables.
    pub name: String,

    /// Category label ("Medications", "PPE", ...).
    pub category: String,

    /// Units currently on hand.
    pub current_stock: i64,

    /// Reorder threshold.
    pub min_stock: i64,

    /// Storage ceiling for this item.
    pub max_stock: i64,

    /// Unit label ("tablets", "vials", "pieces").
    pub unit: String,

    /// Shelf location code (e.g. "A1-B2").
    pub location: String,

    /// Expiry date of the current lot.
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,

    /// Supplier reference by display name, not id.
    pub supplier: String,

    /// Unit cost in the operating currency.
    pub cost: f64,

    /// When the row was last touched on the remote sheet.
    #[ts(as = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

// =============================================================================
// Suppliers & Customers
// =============================================================================

/// A supplier of medical goods.
///
/// Aggregate metrics (`rating`, `total_orders`, `total_value`) are
/// display-only values maintained on the remote sheet; the client never
/// recomputes them from transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// Contact person.
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Supply category ("Medications", "Medical Equipment", ...).
    pub category: String,
    #[serde(default)]
    pub status: EntityStatus,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub total_value: f64,
    /// Date of the most recent order placed with this supplier.
    #[ts(as = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_order: Option<NaiveDate>,
}

/// A purchasing customer (hospital, clinic, pharmacy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Customer category ("Hospital", "Clinic", ...). Serialized as `type`.
    #[serde(rename = "type")]
    pub customer_type: String,
    #[serde(default)]
    pub status: EntityStatus,
    #[serde(default)]
    pub credit_limit: f64,
    #[serde(default)]
    pub current_balance: f64,
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub total_value: f64,
}

// =============================================================================
// Transfers
// =============================================================================

/// One line entry of a transfer request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransferItem {
    /// Item display name (transfers reference items by name, not id).
    pub name: String,
    pub quantity: i64,
    pub unit: String,
}

/// A stock transfer between two branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub from_branch: String,
    pub to_branch: String,
    /// Ordered list of line entries.
    pub items: Vec<TransferItem>,
    #[serde(default)]
    pub status: TransferStatus,
    /// Email of the requesting user.
    pub requested_by: String,
    #[ts(as = "String")]
    pub request_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[ts(as = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// Transactions
// =============================================================================

/// The direction of a stock transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Goods received from a supplier.
    Purchase,
    /// Goods dispatched to a customer.
    Sale,
    /// Manual stock correction.
    Adjustment,
    /// Goods returned by a customer or to a supplier.
    Return,
}

/// A single stock movement, fetched wholesale from the remote endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_amount: f64,
    /// Supplier or customer name, depending on direction.
    pub counterparty: String,
    pub branch: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

// =============================================================================
// Branches
// =============================================================================

/// A physical branch participating in transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub address: String,
    pub manager: String,
    pub phone: String,
    #[serde(default)]
    pub status: EntityStatus,
    /// The main warehouse branch, used as the default transfer source.
    #[serde(default)]
    pub is_main: bool,
}

// =============================================================================
// Settings
// =============================================================================

/// Organization-wide dashboard settings, stored as one remote record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub organization_name: String,
    pub contact_email: String,
    /// ISO 4217 code used for all monetary displays.
    pub currency: String,
    pub low_stock_alerts: bool,
    /// Days before expiry at which an item counts as expiring soon.
    pub expiry_warning_days: i64,
    /// Dashboard auto-refresh cadence in minutes.
    pub auto_refresh_minutes: i64,
    pub default_branch: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            organization_name: String::new(),
            contact_email: String::new(),
            currency: "USD".to_string(),
            low_stock_alerts: true,
            expiry_warning_days: crate::DEFAULT_EXPIRY_WARNING_DAYS,
            auto_refresh_minutes: 5,
            default_branch: String::new(),
        }
    }
}

// =============================================================================
// Users & Auth
// =============================================================================

/// Role of an authenticated dashboard user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Staff,
}

/// An authenticated user as echoed by the `authenticate` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[ts(as = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

/// Registration payload for the `registerUser` action.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

// =============================================================================
// Activity Log
// =============================================================================

/// One row of the remote audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Row number assigned by the remote sheet; 0 until persisted.
    #[serde(default)]
    pub id: i64,
    /// Short action label ("Inventory Update", "Transfer Approved").
    pub action: String,
    /// Email of the acting user.
    pub user: String,
    pub details: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Aggregate counters for the dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_items: i64,
    pub low_stock_alerts: i64,
    pub expiring_items: i64,
    pub monthly_procurement: f64,
}

/// Alert severity for dashboard banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

/// A dashboard alert row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAlert {
    /// Alert kind ("low_stock", "expiry", ...).
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
    pub severity: AlertSeverity,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

/// The full payload of the `getDashboardStats` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_activities: Vec<ActivityEntry>,
    #[serde(default)]
    pub alerts: Vec<DashboardAlert>,
}

// =============================================================================
// Reports
// =============================================================================

/// Report families the endpoint can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Inventory,
    Financial,
    Transfers,
    Suppliers,
}

impl ReportType {
    /// Wire string used in report payloads and export file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Inventory => "inventory",
            ReportType::Financial => "financial",
            ReportType::Transfers => "transfers",
            ReportType::Suppliers => "suppliers",
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive date range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[ts(as = "String")]
    pub start: NaiveDate,
    #[ts(as = "String")]
    pub end: NaiveDate,
}

/// A generated report.
///
/// The `data` payload varies by report family and is kept as raw JSON:
/// report bodies are rendered, never interpreted, client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_type: ReportType,
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    #[ts(type = "unknown")]
    pub data: serde_json::Value,
}

// =============================================================================
// Unit Tests
// =============================================================================
