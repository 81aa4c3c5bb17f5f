//! # Wire Protocol
//!
//! Message types for the script endpoint.
//!
//! ## Envelope Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Wire Protocol                                    │
//! │                                                                         │
//! │  Request (always POST, one URL):                                       │
//! │    { "action": "getInventory",                                         │
//! │      "data":   { ... },                                                │
//! │      "timestamp": "2024-09-27T10:30:00Z" }                             │
//! │                                                                         │
//! │  Response:                                                             │
//! │    { "success": true,                                                  │
//! │      "data":   [ ... ],        (optional)                              │
//! │      "error":  "message",      (optional)                              │
//! │      "user":   { ... } }       (authenticate only)                     │
//! │                                                                         │
//! │  The action string IS the routing mechanism: no resource paths,        │
//! │  no HTTP verbs beyond POST, no status-code taxonomy beyond             │
//! │  transport-level failure.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Action Catalog
// =============================================================================

/// Every server-side operation the endpoint understands.
///
/// The wire string produced by [`Action::as_str`] is the entire routing
/// mechanism; adding a variant here is how the client grows a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Inventory
    GetInventory,
    AddInventoryItem,
    UpdateInventoryItem,
    DeleteInventoryItem,

    // Transfers
    GetTransfers,
    AddTransfer,
    UpdateTransfer,

    // Suppliers
    GetSuppliers,
    AddSupplier,
    UpdateSupplier,
    DeleteSupplier,

    // Customers
    GetCustomers,
    AddCustomer,
    UpdateCustomer,
    DeleteCustomer,

    // Transactions
    GetTransactions,
    AddTransaction,
    UpdateTransaction,
    DeleteTransaction,

    // Branches
    GetBranches,
    AddBranch,
    UpdateBranch,
    DeleteBranch,

    // Reports
    GenerateReport,
    ExportReportAsExcel,
    ExportReportAsPdf,

    // Dashboard
    GetDashboardStats,
    GetRecentActivity,

    // Settings
    GetSettings,
    UpdateSettings,

    // Auth
    Authenticate,
    RegisterUser,
    Logout,

    // Audit & health
    LogActivity,
    TestConnection,
}

impl Action {
    /// The exact string sent in the request envelope.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::GetInventory => "getInventory",
            Action::AddInventoryItem => "addInventoryItem",
            Action::UpdateInventoryItem => "updateInventoryItem",
            Action::DeleteInventoryItem => "deleteInventoryItem",
            Action::GetTransfers => "getTransfers",
            Action::AddTransfer => "addTransfer",
            Action::UpdateTransfer => "updateTransfer",
            Action::GetSuppliers => "getSuppliers",
            Action::AddSupplier => "addSupplier",
            Action::UpdateSupplier => "updateSupplier",
            Action::DeleteSupplier => "deleteSupplier",
            Action::GetCustomers => "getCustomers",
            Action::AddCustomer => "addCustomer",
            Action::UpdateCustomer => "updateCustomer",
            Action::DeleteCustomer => "deleteCustomer",
            Action::GetTransactions => "getTransactions",
            Action::AddTransaction => "addTransaction",
            Action::UpdateTransaction => "updateTransaction",
            Action::DeleteTransaction => "deleteTransaction",
            Action::GetBranches => "getBranches",
            Action::AddBranch => "addBranch",
            Action::UpdateBranch => "updateBranch",
            Action::DeleteBranch => "deleteBranch",
            Action::GenerateReport => "generateReport",
            Action::ExportReportAsExcel => "exportReportAsExcel",
            Action::ExportReportAsPdf => "exportReportAsPdf",
            Action::GetDashboardStats => "getDashboardStats",
            Action::GetRecentActivity => "getRecentActivity",
            Action::GetSettings => "getSettings",
            Action::UpdateSettings => "updateSettings",
            Action::Authenticate => "authenticate",
            Action::RegisterUser => "registerUser",
            Action::Logout => "logout",
            Action::LogActivity => "logActivity",
            Action::TestConnection => "testConnection",
        }
    }

    /// Returns true for actions that only read remote state.
    ///
    /// Read actions are the ones eligible for fallback substitution when
    /// the endpoint is unreachable.
    pub const fn is_read(&self) -> bool {
        matches!(
            self,
            Action::GetInventory
                | Action::GetTransfers
                | Action::GetSuppliers
                | Action::GetCustomers
                | Action::GetTransactions
                | Action::GetBranches
                | Action::GenerateReport
                | Action::GetDashboardStats
                | Action::GetRecentActivity
                | Action::GetSettings
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Envelopes
// =============================================================================

/// The POST body sent for every action.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptRequest {
    pub action: String,
    pub data: Value,
    /// ISO-8601 stamp of when the client issued the request.
    pub timestamp: String,
}

impl ScriptRequest {
    /// Builds a request envelope stamped with the current time.
    pub fn new(action: Action, data: Value) -> Self {
        ScriptRequest {
            action: action.as_str().to_string(),
            data,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// The response envelope for every action.
///
/// `success` is mandatory: a body without it is a protocol error, not a
/// domain response. Everything else is optional and action-dependent.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    /// Populated by `authenticate` only.
    #[serde(default)]
    pub user: Option<Value>,
}

impl ScriptResponse {
    /// A bare success envelope, useful in tests and stubs.
    pub fn ok(data: Value) -> Self {
        ScriptResponse {
            success: true,
            data: Some(data),
            error: None,
            user: None,
        }
    }

    /// A rejection envelope with a server message.
    pub fn rejected(message: impl Into<String>) -> Self {
        ScriptResponse {
            success: false,
            data: None,
            error: Some(message.into()),
            user: None,
        }
    }
}
