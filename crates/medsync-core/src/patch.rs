//! # Partial Updates
//!
//! Patch types for update operations.
//!
//! ## Merge Law
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Local record R  +  Patch P  ──apply──►  {...R, ...P}                   │
//! │                                                                         │
//! │  • Fields present in P overwrite the matching field of R                │
//! │  • Fields absent from P keep the client-known value of R                │
//! │  • Serialization skips absent fields, so the wire payload is exactly    │
//! │    the flattened {id, ...patch} the endpoint expects                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same shallow merge runs on both sides of an update: once serialized
//! toward the endpoint, and once locally against the cached record after the
//! endpoint confirms. The local copy is not re-fetched, so untouched fields
//! may stay stale relative to the server until the next full fetch.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{
    Branch, Customer, EntityStatus, InventoryItem, Priority, Settings, Supplier, Transaction,
    TransactionType, Transfer, TransferStatus,
};

// =============================================================================
// Inventory
// =============================================================================

/// Partial update for an [`InventoryItem`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[ts(as = "Option<String>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl InventoryPatch {
    /// Shallow-merges the patch into `item`.
    pub fn apply(&self, item: &mut InventoryItem) {
        if let Some(v) = &self.name {
            item.name = v.clone();
        }
        if let Some(v) = &self.category {
            item.category = v.clone();
        }
        if let Some(v) = self.current_stock {
            item.current_stock = v;
        }
        if let Some(v) = self.min_stock {
            item.min_stock = v;
        }
        if let Some(v) = self.max_stock {
            item.max_stock = v;
        }
        if let Some(v) = &self.unit {
            item.unit = v.clone();
        }
        if let Some(v) = &self.location {
            item.location = v.clone();
        }
        if let Some(v) = self.expiry_date {
            item.expiry_date = v;
        }
        if let Some(v) = &self.supplier {
            item.supplier = v.clone();
        }
        if let Some(v) = self.cost {
            item.cost = v;
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.current_stock.is_none()
            && self.min_stock.is_none()
            && self.max_stock.is_none()
            && self.unit.is_none()
            && self.location.is_none()
            && self.expiry_date.is_none()
            && self.supplier.is_none()
            && self.cost.is_none()
    }
}

// =============================================================================
// Suppliers & Customers
// =============================================================================

/// Partial update for a [`Supplier`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl SupplierPatch {
    /// Shallow-merges the patch into `supplier`.
    pub fn apply(&self, supplier: &mut Supplier) {
        if let Some(v) = &self.name {
            supplier.name = v.clone();
        }
        if let Some(v) = &self.contact {
            supplier.contact = v.clone();
        }
        if let Some(v) = &self.email {
            supplier.email = v.clone();
        }
        if let Some(v) = &self.phone {
            supplier.phone = v.clone();
        }
        if let Some(v) = &self.address {
            supplier.address = v.clone();
        }
        if let Some(v) = &self.category {
            supplier.category = v.clone();
        }
        if let Some(v) = self.status {
            supplier.status = v;
        }
        if let Some(v) = self.rating {
            supplier.rating = v;
        }
    }
}

/// Partial update for a [`Customer`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<f64>,
}

impl CustomerPatch {
    /// Shallow-merges the patch into `customer`.
    pub fn apply(&self, customer: &mut Customer) {
        if let Some(v) = &self.name {
            customer.name = v.clone();
        }
        if let Some(v) = &self.contact {
            customer.contact = v.clone();
        }
        if let Some(v) = &self.email {
            customer.email = v.clone();
        }
        if let Some(v) = &self.phone {
            customer.phone = v.clone();
        }
        if let Some(v) = &self.address {
            customer.address = v.clone();
        }
        if let Some(v) = &self.customer_type {
            customer.customer_type = v.clone();
        }
        if let Some(v) = self.status {
            customer.status = v;
        }
        if let Some(v) = self.credit_limit {
            customer.credit_limit = v;
        }
        if let Some(v) = self.current_balance {
            customer.current_balance = v;
        }
    }
}

// =============================================================================
// Transfers
// =============================================================================

/// Partial update for a [`Transfer`].
///
/// Typically carries only a status change plus approval metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransferPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransferStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[ts(as = "Option<String>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransferPatch {
    /// A status-only patch, the common approval/rejection path.
    pub fn status(status: TransferStatus) -> Self {
        TransferPatch {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Shallow-merges the patch into `transfer`.
    pub fn apply(&self, transfer: &mut Transfer) {
        if let Some(v) = self.status {
            transfer.status = v;
        }
        if let Some(v) = &self.approved_by {
            transfer.approved_by = Some(v.clone());
        }
        if let Some(v) = self.approved_date {
            transfer.approved_date = Some(v);
        }
        if let Some(v) = self.priority {
            transfer.priority = v;
        }
        if let Some(v) = &self.notes {
            transfer.notes = Some(v.clone());
        }
    }
}

// =============================================================================
// Transactions & Branches
// =============================================================================

/// Partial update for a [`Transaction`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl TransactionPatch {
    /// Shallow-merges the patch into `transaction`.
    pub fn apply(&self, transaction: &mut Transaction) {
        if let Some(v) = self.transaction_type {
            transaction.transaction_type = v;
        }
        if let Some(v) = &self.item_name {
            transaction.item_name = v.clone();
        }
        if let Some(v) = self.quantity {
            transaction.quantity = v;
        }
        if let Some(v) = self.unit_price {
            transaction.unit_price = v;
        }
        if let Some(v) = self.total_amount {
            transaction.total_amount = v;
        }
        if let Some(v) = &self.counterparty {
            transaction.counterparty = v.clone();
        }
        if let Some(v) = &self.reference {
            transaction.reference = Some(v.clone());
        }
    }
}

/// Partial update for a [`Branch`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BranchPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_main: Option<bool>,
}

impl BranchPatch {
    /// Shallow-merges the patch into `branch`.
    pub fn apply(&self, branch: &mut Branch) {
        if let Some(v) = &self.name {
            branch.name = v.clone();
        }
        if let Some(v) = &self.address {
            branch.address = v.clone();
        }
        if let Some(v) = &self.manager {
            branch.manager = v.clone();
        }
        if let Some(v) = &self.phone {
            branch.phone = v.clone();
        }
        if let Some(v) = self.status {
            branch.status = v;
        }
        if let Some(v) = self.is_main {
            branch.is_main = v;
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Partial update for the singleton [`Settings`] record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_alerts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_warning_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_refresh_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

impl SettingsPatch {
    /// Shallow-merges the patch into `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.organization_name {
            settings.organization_name = v.clone();
        }
        if let Some(v) = &self.contact_email {
            settings.contact_email = v.clone();
        }
        if let Some(v) = &self.currency {
            settings.currency = v.clone();
        }
        if let Some(v) = self.low_stock_alerts {
            settings.low_stock_alerts = v;
        }
        if let Some(v) = self.expiry_warning_days {
            settings.expiry_warning_days = v;
        }
        if let Some(v) = self.auto_refresh_minutes {
            settings.auto_refresh_minutes = v;
        }
        if let Some(v) = &self.default_branch {
            settings.default_branch = v.clone();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
