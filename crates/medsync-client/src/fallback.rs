//! # Fallback Datasets
//!
//! Hard-coded substitute data returned by the facade when the endpoint is
//! unreachable or answers garbage. One function per read action; each
//! returns the same rows every time so callers (and tests) can rely on the
//! exact contents.
//!
//! Seed rows mirror the demo sheet the dashboard ships with: three
//! inventory items, two suppliers, two customers, two transfers, and a
//! small dashboard snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use medsync_core::{
    ActivityEntry, AlertSeverity, Branch, Customer, DashboardAlert, DashboardSnapshot,
    DashboardStats, DateRange, EntityStatus, InventoryItem, Priority, Report, ReportType,
    Settings, Supplier, Transaction, TransactionType, Transfer, TransferItem, TransferStatus,
};

fn date(s: &str) -> NaiveDate {
    s.parse().expect("static fallback date")
}

fn stamp(s: &str) -> DateTime<Utc> {
    s.parse().expect("static fallback timestamp")
}

// =============================================================================
// Inventory
// =============================================================================

/// Fallback rows for `getInventory`.
pub fn inventory() -> Vec<InventoryItem> {
    vec![
        InventoryItem {
            id: "INV001".into(),
            name: "Paracetamol 500mg".into(),
            category: "Medications".into(),
            current_stock: 450,
            min_stock: 100,
            max_stock: 1000,
            unit: "tablets".into(),
            location: "A1-B2".into(),
            expiry_date: date("2025-06-15"),
            supplier: "PharmaCorp".into(),
            cost: 0.25,
            last_updated: Some(stamp("2024-09-27T10:30:00Z")),
        },
        InventoryItem {
            id: "INV002".into(),
            name: "Insulin Vials".into(),
            category: "Medications".into(),
            current_stock: 25,
            min_stock: 50,
            max_stock: 200,
            unit: "vials".into(),
            location: "C1-D3".into(),
            expiry_date: date("2024-10-05"),
            supplier: "MediSupply".into(),
            cost: 15.50,
            last_updated: Some(stamp("2024-09-27T09:15:00Z")),
        },
        InventoryItem {
            id: "INV003".into(),
            name: "Surgical Masks".into(),
            category: "PPE".into(),
            current_stock: 2500,
            min_stock: 1000,
            max_stock: 5000,
            unit: "pieces".into(),
            location: "E1-F2".into(),
            expiry_date: date("2024-12-31"),
            supplier: "SafetyFirst".into(),
            cost: 0.15,
            last_updated: Some(stamp("2024-09-27T08:45:00Z")),
        },
    ]
}

// =============================================================================
// Suppliers & Customers
// =============================================================================

/// Fallback rows for `getSuppliers`.
pub fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: "SUP001".into(),
            name: "PharmaCorp".into(),
            contact: "John Smith".into(),
            email: "john@pharmacorp.com".into(),
            phone: "+1-555-0123".into(),
            address: "123 Medical St, Healthcare City".into(),
            category: "Medications".into(),
            status: EntityStatus::Active,
            rating: 4.8,
            total_orders: 156,
            total_value: 285_000.0,
            last_order: Some(date("2024-09-25")),
        },
        Supplier {
            id: "SUP002".into(),
            name: "MediSupply".into(),
            contact: "Sarah Johnson".into(),
            email: "sarah@medisupply.com".into(),
            phone: "+1-555-0456".into(),
            address: "456 Supply Ave, Medical District".into(),
            category: "Medical Equipment".into(),
            status: EntityStatus::Active,
            rating: 4.6,
            total_orders: 89,
            total_value: 142_500.0,
            last_order: Some(date("2024-09-20")),
        },
    ]
}

/// Fallback rows for `getCustomers`.
pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            id: "CUST001".into(),
            name: "City General Hospital".into(),
            contact: "Dr. Michael Brown".into(),
            email: "procurement@citygeneral.com".into(),
            phone: "+1-555-0789".into(),
            address: "789 Hospital Blvd, Medical Center".into(),
            customer_type: "Hospital".into(),
            status: EntityStatus::Active,
            credit_limit: 50_000.0,
            current_balance: 12_500.0,
            total_orders: 67,
            total_value: 198_000.0,
        },
        Customer {
            id: "CUST002".into(),
            name: "Community Clinic Network".into(),
            contact: "Lisa Davis".into(),
            email: "orders@communityclinic.com".into(),
            phone: "+1-555-0321".into(),
            address: "321 Clinic St, Healthcare Plaza".into(),
            customer_type: "Clinic".into(),
            status: EntityStatus::Active,
            credit_limit: 25_000.0,
            current_balance: 5_750.0,
            total_orders: 34,
            total_value: 87_300.0,
        },
    ]
}

// =============================================================================
// Transfers
// =============================================================================

/// Fallback rows for `getTransfers`.
pub fn transfers() -> Vec<Transfer> {
    vec![
        Transfer {
            id: "TR001".into(),
            from_branch: "Main Hospital".into(),
            to_branch: "Pharmacy Branch".into(),
            items: vec![TransferItem {
                name: "Paracetamol 500mg".into(),
                quantity: 100,
                unit: "tablets".into(),
            }],
            status: TransferStatus::PendingApproval,
            requested_by: "manager@rama.com".into(),
            request_date: stamp("2024-09-27T10:00:00Z"),
            approved_by: None,
            approved_date: None,
            priority: Priority::High,
            notes: Some("Urgent transfer for pharmacy stock".into()),
        },
        Transfer {
            id: "TR002".into(),
            from_branch: "Pharmacy Branch".into(),
            to_branch: "ICU Branch".into(),
            items: vec![TransferItem {
                name: "Insulin Vials".into(),
                quantity: 10,
                unit: "vials".into(),
            }],
            status: TransferStatus::Approved,
            requested_by: "nurse@rama.com".into(),
            request_date: stamp("2024-09-26T14:30:00Z"),
            approved_by: Some("admin@rama.com".into()),
            approved_date: Some(stamp("2024-09-26T15:00:00Z")),
            priority: Priority::Medium,
            notes: None,
        },
    ]
}

// =============================================================================
// Transactions & Branches
// =============================================================================

/// Fallback rows for `getTransactions`.
pub fn transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "TXN001".into(),
            transaction_type: TransactionType::Purchase,
            item_name: "Paracetamol 500mg".into(),
            quantity: 500,
            unit_price: 0.22,
            total_amount: 110.0,
            counterparty: "PharmaCorp".into(),
            branch: "Main Hospital".into(),
            date: stamp("2024-09-25T11:00:00Z"),
            reference: Some("PO-2024-0912".into()),
        },
        Transaction {
            id: "TXN002".into(),
            transaction_type: TransactionType::Sale,
            item_name: "Surgical Masks".into(),
            quantity: 1000,
            unit_price: 0.18,
            total_amount: 180.0,
            counterparty: "City General Hospital".into(),
            branch: "Main Hospital".into(),
            date: stamp("2024-09-26T09:30:00Z"),
            reference: None,
        },
    ]
}

/// Fallback rows for `getBranches`.
pub fn branches() -> Vec<Branch> {
    vec![
        Branch {
            id: "BR001".into(),
            name: "Main Hospital".into(),
            address: "1 Hospital Way, Healthcare City".into(),
            manager: "admin@rama.com".into(),
            phone: "+1-555-1000".into(),
            status: EntityStatus::Active,
            is_main: true,
        },
        Branch {
            id: "BR002".into(),
            name: "Pharmacy Branch".into(),
            address: "14 Market St, Healthcare City".into(),
            manager: "manager@rama.com".into(),
            phone: "+1-555-1001".into(),
            status: EntityStatus::Active,
            is_main: false,
        },
        Branch {
            id: "BR003".into(),
            name: "ICU Branch".into(),
            address: "1 Hospital Way, Building C".into(),
            manager: "nurse@rama.com".into(),
            phone: "+1-555-1002".into(),
            status: EntityStatus::Active,
            is_main: false,
        },
    ]
}

// =============================================================================
// Settings, Activity & Dashboard
// =============================================================================

/// Fallback record for `getSettings`.
pub fn settings() -> Settings {
    Settings {
        organization_name: "Rama Medical Supply".into(),
        contact_email: "admin@rama.com".into(),
        ..Settings::default()
    }
}

/// Fallback rows for `getRecentActivity`.
pub fn recent_activity() -> Vec<ActivityEntry> {
    vec![
        ActivityEntry {
            id: 1,
            action: "Inventory Update".into(),
            user: "admin@rama.com".into(),
            details: "47 items updated".into(),
            timestamp: stamp("2024-09-27T10:28:00Z"),
        },
        ActivityEntry {
            id: 2,
            action: "Transfer Approved".into(),
            user: "manager@rama.com".into(),
            details: "Transfer TR-001 approved".into(),
            timestamp: stamp("2024-09-27T10:15:00Z"),
        },
    ]
}

/// Fallback payload for `getDashboardStats`.
pub fn dashboard() -> DashboardSnapshot {
    DashboardSnapshot {
        stats: DashboardStats {
            total_items: 1247,
            low_stock_alerts: 23,
            expiring_items: 7,
            monthly_procurement: 45_200.0,
        },
        recent_activities: recent_activity(),
        alerts: vec![
            DashboardAlert {
                alert_type: "low_stock".into(),
                message: "Insulin Vials - Only 25 units remaining".into(),
                severity: AlertSeverity::High,
                timestamp: stamp("2024-09-27T10:00:00Z"),
            },
            DashboardAlert {
                alert_type: "expiry".into(),
                message: "Surgical Masks expiring in 7 days".into(),
                severity: AlertSeverity::Medium,
                timestamp: stamp("2024-09-27T09:30:00Z"),
            },
        ],
    }
}

// =============================================================================
// Reports
// =============================================================================

/// Fallback payload for `generateReport`, keyed by report family.
pub fn report(report_type: ReportType, range: Option<DateRange>) -> Report {
    let data = match report_type {
        ReportType::Inventory => json!({
            "totalItems": 1247,
            "lowStockItems": 23,
            "expiringItems": 7,
            "totalValue": 125000,
            "categories": [
                { "name": "Medications", "count": 450, "value": 85000 },
                { "name": "PPE", "count": 320, "value": 15000 },
                { "name": "Medical Equipment", "count": 180, "value": 25000 }
            ]
        }),
        ReportType::Financial => json!({
            "revenue": 1200000,
            "expenses": 850000,
            "profit": 350000,
            "profitMargin": 29.2,
            "monthlyTrend": [
                { "month": "Jan", "revenue": 95000, "expenses": 68000 },
                { "month": "Feb", "revenue": 102000, "expenses": 72000 },
                { "month": "Mar", "revenue": 118000, "expenses": 78000 }
            ]
        }),
        // No richer seed exists for the remaining families.
        ReportType::Transfers | ReportType::Suppliers => json!({}),
    };

    Report {
        report_type,
        generated_at: Utc::now(),
        date_range: range,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsync_core::{is_below_minimum, stock_status, StockStatus};

    #[test]
    fn test_inventory_rows_are_stable() {
        let first = inventory();
        let second = inventory();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[1].id, "INV002");
    }

    #[test]
    fn test_insulin_row_is_below_minimum() {
        let rows = inventory();
        let insulin = rows.iter().find(|i| i.id == "INV002").unwrap();
        assert_eq!(insulin.current_stock, 25);
        assert_eq!(insulin.min_stock, 50);
        assert!(is_below_minimum(insulin));
        assert_eq!(stock_status(insulin), StockStatus::Low);
    }

    #[test]
    fn test_supplier_fallback_is_two_rows() {
        let rows = suppliers();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "SUP001");
        assert_eq!(rows[1].id, "SUP002");
    }

    #[test]
    fn test_report_families() {
        let inv = report(ReportType::Inventory, None);
        assert_eq!(inv.data["totalItems"], 1247);

        let fin = report(ReportType::Financial, None);
        assert_eq!(fin.data["profitMargin"], 29.2);
    }
}
