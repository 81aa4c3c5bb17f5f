//! # Status Derivation
//!
//! Pure status classification for inventory records.
//!
//! Stock and expiry status are never stored: every badge, alert counter, and
//! report bucket derives them from the canonical record through the functions
//! in this module. Views must not re-implement these thresholds.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::InventoryItem;

// =============================================================================
// Stock Status
// =============================================================================

/// Derived stock classification for an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Nothing on hand.
    OutOfStock,
    /// Below the reorder threshold.
    Low,
    /// Between the reorder threshold and the storage ceiling.
    Normal,
    /// Above the storage ceiling.
    Overstock,
}

/// Classifies an item by comparing `current_stock` against its thresholds.
///
/// A `max_stock` of zero means "no ceiling configured" and never triggers
/// [`StockStatus::Overstock`].
pub fn stock_status(item: &InventoryItem) -> StockStatus {
    if item.current_stock <= 0 {
        StockStatus::OutOfStock
    } else if item.current_stock < item.min_stock {
        StockStatus::Low
    } else if item.max_stock > 0 && item.current_stock > item.max_stock {
        StockStatus::Overstock
    } else {
        StockStatus::Normal
    }
}

/// Returns true when the item needs reordering (out of stock counts).
pub fn is_below_minimum(item: &InventoryItem) -> bool {
    item.current_stock < item.min_stock
}

// =============================================================================
// Expiry Status
// =============================================================================

/// Returns true when the item's lot has already expired.
pub fn is_expired(item: &InventoryItem, today: NaiveDate) -> bool {
    item.expiry_date < today
}

/// Returns true when the item expires within `days` of `today`.
///
/// Already-expired lots count as expiring: they need the same attention.
pub fn expires_within(item: &InventoryItem, today: NaiveDate, days: i64) -> bool {
    item.expiry_date <= today + Duration::days(days)
}

// =============================================================================
// Aggregates
// =============================================================================

/// Number of items at or below their reorder threshold.
pub fn count_below_minimum(items: &[InventoryItem]) -> usize {
    items.iter().filter(|i| is_below_minimum(i)).count()
}

/// Number of items expiring within `days` of `today`.
pub fn count_expiring(items: &[InventoryItem], today: NaiveDate, days: i64) -> usize {
    items
        .iter()
        .filter(|i| expires_within(i, today, days))
        .count()
}

/// Total on-hand value (`current_stock × cost`) across the collection.
pub fn total_stock_value(items: &[InventoryItem]) -> f64 {
    items
        .iter()
        .map(|i| i.current_stock as f64 * i.cost)
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, current: i64, min: i64, max: i64, expiry: &str) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            category: "Medications".to_string(),
            current_stock: current,
            min_stock: min,
            max_stock: max,
            unit: "pieces".to_string(),
            location: "A1-B1".to_string(),
            expiry_date: expiry.parse().unwrap(),
            supplier: "PharmaCorp".to_string(),
            cost: 1.5,
            last_updated: None,
        }
    }

    #[test]
    fn test_stock_below_minimum_classifies_low() {
        // Insulin syringes at 25 units against a reorder threshold of 50.
        let syringes = item("INS-10ML", 25, 50, 200, "2026-10-05");
        assert_eq!(stock_status(&syringes), StockStatus::Low);
        assert!(is_below_minimum(&syringes));
    }

    #[test]
    fn test_stock_status_boundaries() {
        assert_eq!(stock_status(&item("A", 0, 50, 200, "2026-01-01")), StockStatus::OutOfStock);
        assert_eq!(stock_status(&item("B", 50, 50, 200, "2026-01-01")), StockStatus::Normal);
        assert_eq!(stock_status(&item("C", 49, 50, 200, "2026-01-01")), StockStatus::Low);
        assert_eq!(stock_status(&item("D", 201, 50, 200, "2026-01-01")), StockStatus::Overstock);
        // max_stock == 0 disables the ceiling
        assert_eq!(stock_status(&item("E", 9999, 50, 0, "2026-01-01")), StockStatus::Normal);
    }

    #[test]
    fn test_expiry_window() {
        let today: NaiveDate = "2024-09-27".parse().unwrap();
        let soon = item("A", 100, 10, 0, "2024-10-05");
        let far = item("B", 100, 10, 0, "2025-06-15");
        let gone = item("C", 100, 10, 0, "2024-09-01");

        assert!(expires_within(&soon, today, 30));
        assert!(!expires_within(&far, today, 30));
        assert!(expires_within(&gone, today, 30));
        assert!(is_expired(&gone, today));
        assert!(!is_expired(&soon, today));
    }

    #[test]
    fn test_aggregates() {
        let today: NaiveDate = "2024-09-27".parse().unwrap();
        let items = vec![
            item("A", 450, 100, 1000, "2025-06-15"),
            item("B", 25, 50, 200, "2024-10-05"),
            item("C", 2500, 1000, 5000, "2024-12-31"),
        ];
        assert_eq!(count_below_minimum(&items), 1);
        assert_eq!(count_expiring(&items, today, 30), 1);
        let value = total_stock_value(&items);
        assert!((value - (450.0 + 25.0 + 2500.0) * 1.5).abs() < f64::EPSILON);
    }
}
