//! # Validation Module
//!
//! Input validation for records before they are submitted to the remote
//! endpoint. The endpoint itself performs no schema validation, so this is
//! the only gate between a form and a malformed sheet row.
//!
//! ## Usage
//! ```rust
//! use medsync_core::validation::{validate_display_name, validate_stock_levels};
//!
//! validate_display_name("Paracetamol 500mg").unwrap();
//! validate_stock_levels(450, 100, 1000).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::InventoryItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for human-entered display names.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (item, supplier, customer, branch).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LEN`] characters
pub fn validate_display_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an email address shape.
///
/// Deliberately loose: one `@` with a dot somewhere after it. Real
/// verification happens when the address is actually used.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected local@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number: digits plus common separators.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let valid = phone.chars().any(|c| c.is_ascii_digit())
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, and +-()".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock level triple.
///
/// ## Rules
/// - All levels non-negative
/// - `min <= max` whenever a ceiling is configured (`max > 0`)
pub fn validate_stock_levels(current: i64, min: i64, max: i64) -> ValidationResult<()> {
    for (field, value) in [("currentStock", current), ("minStock", min), ("maxStock", max)] {
        if value < 0 {
            return Err(ValidationError::Negative {
                field: field.to_string(),
            });
        }
    }

    if max > 0 && min > max {
        return Err(ValidationError::MinAboveMax { min, max });
    }

    Ok(())
}

/// Validates a transfer line quantity.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a unit cost.
pub fn validate_cost(cost: f64) -> ValidationResult<()> {
    if cost < 0.0 || !cost.is_finite() {
        return Err(ValidationError::Negative {
            field: "cost".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a full inventory item before an `add` submission.
pub fn validate_inventory_item(item: &InventoryItem) -> ValidationResult<()> {
    validate_display_name(&item.name)?;
    validate_stock_levels(item.current_stock, item.min_stock, item.max_stock)?;
    validate_cost(item.cost)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert!(validate_display_name("Surgical Masks").is_ok());
        assert!(validate_display_name("   ").is_err());
        assert!(validate_display_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("john@pharmacorp.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@nodomain.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_phone_shapes() {
        assert!(validate_phone("+1-555-0123").is_ok());
        assert!(validate_phone("(02) 555 0123").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_stock_levels() {
        assert!(validate_stock_levels(450, 100, 1000).is_ok());
        assert!(validate_stock_levels(0, 0, 0).is_ok());
        assert!(validate_stock_levels(-1, 0, 0).is_err());
        assert!(matches!(
            validate_stock_levels(10, 500, 100),
            Err(ValidationError::MinAboveMax { .. })
        ));
    }

    #[test]
    fn test_cost() {
        assert!(validate_cost(0.25).is_ok());
        assert!(validate_cost(0.0).is_ok());
        assert!(validate_cost(-0.01).is_err());
        assert!(validate_cost(f64::NAN).is_err());
    }
}
