//! # Validation Module
//!
//! Field checks run on operator input before an order is stored.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  ├── Types: integers, dates, decimal amounts                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Client name, quantity, discount, advance, date range              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  ├── Product exists, quantity > 0, discount <= 100%                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: SQLite CHECK / NOT NULL constraints                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use eterno_core::validation::{validate_client_name, validate_quantity};
//!
//! validate_client_name("Ana Torres").unwrap();
//! validate_quantity(2).unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::NewOrder;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest client name accepted, in characters.
pub const MAX_CLIENT_NAME_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a client name.
///
/// ## Rules
/// - Must not be empty or only whitespace
/// - At most 100 characters (counted as chars, not bytes)
///
/// ## Example
/// ```rust
/// use eterno_core::validation::validate_client_name;
///
/// assert!(validate_client_name("María José Peña").is_ok());
/// assert!(validate_client_name("   ").is_err());
/// assert!(validate_client_name(&"A".repeat(101)).is_err());
/// ```
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "client".to_string(),
        });
    }

    if name.chars().count() > MAX_CLIENT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "client".to_string(),
            max: MAX_CLIENT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - No upper limit
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount entered as a percentage.
///
/// ## Rules
/// - Between 0 and 100 inclusive
/// - NaN and infinities rejected
///
/// ## Example
/// ```rust
/// use eterno_core::validation::validate_discount_percent;
///
/// assert!(validate_discount_percent(0.0).is_ok());
/// assert!(validate_discount_percent(12.5).is_ok());
/// assert!(validate_discount_percent(100.0).is_ok());
/// assert!(validate_discount_percent(-1.0).is_err());
/// assert!(validate_discount_percent(f64::NAN).is_err());
/// ```
pub fn validate_discount_percent(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates an advance payment.
///
/// ## Rules
/// - Must not be negative; zero means no advance
/// - May exceed the sale total (the balance then goes negative)
pub fn validate_advance(advance: Money) -> ValidationResult<()> {
    if advance.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "advance".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates a dashboard date filter.
///
/// Either bound may be open; when both are given `from` must not be after `to`.
pub fn validate_date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ValidationResult<()> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(ValidationError::InvalidFormat {
                field: "date range".to_string(),
                reason: format!("start {from} is after end {to}"),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Order Validator
// =============================================================================

/// Runs the field validators over an order about to be stored.
///
/// The product name is not checked here; pricing rejects unknown products.
pub fn validate_new_order(order: &NewOrder) -> ValidationResult<()> {
    validate_client_name(&order.client)?;
    validate_quantity(order.terms.quantity)?;
    validate_discount_percent(order.terms.discount.percentage())?;
    validate_advance(order.terms.advance)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
