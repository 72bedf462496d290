//! # Error Types
//!
//! Domain-specific error types for eterno-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  eterno-core errors (this file)                                        │
//! │  ├── CoreError        - Pricing / config failures                      │
//! │  └── ValidationError  - Form field validation failures                 │
//! │                                                                         │
//! │  eterno-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI) → operator           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT An Error
//! An installment count missing from the financing table is not rejected.
//! It silently prices as a zero surcharge, same as "no financing".

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The pricing engine returns on the first failure; there is never a
/// partially computed breakdown.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product name is not in the catalog.
    ///
    /// ## When This Occurs
    /// - Typo in the product name
    /// - Order row written against an older catalog whose product was removed
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Quantity is zero or negative.
    #[error("Invalid quantity {quantity}: must be a positive integer")]
    InvalidQuantity { quantity: i64 },

    /// Discount is outside 0%..=100%.
    ///
    /// ## When This Occurs
    /// - Fraction below 0 or above 1 (or NaN) passed to `DiscountRate::from_fraction`
    /// - A `DiscountRate` above 10000 bps reaches the pricing engine
    #[error("Invalid discount {value}: outside 0-100%")]
    InvalidDiscount { value: String },

    /// A computed amount does not fit in `Money`.
    ///
    /// ## When This Occurs
    /// - A quantity so large that `price × quantity` exceeds the cent range
    /// - A surcharge tier whose rate pushes a financed amount out of range
    #[error("Amount out of range while computing {field}")]
    AmountOverflow { field: String },

    /// Pricing configuration could not be parsed or is inconsistent.
    #[error("Invalid pricing config: {0}")]
    InvalidConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::InvalidConfig(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the field validators before an order is stored.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid amount, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownProduct("Huge".to_string());
        assert_eq!(err.to_string(), "Unknown product: Huge");

        let err = CoreError::InvalidQuantity { quantity: 0 };
        assert_eq!(
            err.to_string(),
            "Invalid quantity 0: must be a positive integer"
        );

        let err = CoreError::AmountOverflow {
            field: "subtotal".to_string(),
        };
        assert_eq!(err.to_string(), "Amount out of range while computing subtotal");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "client".to_string(),
        };
        assert_eq!(err.to_string(), "client is required");

        let err = ValidationError::TooLong {
            field: "client".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "client must be at most 100 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "client".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_toml_error_converts_to_invalid_config() {
        let err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let core_err: CoreError = err.into();
        assert!(matches!(core_err, CoreError::InvalidConfig(_)));
    }
}
