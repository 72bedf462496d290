//! # eterno-core: Pure Business Logic for Eterno Orders
//!
//! This crate is the **heart** of the Eterno order tracker. It turns an
//! order's terms into sale, cost, financing surcharge and profit figures,
//! and decides whether a balance is still to be collected.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Eterno Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    eterno-cli                                   │   │
//! │  │    quote ──► add / update ──► list ──► summary ──► mark-paid   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ eterno-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  pricing  │  │  balance  │  │  summary  │  │   │
//! │  │   │  config   │  │ Breakdown │  │  Pending  │  │ Dashboard │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    eterno-db (Order Store)                      │   │
//! │  │              SQLite pool, migrations, OrderRepository           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Order terms, stored rows, rates, cost categories
//! - [`money`] - Money type with integer arithmetic (cents)
//! - [`catalog`] - Product catalog and financing surcharge table
//! - [`config`] - `PricingConfig`, the immutable tables handed to pricing
//! - [`pricing`] - `compute_breakdown`
//! - [`balance`] - Pending / settled classification
//! - [`summary`] - Dashboard aggregates
//! - [`validation`] - Field validation before storing an order
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: `today` is an argument, never read from the clock
//! 2. **No I/O**: config arrives as a string, orders as values
//! 3. **Integer Money**: cents in `i64`, rates in basis points
//! 4. **Explicit Errors**: typed errors, first failure wins
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use eterno_core::{compute_breakdown, DiscountRate, Money, OrderTerms, PricingConfig};
//!
//! let config = PricingConfig::default();
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//!
//! // Two large prints, 10% off, 5000 advance on 3 card installments
//! let terms = OrderTerms::new("Large", 2)
//!     .with_discount(DiscountRate::from_bps(1000))
//!     .with_advance(Money::from_major(5000), 3);
//!
//! let breakdown = compute_breakdown(&config, &terms, today).unwrap();
//! assert_eq!(breakdown.total_sale, Money::from_major(28350));
//! assert_eq!(breakdown.surcharge_advance.cents(), 28_750);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod balance;
pub mod catalog;
pub mod config;
pub mod error;
pub mod money;
pub mod pricing;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use eterno_core::Money` instead of
// `use eterno_core::money::Money`

pub use balance::{is_balance_pending, BalanceStatus};
pub use catalog::{FinancingSurchargeTable, ProductCatalog, ProductSpec, SurchargeTier};
pub use config::PricingConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_breakdown, Breakdown};
pub use summary::{summarize, DashboardSummary, PricedOrder, ProductTotals};
pub use types::*;
