//! # eterno-db: Order Store for Eterno
//!
//! SQLite persistence for orders, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Eterno Data Flow                                 │
//! │                                                                         │
//! │  eterno-cli (add / list / summary ...)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     eterno-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  (order.rs)   │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ OrderRepo     │    │ 001_orders   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (eterno.db)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only order inputs are stored. Breakdowns are recomputed by
//! `eterno_core::compute_breakdown` on every read.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Order repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use eterno_db::{Database, DbConfig};
//! use eterno_core::DateRange;
//!
//! let db = Database::new(DbConfig::new("eterno.db")).await?;
//! let stored = db.orders().insert(&new_order).await?;
//! let all = db.orders().list(&DateRange::all()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::order::OrderRepository;
