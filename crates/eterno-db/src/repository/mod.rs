//! # Repository Module
//!
//! Database repositories for the order store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  eterno-cli command                                                    │
//! │       │                                                                 │
//! │       │  db.orders().list(&range)                                      │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── insert / update / delete                                          │
//! │  ├── get_by_id / list / count                                          │
//! │  └── mark_balance_paid                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`order::OrderRepository`] - Order CRUD and dashboard listing

pub mod order;
