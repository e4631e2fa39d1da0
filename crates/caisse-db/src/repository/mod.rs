//! # Repository Module
//!
//! Database repository implementations for the caisse engine.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                     │
//! │                                                                     │
//! │  The Repository pattern abstracts database access behind a clean    │
//! │  API. The engine never writes SQL:                                  │
//! │                                                                     │
//! │  Engine operation                                                   │
//! │       │                                                             │
//! │       │  db.sessions().get_by_id("resto-1", &id)                    │
//! │       ▼                                                             │
//! │  SessionRepository                                                  │
//! │  ├── insert_session(&self, session)                                 │
//! │  ├── close_session(&self, ...)     ← conditional update             │
//! │  ├── insert_stock_purchase(...)    ← single transaction             │
//! │  └── get_summaries(&self, ...)                                      │
//! │       │                                                             │
//! │       │  SQL Query                                                  │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`session::SessionRepository`] - Cash sessions and their ledger rows
//! - [`product::ProductRepository`] - Product reference data and stock

pub mod product;
pub mod session;
