//! # caisse-db: Database Layer for the Caisse Engine
//!
//! This crate provides database access for the cash session engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Caisse Data Flow                             │
//! │                                                                     │
//! │  Engine operation (open_session, add_expense, ...)                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                   caisse-db (THIS CRATE)                      │  │
//! │  │                                                               │  │
//! │  │   ┌─────────────┐   ┌───────────────┐   ┌──────────────┐     │  │
//! │  │   │  Database   │   │ Repositories  │   │  Migrations  │     │  │
//! │  │   │  (pool.rs)  │◄──│ session.rs    │   │  (embedded)  │     │  │
//! │  │   │ SqlitePool  │   │ product.rs    │   │ 001_init.sql │     │  │
//! │  │   └─────────────┘   └───────────────┘   └──────────────┘     │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (or :memory: in tests)                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (session, product)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use caisse_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/caisse.db")).await?;
//! let session = db.sessions().get_by_id("resto-1", &session_id).await?;
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

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::session::SessionRepository;
