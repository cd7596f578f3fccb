//! # fade-db: Database Layer for Fade
//!
//! This crate provides database access for the Fade payroll engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Fade Data Flow                                 │
//! │                                                                         │
//! │  Engine operation (recalculate, mark_paid, ...)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      fade-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  barber       │    │  (embedded)  │  │   │
//! │  │   │               │    │  policy       │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  sale         │    │ 001_init.sql │  │   │
//! │  │   │ WAL mode      │    │  adjustment   │    │ ...          │  │   │
//! │  │   │               │    │  calculation  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │                        SQLite Database                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (barber, policy, sale,
//!   adjustment, calculation)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fade_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/fade.db");
//! let db = Database::new(config).await?;
//!
//! let policy = db.policies().active_policy("barber-uuid").await?;
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
pub use repository::adjustment::AdjustmentRepository;
pub use repository::barber::BarberRepository;
pub use repository::calculation::{CalculationRepository, PerformerRow};
pub use repository::policy::{ActivePolicyListing, PolicyRepository};
pub use repository::sale::SaleRepository;
