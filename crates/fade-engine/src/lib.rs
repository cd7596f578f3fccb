//! # fade-engine: Settlement Engine for Fade
//!
//! The orchestration layer of the Fade payroll engine, and the only place
//! settlement state is mutated.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Fade Engine Data Flow                             │
//! │                                                                         │
//! │  Caller (request handler, job runner)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  fade-engine (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │  SettlementEngine                     PayrollReports            │   │
//! │  │  ├── recalculate / recalculate_all    ├── period_summary        │   │
//! │  │  ├── mark_paid                        ├── top_performers        │   │
//! │  │  ├── activate_policy                  └── pending_payouts       │   │
//! │  │  ├── create/delete_adjustment                                   │   │
//! │  │  │                                                              │   │
//! │  │  ├── SettlementLocks  per-(barber, period) serialization        │   │
//! │  │  └── RevenueAggregator  sales → revenue totals                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                │                                │
//! │       ▼                                ▼                                │
//! │  fade-core (pure evaluation)      fade-db (SQLite)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`settlement`] - The mutation entry points
//! - [`aggregator`] - Revenue aggregation over sales
//! - [`reports`] - Read-only derived views
//! - [`locks`] - Per-(barber, period) serialization
//! - [`error`] - The caller-facing error taxonomy
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use fade_db::{Database, DbConfig};
//! use fade_engine::SettlementEngine;
//!
//! let db = Database::new(DbConfig::new("./fade.db")).await?;
//! let engine = SettlementEngine::new(db);
//!
//! let calc = engine.recalculate(&barber_id, period).await?;
//! let paid = engine.mark_paid(&calc.id, payday, None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod error;
pub mod locks;
pub mod reports;
pub mod settlement;

#[cfg(test)]
pub(crate) mod testutil;

// =============================================================================
// Re-exports
// =============================================================================

pub use aggregator::RevenueAggregator;
pub use error::{EngineError, EngineResult};
pub use locks::SettlementLocks;
pub use reports::{PayrollReports, PayrollSummary};
pub use settlement::{NewAdjustment, PolicyDraft, SettlementEngine};
