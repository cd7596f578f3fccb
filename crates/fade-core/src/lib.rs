//! # fade-core: Pure Business Logic for Fade
//!
//! This crate is the **heart** of the Fade payroll engine. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Fade Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 fade-engine (Orchestration)                     │   │
//! │  │    recalculate ──► mark_paid ──► activate_policy ──► reports   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ fade-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐ │   │
//! │  │   │   money   │  │  policy   │  │ adjustment │  │   types   │ │   │
//! │  │   │   Money   │  │ Terms sum │  │  netting   │  │  Revenue  │ │   │
//! │  │   │   Rate    │  │ evaluate  │  │   rules    │  │  Records  │ │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    fade-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` (integer cents) and `Rate` (basis points)
//! - [`policy`] - Commission policies as a sum type, plus evaluation
//! - [`adjustment`] - Manual ledger entries and their netting rules
//! - [`types`] - Domain records (Barber, Sale, SaleLine, Calculation)
//! - [`period`] - Inclusive calendar-date settlement periods
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation run before any read
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use fade_core::money::{Money, Rate};
//!
//! // Create money from cents (never from floats!)
//! let services = Money::from_cents(100_000); // 1000.00 in service revenue
//!
//! // Apply a 50% commission rate
//! let commission = services.apply_rate(Rate::from_bps(5000));
//! assert_eq!(commission, Money::from_cents(50_000)); // 500.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adjustment;
pub mod error;
pub mod money;
pub mod period;
pub mod policy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use fade_core::Money` instead of
// `use fade_core::money::Money`

pub use adjustment::{net_adjustment_total, Adjustment, AdjustmentKind};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use period::Period;
pub use policy::{
    CommissionBreakdown, CommissionPolicy, CommissionTerms, GoalBonus, PolicyKind,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length of an adjustment description.
///
/// ## Business Reason
/// Adjustments move real money; a bare "x" gives the barber nothing to
/// dispute against. Three characters matches what the booking staff already
/// type ("adv", "key").
pub const MIN_DESCRIPTION_LEN: usize = 3;

/// Maximum length of an adjustment description.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Maximum commission/bonus rate: 10000 basis points = 100%.
pub const MAX_RATE_BPS: u32 = 10_000;
