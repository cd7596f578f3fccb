//! # Error Types
//!
//! Domain-specific error types for fade-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fade-core errors (this file)                                          │
//! │  ├── CoreError        - Domain rule / data integrity failures          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fade-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  fade-engine errors (separate crate)                                   │
//! │  └── EngineError      - What callers of the engine see                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → EngineError → Caller    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (line id, amounts, dates)
//! 3. Errors are enum variants, never String
//! 4. Integrity errors abort the whole aggregation, never a silent skip

use chrono::NaiveDate;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The integrity variants represent corrupted upstream sale data. Per the
/// aggregation contract they abort the whole computation for that barber and
/// period - a settlement computed over partially-read sales is worse than no
/// settlement at all.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale line references neither a product nor a service.
    #[error("sale line {line_id} references neither a product nor a service")]
    LineWithoutTarget { line_id: String },

    /// A sale line references both a product and a service.
    #[error("sale line {line_id} references both a product and a service")]
    LineDoubleTarget { line_id: String },

    /// A sale line's stored subtotal disagrees with quantity × unit price.
    #[error(
        "sale line {line_id} subtotal {stored} does not match \
         {quantity} x {unit_price} = {expected}"
    )]
    SubtotalMismatch {
        line_id: String,
        quantity: i64,
        unit_price: Money,
        stored: Money,
        expected: Money,
    },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True when the error is an upstream data-integrity violation.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            CoreError::LineWithoutTarget { .. }
                | CoreError::LineDoubleTarget { .. }
                | CoreError::SubtotalMismatch { .. }
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements.
/// Validation runs before any read; a failed validation leaves no state
/// change behind.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A settlement period whose start falls after its end.
    #[error("period start {start} is after period end {end}")]
    PeriodOrder { start: NaiveDate, end: NaiveDate },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
