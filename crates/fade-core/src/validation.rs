//! # Validation Module
//!
//! Input validation utilities for Fade.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (HTTP layer, out of scope here)                       │
//! │  ├── Request shape, auth                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine entry points                                          │
//! │  └── THIS MODULE: runs BEFORE any read; a failed validation            │
//! │      leaves zero state change behind                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints (one active policy, one calc per period)       │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::{Money, Rate};
use crate::policy::{CommissionTerms, GoalBonus};
use crate::{MAX_DESCRIPTION_LEN, MAX_RATE_BPS, MIN_DESCRIPTION_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a UUID string used as an entity id.
///
/// ## Example
/// ```rust
/// use fade_core::validation::validate_uuid;
///
/// assert!(validate_uuid("barber_id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("barber_id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an adjustment description.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be between 3 and 255 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::TooShort {
            field: "description".to_string(),
            min: MIN_DESCRIPTION_LEN,
        });
    }

    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a barber display name.
pub fn validate_display_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "display_name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "display_name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Monetary Validators
// =============================================================================

/// Validates an adjustment amount.
///
/// ## Rules
/// - Must be strictly positive; the kind encodes the direction, the amount
///   never does
pub fn validate_adjustment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a non-negative policy amount (rent, fixed monthly).
pub fn validate_policy_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a commission/bonus rate.
///
/// ## Rules
/// - Must be between 0 and 10000 basis points (0% to 100%)
pub fn validate_rate(field: &str, rate: Rate) -> ValidationResult<()> {
    if rate.bps() > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_RATE_BPS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Policy Validators
// =============================================================================

/// Validates the terms of a policy draft before activation.
pub fn validate_terms(terms: &CommissionTerms) -> ValidationResult<()> {
    match *terms {
        CommissionTerms::Percentage {
            service_rate,
            product_rate,
        } => {
            validate_rate("service_rate", service_rate)?;
            validate_rate("product_rate", product_rate)?;
        }
        CommissionTerms::ChairRent { rent, product_rate } => {
            validate_policy_amount("rent", rent)?;
            validate_rate("product_rate", product_rate)?;
        }
        CommissionTerms::FixedMonthly {
            amount,
            product_rate,
        } => {
            validate_policy_amount("amount", amount)?;
            validate_rate("product_rate", product_rate)?;
        }
    }

    Ok(())
}

/// Validates an optional goal bonus.
///
/// ## Rules
/// - Target must be strictly positive (a zero goal is represented as
///   `None`, not as a zero target)
/// - Rate must be within 0-100%
pub fn validate_goal(goal: &Option<GoalBonus>) -> ValidationResult<()> {
    if let Some(goal) = goal {
        if !goal.target.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "goal target".to_string(),
            });
        }
        validate_rate("goal bonus rate", goal.rate)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("id", "").is_err());
        assert!(validate_uuid("id", "not-a-uuid").is_err());
        assert!(validate_uuid("id", "123").is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("advance for rent").is_ok());
        assert!(validate_description("key").is_ok());

        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
        assert!(validate_description("ab").is_err());
        assert!(validate_description(&"x".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("Marcos Silva").is_ok());
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_adjustment_amount() {
        assert!(validate_adjustment_amount(Money::from_cents(1)).is_ok());
        assert!(validate_adjustment_amount(Money::zero()).is_err());
        assert!(validate_adjustment_amount(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("r", Rate::from_bps(0)).is_ok());
        assert!(validate_rate("r", Rate::from_bps(5000)).is_ok());
        assert!(validate_rate("r", Rate::from_bps(10_000)).is_ok());
        assert!(validate_rate("r", Rate::from_bps(10_001)).is_err());
    }

    #[test]
    fn test_validate_terms() {
        assert!(validate_terms(&CommissionTerms::Percentage {
            service_rate: Rate::from_bps(5000),
            product_rate: Rate::from_bps(3000),
        })
        .is_ok());

        assert!(validate_terms(&CommissionTerms::Percentage {
            service_rate: Rate::from_bps(20_000),
            product_rate: Rate::from_bps(3000),
        })
        .is_err());

        assert!(validate_terms(&CommissionTerms::ChairRent {
            rent: Money::from_cents(-1),
            product_rate: Rate::from_bps(3000),
        })
        .is_err());
    }

    #[test]
    fn test_validate_goal() {
        assert!(validate_goal(&None).is_ok());
        assert!(validate_goal(&Some(GoalBonus {
            target: Money::from_cents(500_000),
            rate: Rate::from_bps(500),
        }))
        .is_ok());

        // Zero target must be modeled as None
        assert!(validate_goal(&Some(GoalBonus {
            target: Money::zero(),
            rate: Rate::from_bps(500),
        }))
        .is_err());

        assert!(validate_goal(&Some(GoalBonus {
            target: Money::from_cents(500_000),
            rate: Rate::from_bps(20_000),
        }))
        .is_err());
    }
}
