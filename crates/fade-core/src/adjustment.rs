//! # Manual Adjustments
//!
//! Ledger entries that correct a barber's payable amount outside the
//! policy-driven commission: discounts, fines, advances, and manual bonuses.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Adjustment Lifecycle                                │
//! │                                                                         │
//! │  created (applied = false)                                             │
//! │       │                                                                 │
//! │       ├── counted into every recalculation of its period               │
//! │       │   (pending adjustments are re-read each time)                  │
//! │       │                                                                 │
//! │       ├── deletable ──► gone                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  period marked paid ──► applied = true, calculation_id stamped         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  immutable forever (delete attempts are a Conflict)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Adjustment Kind
// =============================================================================

/// The four manual adjustment kinds and which way they move the payout.
///
/// ## Sign Convention
/// - `discount` and `fine` are money the barber owes back to the shop:
///   they INCREASE the deduction from gross payable.
/// - `advance` is money already handed to the barber mid-period and
///   `bonus` is extra money owed on top; both DECREASE the deduction
///   (they net against what remains payable).
///
/// The manual `bonus` kind is distinct from the policy goal bonus, which is
/// computed from revenue; this one is typed in by a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Discount,
    Advance,
    Bonus,
    Fine,
}

impl AdjustmentKind {
    /// True for kinds that increase the deduction from the barber.
    #[inline]
    pub const fn is_deduction(self) -> bool {
        matches!(self, AdjustmentKind::Discount | AdjustmentKind::Fine)
    }
}

// =============================================================================
// Adjustment
// =============================================================================

/// A manual monetary correction against a barber's payable amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Adjustment {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub barber_id: String,

    /// The Calculation this entry was folded into, stamped at mark-paid.
    pub calculation_id: Option<String>,

    pub kind: AdjustmentKind,

    /// Human explanation ("key deposit", "advance for rent").
    pub description: String,

    /// Always positive; the kind decides the direction.
    pub amount: Money,

    /// Date the adjustment takes effect; decides period membership.
    pub effective_date: NaiveDate,

    /// False until folded into a paid Calculation.
    pub applied: bool,

    /// Authenticated actor who created the entry.
    pub created_by: Option<String>,

    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Netting
// =============================================================================

/// Nets a set of adjustments into the single figure a Calculation stores.
///
/// `Σ amount(discount, fine) − Σ amount(advance, bonus)`
///
/// The result is subtracted from gross payable, so a positive total reduces
/// the payout and a negative total (advances/bonuses outweigh deductions)
/// increases it.
///
/// ## Example
/// ```rust
/// use chrono::{NaiveDate, Utc};
/// use fade_core::adjustment::{net_adjustment_total, Adjustment, AdjustmentKind};
/// use fade_core::money::Money;
///
/// let fine = Adjustment {
///     id: "a1".into(),
///     barber_id: "b1".into(),
///     calculation_id: None,
///     kind: AdjustmentKind::Fine,
///     description: "late opening".into(),
///     amount: Money::from_cents(5_000),
///     effective_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     applied: false,
///     created_by: None,
///     created_at: Utc::now(),
/// };
/// let advance = Adjustment {
///     kind: AdjustmentKind::Advance,
///     amount: Money::from_cents(20_000),
///     id: "a2".into(),
///     ..fine.clone()
/// };
///
/// // 50.00 owed back − 200.00 already advanced = −150.00
/// assert_eq!(net_adjustment_total(&[fine, advance]), Money::from_cents(-15_000));
/// ```
pub fn net_adjustment_total(adjustments: &[Adjustment]) -> Money {
    adjustments.iter().fold(Money::zero(), |acc, adj| {
        if adj.kind.is_deduction() {
            acc + adj.amount
        } else {
            acc - adj.amount
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn adjustment(kind: AdjustmentKind, cents: i64) -> Adjustment {
        Adjustment {
            id: "adj-1".to_string(),
            barber_id: "barber-1".to_string(),
            calculation_id: None,
            kind,
            description: "test entry".to_string(),
            amount: Money::from_cents(cents),
            effective_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            applied: false,
            created_by: Some("user-1".to_string()),
            created_at: DateTime::from_timestamp(1_770_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_kind_direction() {
        assert!(AdjustmentKind::Discount.is_deduction());
        assert!(AdjustmentKind::Fine.is_deduction());
        assert!(!AdjustmentKind::Advance.is_deduction());
        assert!(!AdjustmentKind::Bonus.is_deduction());
    }

    #[test]
    fn test_net_total_empty() {
        assert_eq!(net_adjustment_total(&[]), Money::zero());
    }

    #[test]
    fn test_net_total_deductions_add_credits_subtract() {
        let entries = vec![
            adjustment(AdjustmentKind::Discount, 5_000), // +50.00
            adjustment(AdjustmentKind::Fine, 2_500),     // +25.00
            adjustment(AdjustmentKind::Advance, 10_000), // -100.00
            adjustment(AdjustmentKind::Bonus, 1_000),    // -10.00
        ];
        assert_eq!(net_adjustment_total(&entries), Money::from_cents(-3_500));
    }

    #[test]
    fn test_net_total_single_discount() {
        // The worked example: one 50.00 discount nets to +50.00 deducted
        let entries = vec![adjustment(AdjustmentKind::Discount, 5_000)];
        assert_eq!(net_adjustment_total(&entries), Money::from_cents(5_000));
    }

    #[test]
    fn test_kind_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&AdjustmentKind::Advance).unwrap(),
            "\"advance\""
        );
        let back: AdjustmentKind = serde_json::from_str("\"fine\"").unwrap();
        assert_eq!(back, AdjustmentKind::Fine);
    }
}
