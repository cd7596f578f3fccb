//! # Commission Policies
//!
//! The commission rules for a barber, and their evaluation against
//! aggregated revenue.
//!
//! ## The Three Policy Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Commission Policy Kinds                            │
//! │                                                                         │
//! │  percentage      The shop splits revenue with the barber:              │
//! │                  services × service_rate + products × product_rate     │
//! │                                                                         │
//! │  chair_rent      The barber rents the chair: they keep ALL service     │
//! │                  revenue above the rent, nothing below it (floor 0),   │
//! │                  plus a product split. The rent itself is deducted.    │
//! │                                                                         │
//! │  fixed_monthly   Salaried: a flat amount regardless of service         │
//! │                  revenue, plus a product split.                        │
//! │                                                                         │
//! │  Any kind may additionally carry a goal bonus: when total revenue      │
//! │  reaches the target, the barber earns total × bonus_rate on top.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why a Sum Type?
//! Each kind carries only the fields it needs. A percentage policy with a
//! rent amount, or a rent policy with a service rate, is unrepresentable,
//! and adding a fourth kind is a compiler-checked exercise: every `match`
//! below stops compiling until it handles the new variant.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, Rate};
use crate::types::RevenueTotals;

// =============================================================================
// Policy Kind
// =============================================================================

/// Column-level discriminant for a policy's terms.
///
/// Stored as snake_case text (`percentage`, `fixed_monthly`, `chair_rent`);
/// text outside this closed set fails to decode, surfacing as an error
/// rather than a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Percentage,
    FixedMonthly,
    ChairRent,
}

// =============================================================================
// Commission Terms
// =============================================================================

/// The rules half of a policy: how commission is derived from revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommissionTerms {
    /// Revenue split on both buckets.
    Percentage {
        service_rate: Rate,
        product_rate: Rate,
    },

    /// Chair rental: service revenue above the rent is the barber's,
    /// shortfall is the barber's problem (commission floors at zero),
    /// products still split.
    ChairRent { rent: Money, product_rate: Rate },

    /// Flat monthly amount independent of service revenue; products split.
    FixedMonthly { amount: Money, product_rate: Rate },
}

impl CommissionTerms {
    /// The discriminant for storage and listings.
    pub const fn kind(&self) -> PolicyKind {
        match self {
            CommissionTerms::Percentage { .. } => PolicyKind::Percentage,
            CommissionTerms::ChairRent { .. } => PolicyKind::ChairRent,
            CommissionTerms::FixedMonthly { .. } => PolicyKind::FixedMonthly,
        }
    }
}

// =============================================================================
// Goal Bonus
// =============================================================================

/// An optional revenue goal attached to a policy.
///
/// A policy with no goal simply has `None` - there is no "goal of zero"
/// state to special-case during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalBonus {
    /// Total revenue the barber must reach in the period.
    pub target: Money,

    /// Bonus rate applied to TOTAL revenue once the target is reached.
    pub rate: Rate,
}

// =============================================================================
// Commission Policy
// =============================================================================

/// A barber's commission rule set over a date range.
///
/// ## Invariants
/// - At most one active policy per barber at any instant (enforced by the
///   policy store; activation atomically supersedes the prior policy).
/// - A superseded policy is immutable history: its effective range is
///   closed and its terms are never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionPolicy {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The barber these terms apply to.
    pub barber_id: String,

    /// How commission is derived from revenue.
    pub terms: CommissionTerms,

    /// Optional goal bonus on total revenue.
    pub goal: Option<GoalBonus>,

    /// First day the policy applies.
    pub effective_from: NaiveDate,

    /// Day the policy was superseded; `None` while still active.
    pub effective_to: Option<NaiveDate>,

    /// Whether this is the barber's current policy.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommissionPolicy {
    /// Whether the policy was the live one on `date`.
    pub fn in_effect_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date
            && self.effective_to.map_or(true, |to| date <= to)
    }

    /// Applies the policy to aggregated revenue.
    ///
    /// Pure and total: every (policy, revenue) pair evaluates to a
    /// breakdown. Each derived figure is rounded to a whole cent exactly
    /// once, at its own rate multiplication.
    pub fn evaluate(&self, revenue: &RevenueTotals) -> CommissionBreakdown {
        let total_revenue = revenue.total();

        let (commission_services, commission_products, rent_deducted) = match self.terms {
            CommissionTerms::Percentage {
                service_rate,
                product_rate,
            } => (
                revenue.services.apply_rate(service_rate),
                revenue.products.apply_rate(product_rate),
                Money::zero(),
            ),

            CommissionTerms::ChairRent { rent, product_rate } => (
                // The barber keeps service revenue above the rent floor,
                // never a negative commission below it.
                (revenue.services - rent).max(Money::zero()),
                revenue.products.apply_rate(product_rate),
                rent,
            ),

            CommissionTerms::FixedMonthly {
                amount,
                product_rate,
            } => (
                amount,
                revenue.products.apply_rate(product_rate),
                Money::zero(),
            ),
        };

        let bonus = match self.goal {
            Some(goal) if total_revenue >= goal.target => total_revenue.apply_rate(goal.rate),
            _ => Money::zero(),
        };

        let gross_payable =
            commission_services + commission_products + bonus - rent_deducted;

        CommissionBreakdown {
            total_revenue,
            commission_services,
            commission_products,
            rent_deducted,
            bonus,
            gross_payable,
        }
    }
}

// =============================================================================
// Commission Breakdown
// =============================================================================

/// The evaluator's output: every figure a Calculation persists about
/// commission, before manual adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    pub total_revenue: Money,
    pub commission_services: Money,
    pub commission_products: Money,
    pub rent_deducted: Money,
    pub bonus: Money,
    /// commission_services + commission_products + bonus - rent_deducted.
    pub gross_payable: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
