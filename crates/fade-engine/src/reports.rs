//! # Payroll Reports
//!
//! Read-only derived views over committed Calculation rows: the period
//! summary, the top-performer ranking, and the payout queue.
//!
//! These carry no invariants of their own - they sum what settlement
//! already committed, and go stale the moment another recalculation runs.

use chrono::NaiveDate;
use serde::Serialize;

use fade_core::{Calculation, Money, Period};
use fade_db::{Database, PerformerRow};

use crate::error::EngineResult;

// =============================================================================
// Summary DTO
// =============================================================================

/// Aggregated payroll figures for all calculations inside a period.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollSummary {
    pub period: Period,

    /// Number of settlement records in range.
    pub calculation_count: i64,

    /// Summed revenue across those records.
    pub total_revenue: Money,

    /// Summed gross payables (before manual adjustments).
    pub gross_total: Money,

    /// Summed net payables (what the shop owes in total).
    pub net_total: Money,

    /// Net payables already disbursed.
    pub paid_total: Money,

    /// Net payables still outstanding.
    pub pending_total: Money,

    /// paid_total as a percentage of net_total; 0 when nothing is owed.
    /// Display figure only - never used in settlement arithmetic.
    pub percent_paid: f64,
}

// =============================================================================
// Payroll Reports
// =============================================================================

/// Read paths over settlement records.
#[derive(Debug, Clone)]
pub struct PayrollReports {
    db: Database,
}

impl PayrollReports {
    /// Creates a new PayrollReports over the given database.
    pub fn new(db: Database) -> Self {
        PayrollReports { db }
    }

    /// Sums every calculation whose period lies inside `period`.
    pub async fn period_summary(&self, period: Period) -> EngineResult<PayrollSummary> {
        let calculations = self
            .db
            .calculations()
            .list_in_range(period.start(), period.end())
            .await?;

        let mut total_revenue = Money::zero();
        let mut gross_total = Money::zero();
        let mut net_total = Money::zero();
        let mut paid_total = Money::zero();
        let mut pending_total = Money::zero();

        for calc in &calculations {
            total_revenue += calc.total_revenue;
            gross_total += calc.gross_payable;
            net_total += calc.net_payable;
            if calc.paid {
                paid_total += calc.net_payable;
            } else {
                pending_total += calc.net_payable;
            }
        }

        let percent_paid = if net_total.is_positive() {
            (paid_total.cents() as f64 / net_total.cents() as f64) * 100.0
        } else {
            0.0
        };

        Ok(PayrollSummary {
            period,
            calculation_count: calculations.len() as i64,
            total_revenue,
            gross_total,
            net_total,
            paid_total,
            pending_total,
            percent_paid,
        })
    }

    /// Barbers ranked by total revenue over the period.
    pub async fn top_performers(
        &self,
        period: Period,
        limit: u32,
    ) -> EngineResult<Vec<PerformerRow>> {
        let rows = self
            .db
            .calculations()
            .top_by_revenue(period.start(), period.end(), limit)
            .await?;

        Ok(rows)
    }

    /// Unpaid settlements whose period has ended by `as_of` - the payout
    /// queue, oldest first.
    pub async fn pending_payouts(&self, as_of: NaiveDate) -> EngineResult<Vec<Calculation>> {
        let calculations = self.db.calculations().pending_payouts(as_of).await?;
        Ok(calculations)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
