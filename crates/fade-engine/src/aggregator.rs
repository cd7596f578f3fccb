//! # Revenue Aggregator
//!
//! Pulls a barber's sales for a period and folds their lines into
//! service/product revenue totals.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Aggregation Flow                                     │
//! │                                                                         │
//! │  sales ──┬── sale_lines (service) ──► RevenueTotals.services           │
//! │          └── sale_lines (product) ──► RevenueTotals.products           │
//! │                                                                         │
//! │  Classification and the integrity checks live in fade-core             │
//! │  (RevenueTotals::from_lines); this module only fetches and reports.    │
//! │                                                                         │
//! │  No sales in range        → zero totals (not an error)                 │
//! │  Malformed line           → Integrity error, WHOLE aggregation aborts  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use fade_core::{Period, RevenueTotals};
use fade_db::Database;

use crate::error::EngineResult;

/// Aggregates per-barber revenue over a period.
#[derive(Debug, Clone)]
pub struct RevenueAggregator {
    db: Database,
}

impl RevenueAggregator {
    /// Creates a new RevenueAggregator.
    pub fn new(db: Database) -> Self {
        RevenueAggregator { db }
    }

    /// Sums the barber's sale lines in the period into revenue totals.
    ///
    /// A line referencing neither or both of {product, service}, or whose
    /// subtotal disagrees with quantity × unit price, aborts the whole
    /// aggregation with an integrity error - upstream data this broken
    /// must be fixed at the source, not averaged over.
    pub async fn aggregate(
        &self,
        barber_id: &str,
        period: &Period,
    ) -> EngineResult<RevenueTotals> {
        let lines = self
            .db
            .sales()
            .lines_in_period(barber_id, period.start(), period.end())
            .await?;

        let totals = RevenueTotals::from_lines(&lines)?;

        debug!(
            barber_id = %barber_id,
            %period,
            services = %totals.services,
            products = %totals.products,
            sale_count = totals.sale_count,
            "Aggregated revenue"
        );

        Ok(totals)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
