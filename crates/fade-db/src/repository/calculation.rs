//! # Calculation Repository
//!
//! Database operations for settlement records.
//!
//! ## Settlement Record Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Calculation Lifecycle                                  │
//! │                                                                         │
//! │  1. RECALCULATE (repeatable)                                           │
//! │     └── upsert_unpaid() → INSERT .. ON CONFLICT(barber, start, end)    │
//! │                           DO UPDATE .. WHERE paid = 0                  │
//! │         The unique index is the upsert key; the paid guard makes       │
//! │         a rewrite of a paid row impossible at the storage level,       │
//! │         whatever the application layer got wrong.                      │
//! │                                                                         │
//! │  2. MARK PAID (once)                                                   │
//! │     └── mark_paid() → one transaction:                                 │
//! │           UPDATE calculations SET paid = 1 .. WHERE id AND paid = 0    │
//! │           UPDATE adjustments  SET applied = 1 .. (the ledger sweep)    │
//! │         Both or neither: a crash can not leave adjustments locked      │
//! │         under an unpaid record, or vice versa.                         │
//! │                                                                         │
//! │  3. READ (reports)                                                     │
//! │     └── list_in_range / top_by_revenue / pending_payouts               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::adjustment;
use fade_core::{Calculation, Money};

const CALCULATION_COLUMNS: &str =
    "id, barber_id, period_start, period_end, total_revenue, service_revenue, \
     product_revenue, sale_count, commission_services, commission_products, \
     rent_deducted, bonus, gross_payable, adjustment_total, net_payable, \
     paid, paid_on, notes, created_at, updated_at";

/// One row of the top-performer ranking: a barber's settled figures for a
/// period, joined with their name.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct PerformerRow {
    pub barber_id: String,
    pub barber_name: String,
    pub total_revenue: Money,
    pub net_payable: Money,
    pub paid: bool,
}

/// Repository for calculation database operations.
#[derive(Debug, Clone)]
pub struct CalculationRepository {
    pool: SqlitePool,
}

impl CalculationRepository {
    /// Creates a new CalculationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CalculationRepository { pool }
    }

    /// Gets a calculation by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Calculation>> {
        let calculation = sqlx::query_as::<_, Calculation>(&format!(
            r#"
            SELECT {CALCULATION_COLUMNS}
            FROM calculations
            WHERE id = ?1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(calculation)
    }

    /// Gets the calculation keyed by (barber, period start, period end).
    pub async fn find_by_period(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Option<Calculation>> {
        let calculation = sqlx::query_as::<_, Calculation>(&format!(
            r#"
            SELECT {CALCULATION_COLUMNS}
            FROM calculations
            WHERE barber_id = ?1 AND period_start = ?2 AND period_end = ?3
            "#
        ))
        .bind(barber_id)
        .bind(start)
        .bind(end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(calculation)
    }

    /// Upserts the derived fields of an unpaid calculation.
    ///
    /// ## Semantics
    /// - No row for (barber, start, end): insert `calc` as given.
    /// - Unpaid row exists: overwrite its derived fields (last write wins);
    ///   the row keeps its original id and created_at.
    /// - Paid row exists: the `WHERE paid = 0` guard skips the update.
    ///
    /// Returns the stored row, which for the paid case is the untouched
    /// original - callers relying on "recalculate is a no-op once paid"
    /// get exactly that.
    pub async fn upsert_unpaid(&self, calc: &Calculation) -> DbResult<Calculation> {
        debug!(
            barber_id = %calc.barber_id,
            period_start = %calc.period_start,
            period_end = %calc.period_end,
            net_payable = %calc.net_payable,
            "Upserting calculation"
        );

        sqlx::query(&format!(
            r#"
            INSERT INTO calculations ({CALCULATION_COLUMNS})
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                    ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)
            ON CONFLICT (barber_id, period_start, period_end) DO UPDATE SET
                total_revenue       = excluded.total_revenue,
                service_revenue     = excluded.service_revenue,
                product_revenue     = excluded.product_revenue,
                sale_count          = excluded.sale_count,
                commission_services = excluded.commission_services,
                commission_products = excluded.commission_products,
                rent_deducted       = excluded.rent_deducted,
                bonus               = excluded.bonus,
                gross_payable       = excluded.gross_payable,
                adjustment_total    = excluded.adjustment_total,
                net_payable         = excluded.net_payable,
                updated_at          = excluded.updated_at
            WHERE calculations.paid = 0
            "#
        ))
        .bind(&calc.id)
        .bind(&calc.barber_id)
        .bind(calc.period_start)
        .bind(calc.period_end)
        .bind(calc.total_revenue)
        .bind(calc.service_revenue)
        .bind(calc.product_revenue)
        .bind(calc.sale_count)
        .bind(calc.commission_services)
        .bind(calc.commission_products)
        .bind(calc.rent_deducted)
        .bind(calc.bonus)
        .bind(calc.gross_payable)
        .bind(calc.adjustment_total)
        .bind(calc.net_payable)
        .bind(calc.paid)
        .bind(calc.paid_on)
        .bind(&calc.notes)
        .bind(calc.created_at)
        .bind(calc.updated_at)
        .execute(&self.pool)
        .await?;

        // Read back the stored state: the upserted row, or the paid row
        // the guard preserved
        self.find_by_period(&calc.barber_id, calc.period_start, calc.period_end)
            .await?
            .ok_or_else(|| {
                DbError::Internal("calculation vanished during upsert".to_string())
            })
    }

    /// Marks a calculation paid and locks its adjustments, atomically.
    ///
    /// ## Arguments
    /// * `calc` - The current (unpaid) record; supplies id and scope
    /// * `paid_on` - Payout date recorded on the row
    /// * `notes` - Replaces the stored notes when `Some`, preserved when
    ///   `None`
    ///
    /// ## Atomicity
    /// The paid flip and the adjustment sweep run in ONE transaction. If
    /// another writer paid the record first (rows_affected = 0), the
    /// transaction is rolled back and the stored row returned unchanged.
    pub async fn mark_paid(
        &self,
        calc: &Calculation,
        paid_on: NaiveDate,
        notes: Option<&str>,
    ) -> DbResult<Calculation> {
        debug!(id = %calc.id, %paid_on, "Marking calculation paid");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE calculations
            SET paid = 1,
                paid_on = ?2,
                notes = COALESCE(?3, notes),
                updated_at = ?4
            WHERE id = ?1 AND paid = 0
            "#,
        )
        .bind(&calc.id)
        .bind(paid_on)
        .bind(notes)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Already paid by a concurrent caller; nothing to lock
            tx.rollback().await?;
            return self
                .get_by_id(&calc.id)
                .await?
                .ok_or_else(|| DbError::not_found("Calculation", &calc.id));
        }

        let flipped = adjustment::apply_all(
            &mut tx,
            &calc.barber_id,
            calc.period_start,
            calc.period_end,
            &calc.id,
        )
        .await?;

        tx.commit().await?;

        debug!(id = %calc.id, adjustments_applied = flipped, "Calculation paid");

        self.get_by_id(&calc.id)
            .await?
            .ok_or_else(|| DbError::not_found("Calculation", &calc.id))
    }

    /// Calculations whose period lies inside `[start, end]`, joined order
    /// by period then barber. Report read path.
    pub async fn list_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Calculation>> {
        let calculations = sqlx::query_as::<_, Calculation>(&format!(
            r#"
            SELECT {CALCULATION_COLUMNS}
            FROM calculations
            WHERE period_start >= ?1 AND period_end <= ?2
            ORDER BY period_start, barber_id
            "#
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(calculations)
    }

    /// Top performers by total revenue for periods inside `[start, end]`.
    pub async fn top_by_revenue(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: u32,
    ) -> DbResult<Vec<PerformerRow>> {
        let rows = sqlx::query_as::<_, PerformerRow>(
            r#"
            SELECT c.barber_id,
                   b.display_name AS barber_name,
                   c.total_revenue,
                   c.net_payable,
                   c.paid
            FROM calculations c
            JOIN barbers b ON b.id = c.barber_id
            WHERE c.period_start >= ?1 AND c.period_end <= ?2
            ORDER BY c.total_revenue DESC
            LIMIT ?3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Unpaid calculations whose period has ended by `as_of`, oldest
    /// period first - the payout queue.
    pub async fn pending_payouts(&self, as_of: NaiveDate) -> DbResult<Vec<Calculation>> {
        let calculations = sqlx::query_as::<_, Calculation>(&format!(
            r#"
            SELECT {CALCULATION_COLUMNS}
            FROM calculations
            WHERE paid = 0 AND period_end <= ?1
            ORDER BY period_end, barber_id
            "#
        ))
        .bind(as_of)
        .fetch_all(&self.pool)
        .await?;

        Ok(calculations)
    }

    /// Sum of net payables for unpaid records in range (dashboard figure).
    pub async fn unpaid_total_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Money> {
        let total: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT SUM(net_payable)
            FROM calculations
            WHERE paid = 0 AND period_start >= ?1 AND period_end <= ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(total.unwrap_or(0)))
    }
}

/// Generates a new calculation ID.
pub fn generate_calculation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
