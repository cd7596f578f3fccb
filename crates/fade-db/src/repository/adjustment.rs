//! # Adjustment Repository
//!
//! Database operations for manual ledger entries.
//!
//! ## The Applied Flag
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Pending vs Applied                                     │
//! │                                                                         │
//! │  applied = 0   Counted into every recalculation of its period.         │
//! │                Deletable. Re-read on each recompute, so editing        │
//! │                the ledger before payday is always reflected.           │
//! │                                                                         │
//! │  applied = 1   Folded into a PAID calculation. Immutable. The          │
//! │                calculation_id column records which one.                │
//! │                                                                         │
//! │  The 0 → 1 flip happens ONLY inside the mark-paid transaction          │
//! │  (see calculation.rs); this module provides the sweep it calls.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use fade_core::Adjustment;

const ADJUSTMENT_COLUMNS: &str =
    "id, barber_id, calculation_id, kind, description, amount, \
     effective_date, applied, created_by, created_at";

/// Repository for adjustment database operations.
#[derive(Debug, Clone)]
pub struct AdjustmentRepository {
    pool: SqlitePool,
}

impl AdjustmentRepository {
    /// Creates a new AdjustmentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AdjustmentRepository { pool }
    }

    /// Gets an adjustment by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Adjustment>> {
        let adjustment = sqlx::query_as::<_, Adjustment>(&format!(
            r#"
            SELECT {ADJUSTMENT_COLUMNS}
            FROM adjustments
            WHERE id = ?1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(adjustment)
    }

    /// Inserts a new (pending) adjustment.
    pub async fn insert(&self, adjustment: &Adjustment) -> DbResult<()> {
        debug!(
            id = %adjustment.id,
            barber_id = %adjustment.barber_id,
            kind = ?adjustment.kind,
            amount = %adjustment.amount,
            "Inserting adjustment"
        );

        sqlx::query(&format!(
            r#"
            INSERT INTO adjustments ({ADJUSTMENT_COLUMNS})
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#
        ))
        .bind(&adjustment.id)
        .bind(&adjustment.barber_id)
        .bind(&adjustment.calculation_id)
        .bind(adjustment.kind)
        .bind(&adjustment.description)
        .bind(adjustment.amount)
        .bind(adjustment.effective_date)
        .bind(adjustment.applied)
        .bind(&adjustment.created_by)
        .bind(adjustment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Pending adjustments (applied = 0) for a barber with an effective
    /// date inside `[start, end]` inclusive.
    pub async fn pending_in_period(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<Adjustment>> {
        let adjustments = sqlx::query_as::<_, Adjustment>(&format!(
            r#"
            SELECT {ADJUSTMENT_COLUMNS}
            FROM adjustments
            WHERE barber_id = ?1
              AND applied = 0
              AND effective_date BETWEEN ?2 AND ?3
            ORDER BY effective_date, created_at
            "#
        ))
        .bind(barber_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(adjustments)
    }

    /// Every adjustment of a barber, optionally since a date, newest
    /// effective date first. Read path for ledger listings.
    pub async fn list_for_barber(
        &self,
        barber_id: &str,
        since: Option<NaiveDate>,
    ) -> DbResult<Vec<Adjustment>> {
        let adjustments = match since {
            Some(since) => {
                sqlx::query_as::<_, Adjustment>(&format!(
                    r#"
                    SELECT {ADJUSTMENT_COLUMNS}
                    FROM adjustments
                    WHERE barber_id = ?1 AND effective_date >= ?2
                    ORDER BY effective_date DESC, created_at DESC
                    "#
                ))
                .bind(barber_id)
                .bind(since)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Adjustment>(&format!(
                    r#"
                    SELECT {ADJUSTMENT_COLUMNS}
                    FROM adjustments
                    WHERE barber_id = ?1
                    ORDER BY effective_date DESC, created_at DESC
                    "#
                ))
                .bind(barber_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(adjustments)
    }

    /// Deletes a pending adjustment.
    ///
    /// The `applied = 0` guard means an applied entry can never be removed
    /// through this path, even if the caller's earlier check raced with a
    /// settlement.
    pub async fn delete_pending(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM adjustments
            WHERE id = ?1 AND applied = 0
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Adjustment (pending)", id));
        }

        Ok(())
    }
}

/// Flips every pending adjustment in scope to applied, stamping the
/// calculation they were folded into. Returns the number of rows flipped.
///
/// Runs on the caller's connection so the mark-paid transaction covers it;
/// a single UPDATE keeps the sweep all-or-nothing.
pub async fn apply_all(
    conn: &mut SqliteConnection,
    barber_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    calculation_id: &str,
) -> DbResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE adjustments
        SET applied = 1, calculation_id = ?4
        WHERE barber_id = ?1
          AND applied = 0
          AND effective_date BETWEEN ?2 AND ?3
        "#,
    )
    .bind(barber_id)
    .bind(start)
    .bind(end)
    .bind(calculation_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Generates a new adjustment ID.
pub fn generate_adjustment_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use fade_core::{AdjustmentKind, Barber, Money};
    use uuid::Uuid;

    async fn db_with_barber() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let now = Utc::now();
        let barber = Barber {
            id: Uuid::new_v4().to_string(),
            display_name: "Carla Mota".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.barbers().insert(&barber).await.unwrap();
        (db, barber.id)
    }

    fn adjustment(barber_id: &str, kind: AdjustmentKind, cents: i64, day: u32) -> Adjustment {
        Adjustment {
            id: generate_adjustment_id(),
            barber_id: barber_id.to_string(),
            calculation_id: None,
            kind,
            description: "test entry".to_string(),
            amount: Money::from_cents(cents),
            effective_date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            applied: false,
            created_by: Some(Uuid::new_v4().to_string()),
            created_at: Utc::now(),
        }
    }

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (db, barber_id) = db_with_barber().await;
        let adj = adjustment(&barber_id, AdjustmentKind::Fine, 5_000, 10);
        db.adjustments().insert(&adj).await.unwrap();

        let found = db.adjustments().get_by_id(&adj.id).await.unwrap().unwrap();
        assert_eq!(found, adj);
    }

    #[tokio::test]
    async fn test_pending_in_period_filters() {
        let (db, barber_id) = db_with_barber().await;
        let in_range = adjustment(&barber_id, AdjustmentKind::Discount, 5_000, 10);
        let out_of_range = adjustment(&barber_id, AdjustmentKind::Discount, 5_000, 31);
        let mut applied = adjustment(&barber_id, AdjustmentKind::Fine, 2_000, 12);
        applied.applied = true;

        for adj in [&in_range, &out_of_range, &applied] {
            db.adjustments().insert(adj).await.unwrap();
        }

        let pending = db
            .adjustments()
            .pending_in_period(&barber_id, d(3, 1), d(3, 15))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, in_range.id);
    }

    /// Inserts a bare calculation row so the calculation_id foreign key
    /// has a target.
    async fn insert_calculation_stub(db: &Database, id: &str, barber_id: &str) {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO calculations (id, barber_id, period_start, period_end, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(id)
        .bind(barber_id)
        .bind(d(3, 1))
        .bind(d(3, 25))
        .bind(now)
        .execute(db.pool())
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_apply_all_sweeps_only_pending_in_scope() {
        let (db, barber_id) = db_with_barber().await;
        let advance = adjustment(&barber_id, AdjustmentKind::Advance, 20_000, 5);
        let fine = adjustment(&barber_id, AdjustmentKind::Fine, 5_000, 20);
        let next_month = adjustment(&barber_id, AdjustmentKind::Discount, 1_000, 31);
        for adj in [&advance, &fine, &next_month] {
            db.adjustments().insert(adj).await.unwrap();
        }
        insert_calculation_stub(&db, "calc-1", &barber_id).await;

        let mut conn = db.pool().acquire().await.unwrap();
        let flipped = apply_all(&mut conn, &barber_id, d(3, 1), d(3, 25), "calc-1")
            .await
            .unwrap();
        assert_eq!(flipped, 2);
        // Single-connection test pool: release before querying again
        drop(conn);

        let advance = db.adjustments().get_by_id(&advance.id).await.unwrap().unwrap();
        assert!(advance.applied);
        assert_eq!(advance.calculation_id.as_deref(), Some("calc-1"));

        let untouched = db
            .adjustments()
            .get_by_id(&next_month.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!untouched.applied);
    }

    #[tokio::test]
    async fn test_delete_pending_refuses_applied() {
        let (db, barber_id) = db_with_barber().await;
        let pending = adjustment(&barber_id, AdjustmentKind::Bonus, 3_000, 8);
        let mut locked = adjustment(&barber_id, AdjustmentKind::Fine, 2_000, 9);
        locked.applied = true;
        db.adjustments().insert(&pending).await.unwrap();
        db.adjustments().insert(&locked).await.unwrap();

        db.adjustments().delete_pending(&pending.id).await.unwrap();
        assert!(db.adjustments().get_by_id(&pending.id).await.unwrap().is_none());

        // The guard refuses to touch an applied row
        assert!(db.adjustments().delete_pending(&locked.id).await.is_err());
        assert!(db.adjustments().get_by_id(&locked.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_for_barber_order_and_since() {
        let (db, barber_id) = db_with_barber().await;
        let early = adjustment(&barber_id, AdjustmentKind::Discount, 1_000, 2);
        let late = adjustment(&barber_id, AdjustmentKind::Discount, 2_000, 20);
        db.adjustments().insert(&early).await.unwrap();
        db.adjustments().insert(&late).await.unwrap();

        let all = db.adjustments().list_for_barber(&barber_id, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, late.id); // newest first

        let recent = db
            .adjustments()
            .list_for_barber(&barber_id, Some(d(3, 10)))
            .await
            .unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, late.id);
    }
}
