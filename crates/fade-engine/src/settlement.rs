//! # Settlement Engine
//!
//! The mutation entry points of the payroll engine: recalculation, payout,
//! policy activation, and the adjustment ledger.
//!
//! ## Recalculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                recalculate(barber, period)                              │
//! │                                                                         │
//! │  1. Validate inputs (before any read)                                  │
//! │  2. Acquire the (barber, period) lock                                  │
//! │  3. Barber exists? ── no ──► NotFound                                  │
//! │  4. Existing calculation paid? ── yes ──► return it untouched          │
//! │  5. Aggregate revenue        (zero totals when no sales)               │
//! │  6. Evaluate active policy   (NotFound when the barber has none)       │
//! │  7. Net pending adjustments                                            │
//! │  8. Upsert derived fields    (keyed on the unique period index,        │
//! │                               guarded by paid = 0)                     │
//! │                                                                         │
//! │  PENDING ──(recalculate)──► PENDING     (self-loop, overwrites)        │
//! │  PENDING ──(mark_paid)────► PAID        (terminal)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identical inputs always produce an identical stored record; callers may
//! retry a timed-out call for that reason alone. Nothing here re-executes
//! on its own.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use fade_core::{
    net_adjustment_total, validation, Adjustment, AdjustmentKind, Calculation,
    CommissionPolicy, CommissionTerms, GoalBonus, Money, Period,
};
use fade_db::Database;

use crate::aggregator::RevenueAggregator;
use crate::error::{EngineError, EngineResult};
use crate::locks::SettlementLocks;

// =============================================================================
// Input Types
// =============================================================================

/// A policy draft: what a caller supplies to `activate_policy`. The engine
/// fills in identity, dates and the active flag.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PolicyDraft {
    pub terms: CommissionTerms,
    pub goal: Option<GoalBonus>,
}

/// A new ledger entry: what a caller supplies to `create_adjustment`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewAdjustment {
    pub barber_id: String,
    pub kind: AdjustmentKind,
    pub description: String,
    pub amount: Money,
    pub effective_date: NaiveDate,
    /// Authenticated actor id, attached by the caller's auth middleware.
    pub created_by: Option<String>,
}

// =============================================================================
// Settlement Engine
// =============================================================================

/// Orchestrates settlement over the database.
///
/// Cheap to clone; all clones share the same lock map, which is what makes
/// the per-key exclusivity hold across concurrent callers.
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    db: Database,
    aggregator: RevenueAggregator,
    locks: SettlementLocks,
}

impl SettlementEngine {
    /// Creates a new engine over the given database.
    pub fn new(db: Database) -> Self {
        let aggregator = RevenueAggregator::new(db.clone());
        SettlementEngine {
            db,
            aggregator,
            locks: SettlementLocks::new(),
        }
    }

    /// The underlying database handle (read paths, reports).
    pub fn db(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Recalculation
    // =========================================================================

    /// Computes (or recomputes) the settlement record for one barber and
    /// period.
    ///
    /// Idempotent while the record is unpaid; a silent no-op returning the
    /// frozen record once it is paid.
    pub async fn recalculate(&self, barber_id: &str, period: Period) -> EngineResult<Calculation> {
        validation::validate_uuid("barber_id", barber_id)?;

        let _guard = self.locks.lock_period(barber_id, &period).await;

        let barber = self
            .db
            .barbers()
            .get_by_id(barber_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Barber", barber_id))?;

        if let Some(existing) = self
            .db
            .calculations()
            .find_by_period(barber_id, period.start(), period.end())
            .await?
        {
            if existing.paid {
                debug!(
                    calculation_id = %existing.id,
                    %period,
                    "Period already paid; recalculation is a no-op"
                );
                return Ok(existing);
            }
        }

        let policy = self
            .db
            .policies()
            .active_policy(barber_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Active policy for barber", barber_id))?;

        let revenue = self.aggregator.aggregate(barber_id, &period).await?;
        let breakdown = policy.evaluate(&revenue);

        let pending = self
            .db
            .adjustments()
            .pending_in_period(barber_id, period.start(), period.end())
            .await?;
        let adjustment_total = net_adjustment_total(&pending);
        let net_payable = breakdown.gross_payable - adjustment_total;

        let now = Utc::now();
        let calc = Calculation {
            id: Uuid::new_v4().to_string(),
            barber_id: barber_id.to_string(),
            period_start: period.start(),
            period_end: period.end(),
            total_revenue: breakdown.total_revenue,
            service_revenue: revenue.services,
            product_revenue: revenue.products,
            sale_count: revenue.sale_count,
            commission_services: breakdown.commission_services,
            commission_products: breakdown.commission_products,
            rent_deducted: breakdown.rent_deducted,
            bonus: breakdown.bonus,
            gross_payable: breakdown.gross_payable,
            adjustment_total,
            net_payable,
            paid: false,
            paid_on: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let stored = self.db.calculations().upsert_unpaid(&calc).await?;

        info!(
            barber = %barber.display_name,
            %period,
            gross = %stored.gross_payable,
            adjustments = %stored.adjustment_total,
            net = %stored.net_payable,
            "Settlement recalculated"
        );

        Ok(stored)
    }

    /// Recalculates every active barber that has an active policy.
    ///
    /// Barbers without a policy are skipped (there is nothing to evaluate
    /// them against), matching how whole-shop payroll runs are scoped.
    pub async fn recalculate_all(&self, period: Period) -> EngineResult<Vec<Calculation>> {
        let listings = self.db.policies().active_policies().await?;

        let mut results = Vec::with_capacity(listings.len());
        for listing in listings {
            results.push(
                self.recalculate(&listing.policy.barber_id, period)
                    .await?,
            );
        }

        Ok(results)
    }

    // =========================================================================
    // Payout
    // =========================================================================

    /// Marks a calculation paid and locks its adjustments.
    ///
    /// The paid flip and the adjustment sweep commit atomically (fade-db
    /// runs both in one transaction). Calling this on an already-paid
    /// calculation returns it unchanged: a retry after a timeout of
    /// unknown outcome must not double-apply anything.
    pub async fn mark_paid(
        &self,
        calculation_id: &str,
        paid_on: NaiveDate,
        notes: Option<String>,
    ) -> EngineResult<Calculation> {
        validation::validate_uuid("calculation_id", calculation_id)?;

        let calc = self
            .db
            .calculations()
            .get_by_id(calculation_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Calculation", calculation_id))?;

        let period = Period::new(calc.period_start, calc.period_end)?;
        let _guard = self.locks.lock_period(&calc.barber_id, &period).await;

        // Re-read under the lock; the first read raced ahead of it
        let calc = self
            .db
            .calculations()
            .get_by_id(calculation_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Calculation", calculation_id))?;

        if calc.paid {
            debug!(id = %calc.id, "Calculation already paid; returning unchanged");
            return Ok(calc);
        }

        let paid = self
            .db
            .calculations()
            .mark_paid(&calc, paid_on, notes.as_deref())
            .await?;

        info!(
            id = %paid.id,
            barber_id = %paid.barber_id,
            %paid_on,
            net = %paid.net_payable,
            "Settlement paid"
        );

        Ok(paid)
    }

    // =========================================================================
    // Policy Activation
    // =========================================================================

    /// Activates a new commission policy for a barber, superseding the
    /// current one.
    ///
    /// After this returns, exactly one active policy exists for the barber.
    /// The superseded policy's effective range closes on today's date and
    /// it becomes immutable history.
    pub async fn activate_policy(
        &self,
        barber_id: &str,
        draft: PolicyDraft,
    ) -> EngineResult<CommissionPolicy> {
        validation::validate_uuid("barber_id", barber_id)?;
        validation::validate_terms(&draft.terms)?;
        validation::validate_goal(&draft.goal)?;

        let _guard = self.locks.lock_barber(barber_id).await;

        self.db
            .barbers()
            .get_by_id(barber_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Barber", barber_id))?;

        let now = Utc::now();
        let policy = CommissionPolicy {
            id: Uuid::new_v4().to_string(),
            barber_id: barber_id.to_string(),
            terms: draft.terms,
            goal: draft.goal,
            effective_from: now.date_naive(),
            effective_to: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.db.policies().activate(&policy).await?;

        info!(
            barber_id = %barber_id,
            policy_id = %policy.id,
            kind = ?policy.terms.kind(),
            "Commission policy activated"
        );

        Ok(policy)
    }

    // =========================================================================
    // Adjustment Ledger
    // =========================================================================

    /// Records a new pending adjustment against a barber.
    pub async fn create_adjustment(&self, new: NewAdjustment) -> EngineResult<Adjustment> {
        validation::validate_uuid("barber_id", &new.barber_id)?;
        validation::validate_description(&new.description)?;
        validation::validate_adjustment_amount(new.amount)?;

        self.db
            .barbers()
            .get_by_id(&new.barber_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Barber", &new.barber_id))?;

        let adjustment = Adjustment {
            id: Uuid::new_v4().to_string(),
            barber_id: new.barber_id,
            calculation_id: None,
            kind: new.kind,
            description: new.description.trim().to_string(),
            amount: new.amount,
            effective_date: new.effective_date,
            applied: false,
            created_by: new.created_by,
            created_at: Utc::now(),
        };

        self.db.adjustments().insert(&adjustment).await?;

        debug!(
            id = %adjustment.id,
            barber_id = %adjustment.barber_id,
            kind = ?adjustment.kind,
            amount = %adjustment.amount,
            "Adjustment recorded"
        );

        Ok(adjustment)
    }

    /// Deletes a pending adjustment.
    ///
    /// An applied adjustment is part of a paid settlement and immutable:
    /// deleting it is a conflict, not a not-found.
    pub async fn delete_adjustment(&self, id: &str) -> EngineResult<()> {
        validation::validate_uuid("adjustment_id", id)?;

        let adjustment = self
            .db
            .adjustments()
            .get_by_id(id)
            .await?
            .ok_or_else(|| EngineError::not_found("Adjustment", id))?;

        if adjustment.applied {
            return Err(EngineError::Conflict(format!(
                "adjustment {} was folded into a paid settlement and cannot be deleted",
                id
            )));
        }

        self.db.adjustments().delete_pending(id).await?;

        debug!(id = %id, "Adjustment deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use fade_core::{CommissionTerms, Rate};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    /// Full settlement path: percentage 50/30, 1000.00 service revenue,
    /// 200.00 product revenue, one pending 50.00 discount.
    #[tokio::test]
    async fn test_recalculate_worked_example() {
        let (db, barber_id) = testutil::db_with_barber().await;
        testutil::percentage_policy(&db, &barber_id).await;
        // 1000.00 of services across two sales, 200.00 of products
        testutil::sale_with_lines(
            &db,
            &barber_id,
            5,
            &[(Some("svc-cut"), None, 10, 45_00), (None, Some("prd-pomade"), 8, 25_00)],
        )
        .await;
        testutil::sale_with_lines(&db, &barber_id, 20, &[(Some("svc-fade"), None, 10, 55_00)])
            .await;

        let engine = SettlementEngine::new(db);
        engine
            .create_adjustment(NewAdjustment {
                barber_id: barber_id.clone(),
                kind: AdjustmentKind::Discount,
                description: "product damage".to_string(),
                amount: Money::from_cents(50_00),
                effective_date: d(3, 15),
                created_by: None,
            })
            .await
            .unwrap();

        let calc = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap();

        assert_eq!(calc.service_revenue, Money::from_cents(1000_00));
        assert_eq!(calc.product_revenue, Money::from_cents(200_00));
        assert_eq!(calc.commission_services, Money::from_cents(500_00));
        assert_eq!(calc.commission_products, Money::from_cents(60_00));
        assert_eq!(calc.bonus, Money::zero());
        assert_eq!(calc.gross_payable, Money::from_cents(560_00));
        assert_eq!(calc.adjustment_total, Money::from_cents(50_00));
        assert_eq!(calc.net_payable, Money::from_cents(510_00));
        assert!(!calc.paid);
    }

    #[tokio::test]
    async fn test_recalculate_is_idempotent() {
        let (db, barber_id) = testutil::db_with_barber().await;
        testutil::percentage_policy(&db, &barber_id).await;
        testutil::sale_with_lines(&db, &barber_id, 5, &[(Some("svc-cut"), None, 2, 45_00)])
            .await;

        let engine = SettlementEngine::new(db);
        let first = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap();
        let second = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap();

        // Same keyed row, identical derived fields
        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.total_revenue, first.total_revenue);
        assert_eq!(second.commission_services, first.commission_services);
        assert_eq!(second.gross_payable, first.gross_payable);
        assert_eq!(second.adjustment_total, first.adjustment_total);
        assert_eq!(second.net_payable, first.net_payable);
    }

    #[tokio::test]
    async fn test_recalculate_no_sales_settles_at_zero() {
        let (db, barber_id) = testutil::db_with_barber().await;
        testutil::percentage_policy(&db, &barber_id).await;

        let engine = SettlementEngine::new(db);
        let calc = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap();

        assert_eq!(calc.total_revenue, Money::zero());
        assert_eq!(calc.net_payable, Money::zero());
        assert_eq!(calc.sale_count, 0);
    }

    #[tokio::test]
    async fn test_recalculate_errors() {
        let (db, barber_id) = testutil::db_with_barber().await;
        let engine = SettlementEngine::new(db);

        // Malformed id: rejected before any read
        let err = engine
            .recalculate("not-a-uuid", testutil::march())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        // Unknown barber
        let err = engine
            .recalculate(&Uuid::new_v4().to_string(), testutil::march())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));

        // Known barber, no active policy
        let err = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_recalculate_aborts_on_corrupt_lines_without_persisting() {
        let (db, barber_id) = testutil::db_with_barber().await;
        testutil::percentage_policy(&db, &barber_id).await;
        testutil::sale_with_lines(
            &db,
            &barber_id,
            9,
            &[(Some("svc-cut"), Some("prd-pomade"), 1, 45_00)],
        )
        .await;

        let engine = SettlementEngine::new(db);
        let err = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Integrity(_)));

        // Nothing was written
        let stored = engine
            .db()
            .calculations()
            .find_by_period(&barber_id, d(3, 1), d(3, 31))
            .await
            .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_chair_rent_shortfall_worked_example() {
        let (db, barber_id) = testutil::db_with_barber().await;
        testutil::activate_policy(
            &db,
            &barber_id,
            CommissionTerms::ChairRent {
                rent: Money::from_cents(300_00),
                product_rate: Rate::from_bps(3000),
            },
            None,
        )
        .await;
        // 250.00 of service revenue: below the rent
        testutil::sale_with_lines(&db, &barber_id, 8, &[(Some("svc-cut"), None, 5, 50_00)])
            .await;

        let engine = SettlementEngine::new(db);
        let calc = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap();

        assert_eq!(calc.commission_services, Money::zero()); // not -50.00
        assert_eq!(calc.rent_deducted, Money::from_cents(300_00));
    }

    #[tokio::test]
    async fn test_mark_paid_flips_adjustments_and_freezes_record() {
        let (db, barber_id) = testutil::db_with_barber().await;
        testutil::percentage_policy(&db, &barber_id).await;
        testutil::sale_with_lines(&db, &barber_id, 5, &[(Some("svc-cut"), None, 10, 45_00)])
            .await;

        let engine = SettlementEngine::new(db.clone());
        // One advance and one fine pending
        let advance = engine
            .create_adjustment(NewAdjustment {
                barber_id: barber_id.clone(),
                kind: AdjustmentKind::Advance,
                description: "mid-month advance".to_string(),
                amount: Money::from_cents(100_00),
                effective_date: d(3, 10),
                created_by: None,
            })
            .await
            .unwrap();
        let fine = engine
            .create_adjustment(NewAdjustment {
                barber_id: barber_id.clone(),
                kind: AdjustmentKind::Fine,
                description: "late opening".to_string(),
                amount: Money::from_cents(20_00),
                effective_date: d(3, 18),
                created_by: None,
            })
            .await
            .unwrap();

        let calc = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap();
        // fine(+20) - advance(-100) = -80 deducted → net = gross + 80
        assert_eq!(calc.adjustment_total, Money::from_cents(-80_00));

        let paid = engine
            .mark_paid(&calc.id, d(4, 1), Some("april payout".to_string()))
            .await
            .unwrap();
        assert!(paid.paid);
        assert_eq!(paid.paid_on, Some(d(4, 1)));

        // Both adjustments are now applied and stamped
        for id in [&advance.id, &fine.id] {
            let adj = engine.db().adjustments().get_by_id(id).await.unwrap().unwrap();
            assert!(adj.applied);
            assert_eq!(adj.calculation_id.as_deref(), Some(calc.id.as_str()));
        }

        // A later sale no longer moves the frozen record
        testutil::sale_with_lines(&db, &barber_id, 25, &[(Some("svc-fade"), None, 4, 55_00)])
            .await;
        let after = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap();
        assert_eq!(after.net_payable, paid.net_payable);
        assert_eq!(after.total_revenue, paid.total_revenue);
        assert!(after.paid);
    }

    #[tokio::test]
    async fn test_mark_paid_unknown_and_repeat() {
        let (db, barber_id) = testutil::db_with_barber().await;
        testutil::percentage_policy(&db, &barber_id).await;

        let engine = SettlementEngine::new(db);
        let err = engine
            .mark_paid(&Uuid::new_v4().to_string(), d(4, 1), None)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));

        let calc = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap();
        let first = engine.mark_paid(&calc.id, d(4, 1), None).await.unwrap();
        let repeat = engine.mark_paid(&calc.id, d(4, 20), None).await.unwrap();
        assert_eq!(repeat.paid_on, first.paid_on);
    }

    #[tokio::test]
    async fn test_delete_adjustment_conflict_on_applied() {
        let (db, barber_id) = testutil::db_with_barber().await;
        testutil::percentage_policy(&db, &barber_id).await;

        let engine = SettlementEngine::new(db);
        let adjustment = engine
            .create_adjustment(NewAdjustment {
                barber_id: barber_id.clone(),
                kind: AdjustmentKind::Discount,
                description: "towel stock".to_string(),
                amount: Money::from_cents(15_00),
                effective_date: d(3, 12),
                created_by: None,
            })
            .await
            .unwrap();

        let calc = engine
            .recalculate(&barber_id, testutil::march())
            .await
            .unwrap();
        engine.mark_paid(&calc.id, d(4, 1), None).await.unwrap();

        let err = engine.delete_adjustment(&adjustment.id).await.unwrap_err();
        assert!(matches!(err, EngineError::Conflict(_)));

        // A pending entry still deletes fine
        let pending = engine
            .create_adjustment(NewAdjustment {
                barber_id: barber_id.clone(),
                kind: AdjustmentKind::Bonus,
                description: "covered shift".to_string(),
                amount: Money::from_cents(30_00),
                effective_date: d(4, 2),
                created_by: None,
            })
            .await
            .unwrap();
        engine.delete_adjustment(&pending.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_adjustment_validation() {
        let (db, barber_id) = testutil::db_with_barber().await;
        let engine = SettlementEngine::new(db);

        // Amount must be positive
        let err = engine
            .create_adjustment(NewAdjustment {
                barber_id: barber_id.clone(),
                kind: AdjustmentKind::Fine,
                description: "late opening".to_string(),
                amount: Money::zero(),
                effective_date: d(3, 10),
                created_by: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        // Description too short
        let err = engine
            .create_adjustment(NewAdjustment {
                barber_id: barber_id.clone(),
                kind: AdjustmentKind::Fine,
                description: "x".to_string(),
                amount: Money::from_cents(10_00),
                effective_date: d(3, 10),
                created_by: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[tokio::test]
    async fn test_activate_policy_leaves_one_active() {
        let (db, barber_id) = testutil::db_with_barber().await;
        testutil::percentage_policy(&db, &barber_id).await;

        let engine = SettlementEngine::new(db);
        engine
            .activate_policy(
                &barber_id,
                PolicyDraft {
                    terms: CommissionTerms::FixedMonthly {
                        amount: Money::from_cents(2500_00),
                        product_rate: Rate::from_bps(1000),
                    },
                    goal: None,
                },
            )
            .await
            .unwrap();

        let active = engine.db().policies().count_active(&barber_id).await.unwrap();
        assert_eq!(active, 1);

        // Out-of-range rate is rejected before any write
        let err = engine
            .activate_policy(
                &barber_id,
                PolicyDraft {
                    terms: CommissionTerms::Percentage {
                        service_rate: Rate::from_bps(20_000),
                        product_rate: Rate::from_bps(3000),
                    },
                    goal: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert_eq!(
            engine.db().policies().count_active(&barber_id).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_recalculate_all_covers_policied_barbers() {
        let (db, first) = testutil::db_with_barber().await;
        let second = testutil::insert_barber(&db, "Ana Costa").await;
        let no_policy = testutil::insert_barber(&db, "Bruno Dias").await;
        testutil::percentage_policy(&db, &first).await;
        testutil::percentage_policy(&db, &second).await;

        let engine = SettlementEngine::new(db);
        let results = engine.recalculate_all(testutil::march()).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|c| c.barber_id != no_policy));
    }

    #[tokio::test]
    async fn test_concurrent_recalculate_same_key_converges() {
        let (db, barber_id) = testutil::db_with_barber().await;
        testutil::percentage_policy(&db, &barber_id).await;
        testutil::sale_with_lines(&db, &barber_id, 5, &[(Some("svc-cut"), None, 2, 45_00)])
            .await;

        let engine = SettlementEngine::new(db);
        let (a, b) = tokio::join!(
            engine.recalculate(&barber_id, testutil::march()),
            engine.recalculate(&barber_id, testutil::march()),
        );
        let a = a.unwrap();
        let b = b.unwrap();

        // Serialized by the per-key lock: one keyed row, identical figures
        assert_eq!(a.id, b.id);
        assert_eq!(a.net_payable, b.net_payable);
    }
}
