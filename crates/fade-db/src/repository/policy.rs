//! # Policy Repository
//!
//! Database operations for commission policies.
//!
//! ## One Active Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Policy Activation                                     │
//! │                                                                         │
//! │  activate(new policy for barber B)                                     │
//! │       │                                                                 │
//! │       ▼   ┌──────────────── one transaction ────────────────┐          │
//! │           │ 1. UPDATE old active row:                       │          │
//! │           │      is_active = 0, effective_to = today        │          │
//! │           │ 2. INSERT new row: is_active = 1                │          │
//! │           └─────────────────────────────────────────────────┘          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Partial unique index (barber_id WHERE is_active = 1) rejects any      │
//! │  interleaving that would leave two active rows - the loser of a        │
//! │  race gets a UniqueViolation instead of corrupting history.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage Shape
//! The sum-typed `CommissionTerms` flattens into one row: a `kind` column
//! plus per-kind value columns left at zero when unused. Rows hydrate back
//! through an exhaustive match on `kind`, so the zero-filled columns never
//! leak into domain code.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use fade_core::{
    CommissionPolicy, CommissionTerms, GoalBonus, Money, PolicyKind, Rate,
};

// =============================================================================
// Row Mapping
// =============================================================================

/// Flat row image of a policy; hydrated into `CommissionPolicy`.
#[derive(Debug, sqlx::FromRow)]
struct PolicyRow {
    id: String,
    barber_id: String,
    kind: PolicyKind,
    service_rate: Rate,
    product_rate: Rate,
    rent: Money,
    fixed_amount: Money,
    goal_target: Money,
    goal_rate: Rate,
    effective_from: NaiveDate,
    effective_to: Option<NaiveDate>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PolicyRow> for CommissionPolicy {
    fn from(row: PolicyRow) -> Self {
        let terms = match row.kind {
            PolicyKind::Percentage => CommissionTerms::Percentage {
                service_rate: row.service_rate,
                product_rate: row.product_rate,
            },
            PolicyKind::ChairRent => CommissionTerms::ChairRent {
                rent: row.rent,
                product_rate: row.product_rate,
            },
            PolicyKind::FixedMonthly => CommissionTerms::FixedMonthly {
                amount: row.fixed_amount,
                product_rate: row.product_rate,
            },
        };

        // A zero target means "no goal configured"; the domain type makes
        // that unrepresentable as a goal
        let goal = if row.goal_target.is_positive() {
            Some(GoalBonus {
                target: row.goal_target,
                rate: row.goal_rate,
            })
        } else {
            None
        };

        CommissionPolicy {
            id: row.id,
            barber_id: row.barber_id,
            terms,
            goal,
            effective_from: row.effective_from,
            effective_to: row.effective_to,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Per-kind column values for an INSERT.
struct TermColumns {
    service_rate: Rate,
    product_rate: Rate,
    rent: Money,
    fixed_amount: Money,
}

fn term_columns(terms: &CommissionTerms) -> TermColumns {
    match *terms {
        CommissionTerms::Percentage {
            service_rate,
            product_rate,
        } => TermColumns {
            service_rate,
            product_rate,
            rent: Money::zero(),
            fixed_amount: Money::zero(),
        },
        CommissionTerms::ChairRent { rent, product_rate } => TermColumns {
            service_rate: Rate::zero(),
            product_rate,
            rent,
            fixed_amount: Money::zero(),
        },
        CommissionTerms::FixedMonthly {
            amount,
            product_rate,
        } => TermColumns {
            service_rate: Rate::zero(),
            product_rate,
            rent: Money::zero(),
            fixed_amount: amount,
        },
    }
}

const POLICY_COLUMNS: &str = "id, barber_id, kind, service_rate, product_rate, rent, \
     fixed_amount, goal_target, goal_rate, effective_from, effective_to, \
     is_active, created_at, updated_at";

// =============================================================================
// Active Policy Listing
// =============================================================================

/// An active policy joined with its barber, for configuration listings.
#[derive(Debug, Clone)]
pub struct ActivePolicyListing {
    pub barber_name: String,
    pub policy: CommissionPolicy,
}

#[derive(Debug, sqlx::FromRow)]
struct ActivePolicyRow {
    barber_name: String,
    #[sqlx(flatten)]
    policy: PolicyRow,
}

// =============================================================================
// Policy Repository
// =============================================================================

/// Repository for commission policy database operations.
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: SqlitePool,
}

impl PolicyRepository {
    /// Creates a new PolicyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PolicyRepository { pool }
    }

    /// Gets a barber's currently active policy, if any.
    pub async fn active_policy(&self, barber_id: &str) -> DbResult<Option<CommissionPolicy>> {
        let row = sqlx::query_as::<_, PolicyRow>(&format!(
            r#"
            SELECT {POLICY_COLUMNS}
            FROM commission_policies
            WHERE barber_id = ?1 AND is_active = 1
            "#
        ))
        .bind(barber_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommissionPolicy::from))
    }

    /// Gets the policy that was in effect for a barber on a given date.
    ///
    /// ## Why As-Of?
    /// Historical calculations were produced under the policy live at the
    /// time; this query answers "which one was that" without any implicit
    /// current-policy state.
    pub async fn policy_as_of(
        &self,
        barber_id: &str,
        date: NaiveDate,
    ) -> DbResult<Option<CommissionPolicy>> {
        let row = sqlx::query_as::<_, PolicyRow>(&format!(
            r#"
            SELECT {POLICY_COLUMNS}
            FROM commission_policies
            WHERE barber_id = ?1
              AND effective_from <= ?2
              AND (effective_to IS NULL OR effective_to >= ?2)
            ORDER BY effective_from DESC
            LIMIT 1
            "#
        ))
        .bind(barber_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommissionPolicy::from))
    }

    /// Full policy history for a barber, newest first.
    pub async fn history(&self, barber_id: &str) -> DbResult<Vec<CommissionPolicy>> {
        let rows = sqlx::query_as::<_, PolicyRow>(&format!(
            r#"
            SELECT {POLICY_COLUMNS}
            FROM commission_policies
            WHERE barber_id = ?1
            ORDER BY effective_from DESC, created_at DESC
            "#
        ))
        .bind(barber_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommissionPolicy::from).collect())
    }

    /// Active policies for all active barbers, ordered by barber name.
    pub async fn active_policies(&self) -> DbResult<Vec<ActivePolicyListing>> {
        let rows = sqlx::query_as::<_, ActivePolicyRow>(
            r#"
            SELECT p.id, p.barber_id, p.kind, p.service_rate, p.product_rate,
                   p.rent, p.fixed_amount, p.goal_target, p.goal_rate,
                   p.effective_from, p.effective_to, p.is_active,
                   p.created_at, p.updated_at,
                   b.display_name AS barber_name
            FROM commission_policies p
            JOIN barbers b ON b.id = p.barber_id
            WHERE p.is_active = 1 AND b.is_active = 1
            ORDER BY b.display_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ActivePolicyListing {
                barber_name: row.barber_name,
                policy: CommissionPolicy::from(row.policy),
            })
            .collect())
    }

    /// Activates a policy: supersedes the previous active policy (if any)
    /// and inserts the new one, in a single transaction.
    ///
    /// The caller provides a fully-built policy (id, dates, timestamps);
    /// its `effective_to` must be `None` and `is_active` true.
    pub async fn activate(&self, policy: &CommissionPolicy) -> DbResult<()> {
        debug!(
            barber_id = %policy.barber_id,
            kind = ?policy.terms.kind(),
            "Activating commission policy"
        );

        let cols = term_columns(&policy.terms);
        let (goal_target, goal_rate) = match policy.goal {
            Some(goal) => (goal.target, goal.rate),
            None => (Money::zero(), Rate::zero()),
        };

        let mut tx = self.pool.begin().await?;

        // Close out the current policy; effective_to = the day the new one
        // takes over
        sqlx::query(
            r#"
            UPDATE commission_policies
            SET is_active = 0, effective_to = ?2, updated_at = ?3
            WHERE barber_id = ?1 AND is_active = 1
            "#,
        )
        .bind(&policy.barber_id)
        .bind(policy.effective_from)
        .bind(policy.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(&format!(
            r#"
            INSERT INTO commission_policies ({POLICY_COLUMNS})
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#
        ))
        .bind(&policy.id)
        .bind(&policy.barber_id)
        .bind(policy.terms.kind())
        .bind(cols.service_rate)
        .bind(cols.product_rate)
        .bind(cols.rent)
        .bind(cols.fixed_amount)
        .bind(goal_target)
        .bind(goal_rate)
        .bind(policy.effective_from)
        .bind(policy.effective_to)
        .bind(policy.is_active)
        .bind(policy.created_at)
        .bind(policy.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Counts active policies for a barber (0 or 1 by invariant).
    pub async fn count_active(&self, barber_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM commission_policies
            WHERE barber_id = ?1 AND is_active = 1
            "#,
        )
        .bind(barber_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

/// Generates a new policy ID.
pub fn generate_policy_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
