//! # Sale Repository
//!
//! Database operations for sales and sale lines.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Who Touches Sales                                   │
//! │                                                                         │
//! │  External sales workflow (register)                                    │
//! │     └── insert_sale / insert_line   (writes, once, at the register)    │
//! │                                                                         │
//! │  Payroll engine (this workspace)                                       │
//! │     └── lines_in_period             (reads, during aggregation)        │
//! │                                                                         │
//! │  Sales are immutable once written. There is no update path here        │
//! │  on purpose: amending a sale that reached a paid settlement would      │
//! │  falsify payroll history.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use fade_core::{Sale, SaleLine};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, client_id, barber_id, total, payment_method, notes, sold_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Inserts a sale record (called by the external sales workflow).
    pub async fn insert_sale(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, total = %sale.total, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (id, client_id, barber_id, total, payment_method, notes, sold_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.client_id)
        .bind(&sale.barber_id)
        .bind(sale.total)
        .bind(sale.payment_method)
        .bind(&sale.notes)
        .bind(sale.sold_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a sale line.
    pub async fn insert_line(&self, line: &SaleLine) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sale_lines (id, sale_id, product_id, service_id, quantity, unit_price, subtotal)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&line.id)
        .bind(&line.sale_id)
        .bind(&line.product_id)
        .bind(&line.service_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(line.subtotal)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets all lines of a sale, in insertion order.
    pub async fn get_lines(&self, sale_id: &str) -> DbResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT id, sale_id, product_id, service_id, quantity, unit_price, subtotal
            FROM sale_lines
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// All sale lines of a barber whose sale falls on a calendar date
    /// within `[start, end]` inclusive.
    ///
    /// ## Period Membership
    /// The comparison uses the DATE of the sale timestamp: a sale rung up
    /// at 23:59 on the period's last day belongs to the period.
    pub async fn lines_in_period(
        &self,
        barber_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<SaleLine>> {
        debug!(barber_id = %barber_id, %start, %end, "Loading sale lines for period");

        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT l.id, l.sale_id, l.product_id, l.service_id,
                   l.quantity, l.unit_price, l.subtotal
            FROM sale_lines l
            JOIN sales s ON s.id = l.sale_id
            WHERE s.barber_id = ?1
              AND date(s.sold_at) BETWEEN ?2 AND ?3
            ORDER BY s.sold_at, l.id
            "#,
        )
        .bind(barber_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }
}

/// Generates a new sale ID.
pub fn generate_sale_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generates a new sale line ID.
pub fn generate_line_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
