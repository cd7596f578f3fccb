//! # Domain Types
//!
//! Core domain records used throughout Fade.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Records                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Barber      │   │      Sale       │   │   Calculation   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  display_name   │   │  barber_id?     │   │  barber_id      │       │
//! │  │  is_active      │   │  total          │   │  period range   │       │
//! │  │                 │   │  SaleLine[]     │   │  derived money  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Barber is the aggregation root for Policy, Calculation, Adjustment.   │
//! │  Sale and SaleLine are owned by the external sales workflow; this      │
//! │  engine only reads them (and checks their structure on the way in).    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Barber
// =============================================================================

/// A barber on staff.
///
/// Created/edited by the external entity CRUD; the engine consumes identity
/// and the active flag. Deactivation never deletes historical financial
/// records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Barber {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on reports and payout listings.
    pub display_name: String,

    /// Whether the barber currently works here (soft delete).
    pub is_active: bool,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Debit card on the terminal.
    DebitCard,
    /// Credit card on the terminal.
    CreditCard,
    /// Instant bank transfer.
    Pix,
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale, as recorded by the external sales workflow.
///
/// Immutable in this engine's view. The barber reference is optional because
/// walk-in product sales are rung up without one; such sales never reach the
/// aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub client_id: Option<String>,
    pub barber_id: Option<String>,
    /// Sale total as recorded at the register.
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    /// When the sale was rung up. Its calendar date decides period
    /// membership.
    pub sold_at: DateTime<Utc>,
}

// =============================================================================
// Sale Line
// =============================================================================

/// A line item in a sale.
///
/// Exactly one of `product_id` / `service_id` is set - a line sells either
/// shelf stock or chair time, never both. The stored subtotal must equal
/// quantity × unit price; both invariants are owned by the sales workflow
/// and re-checked here on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    pub id: String,
    pub sale_id: String,
    pub product_id: Option<String>,
    pub service_id: Option<String>,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
    /// Line subtotal (quantity × unit price, frozen).
    pub subtotal: Money,
}

/// Which revenue bucket a sale line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueClass {
    Service,
    Product,
}

impl SaleLine {
    /// Classifies the line as service or product revenue, surfacing the
    /// structural invariants as integrity errors.
    pub fn revenue_class(&self) -> CoreResult<RevenueClass> {
        match (&self.service_id, &self.product_id) {
            (Some(_), None) => Ok(RevenueClass::Service),
            (None, Some(_)) => Ok(RevenueClass::Product),
            (Some(_), Some(_)) => Err(CoreError::LineDoubleTarget {
                line_id: self.id.clone(),
            }),
            (None, None) => Err(CoreError::LineWithoutTarget {
                line_id: self.id.clone(),
            }),
        }
    }

    /// Checks the subtotal invariant (subtotal = quantity × unit price).
    pub fn check_subtotal(&self) -> CoreResult<()> {
        let expected = self.unit_price.multiply_quantity(self.quantity);
        if self.subtotal != expected {
            return Err(CoreError::SubtotalMismatch {
                line_id: self.id.clone(),
                quantity: self.quantity,
                unit_price: self.unit_price,
                stored: self.subtotal,
                expected,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Revenue Totals
// =============================================================================

/// Aggregated revenue for one barber over one period.
///
/// The zero value is meaningful: a barber with no sales in range settles at
/// zero revenue, it is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevenueTotals {
    /// Summed subtotals of service lines.
    pub services: Money,

    /// Summed subtotals of product lines.
    pub products: Money,

    /// Number of distinct sales the lines came from.
    pub sale_count: i64,
}

impl RevenueTotals {
    /// Folds sale lines into service/product totals.
    ///
    /// ## Integrity
    /// The first malformed line (no target, double target, or subtotal
    /// mismatch) aborts the whole fold. Partial totals are never returned:
    /// a settlement over half-read sales would silently underpay.
    ///
    /// ## Example
    /// ```rust
    /// use fade_core::types::RevenueTotals;
    ///
    /// let totals = RevenueTotals::from_lines(&[]).unwrap();
    /// assert!(totals.services.is_zero());
    /// assert_eq!(totals.sale_count, 0);
    /// ```
    pub fn from_lines(lines: &[SaleLine]) -> CoreResult<Self> {
        let mut services = Money::zero();
        let mut products = Money::zero();
        let mut sale_ids: HashSet<&str> = HashSet::new();

        for line in lines {
            line.check_subtotal()?;
            match line.revenue_class()? {
                RevenueClass::Service => services += line.subtotal,
                RevenueClass::Product => products += line.subtotal,
            }
            sale_ids.insert(line.sale_id.as_str());
        }

        Ok(RevenueTotals {
            services,
            products,
            sale_count: sale_ids.len() as i64,
        })
    }

    /// Combined service + product revenue.
    #[inline]
    pub fn total(&self) -> Money {
        self.services + self.products
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// The persisted settlement record for one barber and one period.
///
/// Unique per (barber_id, period_start, period_end). While `paid` is false
/// the derived fields are overwritten by every recalculation (last write
/// wins); once `paid` flips to true the record is immutable forever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Calculation {
    pub id: String,
    pub barber_id: String,

    /// First day of the settled period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the settled period (inclusive).
    pub period_end: NaiveDate,

    /// Service + product revenue in the period.
    pub total_revenue: Money,
    pub service_revenue: Money,
    pub product_revenue: Money,
    /// Distinct sales aggregated into the revenue figures.
    pub sale_count: i64,

    /// Commission on service revenue (policy-dependent).
    pub commission_services: Money,
    /// Commission on product revenue.
    pub commission_products: Money,
    /// Chair rent withheld (zero for non-rent policies).
    pub rent_deducted: Money,
    /// Goal bonus earned (zero when no goal or goal missed).
    pub bonus: Money,
    /// commission_services + commission_products + bonus - rent_deducted.
    pub gross_payable: Money,

    /// Net manual adjustments for the period (may be negative).
    pub adjustment_total: Money,
    /// gross_payable - adjustment_total; the amount actually disbursed.
    pub net_payable: Money,

    /// Terminal flag; flipping it locks the record and its adjustments.
    pub paid: bool,
    /// Date the payout happened (set by mark-paid).
    pub paid_on: Option<NaiveDate>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(
        id: &str,
        sale_id: &str,
        service: Option<&str>,
        product: Option<&str>,
        qty: i64,
        unit_cents: i64,
    ) -> SaleLine {
        SaleLine {
            id: id.to_string(),
            sale_id: sale_id.to_string(),
            product_id: product.map(String::from),
            service_id: service.map(String::from),
            quantity: qty,
            unit_price: Money::from_cents(unit_cents),
            subtotal: Money::from_cents(unit_cents * qty),
        }
    }

    #[test]
    fn test_revenue_class() {
        let service = line("l1", "s1", Some("svc-cut"), None, 1, 4500);
        assert_eq!(service.revenue_class().unwrap(), RevenueClass::Service);

        let product = line("l2", "s1", None, Some("prd-pomade"), 2, 2500);
        assert_eq!(product.revenue_class().unwrap(), RevenueClass::Product);
    }

    #[test]
    fn test_revenue_class_rejects_malformed_lines() {
        let orphan = line("l1", "s1", None, None, 1, 4500);
        assert!(matches!(
            orphan.revenue_class(),
            Err(CoreError::LineWithoutTarget { .. })
        ));

        let double = line("l2", "s1", Some("svc"), Some("prd"), 1, 4500);
        assert!(matches!(
            double.revenue_class(),
            Err(CoreError::LineDoubleTarget { .. })
        ));
    }

    #[test]
    fn test_check_subtotal() {
        let good = line("l1", "s1", Some("svc"), None, 3, 4500);
        assert!(good.check_subtotal().is_ok());

        let mut bad = line("l2", "s1", Some("svc"), None, 3, 4500);
        bad.subtotal = Money::from_cents(100);
        assert!(matches!(
            bad.check_subtotal(),
            Err(CoreError::SubtotalMismatch { .. })
        ));
    }

    #[test]
    fn test_from_lines_sums_by_class() {
        let lines = vec![
            line("l1", "sale-a", Some("svc-cut"), None, 1, 45_00),
            line("l2", "sale-a", None, Some("prd-pomade"), 2, 25_00),
            line("l3", "sale-b", Some("svc-beard"), None, 1, 30_00),
        ];

        let totals = RevenueTotals::from_lines(&lines).unwrap();
        assert_eq!(totals.services, Money::from_cents(75_00));
        assert_eq!(totals.products, Money::from_cents(50_00));
        assert_eq!(totals.total(), Money::from_cents(125_00));
        assert_eq!(totals.sale_count, 2); // two distinct sales
    }

    #[test]
    fn test_from_lines_empty_is_zero_not_error() {
        let totals = RevenueTotals::from_lines(&[]).unwrap();
        assert_eq!(totals, RevenueTotals::default());
    }

    #[test]
    fn test_from_lines_aborts_on_first_bad_line() {
        let lines = vec![
            line("l1", "sale-a", Some("svc-cut"), None, 1, 45_00),
            line("l2", "sale-a", None, None, 1, 10_00), // malformed
            line("l3", "sale-b", Some("svc-beard"), None, 1, 30_00),
        ];
        assert!(RevenueTotals::from_lines(&lines).is_err());
    }
}
