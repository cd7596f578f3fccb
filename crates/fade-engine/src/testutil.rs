//! Shared fixtures for engine tests: an in-memory database plus builders
//! for the records the settlement paths consume.

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use fade_core::{
    Barber, CommissionPolicy, CommissionTerms, GoalBonus, Money, PaymentMethod, Period,
    Rate, Sale, SaleLine,
};
use fade_db::{Database, DbConfig};

/// March 2026, the period most tests settle.
pub(crate) fn march() -> Period {
    Period::new(
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
    )
    .unwrap()
}

/// Fresh in-memory database with one active barber.
pub(crate) async fn db_with_barber() -> (Database, String) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let barber_id = insert_barber(&db, "Marcos Silva").await;
    (db, barber_id)
}

/// Inserts an active barber and returns its id.
pub(crate) async fn insert_barber(db: &Database, name: &str) -> String {
    let now = Utc::now();
    let barber = Barber {
        id: Uuid::new_v4().to_string(),
        display_name: name.to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.barbers().insert(&barber).await.unwrap();
    barber.id
}

/// Activates a policy with the given terms (and optional goal) effective
/// from the start of 2026.
pub(crate) async fn activate_policy(
    db: &Database,
    barber_id: &str,
    terms: CommissionTerms,
    goal: Option<GoalBonus>,
) -> CommissionPolicy {
    let now = Utc::now();
    let policy = CommissionPolicy {
        id: Uuid::new_v4().to_string(),
        barber_id: barber_id.to_string(),
        terms,
        goal,
        effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        effective_to: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.policies().activate(&policy).await.unwrap();
    policy
}

/// The shop's default split: 50% on services, 30% on products, no goal.
pub(crate) async fn percentage_policy(db: &Database, barber_id: &str) -> CommissionPolicy {
    activate_policy(
        db,
        barber_id,
        CommissionTerms::Percentage {
            service_rate: Rate::from_bps(5000),
            product_rate: Rate::from_bps(3000),
        },
        None,
    )
    .await
}

/// Inserts a sale on the given March day with the given lines, each
/// `(service_id, product_id, quantity, unit_price_cents)`; subtotals are
/// consistent by construction.
pub(crate) async fn sale_with_lines(
    db: &Database,
    barber_id: &str,
    march_day: u32,
    lines: &[(Option<&str>, Option<&str>, i64, i64)],
) -> String {
    let sale_id = Uuid::new_v4().to_string();
    let mut total = Money::zero();
    let mut rows = Vec::new();

    for &(service_id, product_id, quantity, unit_cents) in lines {
        let subtotal = Money::from_cents(unit_cents * quantity);
        total += subtotal;
        rows.push(SaleLine {
            id: Uuid::new_v4().to_string(),
            sale_id: sale_id.clone(),
            product_id: product_id.map(String::from),
            service_id: service_id.map(String::from),
            quantity,
            unit_price: Money::from_cents(unit_cents),
            subtotal,
        });
    }

    let sale = Sale {
        id: sale_id.clone(),
        client_id: None,
        barber_id: Some(barber_id.to_string()),
        total,
        payment_method: PaymentMethod::Cash,
        notes: None,
        sold_at: Utc.with_ymd_and_hms(2026, 3, march_day, 14, 0, 0).unwrap(),
    };

    db.sales().insert_sale(&sale).await.unwrap();
    for row in &rows {
        db.sales().insert_line(row).await.unwrap();
    }

    sale_id
}
