//! # Seed Data Generator
//!
//! Populates the database with development data: a staff of barbers (one
//! commission policy each, covering all three kinds), a month of sales
//! with service and product lines, and a handful of pending adjustments.
//!
//! ## Usage
//! ```bash
//! # Seed with defaults
//! cargo run -p fade-db --bin seed
//!
//! # Custom sale volume and database path
//! cargo run -p fade-db --bin seed -- --sales 500 --db ./data/fade.db
//! ```

use std::env;

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use fade_core::{
    Adjustment, AdjustmentKind, Barber, CommissionPolicy, CommissionTerms, GoalBonus,
    Money, PaymentMethod, Rate, Sale, SaleLine,
};
use fade_db::{Database, DbConfig};

/// Barbers to create, each with a different policy shape.
const BARBERS: &[&str] = &[
    "Marcos Silva",
    "Ana Costa",
    "Bruno Dias",
    "Carla Mota",
    "Diego Ramos",
];

/// Services offered, with prices in cents.
const SERVICES: &[(&str, i64)] = &[
    ("svc-haircut", 4_500),
    ("svc-fade", 5_500),
    ("svc-beard-trim", 3_000),
    ("svc-shave", 3_500),
    ("svc-kids-cut", 3_000),
];

/// Retail products, with prices in cents.
const PRODUCTS: &[(&str, i64)] = &[
    ("prd-pomade", 2_500),
    ("prd-beard-oil", 3_200),
    ("prd-shampoo", 1_800),
    ("prd-clay", 2_800),
];

const PAYMENT_METHODS: &[PaymentMethod] = &[
    PaymentMethod::Cash,
    PaymentMethod::DebitCard,
    PaymentMethod::CreditCard,
    PaymentMethod::Pix,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut sale_count: usize = 200;
    let mut db_path = String::from("./fade_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--sales" | "-s" => {
                if i + 1 < args.len() {
                    sale_count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Fade Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --sales <N>    Number of sales to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./fade_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Fade Seed Data Generator");
    println!("========================");
    println!("Database: {}", db_path);
    println!("Sales:    {}", sale_count);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Skip seeding if staff already exists
    let existing = db.barbers().list_active().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} barbers", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();
    let month_start = now.date_naive().with_day(1).unwrap_or(now.date_naive());

    // Staff + policies
    let mut barber_ids = Vec::new();
    for (index, name) in BARBERS.iter().enumerate() {
        let barber = Barber {
            id: Uuid::new_v4().to_string(),
            display_name: name.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.barbers().insert(&barber).await?;

        let policy = generate_policy(&barber.id, index, month_start, now);
        db.policies().activate(&policy).await?;

        barber_ids.push(barber.id);
    }
    println!("✓ Created {} barbers with policies", barber_ids.len());

    // A month of sales
    let mut generated = 0;
    for seed in 0..sale_count {
        let barber_id = &barber_ids[seed % barber_ids.len()];
        let (sale, lines) = generate_sale(barber_id, month_start, seed);

        db.sales().insert_sale(&sale).await?;
        for line in &lines {
            db.sales().insert_line(line).await?;
        }
        generated += 1;

        if generated % 100 == 0 {
            println!("  Generated {} sales...", generated);
        }
    }
    println!("✓ Generated {} sales", generated);

    // A few pending adjustments per barber
    let mut adjustments = 0;
    for (index, barber_id) in barber_ids.iter().enumerate() {
        for adj in generate_adjustments(barber_id, month_start, index) {
            db.adjustments().insert(&adj).await?;
            adjustments += 1;
        }
    }
    println!("✓ Created {} pending adjustments", adjustments);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// One policy per barber, cycling through the three kinds.
fn generate_policy(
    barber_id: &str,
    index: usize,
    effective_from: NaiveDate,
    now: chrono::DateTime<Utc>,
) -> CommissionPolicy {
    let terms = match index % 3 {
        0 => CommissionTerms::Percentage {
            service_rate: Rate::from_bps(5000),
            product_rate: Rate::from_bps(3000),
        },
        1 => CommissionTerms::ChairRent {
            rent: Money::from_cents(30_000 + (index as i64) * 5_000),
            product_rate: Rate::from_bps(3000),
        },
        _ => CommissionTerms::FixedMonthly {
            amount: Money::from_cents(250_000),
            product_rate: Rate::from_bps(1000),
        },
    };

    // Every other barber gets a revenue goal
    let goal = (index % 2 == 0).then_some(GoalBonus {
        target: Money::from_cents(500_000),
        rate: Rate::from_bps(500),
    });

    CommissionPolicy {
        id: Uuid::new_v4().to_string(),
        barber_id: barber_id.to_string(),
        terms,
        goal,
        effective_from,
        effective_to: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Generates a sale with 1-3 lines, deterministic from the seed index.
fn generate_sale(barber_id: &str, month_start: NaiveDate, seed: usize) -> (Sale, Vec<SaleLine>) {
    let sale_id = Uuid::new_v4().to_string();

    let day_offset = (seed * 7) % 28;
    let hour = 9 + (seed * 3) % 9;
    let date = month_start + Duration::days(day_offset as i64);
    let sold_at = Utc
        .with_ymd_and_hms(date.year(), date.month(), date.day(), hour as u32, 15, 0)
        .unwrap();

    let mut lines = Vec::new();
    let mut total = Money::zero();

    // Every sale has a service line
    let (service_id, price) = SERVICES[seed % SERVICES.len()];
    let service_line = SaleLine {
        id: Uuid::new_v4().to_string(),
        sale_id: sale_id.clone(),
        product_id: None,
        service_id: Some(service_id.to_string()),
        quantity: 1,
        unit_price: Money::from_cents(price),
        subtotal: Money::from_cents(price),
    };
    total += service_line.subtotal;
    lines.push(service_line);

    // Roughly a third also buy a product
    if seed % 3 == 0 {
        let (product_id, price) = PRODUCTS[seed % PRODUCTS.len()];
        let quantity = 1 + (seed % 2) as i64;
        let product_line = SaleLine {
            id: Uuid::new_v4().to_string(),
            sale_id: sale_id.clone(),
            product_id: Some(product_id.to_string()),
            service_id: None,
            quantity,
            unit_price: Money::from_cents(price),
            subtotal: Money::from_cents(price * quantity),
        };
        total += product_line.subtotal;
        lines.push(product_line);
    }

    let sale = Sale {
        id: sale_id,
        client_id: None,
        barber_id: Some(barber_id.to_string()),
        total,
        payment_method: PAYMENT_METHODS[seed % PAYMENT_METHODS.len()],
        notes: None,
        sold_at,
    };

    (sale, lines)
}

/// A couple of pending ledger entries per barber.
fn generate_adjustments(
    barber_id: &str,
    month_start: NaiveDate,
    index: usize,
) -> Vec<Adjustment> {
    let now = Utc::now();
    let kinds = [
        (AdjustmentKind::Advance, 20_000, "mid-month advance"),
        (AdjustmentKind::Fine, 5_000, "late opening"),
        (AdjustmentKind::Discount, 3_500, "product damage"),
        (AdjustmentKind::Bonus, 10_000, "covered extra shift"),
    ];

    kinds
        .iter()
        .take(1 + index % 3)
        .enumerate()
        .map(|(offset, (kind, cents, description))| Adjustment {
            id: Uuid::new_v4().to_string(),
            barber_id: barber_id.to_string(),
            calculation_id: None,
            kind: *kind,
            description: description.to_string(),
            amount: Money::from_cents(*cents),
            effective_date: month_start + Duration::days((3 + offset * 5) as i64),
            applied: false,
            created_by: None,
            created_at: now,
        })
        .collect()
}
