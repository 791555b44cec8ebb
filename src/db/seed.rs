//! Deterministic synthetic data for the demo database.
//!
//! Every reseed runs the same fixed-seed RNG over the same pools, so the
//! dataset is byte-for-byte identical across resets. Row counts below are
//! relied on by the integration tests.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::AppError;

const RNG_SEED: u64 = 0x5eed_da7a;

pub const SEEDED_ADDRESSES: usize = 50;
pub const SEEDED_AGENTS: usize = 5;
pub const SEEDED_CUSTOMERS: usize = 45;
pub const SEEDED_PROSPECTS: usize = 20;

/// All generated dates are offsets from this anchor, not from the wall clock.
fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("static anchor date")
}

/// The four policy types, inserted verbatim on every reset.
pub const POLICY_TYPES: [(&str, &str, f64, f64); 4] = [
    ("Basic Health", "Basic health insurance coverage", 200.0, 100_000.0),
    ("Family Plan", "Health insurance for the whole family", 500.0, 500_000.0),
    ("Senior Care", "Comprehensive coverage for seniors", 350.0, 300_000.0),
    ("Student Health", "Affordable coverage for students", 150.0, 100_000.0),
];

const FIRST_NAMES: [&str; 20] = [
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Karen",
    "Carlos", "Nancy",
];

const LAST_NAMES: [&str; 20] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];

const STREETS: [&str; 10] = [
    "Maple Ave", "Oak St", "Cedar Ln", "Elm Dr", "Pine Rd", "Washington Blvd", "Lake View Ct",
    "Sunset Way", "Hillcrest Rd", "Riverside Dr",
];

const CITIES: [(&str, &str); 10] = [
    ("Springfield", "IL"),
    ("Austin", "TX"),
    ("Portland", "OR"),
    ("Columbus", "OH"),
    ("Denver", "CO"),
    ("Raleigh", "NC"),
    ("Tucson", "AZ"),
    ("Madison", "WI"),
    ("Tampa", "FL"),
    ("Boise", "ID"),
];

const CLAIM_DESCRIPTIONS: [&str; 8] = [
    "Emergency room visit after a fall",
    "Routine annual physical examination",
    "Outpatient surgery on the left knee",
    "Prescription medication reimbursement",
    "Physical therapy sessions following injury",
    "Diagnostic imaging for persistent back pain",
    "Urgent care visit for severe flu symptoms",
    "Specialist consultation for chronic condition",
];

const PROSPECT_SOURCES: [&str; 5] = ["Web", "Referral", "Advertisement", "Cold Call", "Email Campaign"];
const PROSPECT_STATUSES: [&str; 4] = ["New", "Contacted", "Converted", "Not Interested"];

const PROSPECT_NOTES: [&str; 4] = [
    "Asked for a quote comparison against their current provider.",
    "Interested in family coverage starting next quarter.",
    "Requested a follow-up call after the open enrollment period.",
    "Currently covered through an employer plan, reviewing options.",
];

/// Row counts produced by one seeding pass.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeedSummary {
    pub addresses: usize,
    pub agents: usize,
    pub customers: usize,
    pub policy_types: usize,
    pub policies: usize,
    pub claims: usize,
    pub prospects: usize,
}

/// Populate an empty schema with the synthetic dataset in one transaction.
pub async fn seed(pool: &SqlitePool) -> Result<SeedSummary, AppError> {
    let mut tx = pool.begin().await?;
    let mut rng = StdRng::seed_from_u64(RNG_SEED);

    for (name, description, base_premium, coverage_limit) in POLICY_TYPES {
        sqlx::query(
            "INSERT INTO policy_types (name, description, base_premium, coverage_limit)
             VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(base_premium)
        .bind(coverage_limit)
        .execute(&mut *tx)
        .await?;
    }

    for _ in 0..SEEDED_ADDRESSES {
        let (city, state) = CITIES[rng.gen_range(0..CITIES.len())];
        sqlx::query(
            "INSERT INTO addresses (street_address, city, state, zip_code, country)
             VALUES (?, ?, ?, ?, 'USA')",
        )
        .bind(format!(
            "{} {}",
            rng.gen_range(100..9999),
            STREETS[rng.gen_range(0..STREETS.len())]
        ))
        .bind(city)
        .bind(state)
        .bind(format!("{:05}", rng.gen_range(10000..99999)))
        .execute(&mut *tx)
        .await?;
    }

    // Agents take the first SEEDED_AGENTS addresses, customers the rest.
    for i in 0..SEEDED_AGENTS {
        let (first, last) = pick_name(&mut rng);
        sqlx::query(
            "INSERT INTO agents (first_name, last_name, email, phone, hire_date, address_id)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(first)
        .bind(last)
        .bind(email_for(first, last, i))
        .bind(phone(&mut rng))
        .bind(date_within(&mut rng, 5 * 365).to_string())
        .bind((i + 1) as i64)
        .execute(&mut *tx)
        .await?;
    }

    let mut policy_seq = 0usize;
    let mut claim_seq = 0usize;
    for i in 0..SEEDED_CUSTOMERS {
        let (first, last) = pick_name(&mut rng);
        let birth = anchor_date() - Duration::days(rng.gen_range(18 * 365..90 * 365));
        let customer_id = (i + 1) as i64;
        sqlx::query(
            "INSERT INTO customers
             (first_name, last_name, date_of_birth, email, phone, ssn, address_id)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(first)
        .bind(last)
        .bind(birth.to_string())
        .bind(email_for(first, last, SEEDED_AGENTS + i))
        .bind(phone(&mut rng))
        .bind(format!(
            "{:03}-{:02}-{:04}",
            rng.gen_range(100..900),
            rng.gen_range(10..99),
            rng.gen_range(1000..9999)
        ))
        .bind((SEEDED_AGENTS + i + 1) as i64)
        .execute(&mut *tx)
        .await?;

        for _ in 0..rng.gen_range(1..=3) {
            let type_idx = rng.gen_range(0..POLICY_TYPES.len());
            let (_, _, base_premium, coverage_limit) = POLICY_TYPES[type_idx];
            let start = date_within(&mut rng, 2 * 365);
            policy_seq += 1;
            sqlx::query(
                "INSERT INTO policies
                 (policy_number, customer_id, agent_id, type_id, start_date, end_date, premium, status)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(format!("POL-{:08}", 10_000_000 + policy_seq))
            .bind(customer_id)
            .bind(rng.gen_range(1..=SEEDED_AGENTS as i64))
            .bind((type_idx + 1) as i64)
            .bind(start.to_string())
            .bind((start + Duration::days(365)).to_string())
            .bind(base_premium * (0.8 + rng.r#gen::<f64>() * 0.4))
            .bind(weighted_policy_status(&mut rng))
            .execute(&mut *tx)
            .await?;

            if rng.r#gen::<f64>() > 0.7 {
                for _ in 0..rng.gen_range(1..=4) {
                    let claim_date = start + Duration::days(rng.gen_range(0..365));
                    let amount_claimed = rng.gen_range(100.0..coverage_limit * 0.1);
                    claim_seq += 1;
                    sqlx::query(
                        "INSERT INTO claims
                         (claim_number, policy_id, customer_id, claim_date, description,
                          amount_claimed, amount_paid, status)
                         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                    )
                    .bind(format!("CLM-{:08}", 20_000_000 + claim_seq))
                    .bind(policy_seq as i64)
                    .bind(customer_id)
                    .bind(claim_date.to_string())
                    .bind(CLAIM_DESCRIPTIONS[rng.gen_range(0..CLAIM_DESCRIPTIONS.len())])
                    .bind(amount_claimed)
                    .bind(amount_claimed * rng.gen_range(0.7..1.0))
                    .bind(weighted_claim_status(&mut rng))
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }
    }

    for i in 0..SEEDED_PROSPECTS {
        let (first, last) = pick_name(&mut rng);
        sqlx::query(
            "INSERT INTO prospects
             (first_name, last_name, email, phone, source, status, notes, created_date)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(first)
        .bind(last)
        .bind(email_for(first, last, SEEDED_AGENTS + SEEDED_CUSTOMERS + i))
        .bind(phone(&mut rng))
        .bind(PROSPECT_SOURCES[rng.gen_range(0..PROSPECT_SOURCES.len())])
        .bind(PROSPECT_STATUSES[rng.gen_range(0..PROSPECT_STATUSES.len())])
        .bind(PROSPECT_NOTES[rng.gen_range(0..PROSPECT_NOTES.len())])
        .bind(date_within(&mut rng, 365).to_string())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(SeedSummary {
        addresses: SEEDED_ADDRESSES,
        agents: SEEDED_AGENTS,
        customers: SEEDED_CUSTOMERS,
        policy_types: POLICY_TYPES.len(),
        policies: policy_seq,
        claims: claim_seq,
        prospects: SEEDED_PROSPECTS,
    })
}

fn pick_name(rng: &mut StdRng) -> (&'static str, &'static str) {
    (
        FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())],
        LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())],
    )
}

/// The suffix keeps addresses unique even when the name pools collide.
fn email_for(first: &str, last: &str, n: usize) -> String {
    format!(
        "{}.{}{}@example.com",
        first.to_lowercase(),
        last.to_lowercase(),
        n
    )
}

fn phone(rng: &mut StdRng) -> String {
    format!(
        "({:03}) {:03}-{:04}",
        rng.gen_range(200..999),
        rng.gen_range(200..999),
        rng.gen_range(1000..9999)
    )
}

fn date_within(rng: &mut StdRng, days_back: i64) -> NaiveDate {
    anchor_date() - Duration::days(rng.gen_range(0..days_back))
}

fn weighted_policy_status(rng: &mut StdRng) -> &'static str {
    match rng.gen_range(0..100) {
        0..=79 => "Active",
        80..=94 => "Expired",
        _ => "Cancelled",
    }
}

fn weighted_claim_status(rng: &mut StdRng) -> &'static str {
    match rng.gen_range(0..100) {
        0..=19 => "Pending",
        20..=49 => "Approved",
        50..=59 => "Denied",
        _ => "Paid",
    }
}
