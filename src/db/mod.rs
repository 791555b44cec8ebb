//! Database module: schema, seed data and the SQLite gateway.
//!
//! Layout:
//! - `schema.rs`: SQL DDL plus the catalog embedded in model prompts
//! - `seed.rs`: deterministic synthetic dataset inserted by `reset`
//! - `models.rs`: result shapes returned to callers
//! - `sqlite.rs`: pool-backed store executing arbitrary statements

pub mod models;
pub mod schema;
pub mod seed;
pub mod sqlite;

pub use models::TableResult;
pub use schema::{CATALOG, SQLITE_INIT};
pub use seed::SeedSummary;
pub use sqlite::{InsuranceStore, SqlitePool};
