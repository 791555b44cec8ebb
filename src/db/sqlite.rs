use std::str::FromStr;

use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Executor, Pool, Row, Sqlite, Statement, TypeInfo, ValueRef};
use tracing::info;

use crate::db::models::TableResult;
use crate::db::schema::{SQLITE_INIT, TABLE_NAMES};
use crate::db::seed::{self, SeedSummary};
use crate::error::AppError;

pub type SqlitePool = Pool<Sqlite>;

/// Handle on the insurance database. Cloneable; all clones share one pool.
#[derive(Clone)]
pub struct InsuranceStore {
    pool: SqlitePool,
}

impl InsuranceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if missing) and return a store over a fresh pool.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// True when the schema is absent or the customers table is empty.
    pub async fn needs_seed(&self) -> Result<bool, AppError> {
        let (tables,): (i64,) = sqlx::query_as(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = 'customers'",
        )
        .fetch_one(&self.pool)
        .await?;
        if tables == 0 {
            return Ok(true);
        }
        let (customers,): (i64,) = sqlx::query_as("SELECT count(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(customers == 0)
    }

    /// Execute exactly one statement and collect its result set.
    ///
    /// The statement is prepared first so the column list is known even when
    /// zero rows come back. Any statement type is accepted; a failing one is
    /// reported with the engine's error text and the offending SQL.
    pub async fn execute(&self, sql: &str) -> Result<TableResult, AppError> {
        let mut conn = self.pool.acquire().await?;
        let statement = (&mut *conn).prepare(sql).await.map_err(|e| AppError::Query {
            sql: sql.to_string(),
            message: e.to_string(),
        })?;
        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let rows = statement
            .query()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| AppError::Query {
                sql: sql.to_string(),
                message: e.to_string(),
            })?;

        let rows = rows
            .iter()
            .map(|row| decode_row(row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TableResult { columns, rows })
    }

    /// Drop all known tables, recreate the schema and reinsert the seed set.
    pub async fn reset(&self) -> Result<SeedSummary, AppError> {
        for table in TABLE_NAMES {
            sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
                .execute(&self.pool)
                .await?;
        }
        self.init_schema().await?;
        let summary = seed::seed(&self.pool).await?;
        info!(
            customers = summary.customers,
            policies = summary.policies,
            claims = summary.claims,
            "database reset with sample data"
        );
        Ok(summary)
    }
}

fn decode_row(row: &SqliteRow) -> Result<Vec<Value>, AppError> {
    (0..row.len()).map(|idx| decode_cell(row, idx)).collect()
}

fn decode_cell(row: &SqliteRow, idx: usize) -> Result<Value, AppError> {
    let raw = row.try_get_raw(idx).map_err(AppError::Storage)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let value = match raw.type_info().name() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(idx)?),
        "REAL" => Value::from(row.try_get::<f64, _>(idx)?),
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get(idx)?;
            Value::String(bytes.iter().map(|b| format!("{b:02x}")).collect())
        }
        _ => Value::String(row.try_get::<String, _>(idx)?),
    };
    Ok(value)
}
