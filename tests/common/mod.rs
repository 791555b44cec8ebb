#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use claimsight::db::models::TableResult;
use claimsight::db::sqlite::InsuranceStore;
use claimsight::error::AppError;
use claimsight::service::SqlGateway;
use claimsight::translator::SqlTranslator;

/// Open a store over a unique temp-file database with the schema applied.
pub async fn temp_store(tag: &str) -> (InsuranceStore, std::path::PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "claimsight-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", path.display());
    let store = InsuranceStore::connect(&database_url)
        .await
        .expect("failed to open temp database");
    store.init_schema().await.expect("failed to apply schema");
    (store, path)
}

/// Translator that always returns the same canned SQL.
pub struct StubTranslator {
    pub sql: String,
    pub calls: AtomicUsize,
}

impl StubTranslator {
    pub fn returning(sql: &str) -> Arc<Self> {
        Arc::new(Self {
            sql: sql.to_string(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SqlTranslator for StubTranslator {
    async fn translate(&self, _question: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.sql.clone())
    }
}

/// Translator that always fails, as if the upstream API were down.
pub struct FailingTranslator;

#[async_trait]
impl SqlTranslator for FailingTranslator {
    async fn translate(&self, _question: &str) -> Result<String, AppError> {
        Err(AppError::Translation("upstream unavailable".to_string()))
    }
}

/// Gateway that records calls and returns an empty result.
pub struct SpyGateway {
    pub calls: AtomicUsize,
}

impl SpyGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SqlGateway for SpyGateway {
    async fn execute(&self, _sql: &str) -> Result<TableResult, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TableResult {
            columns: vec![],
            rows: vec![],
        })
    }
}
