use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::db::models::TableResult;
use crate::db::sqlite::InsuranceStore;
use crate::error::AppError;
use crate::translator::SqlTranslator;

/// Execution seam between the orchestrator and the database, so tests can
/// substitute a spy and assert it was never reached.
#[async_trait]
pub trait SqlGateway: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<TableResult, AppError>;
}

#[async_trait]
impl SqlGateway for InsuranceStore {
    async fn execute(&self, sql: &str) -> Result<TableResult, AppError> {
        InsuranceStore::execute(self, sql).await
    }
}

/// One user-facing answer. Failures are data here, not HTTP errors: the page
/// renders them inline next to whatever SQL was attempted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryReply {
    Ok {
        sql: String,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
        row_count: usize,
    },
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        sql: Option<String>,
        message: String,
    },
}

/// Wires the translator into the gateway: one best-effort attempt per
/// question, no retries, no partial results.
pub struct Orchestrator {
    translator: Arc<dyn SqlTranslator>,
    gateway: Arc<dyn SqlGateway>,
}

impl Orchestrator {
    pub fn new(translator: Arc<dyn SqlTranslator>, gateway: Arc<dyn SqlGateway>) -> Self {
        Self {
            translator,
            gateway,
        }
    }

    pub async fn answer(&self, question: &str) -> QueryReply {
        let sql = match self.translator.translate(question).await {
            Ok(sql) => sql,
            Err(e) => {
                warn!(error = %e, "translation failed");
                return QueryReply::Error {
                    sql: None,
                    message: format!("could not translate the question: {e}"),
                };
            }
        };

        if sql.trim().is_empty() {
            return QueryReply::Error {
                sql: None,
                message: "no SQL produced; try rephrasing the question".to_string(),
            };
        }

        match self.gateway.execute(&sql).await {
            Ok(result) => {
                info!(rows = result.row_count(), "query executed");
                QueryReply::Ok {
                    sql,
                    row_count: result.row_count(),
                    columns: result.columns,
                    rows: result.rows,
                }
            }
            // The raw engine message goes back verbatim so the user can see
            // exactly why the generated statement failed.
            Err(AppError::Query { sql, message }) => QueryReply::Error {
                sql: Some(sql),
                message,
            },
            Err(e) => QueryReply::Error {
                sql: Some(sql),
                message: e.to_string(),
            },
        }
    }
}
