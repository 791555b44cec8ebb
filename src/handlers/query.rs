use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::db::schema::{CATALOG, SchemaCatalog};
use crate::db::seed::SeedSummary;
use crate::error::AppError;
use crate::router::AppState;
use crate::service::QueryReply;

/// The fixed example questions shown as shortcuts on the page.
pub const EXAMPLE_QUESTIONS: [&str; 5] = [
    "Show me all active policies with their customer names",
    "List all claims with amounts over $1000",
    "Find the top 5 customers by total premium paid",
    "Show the number of policies by type",
    "List all claims with customer and policy details",
];

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct ResetReply {
    pub status: &'static str,
    pub seeded: SeedSummary,
}

pub async fn query_handler(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Json<QueryReply> {
    if req.question.trim().is_empty() {
        return Json(QueryReply::Error {
            sql: None,
            message: "question must not be empty".to_string(),
        });
    }
    Json(state.orchestrator.answer(&req.question).await)
}

pub async fn examples_handler() -> Json<Vec<&'static str>> {
    Json(EXAMPLE_QUESTIONS.to_vec())
}

pub async fn schema_handler() -> Json<SchemaCatalog> {
    Json(CATALOG.clone())
}

pub async fn reset_handler(State(state): State<AppState>) -> Result<Json<ResetReply>, AppError> {
    let seeded = state.store.reset().await?;
    Ok(Json(ResetReply {
        status: "ok",
        seeded,
    }))
}
