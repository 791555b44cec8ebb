use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::db::sqlite::InsuranceStore;
use crate::handlers::{
    examples_handler, index_handler, query_handler, reset_handler, schema_handler,
};
use crate::service::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub store: InsuranceStore,
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(store: InsuranceStore, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            store,
            orchestrator,
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/query", post(query_handler))
        .route("/api/examples", get(examples_handler))
        .route("/api/schema", get(schema_handler))
        .route("/api/reset", post(reset_handler))
        .with_state(state)
}
