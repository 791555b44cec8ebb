use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use claimsight::config::Config;
use claimsight::db::schema::CATALOG;
use claimsight::db::sqlite::InsuranceStore;
use claimsight::router::{AppState, app_router};
use claimsight::service::{Orchestrator, SqlGateway};
use claimsight::translator::GeminiTranslator;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Missing GEMINI_API_KEY is the one fatal startup condition.
    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        gemini_model = %cfg.gemini_model,
        loglevel = %cfg.loglevel,
    );

    let store = InsuranceStore::connect(&cfg.database_url).await?;
    if store.needs_seed().await? {
        info!("initializing database with sample data");
        store.reset().await?;
    }

    let client = reqwest::Client::new();
    let translator = GeminiTranslator::new(client, &cfg, &CATALOG)?;
    let orchestrator = Orchestrator::new(
        Arc::new(translator),
        Arc::new(store.clone()) as Arc<dyn SqlGateway>,
    );

    let state = AppState::new(store, Arc::new(orchestrator));
    let app = app_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
