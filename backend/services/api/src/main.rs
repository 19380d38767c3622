mod error;
mod extractors;
mod people;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method},
    routing::get,
    Json, Router,
};
use persona_common::types::ServiceInfo;
use persona_config::{init_tracing, AppConfig};
use persona_db::person::pg_repository::PgPersonStore;
use persona_enrich::HttpEnricher;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::people::service::PersonService;

const SERVICE_NAME: &str = "persona-api";

#[derive(Clone)]
pub struct AppState {
    pub people: PersonService,
    pub info: ServiceInfo,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.info)
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::HeaderName::from_static(
            people::handlers::TOTAL_COUNT_HEADER,
        )]);

    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .merge(people::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_level);
    tracing::info!(service = SERVICE_NAME, "starting");

    let pool = persona_db::create_pool(&config.database_url, config.db_max_connections).await?;
    if config.run_migrations {
        persona_db::run_migrations(&pool).await?;
    }

    let enrich_on_rename = config.enrichment.enrich_on_rename;
    let enricher = HttpEnricher::new(config.enrichment.clone())?;
    let people = PersonService::new(Arc::new(PgPersonStore::new(pool)), Arc::new(enricher))
        .with_enrich_on_rename(enrich_on_rename);

    let state = AppState {
        people,
        info: ServiceInfo::new(SERVICE_NAME),
    };

    let app = build_router(state);
    let addr: SocketAddr = config.bind_addr().parse()?;

    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("stopped");
    Ok(())
}
