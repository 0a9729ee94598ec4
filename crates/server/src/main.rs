use std::{net::SocketAddr, sync::Arc};

use alerts::AlertsView;
use anyhow::Context;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use events_client::{ApiConfig, EventsClient};
use shared::error::{ApiError, ErrorCode};
use tracing::info;

mod app_state;
mod cache;
mod config;

use app_state::AppState;
use cache::AlertsCache;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let client = EventsClient::new(ApiConfig::new(settings.api_url.as_str()));
    info!(api_url = client.config().base_url(), "using events api");

    let alerts = AlertsCache::new(
        Arc::new(client),
        settings.cache_ttl(),
        settings.upstream_timeout(),
    );
    let app = build_router(AppState {
        alerts: Arc::new(alerts),
    });

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "site listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/alerts", get(http_alerts))
        .fallback(not_found)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_alerts(State(state): State<AppState>) -> impl IntoResponse {
    let view = state.alerts.current().await;
    let cache_control = format!("public, max-age={}", state.alerts.ttl().as_secs());
    (
        [(header::CACHE_CONTROL, cache_control)],
        Json(AlertsView::clone(&view)),
    )
}

async fn not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, "no such route")),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
