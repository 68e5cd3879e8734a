use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use originguessr_common::Config;
use originguessr_scoring::{ScoringEngine, TimelineModel};

mod rest;

pub struct AppState {
    pub engine: ScoringEngine,
    pub config: Config,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // REST API
        .route("/api/timeline", get(rest::api_timeline))
        .route("/api/timeline/closest", get(rest::api_timeline_closest))
        .route("/api/game", get(rest::api_game))
        .route("/api/score", post(rest::api_score))
        .route("/api/summary", post(rest::api_summary))
        .route("/api/schema", get(rest::api_schema))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Scores are per-guess; never cache them
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("originguessr=info".parse()?))
        .init();

    let config = Config::from_env()?;
    config.log_summary();

    // Built once and shared read-only by every request
    let timeline = Arc::new(TimelineModel::build());
    info!(
        entries = timeline.len(),
        first = timeline.first(),
        last = timeline.last(),
        "Timeline ready"
    );

    let addr = format!("{}:{}", config.api_host, config.api_port);
    let state = Arc::new(AppState {
        engine: ScoringEngine::new(timeline),
        config,
    });
    let app = build_router(state);

    info!("Origin Guessr API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
