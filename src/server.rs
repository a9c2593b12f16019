//! HTTP Server
//!
//! This module implements the Prometheus exporter HTTP server.
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET <metrics_path>` (default `/metrics`) - Prometheus metrics in text format
//! - `GET /health` - Health check (200 if the UPS status can be read, 503 otherwise)
//!
//! # Metrics Collection
//!
//! There is no background loop. Each request to the metrics path gathers the
//! registry, which runs pwrstat once and translates its report. Gathering
//! blocks on the subprocess, so it runs on tokio's blocking pool.
//!
//! # Error Handling
//!
//! A failed status query is logged and the scrape is answered with `pwrstat_up 0`
//! and no UPS samples. The server keeps running.

use crate::config::Config;
use crate::metrics::MetricsCollector;
use crate::pwrstat::StatusSource;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    metrics: MetricsCollector,
    metrics_path: Arc<str>,
}

/// Bind the configured listen address and serve until the process exits
pub async fn start(config: Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Metrics server listening on {}", addr);
    info!(
        "Metrics available at http://{}{}",
        addr, config.server.metrics_path
    );

    serve(listener, config).await
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, config: Config) -> anyhow::Result<()> {
    let app = router(&config)?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the exporter's routes
pub fn router(config: &Config) -> anyhow::Result<Router> {
    config.validate()?;

    let source = StatusSource::from(&config.source);
    info!("Reading UPS status from {}", source.describe());

    let state = AppState {
        metrics: MetricsCollector::new(source)?,
        metrics_path: Arc::from(config.server.metrics_path.as_str()),
    };

    Ok(Router::new()
        .route("/", get(root_handler))
        .route(&config.server.metrics_path, get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state))
}

/// Landing page linking to the metrics path
pub fn landing_page(metrics_path: &str) -> String {
    format!(
        r#"<html>
<head><title>pwrstat Exporter</title></head>
<body>
<h1>pwrstat Prometheus Exporter</h1>
<p><a href="{}">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
        metrics_path
    )
}

async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Html(landing_page(&state.metrics_path))
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let metrics = state.metrics.clone();
    match tokio::task::spawn_blocking(move || metrics.render()).await {
        Ok(Ok(body)) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Ok(Err(e)) => {
            error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
        Err(e) => {
            error!("Metrics task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Metrics collection task failed".to_string(),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> Response {
    let ups = state.metrics.ups.clone();
    match tokio::task::spawn_blocking(move || ups.probe()).await {
        Ok(Ok(_)) => (StatusCode::OK, "OK".to_string()).into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response(),
        Err(e) => {
            error!("Health check task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Health check task failed".to_string(),
            )
                .into_response()
        }
    }
}
