//! 차트 API 서버.
//!
//! Axum 기반 HTTP 서버를 시작합니다.
//! `/get_chart`로 차트를 생성하고 `/health`로 상태를 확인합니다.

use std::sync::Arc;

use anyhow::Context;
use fxchart_api::{create_router, AppState, ChartService, ChartSettings};
use fxchart_core::{init_logging, AppConfig};
use fxchart_feed::HttpOhlcSource;
use fxchart_render::PlottersRenderer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load_default().context("Failed to load configuration")?;
    init_logging(&config.logging).map_err(|e| anyhow::anyhow!(e))?;

    let source = HttpOhlcSource::from_feed_config(&config.feed)
        .context("Failed to create data source")?;
    let renderer =
        PlottersRenderer::from_chart_config(&config.chart).context("Invalid chart size")?;
    let settings = ChartSettings::from_config(&config)?;

    info!(
        symbol = %config.feed.symbol,
        timeframe = %config.feed.timeframe,
        count = config.feed.count,
        palette = %config.chart.palette,
        "Chart pipeline configured"
    );

    let service = ChartService::new(Arc::new(source), Arc::new(renderer), settings);
    let state = Arc::new(AppState::new(service));

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Ctrl+C 또는 SIGTERM 시그널을 기다립니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
