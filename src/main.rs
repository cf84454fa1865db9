//! Thyroid Screening Service - Main Entry Point
//!
//! Loads the trained model, builds the screening engine, and serves the
//! intake form and screening API over HTTP.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use thyroid_screening_service::{
    config::AppConfig,
    metrics::{MetricsReporter, ScreeningMetrics},
    model::inference::ScreeningEngine,
    model::loader::ModelArtifact,
    server::{router, AppState},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so logging can honor the configured level
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                format!("thyroid_screening_service={}", config.logging.level).parse()?,
            ),
        )
        .init();

    info!("Starting Thyroid Screening Service");
    info!("Configuration loaded successfully");

    // Load the trained model and build the engine
    let artifact = ModelArtifact::load(&config.model.path)
        .context("Cannot start without a trained model artifact")?;
    let engine = Arc::new(ScreeningEngine::from_artifact(artifact)?);
    info!(
        "Screening engine initialized ({} features)",
        engine.feature_count()
    );

    // Initialize metrics and the periodic reporter
    let metrics = Arc::new(ScreeningMetrics::new());
    if config.model.report_interval_secs > 0 {
        let reporter = MetricsReporter::new(metrics.clone(), config.model.report_interval_secs);
        tokio::spawn(async move {
            reporter.start().await;
        });
    }

    let state = AppState {
        engine,
        metrics: metrics.clone(),
        frontend_dir: Arc::new(PathBuf::from(&config.server.frontend_dir)),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server is running on {addr}");

    axum::serve(listener, router(state)).await?;

    info!("Service shutting down...");
    metrics.print_summary();

    Ok(())
}
