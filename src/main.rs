// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EcoTrack API Server
//!
//! Estimates and records carbon emissions from daily activities and
//! material waste.

use ecotrack::{config::Config, db::LogStore, services::PredictorClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting EcoTrack API");

    let store = LogStore::new();

    let predictor = config
        .predictor_url
        .as_deref()
        .map(|url| PredictorClient::new(url, config.predictor_timeout))
        .transpose()?;

    match &predictor {
        Some(client) => match client.health().await {
            Ok(()) => tracing::info!(url = client.base_url(), "Emission predictor reachable"),
            Err(e) => tracing::warn!(
                url = client.base_url(),
                error = %e,
                "Emission predictor not reachable; predictions will fail until it is"
            ),
        },
        None => tracing::info!("No emission predictor configured"),
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        predictor,
    });

    // Build router
    let app = ecotrack::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("ecotrack=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
