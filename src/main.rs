// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fan Score Hub API Server
//!
//! Serves login, fan score and feedback endpoints for the dashboard
//! frontend. All data is held in memory for the life of the process.

use fanscore_hub::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        frontend_url = %config.frontend_url,
        "Starting Fan Score Hub API"
    );

    if config.twitter.is_none() {
        tracing::warn!("TWITTER_CLIENT_ID/TWITTER_CLIENT_SECRET not set, Twitter login disabled");
    }
    if config.demo_login_enabled {
        tracing::info!("Demo login enabled");
    }

    // Build shared state; the store lives as long as this process.
    let state = Arc::new(AppState::new(config.clone()));

    // Build router
    let app = fanscore_hub::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("fanscore_hub=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
