//! Demo Gate - Main Application Entry Point
//!
//! A demo gate for a content-generation product. Visitors enter a demo code
//! from a fixed allow-list; each code gets a trial window (7 days by default)
//! starting at its first use. Active codes reach a sample content generator,
//! and the admin code reaches a table of all trials with reset, expire and
//! clear actions.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: one JSON file mapping demo code to trial record
//! - **Authentication**: demo code allow-list, Bearer header on the JSON API
//! - **Format**: HTML pages for browsers, JSON for the API
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the allow-list, trial policy and record store handle
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod store;
mod views;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!(
        trials_file = %config.trials_file,
        trial_days = config.trial_days,
        demo_codes = config.demo_code_count,
        "Configuration loaded"
    );

    let state = state::AppState::from_config(&config)?;
    let records = state.store.load().await.len();
    tracing::info!(records, "Trial store opened");

    let app = routes::router(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
