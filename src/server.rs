// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process startup: configuration, database connection, then listener.
//!
//! Each step must succeed before the next runs, so a missing config or an
//! unreachable database never binds the port.

use crate::config::{Config, ConfigError};
use crate::db::{FirestoreDb, HealthStore};
use crate::error::AppError;
use crate::routes::create_router;
use crate::AppState;
use std::sync::Arc;

/// Startup and serve errors. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(AppError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Load config from the environment, connect to Firestore, and serve.
pub async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Health Data API");

    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .map_err(StartupError::Database)?;

    serve(config, Arc::new(db)).await
}

/// Bind `0.0.0.0:{port}` and serve the router until the server stops.
pub async fn serve(config: Config, store: Arc<dyn HealthStore>) -> Result<(), StartupError> {
    let addr = format!("0.0.0.0:{}", config.port);

    let state = Arc::new(AppState { config, store });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .await
        .map_err(StartupError::Serve)
}
