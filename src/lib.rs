// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health Data API: accepts user health metrics, derives body-mass index,
//! and persists each submission as a document in Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;
pub mod time_utils;

use config::Config;
use db::HealthStore;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn HealthStore>,
}
