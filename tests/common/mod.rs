// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use health_data_api::config::Config;
use health_data_api::db::{FirestoreDb, HealthStore, InMemoryStore};
use health_data_api::error::AppError;
use health_data_api::models::{HealthRecord, HealthRecordCandidate};
use health_data_api::routes::create_router;
use health_data_api::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Store whose writes always fail with the given error.
#[allow(dead_code)]
pub struct FailingStore(pub fn() -> AppError);

#[async_trait]
impl HealthStore for FailingStore {
    async fn create(&self, _candidate: HealthRecordCandidate) -> Result<HealthRecord, AppError> {
        Err((self.0)())
    }
}

/// Create a test app backed by the given store.
#[allow(dead_code)]
pub fn create_app_with_store(config: Config, store: Arc<dyn HealthStore>) -> axum::Router {
    create_router(Arc::new(AppState { config, store }))
}

/// Create a test app with an in-memory store.
/// Returns the router and the store so tests can inspect what was written.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, InMemoryStore) {
    let store = InMemoryStore::new();
    let app = create_app_with_store(Config::test_default(), Arc::new(store.clone()));
    (app, store)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
