// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! One client is created at startup, verified with a lookup, and shared
//! by all requests. Health records are inserted with Firestore-generated
//! document IDs.

use crate::db::{cast_record, collections, HealthStore};
use crate::error::AppError;
use crate::models::{HealthRecord, HealthRecordCandidate, NewHealthRecord};
use async_trait::async_trait;
use std::time::Duration;

/// Document looked up at startup to prove the database answers.
const CONNECTION_CHECK_DOC_ID: &str = "__connection_check__";
const CONNECTION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Connect to Firestore and verify the database is reachable.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        let db = if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            Self::create_emulator_client(project_id).await?
        } else {
            let client = firestore::FirestoreDb::new(project_id).await.map_err(|e| {
                AppError::Connection(format!("Failed to connect to Firestore: {}", e))
            })?;
            Self { client }
        };

        db.check_connection().await?;
        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(db)
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Connection(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Look up a sentinel document. Creating the client alone does not
    /// prove the server is reachable.
    async fn check_connection(&self) -> Result<(), AppError> {
        let lookup = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::HEALTH_DATA)
            .one(CONNECTION_CHECK_DOC_ID);

        match tokio::time::timeout(CONNECTION_CHECK_TIMEOUT, lookup).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(AppError::Connection(format!(
                "Firestore connection check failed: {}",
                e
            ))),
            Err(_) => Err(AppError::Connection(format!(
                "Firestore did not respond within {}s",
                CONNECTION_CHECK_TIMEOUT.as_secs()
            ))),
        }
    }

    // ─── Health Record Operations ────────────────────────────────

    /// Insert a health record under a generated document ID.
    pub async fn insert_health_record(
        &self,
        record: &NewHealthRecord,
    ) -> Result<HealthRecord, AppError> {
        self.client
            .fluent()
            .insert()
            .into(collections::HEALTH_DATA)
            .generate_document_id()
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Persistence(e.to_string()))
    }
}

#[async_trait]
impl HealthStore for FirestoreDb {
    async fn create(&self, candidate: HealthRecordCandidate) -> Result<HealthRecord, AppError> {
        let record = cast_record(candidate)?;
        self.insert_health_record(&record).await
    }
}
