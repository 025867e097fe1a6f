// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health data ingest route.

use crate::error::{AppError, Result};
use crate::models::{compute_bmi, loose_number, HealthRecord, HealthRecordCandidate};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const SAVED_MESSAGE: &str = "Health data saved successfully!";

/// Health data routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/saveHealthData", post(save_health_data))
}

/// Submitted health metrics. Field values are untyped here; the store
/// casts them. Unknown fields, including any `bmi`, are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveHealthDataRequest {
    pub user_id: Option<Value>,
    pub steps: Option<Value>,
    pub weight: Option<Value>,
    pub height: Option<Value>,
    pub water_intake: Option<Value>,
}

impl SaveHealthDataRequest {
    /// Build the record to store, deriving BMI and stamping the creation time.
    fn into_record(self) -> HealthRecordCandidate {
        HealthRecordCandidate {
            bmi: compute_bmi(
                loose_number(self.weight.as_ref()),
                loose_number(self.height.as_ref()),
            ),
            user_id: self.user_id,
            date: format_utc_rfc3339(chrono::Utc::now()),
            steps: self.steps,
            weight: self.weight,
            height: self.height,
            water_intake: self.water_intake,
        }
    }
}

#[derive(Serialize)]
pub struct SaveHealthDataResponse {
    pub message: String,
    pub data: HealthRecord,
}

/// Save one health data submission.
async fn save_health_data(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SaveHealthDataRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveHealthDataResponse>)> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected health data payload");
        AppError::Validation(rejection.body_text())
    })?;

    let record = payload.into_record();
    let saved = state.store.create(record).await?;

    tracing::info!(
        id = %saved.id,
        user_id = %saved.user_id,
        "Health data saved"
    );

    Ok((
        StatusCode::CREATED,
        Json(SaveHealthDataResponse {
            message: SAVED_MESSAGE.to_string(),
            data: saved,
        }),
    ))
}
