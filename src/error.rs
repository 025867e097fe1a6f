// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body is not a well-formed health data submission.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The database could not be reached.
    #[error("Database connection error: {0}")]
    Connection(String),

    /// A single write was rejected or failed.
    #[error("Database write error: {0}")]
    Persistence(String),
}

impl AppError {
    /// HTTP status for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    message: &'static str,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, error) = match &self {
            AppError::Validation(msg) => ("Invalid health data", msg.clone()),
            AppError::Connection(msg) => {
                tracing::error!(error = %msg, "Database unavailable");
                ("Database unavailable", msg.clone())
            }
            AppError::Persistence(msg) => {
                tracing::error!(error = %msg, "Failed to save health data");
                ("Error saving data", msg.clone())
            }
        };

        (status, Json(ErrorResponse { message, error })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
