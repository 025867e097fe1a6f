// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health record model for storage and API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body-mass index from weight in kilograms and height in centimeters.
///
/// Inputs are not range-checked. A NaN input yields NaN and a zero
/// height yields an infinite result.
pub fn compute_bmi(weight: f64, height: f64) -> f64 {
    let height_m = height / 100.0;
    weight / (height_m * height_m)
}

/// Numeric value of a loosely typed JSON field, as JavaScript's `Number()`
/// would read it. Absent, null, non-numeric strings, arrays and objects
/// are NaN; booleans are 0 or 1; blank strings are 0.
pub fn loose_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_number_str(s),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => f64::NAN,
    }
}

fn parse_number_str(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    let unsigned = s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s);
    if unsigned == "Infinity" {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    // Rust also accepts "inf" and "nan" spellings; JavaScript does not.
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    s.parse().unwrap_or(f64::NAN)
}

/// A submission as received: field values are whatever JSON the client
/// sent. The store casts it to [`NewHealthRecord`] or rejects it.
#[derive(Debug, Clone, Default)]
pub struct HealthRecordCandidate {
    pub user_id: Option<Value>,
    /// Creation time (RFC3339)
    pub date: String,
    pub steps: Option<Value>,
    pub weight: Option<Value>,
    pub height: Option<Value>,
    /// Always derived from `weight` and `height`
    pub bmi: f64,
    pub water_intake: Option<Value>,
}

/// A health record that passed the store's casts, about to be written.
/// The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHealthRecord {
    pub user_id: String,
    pub date: String,
    pub steps: Option<f64>,
    /// Kilograms
    pub weight: Option<f64>,
    /// Centimeters
    pub height: Option<f64>,
    pub bmi: f64,
    pub water_intake: Option<f64>,
}

/// A persisted health record, as stored in Firestore and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    /// Store-generated document ID
    #[serde(alias = "_firestore_id")]
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub steps: Option<f64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub bmi: f64,
    pub water_intake: Option<f64>,
}

impl HealthRecord {
    /// Attach a store-assigned id to a cast record.
    pub fn from_new(id: String, record: NewHealthRecord) -> Self {
        Self {
            id,
            user_id: record.user_id,
            date: record.date,
            steps: record.steps,
            weight: record.weight,
            height: record.height,
            bmi: record.bmi,
            water_intake: record.water_intake,
        }
    }
}
