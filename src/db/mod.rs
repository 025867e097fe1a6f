// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::InMemoryStore;

use crate::error::AppError;
use crate::models::{loose_number, HealthRecord, HealthRecordCandidate, NewHealthRecord};
use async_trait::async_trait;
use serde_json::Value;

/// Collection names as constants.
pub mod collections {
    pub const HEALTH_DATA: &str = "user_health_data";
}

/// Storage for health records. Handlers receive one through `AppState`.
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Cast a submission to the collection schema, persist it, and return
    /// it with its store-assigned id.
    ///
    /// Fails with `AppError::Persistence` if a field cannot be cast, a
    /// required field is missing, or the write fails. Never retried.
    async fn create(&self, candidate: HealthRecordCandidate) -> Result<HealthRecord, AppError>;
}

/// Cast a submission to the health record schema.
///
/// Numeric fields accept numbers, numeric strings and booleans; blank
/// strings and null are stored as absent. `userId` accepts strings,
/// numbers and booleans and must end up non-empty. Every failing field
/// is reported in one error.
pub(crate) fn cast_record(candidate: HealthRecordCandidate) -> Result<NewHealthRecord, AppError> {
    let mut errors = Vec::new();

    let user_id = match cast_string(candidate.user_id.as_ref()) {
        Ok(Some(user_id)) if !user_id.is_empty() => user_id,
        Ok(_) => {
            errors.push("userId: Path `userId` is required".to_string());
            String::new()
        }
        Err(value) => {
            errors.push(format!("userId: Cast to String failed for value {}", value));
            String::new()
        }
    };

    let steps = cast_number_field("steps", candidate.steps.as_ref(), &mut errors);
    let weight = cast_number_field("weight", candidate.weight.as_ref(), &mut errors);
    let height = cast_number_field("height", candidate.height.as_ref(), &mut errors);
    let water_intake =
        cast_number_field("waterIntake", candidate.water_intake.as_ref(), &mut errors);

    if !errors.is_empty() {
        return Err(AppError::Persistence(format!(
            "HealthRecord validation failed: {}",
            errors.join(", ")
        )));
    }

    Ok(NewHealthRecord {
        user_id,
        date: candidate.date,
        steps,
        weight,
        height,
        bmi: candidate.bmi,
        water_intake,
    })
}

fn cast_number_field(field: &str, value: Option<&Value>, errors: &mut Vec<String>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => {
            let number = loose_number(Some(v));
            if number.is_nan() {
                errors.push(format!("{}: Cast to Number failed for value {}", field, v));
                None
            } else {
                Some(number)
            }
        }
    }
}

/// Scalars become strings; arrays and objects are returned as the error.
fn cast_string(value: Option<&Value>) -> Result<Option<String>, &Value> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Number(n)) => Ok(Some(match n.as_f64() {
            // 123.0 is written "123", as JavaScript would.
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
            _ => n.to_string(),
        })),
        Some(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(user_id: Value) -> HealthRecordCandidate {
        HealthRecordCandidate {
            user_id: Some(user_id),
            date: "2026-01-01T00:00:00.000Z".to_string(),
            bmi: f64::NAN,
            ..Default::default()
        }
    }

    fn persistence_message(result: Result<NewHealthRecord, AppError>) -> String {
        match result {
            Err(AppError::Persistence(msg)) => msg,
            other => panic!("expected persistence error, got {:?}", other),
        }
    }

    #[test]
    fn test_user_id_required() {
        assert_eq!(cast_record(candidate(json!("u1"))).unwrap().user_id, "u1");

        let msg = persistence_message(cast_record(HealthRecordCandidate::default()));
        assert!(msg.contains("userId"));
        let msg = persistence_message(cast_record(candidate(json!(""))));
        assert!(msg.contains("userId"));

        // Only emptiness is checked; whitespace is stored as given.
        assert_eq!(cast_record(candidate(json!(" u1 "))).unwrap().user_id, " u1 ");
    }

    #[test]
    fn test_scalar_user_ids_become_strings() {
        assert_eq!(cast_record(candidate(json!(123))).unwrap().user_id, "123");
        assert_eq!(cast_record(candidate(json!(123.0))).unwrap().user_id, "123");
        assert_eq!(cast_record(candidate(json!(1.5))).unwrap().user_id, "1.5");
        assert_eq!(cast_record(candidate(json!(true))).unwrap().user_id, "true");
    }

    #[test]
    fn test_structured_user_id_fails_cast() {
        let msg = persistence_message(cast_record(candidate(json!({ "id": 1 }))));
        assert!(msg.contains("Cast to String failed"));
        assert!(cast_record(candidate(json!(["u1"]))).is_err());
    }

    #[test]
    fn test_numeric_fields_cast() {
        let record = cast_record(HealthRecordCandidate {
            steps: Some(json!("1000")),
            weight: Some(json!(70)),
            height: Some(json!(" ")),
            water_intake: Some(json!(true)),
            ..candidate(json!("u1"))
        })
        .unwrap();

        assert_eq!(record.steps, Some(1000.0));
        assert_eq!(record.weight, Some(70.0));
        assert_eq!(record.height, None);
        assert_eq!(record.water_intake, Some(1.0));
    }

    #[test]
    fn test_uncastable_numbers_reported_together() {
        let msg = persistence_message(cast_record(HealthRecordCandidate {
            weight: Some(json!("seventy")),
            height: Some(json!({ "cm": 175 })),
            ..candidate(json!("u1"))
        }));

        assert!(msg.contains("weight: Cast to Number failed for value \"seventy\""));
        assert!(msg.contains("height: Cast to Number failed"));
    }

    #[test]
    fn test_non_finite_bmi_is_kept() {
        let record = cast_record(HealthRecordCandidate {
            bmi: f64::INFINITY,
            ..candidate(json!("u1"))
        })
        .unwrap();
        assert!(record.bmi.is_infinite());
    }
}
