// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory health record store for tests and offline runs.

use crate::db::{cast_record, HealthStore};
use crate::error::AppError;
use crate::models::{HealthRecord, HealthRecordCandidate};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Stores records in insertion order. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Arc<Mutex<Vec<HealthRecord>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record.
    pub fn records(&self) -> Result<Vec<HealthRecord>, AppError> {
        let records = self
            .records
            .lock()
            .map_err(|e| AppError::Persistence(e.to_string()))?;
        Ok(records.clone())
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.records()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl HealthStore for InMemoryStore {
    async fn create(&self, candidate: HealthRecordCandidate) -> Result<HealthRecord, AppError> {
        let record = cast_record(candidate)?;
        let id = format!("mem-{:020}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let saved = HealthRecord::from_new(id, record);

        self.records
            .lock()
            .map_err(|e| AppError::Persistence(e.to_string()))?
            .push(saved.clone());

        Ok(saved)
    }
}
