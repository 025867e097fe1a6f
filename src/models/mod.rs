// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod health_record;

pub use health_record::{
    compute_bmi, loose_number, HealthRecord, HealthRecordCandidate, NewHealthRecord,
};
