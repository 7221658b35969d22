// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Device identity and visit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ExerciseCategory;

/// Self-assigned identifier for one app installation.
///
/// Serializes as the hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(Uuid);

impl DeviceId {
    /// Generate a fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for DeviceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A visit as returned by check-in and check-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub device_id: DeviceId,
    pub check_in_time: DateTime<Utc>,
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exercise_type: Option<ExerciseCategory>,
}

impl Visit {
    /// True until the visit has been checked out.
    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }
}

/// A row of the personal visit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: Uuid,
    pub check_in_time: DateTime<Utc>,
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exercise_type: Option<ExerciseCategory>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

impl VisitRecord {
    /// Human-readable duration: `"45m"`, `"1h 30m"`, or `"—"` while open.
    pub fn formatted_duration(&self) -> String {
        match self.duration_minutes {
            Some(mins) if mins > 0 => {
                if mins < 60 {
                    format!("{}m", mins)
                } else {
                    format!("{}h {}m", mins / 60, mins % 60)
                }
            }
            _ => "—".to_string(),
        }
    }
}
