// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod busyness;
pub mod category;
pub mod occupancy;
pub mod stats;
pub mod visit;

pub use busyness::Busyness;
pub use category::{ExerciseCategory, Rgb, UnknownCategory};
pub use occupancy::{OccupancyBreakdown, OccupancyResponse, RingSegment};
pub use stats::{DailyCount, GymStats, HourlyCount, PersonalStats};
pub use visit::{DeviceId, Visit, VisitRecord};
