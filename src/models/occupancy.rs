// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Occupancy counts and the ring segments derived from them.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::ExerciseCategory;

/// Segments narrower than this fraction get no abbreviation label.
pub const LABEL_MIN_FRACTION: f64 = 0.07;

/// Per-category head count.
///
/// Missing categories decode as zero and unknown keys are ignored, so the
/// server can add categories without breaking older clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OccupancyBreakdown {
    pub chest: u32,
    pub back: u32,
    pub legs: u32,
    pub arms: u32,
    pub cardio: u32,
}

impl OccupancyBreakdown {
    pub fn count(&self, category: ExerciseCategory) -> u32 {
        match category {
            ExerciseCategory::Chest => self.chest,
            ExerciseCategory::Back => self.back,
            ExerciseCategory::Legs => self.legs,
            ExerciseCategory::Arms => self.arms,
            ExerciseCategory::Cardio => self.cardio,
        }
    }

    pub fn set(&mut self, category: ExerciseCategory, count: u32) {
        let slot = match category {
            ExerciseCategory::Chest => &mut self.chest,
            ExerciseCategory::Back => &mut self.back,
            ExerciseCategory::Legs => &mut self.legs,
            ExerciseCategory::Arms => &mut self.arms,
            ExerciseCategory::Cardio => &mut self.cardio,
        };
        *slot = count;
    }

    /// Sum over all categories.
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, count)| count).sum()
    }

    /// Share of `category` as a whole percentage, truncated. Zero when the
    /// breakdown is empty.
    pub fn percent(&self, category: ExerciseCategory) -> u32 {
        let total = u64::from(self.total());
        if total == 0 {
            return 0;
        }
        (u64::from(self.count(category)) * 100 / total) as u32
    }

    /// `(category, count)` pairs in canonical order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (ExerciseCategory, u32)> + '_ {
        ExerciseCategory::ALL
            .into_iter()
            .map(move |category| (category, self.count(category)))
    }
}

impl FromIterator<(ExerciseCategory, u32)> for OccupancyBreakdown {
    fn from_iter<I: IntoIterator<Item = (ExerciseCategory, u32)>>(iter: I) -> Self {
        let mut breakdown = Self::default();
        for (category, count) in iter {
            breakdown.set(category, count);
        }
        breakdown
    }
}

/// Body of `GET /occupancy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyResponse {
    pub count: u32,
    #[serde(default)]
    pub breakdown: OccupancyBreakdown,
}

/// One colored arc of the occupancy ring.
///
/// `start` and `end` are fractions of a full turn measured clockwise from
/// 12 o'clock. `fraction` is the category's true share, before the visual
/// gap and minimum-width adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct RingSegment {
    pub category: ExerciseCategory,
    pub start: f64,
    pub end: f64,
    pub fraction: f64,
}

impl RingSegment {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Angle of the arc midpoint in radians, in screen coordinates where
    /// 0 points right and 12 o'clock is `-π/2`.
    pub fn mid_angle_radians(&self) -> f64 {
        (self.start + self.end) / 2.0 * TAU - FRAC_PI_2
    }

    /// Whether the arc is wide enough to carry its abbreviation.
    pub fn shows_label(&self) -> bool {
        self.fraction >= LABEL_MIN_FRACTION
    }
}
