// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal and gym-wide statistics as served by `/stats/me` and `/stats/gym`.
//!
//! All aggregation happens server-side; these types only decode the
//! responses and add formatting helpers for the stats screens.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ExerciseCategory, OccupancyBreakdown, RingSegment, VisitRecord};
use crate::services::ring;

/// Statistics for the current device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalStats {
    // ─── Totals ──────────────────────────────────────────────────
    /// Visits ever recorded for this device
    pub total_visits: u32,
    /// Minutes across completed visits
    pub total_minutes: u32,
    /// Consecutive days with a visit, ending today or yesterday
    pub streak: u32,

    // ─── Habits ──────────────────────────────────────────────────
    /// Most frequently chosen category, if any visit was tagged
    #[serde(default)]
    pub favourite_exercise: Option<ExerciseCategory>,
    /// Latest visits, most recent first
    #[serde(default)]
    pub recent_visits: Vec<VisitRecord>,
}

impl PersonalStats {
    /// Total time as `"45m"`, `"2h"`, or `"2h 5m"`.
    pub fn formatted_total_time(&self) -> String {
        let minutes = self.total_minutes;
        if minutes < 60 {
            return format!("{}m", minutes);
        }
        let (h, m) = (minutes / 60, minutes % 60);
        if m == 0 {
            format!("{}h", h)
        } else {
            format!("{}h {}m", h, m)
        }
    }
}

/// Average check-ins for one hour of the day over the past 30 days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyCount {
    pub hour: u8,
    pub count: f64,
}

impl HourlyCount {
    /// 12-hour clock axis label: `"12am"`, `"6am"`, `"12pm"`, `"6pm"`.
    pub fn hour_label(&self) -> String {
        match self.hour {
            0 => "12am".to_string(),
            12 => "12pm".to_string(),
            h if h < 12 => format!("{}am", h),
            h => format!("{}pm", h - 12),
        }
    }
}

/// Unique visitors on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
    pub count: u32,
}

impl DailyCount {
    /// Short weekday label for chart axes (`"Mon"`), or the raw date if it
    /// does not parse.
    pub fn day_label(&self) -> String {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map(|d| d.format("%a").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }
}

/// Gym-wide statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymStats {
    /// Sparse: hours with no check-ins are omitted
    #[serde(default)]
    pub peak_hours: Vec<HourlyCount>,
    /// Past seven days, oldest first
    #[serde(default)]
    pub daily_headcount: Vec<DailyCount>,
    /// Category split over the past 30 days
    #[serde(default)]
    pub exercise_breakdown: OccupancyBreakdown,
}

impl GymStats {
    /// Hour with the highest average; earliest hour wins a tie.
    pub fn busiest_hour(&self) -> Option<HourlyCount> {
        self.peak_hours.iter().copied().fold(None, |best, h| match best {
            Some(b) if b.count >= h.count => Some(b),
            _ => Some(h),
        })
    }

    /// Ring layout of the 30-day category split.
    pub fn breakdown_segments(&self) -> Vec<RingSegment> {
        ring::layout_segments(&self.exercise_breakdown, self.exercise_breakdown.total())
    }
}
