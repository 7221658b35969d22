// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Qualitative busyness derived from the live head count.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::category::Rgb;

/// Head count treated as a full gym.
pub const MAX_CAPACITY: u32 = 2500;

/// Below this share of capacity the gym is quiet.
pub const QUIET_BELOW: f64 = 0.20;

/// Below this share of capacity the gym is moderate; at or above it, busy.
pub const MODERATE_BELOW: f64 = 0.60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub enum Busyness {
    #[default]
    Quiet,
    Moderate,
    Busy,
}

impl Busyness {
    /// Classify a head count against [`MAX_CAPACITY`].
    pub fn from_count(count: u32) -> Self {
        let ratio = f64::from(count) / f64::from(MAX_CAPACITY);
        if ratio < QUIET_BELOW {
            Busyness::Quiet
        } else if ratio < MODERATE_BELOW {
            Busyness::Moderate
        } else {
            Busyness::Busy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Busyness::Quiet => "Quiet",
            Busyness::Moderate => "Moderate",
            Busyness::Busy => "Busy",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Busyness::Quiet => Rgb::new(0.20, 0.78, 0.35),
            Busyness::Moderate => Rgb::new(1.00, 0.75, 0.00),
            Busyness::Busy => Rgb::new(1.00, 0.23, 0.19),
        }
    }

    /// Symbol name used by the icon set.
    pub fn symbol(self) -> &'static str {
        match self {
            Busyness::Quiet => "figure.walk",
            Busyness::Moderate => "figure.run",
            Busyness::Busy => "person.3.fill",
        }
    }
}
