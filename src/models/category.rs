// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise categories used to tag check-ins and split occupancy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// An sRGB display color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

/// Exercise category selected at check-in.
///
/// Declaration order is the canonical display order of the occupancy ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub enum ExerciseCategory {
    Chest,
    Back,
    Legs,
    Arms,
    Cardio,
}

/// Presentation attributes for one category.
struct CategoryInfo {
    key: &'static str,
    abbreviation: &'static str,
    full_name: &'static str,
    color: Rgb,
}

// Indexed by `ExerciseCategory as usize`.
static CATEGORY_INFO: [CategoryInfo; 5] = [
    CategoryInfo {
        key: "chest",
        abbreviation: "Ch",
        full_name: "Chest",
        color: Rgb::new(1.00, 0.35, 0.25), // coral red
    },
    CategoryInfo {
        key: "back",
        abbreviation: "B",
        full_name: "Back",
        color: Rgb::new(0.20, 0.55, 0.95), // ocean blue
    },
    CategoryInfo {
        key: "legs",
        abbreviation: "L",
        full_name: "Legs",
        color: Rgb::new(0.15, 0.80, 0.45), // emerald
    },
    CategoryInfo {
        key: "arms",
        abbreviation: "A",
        full_name: "Arms",
        color: Rgb::new(0.65, 0.25, 0.95), // violet
    },
    CategoryInfo {
        key: "cardio",
        abbreviation: "Ca",
        full_name: "Cardio",
        color: Rgb::new(1.00, 0.70, 0.00), // amber
    },
];

impl ExerciseCategory {
    /// All categories in canonical order.
    pub const ALL: [ExerciseCategory; 5] = [
        ExerciseCategory::Chest,
        ExerciseCategory::Back,
        ExerciseCategory::Legs,
        ExerciseCategory::Arms,
        ExerciseCategory::Cardio,
    ];

    fn info(self) -> &'static CategoryInfo {
        &CATEGORY_INFO[self as usize]
    }

    /// Wire name, e.g. `"legs"`.
    pub fn as_str(self) -> &'static str {
        self.info().key
    }

    /// Short label drawn on the ring, e.g. `"Ch"`.
    pub fn abbreviation(self) -> &'static str {
        self.info().abbreviation
    }

    pub fn full_name(self) -> &'static str {
        self.info().full_name
    }

    pub fn color(self) -> Rgb {
        self.info().color
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// Unrecognised category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown exercise category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ExerciseCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ExerciseCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
