// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Proportional ring layout for the occupancy gauge.
//!
//! Each category with a non-zero count gets one arc whose length is its
//! share of the total. Arcs are laid out in canonical category order so
//! colors keep their place between refreshes.

use crate::models::{OccupancyBreakdown, RingSegment};

/// Visual gap trimmed from the end of each arc when more than one is drawn.
pub const SEGMENT_GAP: f64 = 0.012;

/// Minimum arc width, so a tiny category stays visible and tappable.
pub const MIN_SEGMENT_WIDTH: f64 = 0.01;

/// Lay out ring segments for `breakdown` against a head count of `total`.
///
/// A zero head count draws nothing, whatever the breakdown says. Otherwise
/// the denominator is the larger of `total` and the breakdown sum, which
/// keeps every arc inside `[0, 1]` even if the two disagree. Check-ins
/// without a category leave the remainder of the ring empty.
pub fn layout_segments(breakdown: &OccupancyBreakdown, total: u32) -> Vec<RingSegment> {
    if total == 0 {
        return Vec::new();
    }
    let denominator = total.max(breakdown.total());

    let active: Vec<_> = breakdown.iter().filter(|&(_, count)| count > 0).collect();
    let gap = if active.len() > 1 { SEGMENT_GAP } else { 0.0 };
    let denominator = f64::from(denominator);

    let mut segments = Vec::with_capacity(active.len());
    let mut cursor = 0.0;
    for (category, count) in active {
        let fraction = f64::from(count) / denominator;
        let end = (cursor + fraction - gap)
            .max(cursor + MIN_SEGMENT_WIDTH)
            .min(1.0);
        segments.push(RingSegment {
            category,
            start: cursor,
            end,
            fraction,
        });
        // Advance by the true share; the gap must not accumulate.
        cursor += fraction;
    }
    segments
}
