// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - client-side synchronization layer.

pub mod api;
pub mod checkin;
pub mod identity;
pub mod occupancy;
pub mod ring;
pub mod stats;

pub use api::{ApiClient, HealthStatus};
pub use checkin::{CheckInMachine, CheckInState, CheckInStatus, Transition};
pub use identity::DeviceIdentityProvider;
pub use occupancy::{OccupancyState, OccupancySynchronizer, PollHandle};
pub use stats::{RefreshOutcome, StatsAggregator, StatsState};
