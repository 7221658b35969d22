// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics screen state: personal and gym-wide stats fetched together.

use crate::error::ApiError;
use crate::models::{DeviceId, GymStats, PersonalStats};
use crate::services::ApiClient;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

/// Published statistics state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsState {
    pub personal: Option<PersonalStats>,
    pub gym: Option<GymStats>,
    pub busy: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Result of one refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub personal: Result<(), ApiError>,
    pub gym: Result<(), ApiError>,
}

impl RefreshOutcome {
    pub fn is_complete_success(&self) -> bool {
        self.personal.is_ok() && self.gym.is_ok()
    }

    pub fn is_partial_failure(&self) -> bool {
        self.personal.is_ok() != self.gym.is_ok()
    }
}

/// Merges `/stats/me` and `/stats/gym` into one observable state.
pub struct StatsAggregator {
    api: ApiClient,
    device_id: DeviceId,
    state: watch::Sender<StatsState>,
}

impl StatsAggregator {
    pub fn new(api: ApiClient, device_id: DeviceId) -> Self {
        let (state, _) = watch::channel(StatsState::default());
        Self {
            api,
            device_id,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StatsState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> StatsState {
        self.state.borrow().clone()
    }

    /// Fetch both stats concurrently and publish once both have finished.
    ///
    /// A half that succeeds replaces its published value; a half that fails
    /// keeps the previous one. The first error (personal, then gym) becomes
    /// the published error text.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.state.send_modify(|s| {
            s.busy = true;
            s.error = None;
        });

        let (personal, gym) = tokio::join!(
            self.api.personal_stats(self.device_id),
            self.api.gym_stats(),
        );

        let outcome = RefreshOutcome {
            personal: personal.as_ref().map(|_| ()).map_err(Clone::clone),
            gym: gym.as_ref().map(|_| ()).map_err(Clone::clone),
        };

        if let Err(e) = &personal {
            tracing::warn!(error = ?e, "Personal stats fetch failed");
        }
        if let Err(e) = &gym {
            tracing::warn!(error = ?e, "Gym stats fetch failed");
        }

        let error = [&outcome.personal, &outcome.gym]
            .into_iter()
            .find_map(|r| r.as_ref().err())
            .map(ToString::to_string);

        self.state.send_modify(|s| {
            let any_ok = personal.is_ok() || gym.is_ok();
            if let Ok(p) = personal {
                s.personal = Some(p);
            }
            if let Ok(g) = gym {
                s.gym = Some(g);
            }
            if any_ok {
                s.last_updated = Some(Utc::now());
            }
            s.error = error;
            s.busy = false;
        });

        tracing::debug!(
            personal_ok = outcome.personal.is_ok(),
            gym_ok = outcome.gym.is_ok(),
            "Stats refreshed"
        );
        outcome
    }
}
