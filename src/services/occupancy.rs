// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live occupancy: polling, ring layout, and busyness.
//!
//! Failed refreshes keep the last good numbers on screen and only publish
//! the error text. Every refresh takes a generation number; a result that
//! lands after a newer refresh has started is dropped.

use crate::error::ApiError;
use crate::models::{Busyness, OccupancyBreakdown, OccupancyResponse, RingSegment};
use crate::services::{ring, ApiClient};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Shortest interval the poll loop will run at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Published occupancy view state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OccupancyState {
    pub count: u32,
    pub breakdown: OccupancyBreakdown,
    pub segments: Vec<RingSegment>,
    pub busyness: Busyness,
    pub busy: bool,
    pub error: Option<String>,
    /// When the last successful refresh landed
    pub last_updated: Option<DateTime<Utc>>,
}

/// Fetches occupancy and derives the ring model.
pub struct OccupancySynchronizer {
    api: ApiClient,
    state: watch::Sender<OccupancyState>,
    /// Number of the most recently started refresh
    generation: AtomicU64,
}

impl OccupancySynchronizer {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(OccupancyState::default());
        Self {
            api,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<OccupancyState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> OccupancyState {
        self.state.borrow().clone()
    }

    /// Fetch occupancy once and publish the result.
    ///
    /// Safe to call while the poll loop runs: whichever refresh started
    /// last wins, regardless of which response arrives last.
    pub async fn refresh(&self) {
        let generation = self.begin();
        let result = self.api.occupancy().await;
        self.publish(generation, result);
    }

    fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.busy = true;
            s.error = None;
        });
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn publish(&self, generation: u64, result: Result<OccupancyResponse, ApiError>) {
        let derived = result.map(|response| {
            let segments = ring::layout_segments(&response.breakdown, response.count);
            let busyness = Busyness::from_count(response.count);
            (response, segments, busyness)
        });

        // Checked under the channel lock so a refresh that begins meanwhile
        // re-raises busy after this update, not before it.
        let published = self.state.send_if_modified(|s| {
            if !self.is_current(generation) {
                return false;
            }
            match &derived {
                Ok((response, segments, busyness)) => {
                    s.count = response.count;
                    s.breakdown = response.breakdown;
                    s.segments = segments.clone();
                    s.busyness = *busyness;
                    s.last_updated = Some(Utc::now());
                }
                Err(e) => s.error = Some(e.to_string()),
            }
            s.busy = false;
            true
        });

        match (&derived, published) {
            (_, false) => tracing::debug!(generation, "Dropping superseded occupancy result"),
            (Ok((response, segments, busyness)), true) => tracing::debug!(
                count = response.count,
                segments = segments.len(),
                busyness = busyness.label(),
                "Occupancy refreshed"
            ),
            (Err(e), true) => tracing::warn!(error = ?e, "Occupancy refresh failed"),
        }
    }

    /// Clear `busy` for a refresh that was abandoned mid-request, unless a
    /// newer one now owns the flag.
    fn abandon(&self, generation: u64) {
        self.state.send_if_modified(|s| {
            self.is_current(generation) && std::mem::replace(&mut s.busy, false)
        });
    }

    /// Refresh now and then every `interval` until the handle is cancelled
    /// or dropped. Intervals below [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn start_polling(self: &Arc<Self>, interval: Duration) -> PollHandle {
        let interval = poll_period(interval);
        let cancel = CancellationToken::new();
        let wake = Arc::new(Notify::new());
        let handle = tokio::spawn(poll_loop(
            Arc::clone(self),
            interval,
            cancel.clone(),
            Arc::clone(&wake),
        ));

        PollHandle {
            cancel,
            wake,
            handle: Some(handle),
        }
    }
}

async fn poll_loop(
    sync: Arc<OccupancySynchronizer>,
    interval: Duration,
    cancel: CancellationToken,
    wake: Arc<Notify>,
) {
    // The first tick completes immediately.
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(interval_secs = interval.as_secs(), "Occupancy polling started");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
            _ = wake.notified() => ticker.reset(),
        }

        // Abandon an in-flight request as soon as we are cancelled.
        let generation = sync.begin();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                sync.abandon(generation);
                break;
            }
            result = sync.api.occupancy() => sync.publish(generation, result),
        }
    }

    tracing::info!("Occupancy polling stopped");
}

fn poll_period(requested: Duration) -> Duration {
    if requested < MIN_POLL_INTERVAL {
        tracing::warn!(
            requested_ms = requested.as_millis() as u64,
            "Poll interval too short, using minimum"
        );
        return MIN_POLL_INTERVAL;
    }
    requested
}

/// Owner of a running poll loop.
///
/// Dropping the handle cancels the loop, so a torn-down view never leaves
/// a timer behind.
pub struct PollHandle {
    cancel: CancellationToken,
    wake: Arc<Notify>,
    handle: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Ask the loop to refresh immediately, e.g. after a check-in.
    pub fn refresh_now(&self) {
        self.wake.notify_one();
    }

    /// Stop polling. No refresh starts after this returns.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel and wait for the loop task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Occupancy poll task failed to join");
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
