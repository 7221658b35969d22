// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check-in / check-out state machine.
//!
//! ```text
//! CheckedOut --request_check_in--> AwaitingCategorySelection
//! AwaitingCategorySelection --check_in(ok)--> CheckedIn
//! AwaitingCategorySelection --check_in(err)--> CheckedOut
//! CheckedIn --check_out(ok)--> CheckedOut
//! CheckedIn --check_out(err)--> CheckedIn
//! ```
//!
//! Remote transitions hold a busy flag for their whole duration. A second
//! transition requested while busy is ignored, so at most one write per
//! device is ever in flight.

use crate::error::ApiError;
use crate::models::{DeviceId, ExerciseCategory, Visit};
use crate::services::ApiClient;
use serde::Serialize;
use tokio::sync::watch;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub enum CheckInStatus {
    #[default]
    CheckedOut,
    /// The user asked to check in and is choosing a category.
    AwaitingCategorySelection,
    CheckedIn,
}

/// Published state of the check-in control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckInState {
    pub status: CheckInStatus,
    /// A check-in or check-out request is in flight
    pub busy: bool,
    /// User-facing text of the last failure, cleared on the next attempt
    pub error: Option<String>,
}

impl CheckInState {
    pub fn is_checked_in(&self) -> bool {
        self.status == CheckInStatus::CheckedIn
    }
}

/// Outcome of a requested transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The server accepted the write.
    Completed(Visit),
    /// The server or transport rejected the write; state was reverted.
    Failed(ApiError),
    /// Not attempted: busy, or not valid from the current state.
    Ignored,
}

impl Transition {
    pub fn is_completed(&self) -> bool {
        matches!(self, Transition::Completed(_))
    }
}

/// Clears the busy flag if the call ends without committing, e.g. when
/// the future is dropped mid-request.
struct BusyGuard<'a> {
    state: &'a watch::Sender<CheckInState>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|s| std::mem::replace(&mut s.busy, false));
    }
}

/// Owns the checked-in flag for one device.
pub struct CheckInMachine {
    api: ApiClient,
    device_id: DeviceId,
    state: watch::Sender<CheckInState>,
}

impl CheckInMachine {
    pub fn new(api: ApiClient, device_id: DeviceId) -> Self {
        let (state, _) = watch::channel(CheckInState::default());
        Self {
            api,
            device_id,
            state,
        }
    }

    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<CheckInState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CheckInState {
        self.state.borrow().clone()
    }

    /// Adopt a status known from elsewhere (e.g. the last session).
    /// Ignored while a request is in flight.
    pub fn restore(&self, status: CheckInStatus) -> bool {
        self.state.send_if_modified(|s| {
            if s.busy || s.status == status {
                return false;
            }
            s.status = status;
            true
        })
    }

    /// Open the category picker. Only valid while checked out and idle.
    pub fn request_check_in(&self) -> bool {
        self.state.send_if_modified(|s| {
            if s.busy || s.status != CheckInStatus::CheckedOut {
                return false;
            }
            s.status = CheckInStatus::AwaitingCategorySelection;
            true
        })
    }

    /// Close the category picker without checking in.
    pub fn cancel_category_selection(&self) -> bool {
        self.state.send_if_modified(|s| {
            if s.busy || s.status != CheckInStatus::AwaitingCategorySelection {
                return false;
            }
            s.status = CheckInStatus::CheckedOut;
            true
        })
    }

    /// Check in with the chosen category.
    pub async fn check_in(&self, category: ExerciseCategory) -> Transition {
        let Some(_guard) = self.begin(|status| status != CheckInStatus::CheckedIn) else {
            tracing::debug!(category = %category, "Check-in ignored");
            return Transition::Ignored;
        };

        let result = self.api.check_in(self.device_id, category).await;
        self.commit_check_in(result)
    }

    /// Check out of the open visit.
    pub async fn check_out(&self) -> Transition {
        let Some(_guard) = self.begin(|status| status == CheckInStatus::CheckedIn) else {
            tracing::debug!("Check-out ignored");
            return Transition::Ignored;
        };

        let result = self.api.check_out(self.device_id).await;
        self.commit_check_out(result)
    }

    /// Publish the check-in result and release `busy` in one update.
    fn commit_check_in(&self, result: Result<Visit, ApiError>) -> Transition {
        match result {
            Ok(visit) => {
                tracing::info!(
                    visit_id = %visit.id,
                    category = ?visit.exercise_type,
                    "Checked in"
                );
                self.state.send_modify(|s| {
                    s.status = CheckInStatus::CheckedIn;
                    s.busy = false;
                });
                Transition::Completed(visit)
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Check-in failed");
                self.state.send_modify(|s| {
                    s.status = CheckInStatus::CheckedOut;
                    s.error = Some(e.to_string());
                    s.busy = false;
                });
                Transition::Failed(e)
            }
        }
    }

    /// Publish the check-out result and release `busy` in one update.
    fn commit_check_out(&self, result: Result<Visit, ApiError>) -> Transition {
        match result {
            Ok(visit) => {
                tracing::info!(visit_id = %visit.id, "Checked out");
                self.state.send_modify(|s| {
                    s.status = CheckInStatus::CheckedOut;
                    s.busy = false;
                });
                Transition::Completed(visit)
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Check-out failed");
                self.state.send_modify(|s| {
                    s.error = Some(e.to_string());
                    s.busy = false;
                });
                Transition::Failed(e)
            }
        }
    }

    /// Atomically claim the busy flag and clear the previous error.
    ///
    /// Returns `None` when a request is already in flight or `allowed`
    /// rejects the current status.
    fn begin(&self, allowed: impl FnOnce(CheckInStatus) -> bool) -> Option<BusyGuard<'_>> {
        let claimed = self.state.send_if_modified(|s| {
            if s.busy || !allowed(s.status) {
                return false;
            }
            s.busy = true;
            s.error = None;
            true
        });

        claimed.then(|| BusyGuard { state: &self.state })
    }
}
