// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Check-in state machine against the mock service.

use arclive_client::error::ApiError;
use arclive_client::models::{DeviceId, ExerciseCategory};
use arclive_client::services::{CheckInMachine, CheckInStatus, Transition};
use axum::http::StatusCode;
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::{start_mock_server, MockService};

#[tokio::test]
async fn test_successful_check_in_and_out() {
    let server = start_mock_server().await;
    let device_id = DeviceId::generate();
    let machine = CheckInMachine::new(server.client(), device_id);

    assert!(machine.request_check_in());
    let outcome = machine.check_in(ExerciseCategory::Legs).await;
    match outcome {
        Transition::Completed(visit) => {
            assert_eq!(visit.device_id, device_id);
            assert_eq!(visit.exercise_type, Some(ExerciseCategory::Legs));
        }
        other => panic!("expected completed check-in, got {other:?}"),
    }

    let state = machine.snapshot();
    assert_eq!(state.status, CheckInStatus::CheckedIn);
    assert!(!state.busy);
    assert_eq!(state.error, None);

    assert!(machine.check_out().await.is_completed());
    assert_eq!(machine.snapshot().status, CheckInStatus::CheckedOut);
}

#[tokio::test]
async fn test_failed_check_in_reverts_to_checked_out() {
    let server = start_mock_server().await;
    server
        .service
        .set(&server.service.checkin_status, StatusCode::CONFLICT);
    let machine = CheckInMachine::new(server.client(), DeviceId::generate());

    machine.request_check_in();
    let outcome = machine.check_in(ExerciseCategory::Back).await;
    assert_eq!(outcome, Transition::Failed(ApiError::AlreadyCheckedIn));

    let state = machine.snapshot();
    assert_eq!(state.status, CheckInStatus::CheckedOut);
    assert!(!state.busy);
    assert_eq!(state.error.as_deref(), Some("You're already checked in."));
}

#[tokio::test]
async fn test_error_cleared_on_next_attempt() {
    let server = start_mock_server().await;
    let service = &server.service;
    service.set(&service.checkin_status, StatusCode::INTERNAL_SERVER_ERROR);
    let machine = CheckInMachine::new(server.client(), DeviceId::generate());

    machine.check_in(ExerciseCategory::Arms).await;
    assert!(machine.snapshot().error.is_some());

    service.set(&service.checkin_status, StatusCode::CREATED);
    assert!(machine.check_in(ExerciseCategory::Arms).await.is_completed());
    assert_eq!(machine.snapshot().error, None);
}

#[tokio::test]
async fn test_checkout_without_open_visit_keeps_checked_in() {
    let server = start_mock_server().await;
    server
        .service
        .set(&server.service.checkout_status, StatusCode::NOT_FOUND);
    let machine = CheckInMachine::new(server.client(), DeviceId::generate());
    machine.restore(CheckInStatus::CheckedIn);

    let outcome = machine.check_out().await;
    assert_eq!(outcome, Transition::Failed(ApiError::NotCheckedIn));

    let state = machine.snapshot();
    assert_eq!(state.status, CheckInStatus::CheckedIn);
    assert!(!state.busy);
    assert_eq!(
        state.error.as_deref(),
        Some("You're not currently checked in.")
    );
}

#[tokio::test]
async fn test_concurrent_check_in_issues_one_request() {
    let server = start_mock_server().await;
    server.service.set_write_delay(Duration::from_millis(200));
    let machine = CheckInMachine::new(server.client(), DeviceId::generate());

    let (first, second) = tokio::join!(
        machine.check_in(ExerciseCategory::Legs),
        machine.check_in(ExerciseCategory::Chest),
    );

    assert!(first.is_completed());
    assert_eq!(second, Transition::Ignored);
    assert_eq!(MockService::calls(&server.service.checkin_calls), 1);
    assert_eq!(machine.snapshot().status, CheckInStatus::CheckedIn);
}

#[tokio::test]
async fn test_busy_flag_visible_while_in_flight() {
    let server = start_mock_server().await;
    server.service.set_write_delay(Duration::from_millis(200));
    let machine = Arc::new(CheckInMachine::new(server.client(), DeviceId::generate()));
    let mut updates = machine.subscribe();

    let task = {
        let machine = Arc::clone(&machine);
        tokio::spawn(async move { machine.check_in(ExerciseCategory::Cardio).await })
    };

    updates
        .wait_for(|s| s.busy)
        .await
        .expect("state channel closed");

    // A check-out attempted mid-flight is ignored and sends nothing.
    assert_eq!(machine.check_out().await, Transition::Ignored);
    assert_eq!(MockService::calls(&server.service.checkout_calls), 0);

    assert!(task.await.unwrap().is_completed());
    let state = machine.snapshot();
    assert!(!state.busy);
    assert!(state.is_checked_in());
}

#[tokio::test]
async fn test_check_in_ignored_when_already_checked_in() {
    let server = start_mock_server().await;
    let machine = CheckInMachine::new(server.client(), DeviceId::generate());
    machine.restore(CheckInStatus::CheckedIn);

    assert!(!machine.request_check_in());
    assert_eq!(
        machine.check_in(ExerciseCategory::Legs).await,
        Transition::Ignored
    );
    assert_eq!(MockService::calls(&server.service.checkin_calls), 0);
}
