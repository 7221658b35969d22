// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the ArcLive service for integration tests.

use arclive_client::config::Config;
use arclive_client::services::ApiClient;
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scriptable service behaviour plus request counters.
#[allow(dead_code)]
pub struct MockService {
    pub checkin_calls: AtomicUsize,
    pub checkout_calls: AtomicUsize,
    pub occupancy_calls: AtomicUsize,
    pub gym_calls: AtomicUsize,
    pub personal_calls: AtomicUsize,

    pub checkin_status: Mutex<StatusCode>,
    pub checkout_status: Mutex<StatusCode>,
    pub occupancy_status: Mutex<StatusCode>,
    pub gym_status: Mutex<StatusCode>,
    pub personal_status: Mutex<StatusCode>,

    /// Body returned by `GET /occupancy` on success
    pub occupancy_body: Mutex<Value>,
    /// Delay applied before answering writes
    pub write_delay: Mutex<Duration>,
    /// Delay applied before answering reads
    pub read_delay: Mutex<Duration>,

    pub last_checkin_body: Mutex<Option<Value>>,
    pub last_personal_query: Mutex<Option<String>>,
}

impl Default for MockService {
    fn default() -> Self {
        Self {
            checkin_calls: AtomicUsize::new(0),
            checkout_calls: AtomicUsize::new(0),
            occupancy_calls: AtomicUsize::new(0),
            gym_calls: AtomicUsize::new(0),
            personal_calls: AtomicUsize::new(0),
            checkin_status: Mutex::new(StatusCode::CREATED),
            checkout_status: Mutex::new(StatusCode::OK),
            occupancy_status: Mutex::new(StatusCode::OK),
            gym_status: Mutex::new(StatusCode::OK),
            personal_status: Mutex::new(StatusCode::OK),
            occupancy_body: Mutex::new(json!({
                "count": 10,
                "breakdown": {"chest": 2, "back": 0, "legs": 5, "arms": 0, "cardio": 3}
            })),
            write_delay: Mutex::new(Duration::ZERO),
            read_delay: Mutex::new(Duration::ZERO),
            last_checkin_body: Mutex::new(None),
            last_personal_query: Mutex::new(None),
        }
    }
}

#[allow(dead_code)]
impl MockService {
    pub fn set(&self, slot: &Mutex<StatusCode>, status: StatusCode) {
        *slot.lock().unwrap() = status;
    }

    pub fn set_occupancy(&self, body: Value) {
        *self.occupancy_body.lock().unwrap() = body;
    }

    pub fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = delay;
    }

    pub fn set_read_delay(&self, delay: Duration) {
        *self.read_delay.lock().unwrap() = delay;
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// A running mock server.
#[allow(dead_code)]
pub struct MockServer {
    pub url: String,
    pub service: Arc<MockService>,
}

#[allow(dead_code)]
impl MockServer {
    /// Client configuration pointing at this server.
    pub fn config(&self) -> Config {
        Config::with_api_url(&self.url)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).expect("Failed to build client")
    }
}

/// Start a mock server on an ephemeral local port.
#[allow(dead_code)]
pub async fn start_mock_server() -> MockServer {
    let service = Arc::new(MockService::default());

    let app = Router::new()
        .route("/checkin", post(checkin))
        .route("/checkout", post(checkout))
        .route("/occupancy", get(occupancy))
        .route("/stats/gym", get(gym_stats))
        .route("/stats/me", get(personal_stats))
        .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
        .with_state(service.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Mock server has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    MockServer {
        url: format!("http://{}", addr),
        service,
    }
}

/// Build a closed or open Visit JSON for `body`.
fn visit_json(body: &Value, closed: bool) -> Value {
    let now = chrono::Utc::now().to_rfc3339();
    let check_out_time = if closed {
        Value::String(now.clone())
    } else {
        Value::Null
    };
    json!({
        "id": uuid::Uuid::new_v4(),
        "device_id": body["device_id"],
        "check_in_time": now,
        "check_out_time": check_out_time,
        "exercise_type": body.get("exercise_type").cloned().unwrap_or(Value::Null),
    })
}

fn status_of(slot: &Mutex<StatusCode>) -> StatusCode {
    *slot.lock().unwrap()
}

fn error_body(status: StatusCode) -> Response {
    (status, Json(json!({"detail": "mock error"}))).into_response()
}

async fn checkin(State(mock): State<Arc<MockService>>, Json(body): Json<Value>) -> Response {
    mock.checkin_calls.fetch_add(1, Ordering::SeqCst);
    *mock.last_checkin_body.lock().unwrap() = Some(body.clone());
    let delay = *mock.write_delay.lock().unwrap();
    tokio::time::sleep(delay).await;

    let status = status_of(&mock.checkin_status);
    if !status.is_success() {
        return error_body(status);
    }
    (status, Json(visit_json(&body, false))).into_response()
}

async fn checkout(State(mock): State<Arc<MockService>>, Json(body): Json<Value>) -> Response {
    mock.checkout_calls.fetch_add(1, Ordering::SeqCst);
    let delay = *mock.write_delay.lock().unwrap();
    tokio::time::sleep(delay).await;

    let status = status_of(&mock.checkout_status);
    if !status.is_success() {
        return error_body(status);
    }
    (status, Json(visit_json(&body, true))).into_response()
}

async fn occupancy(State(mock): State<Arc<MockService>>) -> Response {
    mock.occupancy_calls.fetch_add(1, Ordering::SeqCst);
    // Answer with the body as it was when the request arrived.
    let body = mock.occupancy_body.lock().unwrap().clone();
    let delay = *mock.read_delay.lock().unwrap();
    tokio::time::sleep(delay).await;

    let status = status_of(&mock.occupancy_status);
    if !status.is_success() {
        return error_body(status);
    }
    Json(body).into_response()
}

async fn gym_stats(State(mock): State<Arc<MockService>>) -> Response {
    mock.gym_calls.fetch_add(1, Ordering::SeqCst);
    let delay = *mock.read_delay.lock().unwrap();
    tokio::time::sleep(delay).await;

    let status = status_of(&mock.gym_status);
    if !status.is_success() {
        return error_body(status);
    }
    Json(json!({
        "peak_hours": [{"hour": 7, "count": 3.5}, {"hour": 18, "count": 12.2}],
        "daily_headcount": [
            {"date": "2026-10-16", "count": 140},
            {"date": "2026-10-17", "count": 155}
        ],
        "exercise_breakdown": {"chest": 30, "back": 25, "legs": 20, "arms": 15, "cardio": 10}
    }))
    .into_response()
}

async fn personal_stats(State(mock): State<Arc<MockService>>, RawQuery(query): RawQuery) -> Response {
    mock.personal_calls.fetch_add(1, Ordering::SeqCst);
    *mock.last_personal_query.lock().unwrap() = query;
    let delay = *mock.read_delay.lock().unwrap();
    tokio::time::sleep(delay).await;

    let status = status_of(&mock.personal_status);
    if !status.is_success() {
        return error_body(status);
    }
    Json(json!({
        "total_visits": 12,
        "total_minutes": 725,
        "streak": 3,
        "favourite_exercise": "legs",
        "recent_visits": [
            {
                "id": "0b6f0c55-3a4e-4c1b-9a43-1f1f6a0c9e11",
                "check_in_time": "2026-10-17T17:00:00+00:00",
                "check_out_time": "2026-10-17T18:15:00+00:00",
                "exercise_type": "legs",
                "duration_minutes": 75
            }
        ]
    }))
    .into_response()
}

/// Poll `cond` until it holds, failing the test after two seconds.
#[allow(dead_code)]
pub async fn wait_for(what: &str, cond: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !cond() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "Timed out waiting for {}",
            what
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
