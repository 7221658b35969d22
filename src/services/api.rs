// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! ArcLive API client.
//!
//! Handles:
//! - Check-in / check-out writes
//! - Occupancy and statistics reads
//! - Mapping HTTP status codes onto [`ApiError`]
//!
//! The client never retries; callers decide what to do with an error.

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    DeviceId, ExerciseCategory, GymStats, OccupancyResponse, PersonalStats, Visit,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Body of `POST /checkin`.
#[derive(Debug, Serialize)]
struct CheckInRequest {
    device_id: DeviceId,
    exercise_type: ExerciseCategory,
}

/// Body of `POST /checkout`.
#[derive(Debug, Serialize)]
struct CheckOutRequest {
    device_id: DeviceId,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Status codes an endpoint gives a domain meaning to.
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    CheckIn,
    CheckOut,
    Read,
}

impl Endpoint {
    fn classify(self, status: StatusCode) -> Option<ApiError> {
        match (self, status.as_u16()) {
            (_, code) if code < 400 => None,
            (Endpoint::CheckIn, 409) => Some(ApiError::AlreadyCheckedIn),
            (Endpoint::CheckOut, 404) => Some(ApiError::NotCheckedIn),
            (_, code) => Some(ApiError::Server(code)),
        }
    }
}

/// Typed client for the ArcLive service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured base URL and request timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("arclive-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Unknown(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Open a visit for this device.
    pub async fn check_in(&self, device_id: DeviceId, category: ExerciseCategory) -> Result<Visit> {
        let body = CheckInRequest {
            device_id,
            exercise_type: category,
        };
        let request = self.http.post(self.url("checkin")).json(&body);
        self.execute(request, Endpoint::CheckIn).await
    }

    /// Close the open visit for this device.
    pub async fn check_out(&self, device_id: DeviceId) -> Result<Visit> {
        let body = CheckOutRequest { device_id };
        let request = self.http.post(self.url("checkout")).json(&body);
        self.execute(request, Endpoint::CheckOut).await
    }

    /// Current head count and its category split.
    pub async fn occupancy(&self) -> Result<OccupancyResponse> {
        let request = self.http.get(self.url("occupancy"));
        self.execute(request, Endpoint::Read).await
    }

    /// Gym-wide statistics.
    pub async fn gym_stats(&self) -> Result<GymStats> {
        let request = self.http.get(self.url("stats/gym"));
        self.execute(request, Endpoint::Read).await
    }

    /// Statistics for one device.
    pub async fn personal_stats(&self, device_id: DeviceId) -> Result<PersonalStats> {
        let request = self
            .http
            .get(self.url("stats/me"))
            .query(&[("device_id", device_id.to_string())]);
        self.execute(request, Endpoint::Read).await
    }

    /// Service liveness probe.
    pub async fn health(&self) -> Result<HealthStatus> {
        let request = self.http.get(self.url("health"));
        self.execute(request, Endpoint::Read).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a request, map the status, and decode the JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: Endpoint,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, timeout = e.is_timeout(), "ArcLive request failed");
            ApiError::Unknown(e.to_string())
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        tracing::debug!(path = %url, status = status.as_u16(), "ArcLive response");

        if let Some(err) = endpoint.classify(status) {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(path = %url, status = status.as_u16(), body = %body, "ArcLive error response");
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Unknown(format!("Failed to read response body: {}", e)))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(path = %url, error = %e, "ArcLive response did not match schema");
            ApiError::Decoding(e.to_string())
        })
    }
}
