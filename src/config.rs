// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Production API address, used when `ARCLIVE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://arclive-production.up.railway.app";

/// Occupancy poll interval in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Settings file used for the device identifier and onboarding flag.
pub const DEFAULT_STATE_PATH: &str = "arclive_state.json";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the ArcLive service (no trailing slash)
    pub api_url: String,
    /// How often the occupancy view refreshes
    pub poll_interval: Duration,
    /// Timeout applied to every request
    pub request_timeout: Duration,
    /// Path of the JSON settings file
    pub state_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_url: normalize_url(
                &env::var("ARCLIVE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            ),
            poll_interval: Duration::from_secs(secs_var(
                "ARCLIVE_POLL_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            )?),
            request_timeout: Duration::from_secs(secs_var(
                "ARCLIVE_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            state_path: env::var("ARCLIVE_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_PATH)),
        })
    }

    /// Config pointing at a specific base URL, everything else default.
    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: normalize_url(api_url),
            ..Self::default()
        }
    }
}

fn normalize_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Read a positive number of seconds, falling back to `default` when unset.
fn secs_var(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(0) | Err(_) => Err(ConfigError::Invalid { name, value: raw }),
            Ok(secs) => Ok(secs),
        },
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} (expected a positive number of seconds)")]
    Invalid { name: &'static str, value: String },
}
