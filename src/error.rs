// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types with user-readable messages.
//!
//! The `Display` text of [`ApiError`] is what the state containers publish
//! as their error string, so every message is written for the end user.

/// Error returned by every remote operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The service already has an open visit for this device (HTTP 409).
    #[error("You're already checked in.")]
    AlreadyCheckedIn,

    /// The service has no open visit for this device (HTTP 404 on checkout).
    #[error("You're not currently checked in.")]
    NotCheckedIn,

    /// Any other 4xx/5xx status.
    #[error("Server error (HTTP {0}).")]
    Server(u16),

    /// The response body did not match the expected schema.
    #[error("Could not read server response: {0}")]
    Decoding(String),

    /// Transport failure: timeout, refused connection, DNS, TLS.
    ///
    /// The detail is kept for logs; it never reaches the user-facing text.
    #[error("An unknown error occurred.")]
    Unknown(String),
}

impl ApiError {
    /// HTTP status associated with the error, if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::AlreadyCheckedIn => Some(409),
            ApiError::NotCheckedIn => Some(404),
            ApiError::Server(code) => Some(*code),
            ApiError::Decoding(_) | ApiError::Unknown(_) => None,
        }
    }

    /// True for the "visit already open" conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::AlreadyCheckedIn)
    }

    /// True for the "no open visit" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotCheckedIn)
    }
}

/// Errors from the local settings store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write settings to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Settings store is read-only")]
    ReadOnly,
}

/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, ApiError>;
