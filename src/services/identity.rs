// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stable per-installation device identity.
//!
//! The identifier is created on first use and written to the settings
//! store. Storage faults are logged and never surface to callers.

use crate::models::DeviceId;
use crate::store::KeyValueStore;
use std::sync::{Arc, OnceLock};

/// Settings key holding the device UUID.
pub const DEVICE_ID_KEY: &str = "arclive.device_uuid";

/// Hands out the installation's [`DeviceId`].
pub struct DeviceIdentityProvider {
    store: Arc<dyn KeyValueStore>,
    /// Resolved once per provider so every request carries the same value,
    /// even if persisting it failed.
    resolved: OnceLock<DeviceId>,
}

impl DeviceIdentityProvider {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            resolved: OnceLock::new(),
        }
    }

    /// Return the device id, creating and persisting one if needed.
    pub fn device_id(&self) -> DeviceId {
        *self.resolved.get_or_init(|| self.load_or_create())
    }

    fn load_or_create(&self) -> DeviceId {
        if let Some(stored) = self.store.get_string(DEVICE_ID_KEY) {
            match stored.parse::<DeviceId>() {
                Ok(id) => return id,
                Err(e) => {
                    tracing::warn!(value = %stored, error = %e, "Stored device id is invalid, regenerating");
                }
            }
        }

        let id = DeviceId::generate();
        match self.store.set_string(DEVICE_ID_KEY, &id.to_string()) {
            Ok(()) => tracing::info!(device_id = %id, "Generated new device id"),
            Err(e) => {
                tracing::warn!(device_id = %id, error = %e, "Failed to persist device id");
            }
        }
        id
    }
}
