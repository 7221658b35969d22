// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Small key-value settings store.
//!
//! Holds the device identifier and the onboarding flag. Values live in a
//! flat JSON object; a missing or unreadable file starts out empty.

use crate::error::StoreError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Key holding the onboarding flag.
pub const ONBOARDING_KEY: &str = "hasSeenOnboarding";

/// Durable string/bool settings.
pub trait KeyValueStore: Send + Sync {
    fn get_string(&self, key: &str) -> Option<String>;

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Stored boolean, `false` when absent or not a boolean.
    fn get_bool(&self, key: &str) -> bool;

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError>;
}

/// Settings persisted to a JSON file, rewritten on every change.
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`, reading existing settings if any.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable settings file");
                Map::new()
            }),
            Err(_) => Map::new(),
        };

        Self {
            path,
            data: RwLock::new(data),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the new map to disk first; memory only changes once it is saved.
    fn update(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut guard = self.data.write().unwrap_or_else(|e| e.into_inner());
        let mut next = guard.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn persist(&self, data: &Map<String, Value>) -> Result<(), StoreError> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized).map_err(|source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.data
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(str::to_string))
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(key, Value::String(value.to_string()))
    }

    fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.update(key, Value::Bool(value))
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Map<String, Value>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail with [`StoreError::ReadOnly`].
    pub fn read_only() -> Self {
        Self {
            data: RwLock::default(),
            read_only: true,
        }
    }

    /// Seed a raw value, bypassing the read-only switch.
    pub fn with_value(self, key: &str, value: Value) -> Self {
        self.data
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value);
        self
    }

    fn update(&self, key: &str, value: Value) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.data
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.data
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(str::to_string))
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(key, Value::String(value.to_string()))
    }

    fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.update(key, Value::Bool(value))
    }
}

/// Whether the onboarding screens have been completed on this install.
pub fn has_completed_onboarding(store: &dyn KeyValueStore) -> bool {
    store.get_bool(ONBOARDING_KEY)
}

/// Record that onboarding is done.
pub fn mark_onboarding_complete(store: &dyn KeyValueStore) -> Result<(), StoreError> {
    store.set_bool(ONBOARDING_KEY, true)
}
