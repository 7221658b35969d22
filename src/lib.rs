// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! ArcLive client: gym check-in and live occupancy
//!
//! This crate provides the client-side synchronization layer for the
//! ArcLive service: device identity, the check-in state machine, the
//! occupancy poller with its ring layout, and the statistics aggregator.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

use config::Config;
use error::ApiError;
use services::{
    ApiClient, CheckInMachine, DeviceIdentityProvider, OccupancySynchronizer, StatsAggregator,
};
use std::sync::Arc;
use store::KeyValueStore;

/// Shared client state: one of each component, wired to a single API client.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub identity: DeviceIdentityProvider,
    pub checkin: CheckInMachine,
    pub occupancy: Arc<OccupancySynchronizer>,
    pub stats: StatsAggregator,
}

impl AppState {
    /// Build every component from `config` and a settings store.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config)?;
        let identity = DeviceIdentityProvider::new(Arc::clone(&store));
        let device_id = identity.device_id();

        Ok(Self {
            checkin: CheckInMachine::new(api.clone(), device_id),
            occupancy: Arc::new(OccupancySynchronizer::new(api.clone())),
            stats: StatsAggregator::new(api, device_id),
            config,
            store,
            identity,
        })
    }
}
