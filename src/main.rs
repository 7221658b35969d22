// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! ArcLive headless client
//!
//! Drives the client core from the command line:
//!
//! ```text
//! arclive checkin <chest|back|legs|arms|cardio>
//! arclive checkout
//! arclive occupancy
//! arclive stats
//! arclive watch
//! arclive onboard
//! ```
//!
//! Results are printed as JSON lines on stdout; logs go to stderr.

use anyhow::{bail, Context};
use arclive_client::{
    config::Config,
    models::ExerciseCategory,
    services::{CheckInStatus, Transition},
    store::{self, JsonFileStore, KeyValueStore},
    AppState,
};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: arclive <checkin <category>|checkout|occupancy|stats|watch|onboard>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&config.state_path));
    let state = AppState::new(config, store).context("Failed to initialize client")?;
    tracing::info!(
        api_url = %state.config.api_url,
        device_id = %state.identity.device_id(),
        "ArcLive client ready"
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["checkin", category] => {
            let category: ExerciseCategory = category.parse()?;
            state.checkin.request_check_in();
            report_transition(state.checkin.check_in(category).await)
        }
        ["checkout"] => {
            state.checkin.restore(CheckInStatus::CheckedIn);
            report_transition(state.checkin.check_out().await)
        }
        ["occupancy"] => {
            state.occupancy.refresh().await;
            let snapshot = state.occupancy.snapshot();
            print_json(&snapshot)?;
            match snapshot.error {
                Some(e) => bail!(e),
                None => Ok(()),
            }
        }
        ["stats"] => {
            let outcome = state.stats.refresh().await;
            let snapshot = state.stats.snapshot();
            print_json(&snapshot)?;
            if outcome.is_complete_success() {
                Ok(())
            } else {
                bail!(snapshot.error.unwrap_or_default())
            }
        }
        ["watch"] => watch(&state).await,
        ["onboard"] => {
            let already = store::has_completed_onboarding(state.store.as_ref());
            store::mark_onboarding_complete(state.store.as_ref())?;
            print_json(&serde_json::json!({
                "device_id": state.identity.device_id(),
                "already_onboarded": already,
            }))
        }
        _ => bail!(USAGE),
    }
}

/// Poll occupancy and print every published state until Ctrl-C.
async fn watch(state: &AppState) -> anyhow::Result<()> {
    let mut updates = state.occupancy.subscribe();
    let poller = state.occupancy.start_polling(state.config.poll_interval);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if !snapshot.busy {
                    print_json(&snapshot)?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping poller");
                break;
            }
        }
    }

    poller.shutdown().await;
    Ok(())
}

fn report_transition(transition: Transition) -> anyhow::Result<()> {
    match transition {
        Transition::Completed(visit) => print_json(&visit),
        Transition::Failed(e) => bail!(e),
        Transition::Ignored => bail!("Request ignored: another request is in flight"),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("arclive_client=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
