// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::NaiveDate;
use std::sync::Arc;
use trailbook::config::Config;
use trailbook::db::SqliteHikeStore;
use trailbook::models::{Difficulty, HikeInput, Parking};
use trailbook::routes::create_router;
use trailbook::services::HikeRepository;
use trailbook::AppState;

/// Parse a `YYYY-MM-DD` test date.
#[allow(dead_code)]
pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

/// Create a fresh in-memory store.
#[allow(dead_code)]
pub async fn test_store() -> SqliteHikeStore {
    SqliteHikeStore::in_memory()
        .await
        .expect("Failed to open in-memory database")
}

/// Repository over a fresh in-memory store; the store is returned for raw fixtures.
#[allow(dead_code)]
pub async fn test_repository() -> (HikeRepository, SqliteHikeStore) {
    let store = test_store().await;
    (HikeRepository::new(Arc::new(store.clone())), store)
}

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = test_store().await;
    let state = Arc::new(AppState::new(config, store));

    (create_router(state.clone()), state)
}

/// The "Ridge Trail" hike used throughout the tests.
#[allow(dead_code)]
pub fn ridge_trail() -> HikeInput {
    HikeInput::new(
        "Ridge Trail",
        "Blue Mountains",
        date("2024-03-01"),
        Parking::Yes,
        5.2,
        Difficulty::Moderate,
    )
}

/// A minimal valid hike with the given name and date.
#[allow(dead_code)]
pub fn hike_on(name: &str, day: &str) -> HikeInput {
    HikeInput::new(
        name,
        "Somewhere",
        date(day),
        Parking::No,
        3.0,
        Difficulty::Easy,
    )
}
