// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trailbook: a personal hike log
//!
//! This crate provides the storage layer and HTTP API for recording hikes
//! and browsing, searching, editing and mapping them.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SqliteHikeStore;
use services::HikeRepository;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: SqliteHikeStore,
    pub hikes: HikeRepository,
}

impl AppState {
    /// Wire the repository to an opened store.
    pub fn new(config: Config, store: SqliteHikeStore) -> Self {
        let hikes = HikeRepository::new(std::sync::Arc::new(store.clone()));
        Self {
            config,
            store,
            hikes,
        }
    }
}
