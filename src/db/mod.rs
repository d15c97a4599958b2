// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record store for hikes (SQLite).

pub mod codec;
pub mod sqlite;

pub use sqlite::SqliteHikeStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{Hike, HikeId, HikeInput};

/// Durable storage for the hike collection.
///
/// Implementations do not validate; the repository does that before calling in.
/// Missing ids are reported through the return value, never as an error.
#[async_trait]
pub trait HikeStore: Send + Sync {
    /// Insert a new hike and return its assigned id.
    async fn insert(&self, hike: &HikeInput, created_at: DateTime<Utc>)
        -> Result<HikeId, AppError>;

    /// All hikes, newest hike date first, then most recently created first.
    async fn fetch_all(&self) -> Result<Vec<Hike>, AppError>;

    async fn fetch_one(&self, id: HikeId) -> Result<Option<Hike>, AppError>;

    /// Overwrite every writable column. Returns `false` if no row matched.
    async fn update(&self, id: HikeId, hike: &HikeInput) -> Result<bool, AppError>;

    /// Returns `false` if no row matched.
    async fn delete(&self, id: HikeId) -> Result<bool, AppError>;

    /// Remove every hike, returning how many were removed.
    async fn clear(&self) -> Result<u64, AppError>;
}
