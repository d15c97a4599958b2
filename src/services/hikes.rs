// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hike repository: the single entry point for reading and writing hikes.
//!
//! Validates input, applies defaults and field-level merges, then delegates
//! to whichever [`HikeStore`] it was constructed with.

use std::sync::Arc;

use validator::Validate;

use crate::db::HikeStore;
use crate::error::{AppError, Result};
use crate::models::{Hike, HikeId, HikeInput, HikePatch};
use crate::services::map::{self, MapView};
use crate::services::search::{self, SearchResults};

/// Facade over the hike store.
#[derive(Clone)]
pub struct HikeRepository {
    store: Arc<dyn HikeStore>,
}

impl HikeRepository {
    pub fn new(store: Arc<dyn HikeStore>) -> Self {
        Self { store }
    }

    /// Validate and store a new hike. `created_at` is stamped here, once.
    pub async fn create_hike(&self, input: HikeInput) -> Result<HikeId> {
        input.validate()?;

        let id = self.store.insert(&input, chrono::Utc::now()).await?;
        tracing::info!(hike_id = %id, name = %input.name, "Created hike");
        Ok(id)
    }

    /// Every hike, newest first.
    pub async fn get_all_hikes(&self) -> Result<Vec<Hike>> {
        self.store.fetch_all().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to load hikes");
        })
    }

    pub async fn get_hike_by_id(&self, id: HikeId) -> Result<Hike> {
        self.store
            .fetch_one(id)
            .await?
            .ok_or_else(AppError::hike_not_found)
    }

    /// Merge `patch` over the stored hike and write the result back.
    ///
    /// Only the fields the patch sets are validated, so a stored record that
    /// predates a rule can still be edited. The completion rule is checked
    /// on the merged record whenever the patch changes completion.
    ///
    /// Read and write are separate statements: two overlapping updates to the
    /// same hike are last-writer-wins.
    pub async fn update_hike(&self, id: HikeId, patch: HikePatch) -> Result<()> {
        patch.validate()?;

        let current = self.get_hike_by_id(id).await?;
        if patch.is_empty() {
            tracing::debug!(hike_id = %id, "Empty update; nothing to write");
            return Ok(());
        }

        let touches_completion = patch.touches_completion();
        let mut merged = HikeInput::from(current);
        patch.apply_to(&mut merged);
        if touches_completion {
            merged.validate_completion().map_err(|e| {
                AppError::Validation(
                    e.message
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                )
            })?;
        }

        if !self.store.update(id, &merged).await? {
            // Deleted between our read and write
            return Err(AppError::hike_not_found());
        }
        tracing::info!(hike_id = %id, "Updated hike");
        Ok(())
    }

    pub async fn delete_hike(&self, id: HikeId) -> Result<()> {
        if !self.store.delete(id).await? {
            tracing::debug!(hike_id = %id, "Delete requested for unknown hike");
            return Err(AppError::hike_not_found());
        }
        tracing::info!(hike_id = %id, "Deleted hike");
        Ok(())
    }

    /// Remove every hike. Irreversible; returns how many were removed.
    pub async fn clear_all_hikes(&self) -> Result<u64> {
        let removed = self.store.clear().await?;
        tracing::warn!(removed, "Cleared all hikes");
        Ok(removed)
    }

    /// Hikes matching a free-text query, in listing order. A blank query
    /// matches everything.
    pub async fn search_hikes(&self, query: &str) -> Result<SearchResults> {
        let hikes = self.get_all_hikes().await?;
        let total = hikes.len();
        let hikes = search::filter_hikes(hikes, query);
        tracing::debug!(total, matched = hikes.len(), "Searched hikes");
        Ok(SearchResults { hikes, total })
    }

    /// Hikes that have coordinates, plus the region to show them in.
    ///
    /// With `focus`, the region centres on that hike if it has coordinates.
    pub async fn map_view(&self, focus: Option<HikeId>) -> Result<MapView> {
        let hikes = self.get_all_hikes().await?;
        Ok(map::build_map_view(hikes, focus))
    }
}
