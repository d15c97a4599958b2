// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hike log API routes.
//!
//! Every response body carries `success`; failures add a single `error` message.

use crate::error::{AppError, Result};
use crate::models::{Hike, HikeId, HikeInput, HikePatch, MapRegion};
use crate::services::map::to_feature_collection;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest accepted search query, in characters.
const MAX_QUERY_LEN: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/hikes",
            get(list_hikes).post(create_hike).delete(clear_hikes),
        )
        .route(
            "/api/hikes/{id}",
            get(get_hike).put(update_hike).delete(delete_hike),
        )
        .route("/api/map", get(get_map))
        .route("/api/map/geojson", get(get_map_geojson))
}

/// Ids come from the client as opaque strings; anything unparseable cannot exist.
fn parse_hike_id(raw: &str) -> Result<HikeId> {
    raw.parse().map_err(|_| AppError::hike_not_found())
}

/// Unwrap a JSON body, reporting malformed payloads in the API error shape.
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// ─── Listing & Search ────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    /// Free-text search over name, location, difficulty, description, weather, notes
    q: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct HikeListResponse {
    pub success: bool,
    pub hikes: Vec<Hike>,
    /// Size of the whole collection, regardless of the search query
    pub total: u32,
}

/// List hikes, newest first, optionally filtered by `q`.
async fn list_hikes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<HikeListResponse>> {
    let query = params.q.unwrap_or_default();
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(AppError::BadRequest(format!(
            "Search query must be at most {} characters",
            MAX_QUERY_LEN
        )));
    }

    let results = state.hikes.search_hikes(&query).await?;

    Ok(Json(HikeListResponse {
        success: true,
        hikes: results.hikes,
        total: results.total as u32,
    }))
}

// ─── Create / Clear ──────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct CreatedResponse {
    pub success: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: HikeId,
}

async fn create_hike(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<HikeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let input = json_body(payload)?;
    let id = state.hikes.create_hike(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { success: true, id }),
    ))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct ClearResponse {
    pub success: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub removed: u64,
}

/// Delete every hike. Used for full resets only.
async fn clear_hikes(State(state): State<Arc<AppState>>) -> Result<Json<ClearResponse>> {
    let removed = state.hikes.clear_all_hikes().await?;
    Ok(Json(ClearResponse {
        success: true,
        removed,
    }))
}

// ─── Single Hike ─────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct HikeResponse {
    pub success: bool,
    pub hike: Hike,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct SuccessResponse {
    pub success: bool,
}

async fn get_hike(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<HikeResponse>> {
    let id = parse_hike_id(&id)?;
    let hike = state.hikes.get_hike_by_id(id).await?;
    Ok(Json(HikeResponse {
        success: true,
        hike,
    }))
}

/// Partial update; fields missing from the body keep their stored values.
async fn update_hike(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<HikePatch>, JsonRejection>,
) -> Result<Json<SuccessResponse>> {
    let id = parse_hike_id(&id)?;
    let patch = json_body(payload)?;
    state.hikes.update_hike(id, patch).await?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn delete_hike(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let id = parse_hike_id(&id)?;
    state.hikes.delete_hike(id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

// ─── Map ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MapQuery {
    /// Hike to centre the map on
    focus: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct MapResponse {
    pub success: bool,
    /// `null` when no hike has coordinates
    pub region: Option<MapRegion>,
    pub hikes: Vec<Hike>,
}

async fn get_map(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MapQuery>,
) -> Result<Json<MapResponse>> {
    // An unknown focus id is not an error; the map just fits every marker
    let focus = params.focus.as_deref().and_then(|raw| raw.parse().ok());
    let view = state.hikes.map_view(focus).await?;

    Ok(Json(MapResponse {
        success: true,
        region: view.region,
        hikes: view.hikes,
    }))
}

/// Hikes with coordinates as a GeoJSON FeatureCollection.
async fn get_map_geojson(State(state): State<Arc<AppState>>) -> Result<Json<FeatureCollection>> {
    let hikes = state.hikes.get_all_hikes().await?;
    Ok(Json(to_feature_collection(&hikes)))
}
