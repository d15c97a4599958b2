// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON encoding for the nested hike fields stored as text columns.
//!
//! Decoding never fails: malformed text degrades to the field's empty value
//! so that one bad column cannot hide the rest of the record.

use crate::models::Coordinates;

/// Encode the photo list as a JSON array.
pub fn encode_photos(photos: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(photos)
}

/// Decode the photo list; `NULL`, empty and malformed text all yield `[]`.
pub fn decode_photos(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Option<Vec<String>>>(raw) {
        Ok(photos) => photos.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding malformed photos column");
            Vec::new()
        }
    }
}

/// Encode coordinates as `{"latitude":..,"longitude":..}`; `None` stays `NULL`.
pub fn encode_coords(coords: Option<&Coordinates>) -> Result<Option<String>, serde_json::Error> {
    coords.map(serde_json::to_string).transpose()
}

/// Decode coordinates; `NULL`, `null` and malformed text all yield `None`.
pub fn decode_coords(raw: Option<&str>) -> Option<Coordinates> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    match serde_json::from_str::<Option<Coordinates>>(raw) {
        Ok(coords) => coords,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding malformed locationCoords column");
            None
        }
    }
}
