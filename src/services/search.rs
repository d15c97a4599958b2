// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Free-text hike search.

use crate::models::Hike;

/// Lower-cased search needle. Build once, match many.
///
/// Surrounding whitespace is kept and must match; it only decides whether
/// the query counts as blank.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    /// A blank query matches every hike.
    pub fn is_blank(&self) -> bool {
        self.needle.trim().is_empty()
    }

    /// Case-insensitive substring match over name, location, difficulty,
    /// description, weather and notes.
    pub fn matches(&self, hike: &Hike) -> bool {
        if self.is_blank() {
            return true;
        }
        [
            hike.name.as_str(),
            hike.location.as_str(),
            hike.difficulty.as_str(),
            hike.description.as_str(),
            hike.weather.as_str(),
            hike.notes.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Matching hikes plus the size of the collection they were drawn from.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub hikes: Vec<Hike>,
    pub total: usize,
}

/// Keep the hikes matching `query`, preserving their order.
pub fn filter_hikes(hikes: Vec<Hike>, query: &str) -> Vec<Hike> {
    let query = SearchQuery::new(query);
    if query.is_blank() {
        return hikes;
    }
    hikes.into_iter().filter(|h| query.matches(h)).collect()
}
