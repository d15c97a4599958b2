// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod hikes;
pub mod map;
pub mod search;

pub use hikes::HikeRepository;
pub use map::MapView;
pub use search::{SearchQuery, SearchResults};
