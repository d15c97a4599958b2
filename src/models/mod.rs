// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

mod de;
pub mod hike;
pub mod map;

pub use hike::{
    Coordinates, Difficulty, Hike, HikeId, HikeInput, HikePatch, Parking, RouteType,
    UnknownVariant,
};
pub use map::MapRegion;
