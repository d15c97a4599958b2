// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map projection of the hike log: which hikes get markers, and where the
//! viewport should sit.

use geo::{BoundingRect, MultiPoint, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;

use crate::models::{Coordinates, Hike, HikeId, MapRegion};
use crate::time_utils::format_date;

/// Span shown around a single focused hike.
const FOCUS_DELTA: f64 = 0.01;
/// Padding factor applied to the bounding box of all markers.
const FIT_PADDING: f64 = 1.5;
/// Minimum span, so a single marker still gets a usable zoom level.
const FIT_MIN_DELTA: f64 = 0.01;

/// Hikes with coordinates and the region that shows them.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub region: Option<MapRegion>,
    pub hikes: Vec<Hike>,
}

/// Region centred on one point.
pub fn focus_region(coords: Coordinates) -> MapRegion {
    MapRegion {
        latitude: coords.latitude,
        longitude: coords.longitude,
        latitude_delta: FOCUS_DELTA,
        longitude_delta: FOCUS_DELTA,
    }
}

/// Region that contains every coordinate, padded. `None` for no coordinates.
pub fn fit_region(coords: &[Coordinates]) -> Option<MapRegion> {
    let points: MultiPoint<f64> = coords
        .iter()
        .map(|c| Point::new(c.longitude, c.latitude))
        .collect();
    let bounds = points.bounding_rect()?;

    let (min, max) = (bounds.min(), bounds.max());
    Some(MapRegion {
        latitude: (min.y + max.y) / 2.0,
        longitude: (min.x + max.x) / 2.0,
        latitude_delta: (max.y - min.y) * FIT_PADDING + FIT_MIN_DELTA,
        longitude_delta: (max.x - min.x) * FIT_PADDING + FIT_MIN_DELTA,
    })
}

/// Drop hikes without coordinates and pick a region.
///
/// A `focus` hike that is missing or has no coordinates falls back to fitting
/// all markers.
pub fn build_map_view(hikes: Vec<Hike>, focus: Option<HikeId>) -> MapView {
    let hikes: Vec<Hike> = hikes
        .into_iter()
        .filter(|h| h.location_coords.is_some())
        .collect();

    let focused = focus.and_then(|id| {
        hikes
            .iter()
            .find(|h| h.id == id)
            .and_then(|h| h.location_coords)
    });

    let region = match focused {
        Some(coords) => Some(focus_region(coords)),
        None => {
            let coords: Vec<Coordinates> = hikes.iter().filter_map(|h| h.location_coords).collect();
            fit_region(&coords)
        }
    };

    tracing::debug!(markers = hikes.len(), focused = focused.is_some(), "Built map view");
    MapView { region, hikes }
}

/// GeoJSON FeatureCollection with one Point feature per hike that has coordinates.
pub fn to_feature_collection(hikes: &[Hike]) -> FeatureCollection {
    let features = hikes
        .iter()
        .filter_map(|hike| {
            let coords = hike.location_coords?;

            let mut properties = JsonObject::new();
            properties.insert("id".to_string(), hike.id.to_string().into());
            properties.insert("name".to_string(), hike.name.clone().into());
            properties.insert("location".to_string(), hike.location.clone().into());
            properties.insert("date".to_string(), format_date(hike.date).into());
            properties.insert("difficulty".to_string(), hike.difficulty.as_str().into());
            properties.insert("length".to_string(), hike.length.into());
            properties.insert("is_completed".to_string(), hike.is_completed.into());

            Some(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    coords.longitude,
                    coords.latitude,
                ]))),
                id: Some(geojson::feature::Id::String(hike.id.to_string())),
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
