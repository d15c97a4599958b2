// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hike model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

use super::de;

/// Store-assigned hike identifier.
///
/// Serialized as a string; clients treat it as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HikeId(pub i64);

impl fmt::Display for HikeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HikeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(HikeId)
    }
}

impl Serialize for HikeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error for a stored enum column holding an unknown value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Whether parking is available at the trailhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub enum Parking {
    Yes,
    No,
}

impl Parking {
    pub fn as_str(&self) -> &'static str {
        match self {
            Parking::Yes => "Yes",
            Parking::No => "No",
        }
    }
}

impl FromStr for Parking {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Parking::Yes),
            "No" => Ok(Parking::No),
            other => Err(UnknownVariant {
                kind: "parking",
                value: other.to_string(),
            }),
        }
    }
}

/// Shape of the route. `Unspecified` is stored as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub enum RouteType {
    Loop,
    #[serde(rename = "Out & Back")]
    OutAndBack,
    #[serde(rename = "Point to Point")]
    PointToPoint,
    Lollipop,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl RouteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::Loop => "Loop",
            RouteType::OutAndBack => "Out & Back",
            RouteType::PointToPoint => "Point to Point",
            RouteType::Lollipop => "Lollipop",
            RouteType::Unspecified => "",
        }
    }
}

impl FromStr for RouteType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Loop" => Ok(RouteType::Loop),
            "Out & Back" => Ok(RouteType::OutAndBack),
            "Point to Point" => Ok(RouteType::PointToPoint),
            "Lollipop" => Ok(RouteType::Lollipop),
            "" => Ok(RouteType::Unspecified),
            other => Err(UnknownVariant {
                kind: "route_type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Moderate" => Ok(Difficulty::Moderate),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(UnknownVariant {
                kind: "difficulty",
                value: other.to_string(),
            }),
        }
    }
}

/// Device location captured when the hike was logged (decimal degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
}

/// A logged hike as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct Hike {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: HikeId,
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub parking: Parking,
    /// Length in km
    pub length: f64,
    pub route_type: RouteType,
    pub difficulty: Difficulty,
    pub description: String,
    pub notes: String,
    /// User-entered weather summary for the day of the hike
    pub weather: String,
    /// Image references in display order
    pub photos: Vec<String>,
    #[serde(rename = "locationCoords")]
    pub location_coords: Option<Coordinates>,
    pub is_completed: bool,
    pub completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Every writable field of a hike; the payload for create and the merge
/// target for update.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[validate(schema(function = "validate_completion"))]
pub struct HikeInput {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub location: String,
    #[serde(deserialize_with = "de::date")]
    pub date: NaiveDate,
    pub parking: Parking,
    #[serde(deserialize_with = "de::length")]
    #[validate(range(exclusive_min = 0.0, message = "must be a positive number"))]
    pub length: f64,
    #[serde(default)]
    pub route_type: RouteType,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub weather: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(rename = "locationCoords", default)]
    #[validate(nested)]
    pub location_coords: Option<Coordinates>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_completed: bool,
    #[serde(default, deserialize_with = "de::nullable_date")]
    pub completed_date: Option<NaiveDate>,
}

impl HikeInput {
    /// Minimal input with every optional field at its default.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        date: NaiveDate,
        parking: Parking,
        length: f64,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            date,
            parking,
            length,
            route_type: RouteType::default(),
            difficulty,
            description: String::new(),
            notes: String::new(),
            weather: String::new(),
            photos: Vec::new(),
            location_coords: None,
            is_completed: false,
            completed_date: None,
        }
    }

    /// The completion rule on its own, for merges that leave other fields untouched.
    pub fn validate_completion(&self) -> Result<(), ValidationError> {
        validate_completion(self)
    }
}

impl From<Hike> for HikeInput {
    fn from(hike: Hike) -> Self {
        Self {
            name: hike.name,
            location: hike.location,
            date: hike.date,
            parking: hike.parking,
            length: hike.length,
            route_type: hike.route_type,
            difficulty: hike.difficulty,
            description: hike.description,
            notes: hike.notes,
            weather: hike.weather,
            photos: hike.photos,
            location_coords: hike.location_coords,
            is_completed: hike.is_completed,
            completed_date: hike.completed_date,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("is required".into());
        return Err(err);
    }
    Ok(())
}

fn validate_patch_coords(patch: &HikePatch) -> Result<(), ValidationError> {
    match &patch.location_coords {
        Some(Some(coords)) => coords.validate().map_err(|_| {
            let mut err = ValidationError::new("coordinates_range");
            err.message = Some("locationCoords must be a valid latitude and longitude".into());
            err
        }),
        _ => Ok(()),
    }
}

fn validate_completion(input: &HikeInput) -> Result<(), ValidationError> {
    if input.is_completed && input.completed_date.is_none() {
        let mut err = ValidationError::new("completed_date_missing");
        err.message = Some("Completed date is required for completed hikes".into());
        return Err(err);
    }
    Ok(())
}

/// Partial update. Absent fields keep their stored value.
///
/// `id` and `created_at` are not representable here; unknown keys in the
/// request body are ignored. Validation covers only the fields that are set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[validate(schema(function = "validate_patch_coords"))]
pub struct HikePatch {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "de::optional_date")]
    pub date: Option<NaiveDate>,
    pub parking: Option<Parking>,
    #[serde(default, deserialize_with = "de::optional_length")]
    #[validate(range(exclusive_min = 0.0, message = "must be a positive number"))]
    pub length: Option<f64>,
    pub route_type: Option<RouteType>,
    pub difficulty: Option<Difficulty>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub weather: Option<String>,
    pub photos: Option<Vec<String>>,
    /// `Some(None)` clears the stored coordinates.
    #[serde(
        rename = "locationCoords",
        default,
        deserialize_with = "de::patch_nullable"
    )]
    pub location_coords: Option<Option<Coordinates>>,
    #[serde(default, deserialize_with = "de::optional_flag")]
    pub is_completed: Option<bool>,
    /// `Some(None)` clears the stored completion date.
    #[serde(default, deserialize_with = "de::patch_nullable_date")]
    pub completed_date: Option<Option<NaiveDate>>,
}

impl HikePatch {
    /// Merge this patch over `target`, field by field.
    pub fn apply_to(self, target: &mut HikeInput) {
        if let Some(name) = self.name {
            target.name = name;
        }
        if let Some(location) = self.location {
            target.location = location;
        }
        if let Some(date) = self.date {
            target.date = date;
        }
        if let Some(parking) = self.parking {
            target.parking = parking;
        }
        if let Some(length) = self.length {
            target.length = length;
        }
        if let Some(route_type) = self.route_type {
            target.route_type = route_type;
        }
        if let Some(difficulty) = self.difficulty {
            target.difficulty = difficulty;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(notes) = self.notes {
            target.notes = notes;
        }
        if let Some(weather) = self.weather {
            target.weather = weather;
        }
        if let Some(photos) = self.photos {
            target.photos = photos;
        }
        if let Some(coords) = self.location_coords {
            target.location_coords = coords;
        }
        if let Some(is_completed) = self.is_completed {
            target.is_completed = is_completed;
        }
        if let Some(completed_date) = self.completed_date {
            target.completed_date = completed_date;
        }
    }

    /// Whether applying this patch can change the completion state.
    pub fn touches_completion(&self) -> bool {
        self.is_completed.is_some() || self.completed_date.is_some()
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == HikePatch::default()
    }
}
