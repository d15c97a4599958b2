// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lenient deserializers for fields the mobile client sends loosely typed.

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::time_utils::parse_date_like;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Parse a length in km from a JSON number or a numeric string ("5.2").
///
/// Non-numeric and non-finite input is rejected; sign is checked by validation.
pub fn length<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom("length must be a valid number"))?,
    };

    if !value.is_finite() {
        return Err(de::Error::custom("length must be a valid number"));
    }
    Ok(value)
}

/// [`length`] for patch fields.
pub fn optional_length<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    length(deserializer).map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrInt {
    Bool(bool),
    Int(i64),
}

/// Accept `true`/`false` as well as the `0`/`1` form used by the storage layer.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(b) => Ok(b),
        BoolOrInt::Int(0) => Ok(false),
        BoolOrInt::Int(1) => Ok(true),
        BoolOrInt::Int(other) => Err(de::Error::custom(format!(
            "expected 0 or 1 for a flag, got {other}"
        ))),
    }
}

/// [`flag`] for patch fields.
pub fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    flag(deserializer).map(Some)
}

/// A calendar date given as `YYYY-MM-DD` or as a full ISO timestamp.
pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_like(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
}

/// [`date`] for patch fields.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    date(deserializer).map(Some)
}

/// Nullable [`date`]: `null` yields `None`.
pub fn nullable_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date_like(s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {s}"))),
    }
}

/// Tri-state patch field for a nullable date.
///
/// Used with `#[serde(default)]`: a missing key stays `None` (keep), an
/// explicit `null` becomes `Some(None)` (clear).
pub fn patch_nullable_date<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    nullable_date(deserializer).map(Some)
}

/// Tri-state patch field: missing key → `None`, `null` → `Some(None)`.
pub fn patch_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
