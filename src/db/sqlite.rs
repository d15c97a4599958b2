// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite-backed hike store.
//!
//! One row per hike. `photos` and `locationCoords` are nested values and are
//! kept as JSON text columns (see [`super::codec`]). Every operation is a single
//! parameterised statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::cmp::Ordering;
use std::str::FromStr;

use super::codec;
use super::HikeStore;
use crate::error::AppError;
use crate::models::{Difficulty, Hike, HikeId, HikeInput, Parking, RouteType};
use crate::time_utils::{format_date, format_utc_rfc3339, parse_date_like, parse_timestamp};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS hikes (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT NOT NULL,
    location       TEXT NOT NULL,
    date           TEXT NOT NULL,
    parking        TEXT NOT NULL,
    length         REAL NOT NULL,
    route_type     TEXT,
    difficulty     TEXT NOT NULL,
    description    TEXT,
    notes          TEXT,
    weather        TEXT,
    photos         TEXT,
    locationCoords TEXT,
    is_completed   INTEGER DEFAULT 0,
    completed_date TEXT,
    created_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

const SELECT_HIKE: &str = "SELECT id, name, location, date, parking, length, route_type, \
    difficulty, description, notes, weather, photos, locationCoords, is_completed, \
    completed_date, created_at FROM hikes";

// Legacy rows hold full timestamps in `date` and SQLite's space-separated
// layout in `created_at`; both are normalised before comparing. `id` breaks
// ties between hikes created within the same clock tick.
const LIST_ORDER: &str =
    "ORDER BY substr(date, 1, 10) DESC, replace(created_at, ' ', 'T') DESC, id DESC";

/// Raw `hikes` row before decoding.
#[derive(Debug)]
struct HikeRow {
    id: i64,
    name: String,
    location: String,
    date: String,
    parking: String,
    length: f64,
    route_type: Option<String>,
    difficulty: String,
    description: Option<String>,
    notes: Option<String>,
    weather: Option<String>,
    photos: Option<String>,
    location_coords: Option<String>,
    is_completed: Option<i64>,
    completed_date: Option<String>,
    created_at: String,
}

/// Read one column, reporting a storage-class mismatch as an unreadable record.
fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, AppError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| AppError::Serialization(format!("column {name}: {e}")))
}

/// `length` may hold text in rows written by older clients.
fn length_column(row: &SqliteRow) -> Result<f64, AppError> {
    if let Ok(length) = row.try_get::<f64, _>("length") {
        return Ok(length);
    }
    if let Ok(length) = row.try_get::<i64, _>("length") {
        return Ok(length as f64);
    }
    let raw: String = column(row, "length")?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| AppError::Serialization(format!("column length: invalid value {raw:?}")))
}

impl HikeRow {
    /// Decode columns one by one so a mismatch fails this row only.
    fn from_row(row: &SqliteRow) -> Result<Self, AppError> {
        Ok(Self {
            id: column(row, "id")?,
            name: column(row, "name")?,
            location: column(row, "location")?,
            date: column(row, "date")?,
            parking: column(row, "parking")?,
            length: length_column(row)?,
            route_type: column(row, "route_type")?,
            difficulty: column(row, "difficulty")?,
            description: column(row, "description")?,
            notes: column(row, "notes")?,
            weather: column(row, "weather")?,
            photos: column(row, "photos")?,
            location_coords: column(row, "locationCoords")?,
            is_completed: column(row, "is_completed")?,
            completed_date: column(row, "completed_date")?,
            created_at: column(row, "created_at")?,
        })
    }

    /// Decode a row. Nested JSON columns degrade to empty values; required
    /// scalar columns that cannot be decoded fail the row.
    fn into_hike(self) -> Result<Hike, AppError> {
        let id = HikeId(self.id);
        let bad = |what: &str, value: &str| {
            AppError::Serialization(format!("hike {id}: invalid {what} {value:?}"))
        };

        let date = parse_date_like(&self.date).ok_or_else(|| bad("date", &self.date))?;
        let created_at =
            parse_timestamp(&self.created_at).ok_or_else(|| bad("created_at", &self.created_at))?;
        let parking = self
            .parking
            .parse::<Parking>()
            .map_err(|e| AppError::Serialization(format!("hike {id}: {e}")))?;
        let difficulty = self
            .difficulty
            .parse::<Difficulty>()
            .map_err(|e| AppError::Serialization(format!("hike {id}: {e}")))?;
        let route_type = self
            .route_type
            .as_deref()
            .unwrap_or_default()
            .parse::<RouteType>()
            .unwrap_or_else(|e| {
                tracing::warn!(hike_id = %id, error = %e, "Treating unknown route type as unspecified");
                RouteType::Unspecified
            });

        // An unreadable completion date is treated like a missing one
        let completed_date = self.completed_date.as_deref().and_then(|raw| {
            let parsed = parse_date_like(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                tracing::warn!(hike_id = %id, value = raw, "Discarding malformed completed_date");
            }
            parsed
        });

        Ok(Hike {
            id,
            name: self.name,
            location: self.location,
            date,
            parking,
            length: self.length,
            route_type,
            difficulty,
            description: self.description.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            weather: self.weather.unwrap_or_default(),
            photos: codec::decode_photos(self.photos.as_deref()),
            location_coords: codec::decode_coords(self.location_coords.as_deref()),
            is_completed: self.is_completed.unwrap_or(0) != 0,
            completed_date,
            created_at,
        })
    }
}

/// Newest hike date first, then most recently created, then highest id.
fn listing_order(a: &Hike, b: &Hike) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Column values for a write, encoded once and bound by both INSERT and UPDATE.
struct EncodedHike<'a> {
    hike: &'a HikeInput,
    date: String,
    photos: String,
    location_coords: Option<String>,
    completed_date: Option<String>,
}

impl<'a> EncodedHike<'a> {
    fn new(hike: &'a HikeInput) -> Result<Self, AppError> {
        let encode_err = |e: serde_json::Error| {
            AppError::Internal(anyhow::anyhow!("Failed to encode hike: {}", e))
        };
        Ok(Self {
            hike,
            date: format_date(hike.date),
            photos: codec::encode_photos(&hike.photos).map_err(encode_err)?,
            location_coords: codec::encode_coords(hike.location_coords.as_ref())
                .map_err(encode_err)?,
            completed_date: hike.completed_date.map(format_date),
        })
    }
}

/// Hike store over a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteHikeStore {
    pool: SqlitePool,
}

impl SqliteHikeStore {
    /// Open (creating if needed) the database at `url` and ensure the schema exists.
    ///
    /// `sqlite::memory:` URLs are routed to [`Self::in_memory`].
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        if url.contains(":memory:") {
            return Self::in_memory().await;
        }

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let store = Self { pool };
        store.init_schema().await?;
        tracing::info!(url, "Opened hike database");
        Ok(store)
    }

    /// Private in-memory database, used by tests and local experiments.
    ///
    /// Every SQLite connection gets its own memory database, so the pool is
    /// pinned to exactly one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let store = Self { pool };
        store.init_schema().await?;
        tracing::debug!("Opened in-memory hike database");
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create schema: {}", e)))?;
        Ok(())
    }

    /// Underlying pool, for health checks and raw fixtures in tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[async_trait]
impl HikeStore for SqliteHikeStore {
    async fn insert(
        &self,
        hike: &HikeInput,
        created_at: DateTime<Utc>,
    ) -> Result<HikeId, AppError> {
        let encoded = EncodedHike::new(hike)?;

        let result = sqlx::query(
            "INSERT INTO hikes (name, location, date, parking, length, route_type, difficulty, \
             description, notes, weather, photos, locationCoords, is_completed, completed_date, \
             created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(encoded.hike.name.as_str())
        .bind(encoded.hike.location.as_str())
        .bind(encoded.date.as_str())
        .bind(encoded.hike.parking.as_str())
        .bind(encoded.hike.length)
        .bind(encoded.hike.route_type.as_str())
        .bind(encoded.hike.difficulty.as_str())
        .bind(encoded.hike.description.as_str())
        .bind(encoded.hike.notes.as_str())
        .bind(encoded.hike.weather.as_str())
        .bind(encoded.photos.as_str())
        .bind(encoded.location_coords.as_deref())
        .bind(i64::from(encoded.hike.is_completed))
        .bind(encoded.completed_date.as_deref())
        .bind(format_utc_rfc3339(created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(HikeId(result.last_insert_rowid()))
    }

    async fn fetch_all(&self) -> Result<Vec<Hike>, AppError> {
        let rows = sqlx::query(&format!("{SELECT_HIKE} {LIST_ORDER}"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let total = rows.len();
        let mut hikes: Vec<Hike> = rows
            .iter()
            .filter_map(|row| match HikeRow::from_row(row).and_then(HikeRow::into_hike) {
                Ok(hike) => Some(hike),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping undecodable hike row");
                    None
                }
            })
            .collect();

        if hikes.len() != total {
            tracing::warn!(
                loaded = hikes.len(),
                skipped = total - hikes.len(),
                "Some hikes could not be decoded"
            );
        }

        // Decoded values are authoritative; SQL order only approximates them
        // for timestamps carrying a non-UTC offset.
        hikes.sort_by(listing_order);
        Ok(hikes)
    }

    async fn fetch_one(&self, id: HikeId) -> Result<Option<Hike>, AppError> {
        let row = sqlx::query(&format!("{SELECT_HIKE} WHERE id = ?"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        row.as_ref()
            .map(|row| HikeRow::from_row(row).and_then(HikeRow::into_hike))
            .transpose()
    }

    async fn update(&self, id: HikeId, hike: &HikeInput) -> Result<bool, AppError> {
        let encoded = EncodedHike::new(hike)?;

        let result = sqlx::query(
            "UPDATE hikes SET name = ?, location = ?, date = ?, parking = ?, length = ?, \
             route_type = ?, difficulty = ?, description = ?, notes = ?, weather = ?, \
             photos = ?, locationCoords = ?, is_completed = ?, completed_date = ? \
             WHERE id = ?",
        )
        .bind(encoded.hike.name.as_str())
        .bind(encoded.hike.location.as_str())
        .bind(encoded.date.as_str())
        .bind(encoded.hike.parking.as_str())
        .bind(encoded.hike.length)
        .bind(encoded.hike.route_type.as_str())
        .bind(encoded.hike.difficulty.as_str())
        .bind(encoded.hike.description.as_str())
        .bind(encoded.hike.notes.as_str())
        .bind(encoded.hike.weather.as_str())
        .bind(encoded.photos.as_str())
        .bind(encoded.location_coords.as_deref())
        .bind(i64::from(encoded.hike.is_completed))
        .bind(encoded.completed_date.as_deref())
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: HikeId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM hikes WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM hikes")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
