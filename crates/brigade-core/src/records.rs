//! Input records for fires and stations.
//!
//! Records arrive as JSON from the external point loader. Missing optional
//! fields fall back to the same defaults the map data has always used.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_STATION_TRUCKS;
use crate::enums::Accessibility;
use crate::types::GeoPoint;

/// A candidate fire location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub severity: u8,
    pub accessibility: Accessibility,
}

/// A fire station with its fleet size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub total_trucks: u32,
}

/// Anything with a geographic location, for proximity filtering.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for FireRecord {
    fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

impl Located for StationRecord {
    fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed point data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no station or stations entry in station data")]
    MissingStation,
}

#[derive(Deserialize)]
struct RawFire {
    id: String,
    name: Option<String>,
    lat: f64,
    lon: f64,
    severity: Option<i64>,
    accessibility: Option<String>,
}

#[derive(Deserialize)]
struct RawStation {
    id: String,
    name: Option<String>,
    lat: f64,
    lon: f64,
    #[serde(rename = "totalTrucks")]
    total_trucks: Option<u32>,
}

#[derive(Deserialize)]
struct FireFile {
    #[serde(default)]
    fires: Vec<RawFire>,
}

#[derive(Deserialize)]
struct StationFile {
    station: Option<RawStation>,
    stations: Option<Vec<RawStation>>,
}

impl From<RawFire> for FireRecord {
    fn from(raw: RawFire) -> Self {
        let severity = raw.severity.unwrap_or(1).clamp(1, 3) as u8;
        Self {
            name: raw.name.unwrap_or_else(|| raw.id.clone()),
            id: raw.id,
            lat: raw.lat,
            lon: raw.lon,
            severity,
            accessibility: raw
                .accessibility
                .as_deref()
                .map(Accessibility::from_label)
                .unwrap_or_default(),
        }
    }
}

impl From<RawStation> for StationRecord {
    fn from(raw: RawStation) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| raw.id.clone()),
            id: raw.id,
            lat: raw.lat,
            lon: raw.lon,
            total_trucks: raw.total_trucks.unwrap_or(DEFAULT_STATION_TRUCKS),
        }
    }
}

/// Parse `{"fires": [...]}`.
pub fn parse_fires(json: &str) -> Result<Vec<FireRecord>, RecordError> {
    let file: FireFile = serde_json::from_str(json)?;
    Ok(file.fires.into_iter().map(FireRecord::from).collect())
}

/// Parse `{"stations": [...]}` or the legacy single `{"station": {...}}` form.
pub fn parse_stations(json: &str) -> Result<Vec<StationRecord>, RecordError> {
    let file: StationFile = serde_json::from_str(json)?;
    match (file.stations, file.station) {
        (Some(list), _) => Ok(list.into_iter().map(StationRecord::from).collect()),
        (None, Some(single)) => Ok(vec![single.into()]),
        (None, None) => Err(RecordError::MissingStation),
    }
}
