//! Shared raw shapes and coordinate helpers for the JSON documents.

use std::fmt;
use std::sync::Arc;

use geo::{coord, Coord, LineString, Point};
use serde::Deserialize;

use crate::models::types::Endpoint;

/// Identifiers arrive as strings or as bare numbers depending on the exporter.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Text(s) => f.write_str(s),
            RawId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// `{lat, lng}` / `{lat, lon}` objects, optionally with builder metadata
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawLatLng {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default, alias = "lon")]
    pub lng: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RawLatLng {
    pub fn point(&self) -> Option<Point> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Point::new(lng, lat))
            }
            _ => None,
        }
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        Some(Endpoint {
            location: self.point()?,
            kind: self.kind.as_deref().map(Arc::from),
            name: self.name.as_deref().map(Arc::from),
        })
    }
}

pub(super) fn lon_lat(position: &[f64]) -> Option<Coord> {
    match position {
        [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some(coord! { x: *lon, y: *lat }),
        _ => None,
    }
}

pub(super) fn lat_lon(position: &[f64]) -> Option<Coord> {
    match position {
        [lat, lon, ..] if lon.is_finite() && lat.is_finite() => Some(coord! { x: *lon, y: *lat }),
        _ => None,
    }
}

/// Builds a line from positions, dropping any that are not usable coordinates.
pub(super) fn line_from(positions: &[Vec<f64>], to_coord: fn(&[f64]) -> Option<Coord>) -> LineString {
    positions.iter().filter_map(|p| to_coord(p)).collect()
}

pub(super) fn non_empty(value: Option<String>) -> Option<Arc<str>> {
    value.filter(|s| !s.is_empty()).map(Arc::from)
}
