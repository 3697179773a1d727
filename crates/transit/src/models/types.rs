//! Core data types and enums for facility and trip data.

use std::sync::Arc;

use geo::{Geometry, LineString, MultiLineString, Point};

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// Canonical transport mode a facility or leg is rendered under.
///
/// "Unclassified" is modelled as `Option::None` by the classifiers, never as a
/// variant, so a layer can only ever be keyed by a real mode.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString,
    strum::EnumIter, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TransportMode {
    Bus,
    Rail,
}

// ============================================================================
// Facilities
// ============================================================================

/// A transit stop as read from the stops GeoJSON (`mode`, `stop_name`).
#[derive(Clone, Debug, PartialEq)]
pub struct StopFeature {
    pub name: Arc<str>,
    /// Raw mode attribute, kept verbatim for labels.
    pub mode: Option<Arc<str>>,
    pub location: Point,
}

/// A transit route as read from the routes GeoJSON (`routetype`, `route_name`).
///
/// `LineString` inputs are stored as a single-member `MultiLineString`.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteFeature {
    pub name: Arc<str>,
    pub route_type: Option<Arc<str>>,
    pub geometry: MultiLineString,
}

// ============================================================================
// Trip samples
// ============================================================================

/// A trip endpoint (origin/destination, or access/egress in builder output)
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    pub location: Point,
    /// e.g. "bus_stop", "parking"
    pub kind: Option<Arc<str>>,
    pub name: Option<Arc<str>>,
}

impl Endpoint {
    pub fn at(location: Point) -> Self {
        Self {
            location,
            kind: None,
            name: None,
        }
    }
}

/// One sampled trip. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct TripSample {
    pub id: TripIdentifier,
    pub path: Option<LineString>,
    pub origin: Option<Endpoint>,
    pub destination: Option<Endpoint>,
    pub mode: Option<Arc<str>>,
    pub duration_min: Option<f64>,
    pub linked: bool,
}

impl TripSample {
    pub fn new(id: impl Into<TripIdentifier>) -> Self {
        Self {
            id: id.into(),
            path: None,
            origin: None,
            destination: None,
            mode: None,
            duration_min: None,
            linked: false,
        }
    }
}

// ============================================================================
// Linked trips
// ============================================================================

/// One mode-homogeneous segment of a linked trip
#[derive(Clone, Debug, PartialEq)]
pub struct Leg {
    pub mode: Option<Arc<str>>,
    /// May hold fewer than two points when the source had no usable route.
    pub path: LineString,
}

impl Leg {
    /// A leg can only be drawn as a line when it has at least two points.
    pub fn is_drawable(&self) -> bool {
        self.path.0.len() >= 2
    }
}

/// One traveler's journey: ordered legs plus the transfer points between them
#[derive(Clone, Debug, PartialEq)]
pub struct LinkedTrip {
    pub id: LinkedTripIdentifier,
    pub legs: Vec<Leg>,
    pub transfers: Vec<Point>,
}

/// Spatial extent of the trip endpoints, usually a polygon per side
#[derive(Clone, Debug, PartialEq, Default)]
pub struct OdRegions {
    pub origin: Option<Geometry>,
    pub destination: Option<Geometry>,
}

/// Everything the O-D view draws at once
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LinkedTripSet {
    pub od: OdRegions,
    pub linked_trips: Vec<LinkedTrip>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Failed to fetch {location}: {reason}")]
    Fetch { location: String, reason: String },

    #[error("Failed to parse {document}: {reason}")]
    Parse { document: &'static str, reason: String },
}

impl TransitError {
    pub fn fetch(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(document: &'static str, reason: impl ToString) -> Self {
        Self::Parse {
            document,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;
