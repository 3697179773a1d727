//! Trip sample documents (`{samples: [...]}`).
//!
//! Two shapes are accepted for each sample. The map export writes
//! `geometry.coordinates` as `[lon, lat]` plus `origin`/`destination`; the
//! sample builder writes `route` as `[lat, lng]` plus `access`/`egress`.
//! When both are present the first shape wins.

use serde::Deserialize;

use super::raw::{lat_lon, line_from, lon_lat, non_empty, RawId, RawLatLng};
use crate::identifiers::TripIdentifier;
use crate::models::types::*;

const SAMPLES: &str = "samples";

#[derive(Debug, Deserialize)]
struct RawSampleDocument {
    #[serde(default)]
    samples: Option<Vec<RawSample>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLineGeometry {
    #[serde(default)]
    coordinates: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Deserialize)]
struct RawSample {
    trip_id: RawId,
    #[serde(default)]
    geometry: Option<RawLineGeometry>,
    #[serde(default)]
    route: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    origin: Option<RawLatLng>,
    #[serde(default)]
    destination: Option<RawLatLng>,
    #[serde(default)]
    access: Option<RawLatLng>,
    #[serde(default)]
    egress: Option<RawLatLng>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    duration_min: Option<f64>,
    #[serde(default)]
    linked: Option<bool>,
}

impl From<RawSample> for TripSample {
    fn from(raw: RawSample) -> Self {
        let path = raw
            .geometry
            .and_then(|g| g.coordinates)
            .map(|c| line_from(&c, lon_lat))
            .or_else(|| raw.route.map(|c| line_from(&c, lat_lon)))
            .filter(|line| !line.0.is_empty());

        let origin = raw
            .origin
            .and_then(|o| o.endpoint())
            .or_else(|| raw.access.and_then(|a| a.endpoint()));
        let destination = raw
            .destination
            .and_then(|d| d.endpoint())
            .or_else(|| raw.egress.and_then(|e| e.endpoint()));

        TripSample {
            id: TripIdentifier::new(raw.trip_id.to_string()),
            path,
            origin,
            destination,
            mode: non_empty(raw.mode),
            duration_min: raw.duration_min.filter(|d| d.is_finite()),
            linked: raw.linked.unwrap_or(false),
        }
    }
}

/// Parse a samples document. A missing or null `samples` array is an empty list.
pub fn parse_samples(bytes: &[u8]) -> Result<Vec<TripSample>> {
    let document: RawSampleDocument =
        serde_json::from_slice(bytes).map_err(|e| TransitError::parse(SAMPLES, e))?;

    Ok(document
        .samples
        .unwrap_or_default()
        .into_iter()
        .map(TripSample::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, Point};

    #[test]
    fn test_parse_export_shape() {
        let doc = r#"{"samples": [{
            "trip_id": "T-1",
            "geometry": {"coordinates": [[-111.90, 40.76], [-111.89, 40.70]]},
            "origin": {"lat": 40.76, "lng": -111.90},
            "destination": {"lat": 40.70, "lng": -111.89}
        }]}"#;

        let samples = parse_samples(doc.as_bytes()).unwrap();
        assert_eq!(samples.len(), 1);

        let sample = &samples[0];
        assert_eq!(sample.id.as_str(), "T-1");
        assert_eq!(sample.path.as_ref().unwrap().0[0], coord! { x: -111.90, y: 40.76 });
        assert_eq!(sample.origin.as_ref().unwrap().location, Point::new(-111.90, 40.76));
        assert_eq!(sample.destination.as_ref().unwrap().location, Point::new(-111.89, 40.70));
        assert!(!sample.linked);
    }

    #[test]
    fn test_parse_builder_shape() {
        let doc = r#"{"meta": {"count": 1}, "samples": [{
            "trip_id": 88,
            "linked": true,
            "mode": "Bus",
            "duration_min": 34.5,
            "access": {"type": "bus_stop", "name": "State St", "lat": 40.76, "lng": -111.88},
            "egress": {"type": null, "name": null, "lat": null, "lng": null},
            "route": [[40.76, -111.88], [40.75, -111.87]]
        }]}"#;

        let samples = parse_samples(doc.as_bytes()).unwrap();
        let sample = &samples[0];
        assert_eq!(sample.id.as_str(), "88");
        assert!(sample.linked);
        assert_eq!(sample.mode.as_deref(), Some("Bus"));
        assert_eq!(sample.duration_min, Some(34.5));
        assert_eq!(sample.path.as_ref().unwrap().0[1], coord! { x: -111.87, y: 40.75 });

        let origin = sample.origin.as_ref().unwrap();
        assert_eq!(origin.name.as_deref(), Some("State St"));
        assert_eq!(origin.kind.as_deref(), Some("bus_stop"));
        assert!(sample.destination.is_none());
    }

    #[test]
    fn test_missing_samples_is_empty() {
        assert!(parse_samples(b"{}").unwrap().is_empty());
        assert!(parse_samples(br#"{"samples": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_sample_without_geometry() {
        let samples = parse_samples(br#"{"samples": [{"trip_id": "x", "geometry": {}}]}"#).unwrap();
        assert!(samples[0].path.is_none());
    }

    #[test]
    fn test_missing_trip_id_fails() {
        assert!(matches!(
            parse_samples(br#"{"samples": [{"route": []}]}"#),
            Err(TransitError::Parse { document: "samples", .. })
        ));
    }
}
