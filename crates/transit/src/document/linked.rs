//! Linked-trip documents (`{od: {...}, linked_trips: [...]}`).

use geo::{Geometry, Point};
use serde::Deserialize;

use super::raw::{lat_lon, line_from, non_empty, RawId, RawLatLng};
use crate::identifiers::LinkedTripIdentifier;
use crate::models::types::*;

const LINKED_TRIPS: &str = "linked trips";

#[derive(Debug, Deserialize)]
struct RawLinkedDocument {
    #[serde(default)]
    od: Option<RawOd>,
    #[serde(default)]
    linked_trips: Option<Vec<RawLinkedTrip>>,
}

#[derive(Debug, Deserialize)]
struct RawOd {
    #[serde(default)]
    origin: Option<RawRegion>,
    #[serde(default)]
    destination: Option<RawRegion>,
}

#[derive(Debug, Deserialize)]
struct RawRegion {
    #[serde(default)]
    geometry: Option<geojson::Geometry>,
}

#[derive(Debug, Deserialize)]
struct RawLinkedTrip {
    linked_trip_id: RawId,
    #[serde(default)]
    legs: Vec<RawLeg>,
    #[serde(default)]
    transfers: Vec<RawLatLng>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    route: Option<Vec<Vec<f64>>>,
}

fn region(raw: Option<RawRegion>, side: &str) -> Option<Geometry> {
    let geometry = raw?.geometry?;
    match Geometry::try_from(geometry) {
        Ok(geometry) => Some(geometry),
        Err(e) => {
            tracing::warn!(side, error = %e, "dropping unusable O-D region");
            None
        }
    }
}

impl From<RawLinkedTrip> for LinkedTrip {
    fn from(raw: RawLinkedTrip) -> Self {
        LinkedTrip {
            id: LinkedTripIdentifier::new(raw.linked_trip_id.to_string()),
            legs: raw
                .legs
                .into_iter()
                .map(|leg| Leg {
                    mode: non_empty(leg.mode),
                    path: line_from(leg.route.as_deref().unwrap_or_default(), lat_lon),
                })
                .collect(),
            transfers: raw.transfers.iter().filter_map(RawLatLng::point).collect::<Vec<Point>>(),
        }
    }
}

/// Parse a linked-trip document.
///
/// Legs keep their position even when their route is unusable, so callers can
/// report them; drawing code checks [`Leg::is_drawable`].
pub fn parse_linked_trips(bytes: &[u8]) -> Result<LinkedTripSet> {
    let document: RawLinkedDocument =
        serde_json::from_slice(bytes).map_err(|e| TransitError::parse(LINKED_TRIPS, e))?;

    let od = match document.od {
        Some(od) => OdRegions {
            origin: region(od.origin, "origin"),
            destination: region(od.destination, "destination"),
        },
        None => OdRegions::default(),
    };

    Ok(LinkedTripSet {
        od,
        linked_trips: document
            .linked_trips
            .unwrap_or_default()
            .into_iter()
            .map(LinkedTrip::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    const DOC: &str = r#"{
        "od": {
            "origin": {"geometry": {"type": "Polygon", "coordinates": [[
                [-111.91, 40.75], [-111.89, 40.75], [-111.89, 40.77], [-111.91, 40.75]
            ]]}},
            "destination": {"geometry": null}
        },
        "linked_trips": [{
            "linked_trip_id": 7,
            "legs": [
                {"mode": "Bus", "route": [[40.76, -111.90], [40.74, -111.88]]},
                {"mode": "TRAX", "route": [[40.74, -111.88]]},
                {"mode": "walk"}
            ],
            "transfers": [{"lat": 40.74, "lon": -111.88}, {"lat": null, "lon": 1.0}]
        }]
    }"#;

    #[test]
    fn test_parse_linked_trips() {
        let set = parse_linked_trips(DOC.as_bytes()).unwrap();

        assert!(matches!(set.od.origin, Some(Geometry::Polygon(_))));
        assert!(set.od.destination.is_none());

        let trip = &set.linked_trips[0];
        assert_eq!(trip.id.as_str(), "7");
        assert_eq!(trip.legs.len(), 3);
        assert_eq!(trip.legs[0].path.0[0], coord! { x: -111.90, y: 40.76 });
        assert!(trip.legs[0].is_drawable());
        assert!(!trip.legs[1].is_drawable());
        assert!(trip.legs[2].path.0.is_empty());
        assert_eq!(trip.transfers, vec![Point::new(-111.88, 40.74)]);
    }

    #[test]
    fn test_empty_document() {
        let set = parse_linked_trips(b"{}").unwrap();
        assert_eq!(set, LinkedTripSet::default());
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            parse_linked_trips(br#"{"linked_trips": {}}"#),
            Err(TransitError::Parse { document: "linked trips", .. })
        ));
    }
}
