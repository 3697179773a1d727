//! Stop and route GeoJSON feature collections.

use std::sync::Arc;

use geo::{LineString, MultiLineString, Point};
use geojson::{Feature, FeatureCollection, GeoJson};

use super::raw::{line_from, lon_lat};
use crate::models::types::*;

const STOPS: &str = "stops";
const ROUTES: &str = "routes";

fn feature_collection(bytes: &[u8], document: &'static str) -> Result<FeatureCollection> {
    let geojson: GeoJson =
        serde_json::from_slice(bytes).map_err(|e| TransitError::parse(document, e))?;
    FeatureCollection::try_from(geojson).map_err(|e| TransitError::parse(document, e))
}

/// String-or-number property as text; empty strings count as absent.
fn text_property(feature: &Feature, name: &str) -> Option<Arc<str>> {
    match feature.property(name)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(Arc::from(s.as_str())),
        serde_json::Value::Number(n) => Some(Arc::from(n.to_string())),
        _ => None,
    }
}

fn point_of(feature: &Feature) -> Option<Point> {
    match &feature.geometry.as_ref()?.value {
        geojson::Value::Point(position) => lon_lat(position).map(Point::from),
        _ => None,
    }
}

fn lines_of(feature: &Feature) -> Option<MultiLineString> {
    let lines: Vec<LineString> = match &feature.geometry.as_ref()?.value {
        geojson::Value::LineString(positions) => vec![line_from(positions, lon_lat)],
        geojson::Value::MultiLineString(parts) => {
            parts.iter().map(|p| line_from(p, lon_lat)).collect()
        }
        _ => return None,
    };

    let lines: Vec<LineString> = lines.into_iter().filter(|l| l.0.len() >= 2).collect();
    (!lines.is_empty()).then(|| MultiLineString::new(lines))
}

/// Parse the stops document (`properties.mode`, `properties.stop_name`, point geometry).
///
/// Features without a usable point are left out; classification is not
/// applied here.
pub fn parse_stops(bytes: &[u8]) -> Result<Vec<StopFeature>> {
    let collection = feature_collection(bytes, STOPS)?;
    let total = collection.features.len();

    let stops: Vec<StopFeature> = collection
        .features
        .iter()
        .filter_map(|feature| {
            Some(StopFeature {
                location: point_of(feature)?,
                name: text_property(feature, "stop_name").unwrap_or_else(|| "Unnamed stop".into()),
                mode: text_property(feature, "mode"),
            })
        })
        .collect();

    if stops.len() < total {
        tracing::debug!(skipped = total - stops.len(), "stop features without a point geometry");
    }

    Ok(stops)
}

/// Parse the routes document (`properties.routetype`, `properties.route_name`,
/// line or multi-line geometry).
pub fn parse_routes(bytes: &[u8]) -> Result<Vec<RouteFeature>> {
    let collection = feature_collection(bytes, ROUTES)?;
    let total = collection.features.len();

    let routes: Vec<RouteFeature> = collection
        .features
        .iter()
        .filter_map(|feature| {
            Some(RouteFeature {
                geometry: lines_of(feature)?,
                name: text_property(feature, "route_name")
                    .unwrap_or_else(|| "Unnamed route".into()),
                route_type: text_property(feature, "routetype"),
            })
        })
        .collect();

    if routes.len() < total {
        tracing::debug!(skipped = total - routes.len(), "route features without a line geometry");
    }

    Ok(routes)
}
