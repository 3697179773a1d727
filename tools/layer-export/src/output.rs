use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use itertools::Itertools;
use serde::Serialize;
use serde_json::json;
use std::path::Path;

use trip_viz_core::layers::{LabelKind, Primitive, Shape};
use trip_viz_core::map::{AttachedGroup, HeadlessMap, MapView};
use trip_viz_core::render::curve::unprojected;
use trip_viz_core::render::style::hex;

/// Segments a quadratic curve is flattened into
const CURVE_SEGMENTS: usize = 32;

fn shape_to_geojson(shape: &Shape) -> Value {
    match shape {
        Shape::Marker { position, .. } => Value::from(position),
        Shape::Polyline(lines) => Value::from(lines),
        Shape::Region(geometry) => Value::from(geometry),
        Shape::Curve(curve) => Value::from(&curve.sample(CURVE_SEGMENTS)),
    }
}

fn shape_kind(shape: &Shape) -> &'static str {
    match shape {
        Shape::Marker { .. } => "marker",
        Shape::Polyline(_) => "polyline",
        Shape::Region(_) => "region",
        Shape::Curve(_) => "curve",
    }
}

/// Style keys follow the simplestyle names most GeoJSON viewers understand
fn primitive_to_feature(primitive: &Primitive, layer: &str) -> Feature {
    let style = &primitive.style;

    let mut properties = serde_json::Map::new();
    properties.insert("layer".to_string(), json!(layer));
    properties.insert("kind".to_string(), json!(shape_kind(&primitive.shape)));
    properties.insert("stroke".to_string(), json!(hex(style.stroke.color)));
    properties.insert("stroke-width".to_string(), json!(style.stroke.weight));
    properties.insert("stroke-opacity".to_string(), json!(style.stroke.opacity));

    if let Some(fill) = &style.fill {
        properties.insert("fill".to_string(), json!(hex(fill.color)));
        properties.insert("fill-opacity".to_string(), json!(fill.opacity));
    }
    if let Some([dash, gap]) = style.dash {
        properties.insert("dash-array".to_string(), json!(format!("{dash} {gap}")));
    }
    match &primitive.shape {
        Shape::Marker { radius, .. } => {
            properties.insert("radius".to_string(), json!(radius));
        }
        Shape::Curve(curve) => {
            properties.insert("svg_path".to_string(), json!(curve.svg_path(unprojected)));
        }
        Shape::Polyline(_) | Shape::Region(_) => {}
    }
    if let Some(label) = &primitive.label {
        properties.insert("title".to_string(), json!(label.title));
        if let Some(detail) = &label.detail {
            properties.insert("detail".to_string(), json!(detail));
        }
        let kind = match label.kind {
            LabelKind::Popup => "popup",
            LabelKind::Tooltip => "tooltip",
        };
        properties.insert("label".to_string(), json!(kind));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(shape_to_geojson(&primitive.shape))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// `linked_trip/7` becomes `linked_trip_7.geojson`
fn layer_file_name(group: &AttachedGroup) -> String {
    format!("{}.geojson", group.name.as_str().replace(['/', '\\'], "_"))
}

fn write_group(group: &AttachedGroup, output_path: &Path) -> Result<()> {
    let layer = group.name.as_str();
    let features = group
        .primitives
        .iter()
        .map(|p| primitive_to_feature(p, layer))
        .collect();

    let feature_collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    let geojson = GeoJson::from(feature_collection);
    let json_string = serde_json::to_string_pretty(&geojson).context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))
}

/// Write every group attached to the map, one file per group. Returns the
/// number of files written.
pub fn write_layers(map: &HeadlessMap, output_dir: &Path) -> Result<usize> {
    let mut written = 0;

    for (_, group) in map.groups() {
        let path = output_dir.join(layer_file_name(group));
        tracing::info!(
            "Writing {} primitives of {} to {}",
            group.primitives.len(),
            group.name,
            path.display()
        );
        write_group(group, &path)?;
        written += 1;
    }

    Ok(written)
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ViewExport {
    /// `[lat, lng]`
    Centered { center: [f64; 2], zoom: u8 },
    /// `[west, south, east, north]`
    Fitted { bounds: [f64; 4], padding: [u32; 2] },
}

impl From<MapView> for ViewExport {
    fn from(view: MapView) -> Self {
        match view {
            MapView::Centered { center, zoom } => Self::Centered {
                center: [center.y(), center.x()],
                zoom,
            },
            MapView::Fitted { bounds, padding } => Self::Fitted {
                bounds: [bounds.min().x, bounds.min().y, bounds.max().x, bounds.max().y],
                padding: [padding.x, padding.y],
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct TileExport<'a> {
    name: &'a str,
    url_template: &'a str,
    attribution: &'a str,
}

#[derive(Debug, Serialize)]
struct MapExport<'a> {
    view: Option<ViewExport>,
    basemaps: Vec<TileExport<'a>>,
    layers: Vec<&'a str>,
}

/// Describe the final view, attached tile layers and layer names
pub fn write_view(map: &HeadlessMap, output_path: &Path) -> Result<()> {
    let export = MapExport {
        view: map.view().map(ViewExport::from),
        basemaps: map
            .tiles()
            .map(|(name, source)| TileExport {
                name: name.as_str(),
                url_template: &source.url_template,
                attribution: &source.attribution,
            })
            .collect(),
        layers: map.groups().map(|(_, g)| g.name.as_str()).sorted().collect(),
    };

    let json_string = serde_json::to_string_pretty(&export).context("Failed to serialize view")?;
    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write view to {}", output_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, Point};
    use trip_viz_core::config::TileSource;
    use trip_viz_core::layers::{Label, LayerRegistry};
    use trip_viz_core::render::curve::QuadraticCurve;
    use trip_viz_core::map::{MapSurface, Padding};
    use trip_viz_core::render::style::{Style, BUS_BLUE, NEUTRAL_GREY};

    fn populated_map() -> HeadlessMap {
        let mut map = HeadlessMap::new();
        let mut registry = LayerRegistry::new();

        let stops = registry.register("bus_stop");
        let trip = registry.register("linked_trip/7");
        let hidden = registry.register("rail_stop");

        registry.replace(
            stops,
            vec![Primitive::new(
                Shape::Marker {
                    position: Point::new(-111.8879, 40.7606),
                    radius: 4.0,
                },
                Style::marker(BUS_BLUE, 1.0, 0.9),
            )
            .with_label(Label::popup("State St", Some("Bus".into())))],
            &mut map,
        );
        registry.replace(
            trip,
            vec![Primitive::polyline(
                line_string![(x: -111.9, y: 40.76), (x: -111.88, y: 40.74)],
                Style::line(NEUTRAL_GREY, 3.0, 0.85).with_dash(6.0, 6.0),
            )],
            &mut map,
        );
        registry.replace(hidden, Vec::new(), &mut map);

        registry.set_visible(stops, true, &mut map);
        registry.set_visible(trip, true, &mut map);
        map
    }

    fn read_features(path: &Path) -> Vec<Feature> {
        let text = std::fs::read_to_string(path).unwrap();
        match text.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => fc.features,
            other => panic!("expected a feature collection, got {other:?}"),
        }
    }

    #[test]
    fn test_write_visible_layers() {
        let dir = tempfile::tempdir().unwrap();
        let map = populated_map();

        assert_eq!(write_layers(&map, dir.path()).unwrap(), 2);
        assert!(!dir.path().join("rail_stop.geojson").exists());

        let stops = read_features(&dir.path().join("bus_stop.geojson"));
        assert_eq!(stops.len(), 1);
        let props = stops[0].properties.as_ref().unwrap();
        assert_eq!(props["kind"], "marker");
        assert_eq!(props["stroke"], "#2563eb");
        assert_eq!(props["title"], "State St");
        assert_eq!(props["detail"], "Bus");
        assert_eq!(props["label"], "popup");

        let legs = read_features(&dir.path().join("linked_trip_7.geojson"));
        let props = legs[0].properties.as_ref().unwrap();
        assert_eq!(props["kind"], "polyline");
        assert_eq!(props["dash-array"], "6 6");
        assert!(matches!(
            legs[0].geometry.as_ref().unwrap().value,
            Value::MultiLineString(_)
        ));
    }

    #[test]
    fn test_curve_exports_path_data() {
        let curve = QuadraticCurve::new(
            Point::new(-112.0, 40.5),
            Point::new(-111.75, 41.0),
            Point::new(-111.5, 40.5),
        );
        let feature = primitive_to_feature(
            &Primitive::new(Shape::Curve(curve), Style::line(NEUTRAL_GREY, 2.0, 0.7)),
            "od_region",
        );

        let props = feature.properties.unwrap();
        assert_eq!(props["kind"], "curve");
        assert_eq!(props["svg_path"], "M-112,40.5 Q-111.75,41 -111.5,40.5");
        match feature.geometry.unwrap().value {
            Value::LineString(points) => assert_eq!(points.len(), CURVE_SEGMENTS + 1),
            other => panic!("expected a line string, got {other:?}"),
        }
    }

    #[test]
    fn test_write_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut map = populated_map();
        map.add_tiles(&"light".into(), &TileSource::carto("light_all"));
        map.fit_bounds(
            geo::Rect::new((-112.0, 40.5), (-111.5, 41.0)),
            Padding::uniform(30),
        );

        let path = dir.path().join("view.json");
        write_view(&map, &path).unwrap();

        let view: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(view["view"]["kind"], "fitted");
        assert_eq!(view["view"]["bounds"], json!([-112.0, 40.5, -111.5, 41.0]));
        assert_eq!(view["view"]["padding"], json!([30, 30]));
        assert_eq!(view["basemaps"][0]["name"], "light");
        assert_eq!(view["layers"], json!(["bus_stop", "linked_trip/7"]));
    }
}
