//! Primitives for sampled trips and linked trips.

use geo::{Centroid, Geometry, Point};
use trip_viz_transit::{Endpoint, Leg, OdRegions, TripSample, classify_leg_mode};

use crate::layers::{Label, Primitive, Shape};
use crate::render::curve::QuadraticCurve;
use crate::render::mode_color;
use crate::render::style::{
    DESTINATION_RED, NEUTRAL_GREY, ORIGIN_GREEN, Style, TRANSFER_AMBER, TRIP_NAVY,
};

const OD_ARC_BEND: f64 = 0.2;

/// How a linked trip is drawn relative to a highlighted one
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Emphasis {
    #[default]
    Normal,
    Highlighted,
    Dimmed,
}

impl Emphasis {
    fn apply(self, style: Style) -> Style {
        match self {
            Emphasis::Normal => style,
            Emphasis::Highlighted => style.with_weight(style.stroke.weight + 2.0),
            Emphasis::Dimmed => style.with_opacity(0.25),
        }
    }
}

/// The sample's route line, if it has at least two points
pub fn sample_route(sample: &TripSample) -> Option<Primitive> {
    let path = sample.path.as_ref().filter(|p| p.0.len() >= 2)?;
    Some(Primitive::polyline(path.clone(), Style::line(TRIP_NAVY, 4.0, 0.85)))
}

fn endpoint_marker(endpoint: &Endpoint, role: &str, color: palette::Srgb<u8>) -> Primitive {
    let label = Label {
        detail: endpoint.name.as_deref().map(str::to_owned),
        ..Label::tooltip(role)
    };
    Primitive::new(
        Shape::Marker {
            position: endpoint.location,
            radius: 7.0,
        },
        Style::marker(color, 3.0, 0.9),
    )
    .with_label(label)
}

/// Origin and destination markers, whichever the sample has
pub fn endpoint_markers(sample: &TripSample) -> Vec<Primitive> {
    let origin = sample
        .origin
        .as_ref()
        .map(|o| endpoint_marker(o, "Origin", ORIGIN_GREEN));
    let destination = sample
        .destination
        .as_ref()
        .map(|d| endpoint_marker(d, "Destination", DESTINATION_RED));

    origin.into_iter().chain(destination).collect()
}

/// A leg coloured by its mode; `None` when it has no drawable path.
///
/// Bus and rail legs take their mode colour; anything else (car, walk/bike)
/// is drawn as a grey dashed line.
pub fn leg_line(leg: &Leg, emphasis: Emphasis) -> Option<Primitive> {
    if !leg.is_drawable() {
        return None;
    }

    let style = match classify_leg_mode(leg.mode.as_deref()) {
        Some(mode) => Style::line(mode_color(mode), 4.0, 0.85),
        None => Style::line(NEUTRAL_GREY, 3.0, 0.85).with_dash(6.0, 6.0),
    };
    let primitive = Primitive::polyline(leg.path.clone(), emphasis.apply(style));

    Some(match leg.mode.as_deref() {
        Some(mode) => primitive.with_label(Label::tooltip(mode)),
        None => primitive,
    })
}

/// `index` is zero-based; labels count from one.
pub fn transfer_marker(point: Point, index: usize, emphasis: Emphasis) -> Primitive {
    Primitive::new(
        Shape::Marker {
            position: point,
            radius: 5.0,
        },
        emphasis.apply(Style::marker(TRANSFER_AMBER, 2.0, 0.9)),
    )
    .with_label(Label::tooltip(format!("Transfer {}", index + 1)))
}

fn region(geometry: &Geometry, title: &str, color: palette::Srgb<u8>) -> Option<Primitive> {
    matches!(geometry, Geometry::Polygon(_) | Geometry::MultiPolygon(_)).then(|| {
        Primitive::new(
            Shape::Region(geometry.clone()),
            Style::line(color, 2.0, 0.8).with_fill(color, 0.2),
        )
        .with_label(Label::tooltip(title))
    })
}

/// Origin and destination polygons, plus a curved arc between their centroids
/// when both exist.
pub fn od_primitives(od: &OdRegions) -> Vec<Primitive> {
    let mut primitives = Vec::new();

    if let Some(origin) = od.origin.as_ref().and_then(|g| region(g, "Origin area", ORIGIN_GREEN)) {
        primitives.push(origin);
    }
    if let Some(destination) = od
        .destination
        .as_ref()
        .and_then(|g| region(g, "Destination area", DESTINATION_RED))
    {
        primitives.push(destination);
    }

    let centroids = (
        od.origin.as_ref().and_then(|g| g.centroid()),
        od.destination.as_ref().and_then(|g| g.centroid()),
    );
    if let (Some(start), Some(end)) = centroids {
        primitives.push(Primitive::new(
            Shape::Curve(QuadraticCurve::arc(start, end, OD_ARC_BEND)),
            Style::line(TRIP_NAVY, 2.0, 0.7).with_dash(4.0, 6.0),
        ));
    }

    primitives
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, line_string, polygon};
    use trip_viz_transit::TripSample;

    use crate::render::style::{BUS_BLUE, RAIL_PURPLE};

    #[test]
    fn test_sample_route_needs_two_points() {
        let mut sample = TripSample::new("t");
        assert!(sample_route(&sample).is_none());

        sample.path = Some(line_string![(x: -111.9, y: 40.7)]);
        assert!(sample_route(&sample).is_none());

        sample.path = Some(line_string![(x: -111.9, y: 40.7), (x: -111.8, y: 40.8)]);
        let route = sample_route(&sample).unwrap();
        assert_eq!(route.style, Style::line(TRIP_NAVY, 4.0, 0.85));
    }

    #[test]
    fn test_endpoint_labels() {
        let mut sample = TripSample::new("t");
        sample.origin = Some(Endpoint::at(Point::new(-111.9, 40.7)));
        sample.destination = Some(Endpoint {
            location: Point::new(-111.8, 40.8),
            kind: None,
            name: Some("Murray Central".into()),
        });

        let markers = endpoint_markers(&sample);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].label, Some(Label::tooltip("Origin")));
        let destination = markers[1].label.as_ref().unwrap();
        assert_eq!(destination.title, "Destination");
        assert_eq!(destination.detail.as_deref(), Some("Murray Central"));
    }

    #[test]
    fn test_leg_styles() {
        let path = line_string![(x: -111.9, y: 40.7), (x: -111.8, y: 40.8)];
        let leg = |mode: Option<&str>, path: LineString| Leg {
            mode: mode.map(Into::into),
            path,
        };

        let bus = leg_line(&leg(Some("Bus"), path.clone()), Emphasis::Normal).unwrap();
        assert_eq!(bus.style.stroke.color, BUS_BLUE);

        let rail = leg_line(&leg(Some("TRAX"), path.clone()), Emphasis::Highlighted).unwrap();
        assert_eq!(rail.style.stroke.color, RAIL_PURPLE);
        assert_eq!(rail.style.stroke.weight, 6.0);

        let exported_rail = leg_line(&leg(Some("rail"), path.clone()), Emphasis::Normal).unwrap();
        assert_eq!(exported_rail.style.stroke.color, RAIL_PURPLE);
        assert!(exported_rail.style.dash.is_none());

        let exported_bus = leg_line(&leg(Some("bus"), path.clone()), Emphasis::Normal).unwrap();
        assert_eq!(exported_bus.style.stroke.color, BUS_BLUE);

        let car = leg_line(&leg(Some("car"), path.clone()), Emphasis::Normal).unwrap();
        assert_eq!(car.style.stroke.color, NEUTRAL_GREY);

        let walk = leg_line(&leg(Some("walk/bike"), path), Emphasis::Dimmed).unwrap();
        assert_eq!(walk.style.stroke.color, NEUTRAL_GREY);
        assert!(walk.style.dash.is_some());
        assert_eq!(walk.style.stroke.opacity, 0.25);

        assert!(leg_line(&leg(Some("Bus"), LineString::new(vec![])), Emphasis::Normal).is_none());
    }

    #[test]
    fn test_od_primitives() {
        let origin = polygon![
            (x: -111.92, y: 40.74), (x: -111.90, y: 40.74), (x: -111.90, y: 40.76), (x: -111.92, y: 40.76),
        ];
        let destination = polygon![
            (x: -111.82, y: 40.64), (x: -111.80, y: 40.64), (x: -111.80, y: 40.66), (x: -111.82, y: 40.66),
        ];

        let both = od_primitives(&OdRegions {
            origin: Some(Geometry::Polygon(origin.clone())),
            destination: Some(Geometry::Polygon(destination)),
        });
        assert_eq!(both.len(), 3);
        assert!(matches!(both[2].shape, Shape::Curve(_)));

        let origin_only = od_primitives(&OdRegions {
            origin: Some(Geometry::Polygon(origin)),
            destination: Some(Geometry::Point(Point::new(0.0, 0.0))),
        });
        // a point is not a region, but still anchors the arc
        assert_eq!(origin_only.len(), 2);
        assert!(od_primitives(&OdRegions::default()).is_empty());
    }
}
