//! Turning classified features into primitives.
//!
//! Rendering is a classify-then-route visitor: each [`Facility`] classifies
//! itself, a [`FacilityPainter`] builds the primitive for that mode, and the
//! result lands in the layer registered for the mode. Nothing here knows
//! which map engine will draw the primitives.

use palette::Srgb;
use trip_viz_transit::{Facility, RailLines, RouteFeature, StopFeature, TransportMode};

use crate::layers::{Label, LayerHandle, LayerRegistry, Primitive, Shape};
use crate::map::MapSurface;
use crate::render::style::{BUS_BLUE, RAIL_PURPLE, Style};

pub mod curve;
pub mod style;
pub mod trip;

pub fn mode_color(mode: TransportMode) -> Srgb<u8> {
    match mode {
        TransportMode::Bus => BUS_BLUE,
        TransportMode::Rail => RAIL_PURPLE,
    }
}

/// Builds the primitive for a feature that has already been classified
pub trait FacilityPainter<F: Facility> {
    fn paint(&self, feature: &F, mode: TransportMode) -> Primitive;
}

fn facility_label<F: Facility>(feature: &F) -> Label {
    let label = feature.label();
    Label::popup(label.title, label.detail)
}

/// Circle markers for stops
#[derive(Clone, Copy, Debug, Default)]
pub struct StopPainter;

impl FacilityPainter<StopFeature> for StopPainter {
    fn paint(&self, stop: &StopFeature, mode: TransportMode) -> Primitive {
        Primitive::new(
            Shape::Marker {
                position: stop.location,
                radius: 4.0,
            },
            Style::marker(mode_color(mode), 1.0, 0.9),
        )
        .with_label(facility_label(stop))
    }
}

/// Thin translucent lines for routes
#[derive(Clone, Copy, Debug, Default)]
pub struct RoutePainter;

impl FacilityPainter<RouteFeature> for RoutePainter {
    fn paint(&self, route: &RouteFeature, mode: TransportMode) -> Primitive {
        Primitive::new(
            Shape::Polyline(route.geometry.clone()),
            Style::line(mode_color(mode), 2.0, 0.6),
        )
        .with_label(facility_label(route))
    }
}

/// One destination layer per mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeLayers {
    pub bus: LayerHandle,
    pub rail: LayerHandle,
}

impl ModeLayers {
    pub fn for_mode(&self, mode: TransportMode) -> LayerHandle {
        match mode {
            TransportMode::Bus => self.bus,
            TransportMode::Rail => self.rail,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub bus: usize,
    pub rail: usize,
    /// Features that classified to no mode
    pub skipped: usize,
}

impl RenderReport {
    pub fn rendered(&self) -> usize {
        self.bus + self.rail
    }
}

/// Replace the contents of both mode layers with the given features.
///
/// Safe to call repeatedly: the destination layers are emptied first, so a
/// reload never accumulates duplicates.
pub fn render_facilities<F, P, M>(
    features: &[F],
    targets: ModeLayers,
    rail_lines: &RailLines,
    painter: &P,
    registry: &mut LayerRegistry,
    map: &mut M,
) -> RenderReport
where
    F: Facility,
    P: FacilityPainter<F>,
    M: MapSurface + ?Sized,
{
    let mut bus = Vec::new();
    let mut rail = Vec::new();
    let mut skipped = 0;

    for feature in features {
        match feature.classify(rail_lines) {
            Some(mode @ TransportMode::Bus) => bus.push(painter.paint(feature, mode)),
            Some(mode @ TransportMode::Rail) => rail.push(painter.paint(feature, mode)),
            None => skipped += 1,
        }
    }

    let report = RenderReport {
        bus: bus.len(),
        rail: rail.len(),
        skipped,
    };

    registry.replace(targets.bus, bus, map);
    registry.replace(targets.rail, rail, map);

    report
}
