//! The origin-destination view: O-D regions plus every linked trip, each in
//! its own sub-group so it can be toggled or highlighted on its own.

use std::collections::HashSet;

use geo::Rect;
use trip_viz_transit::spatial::Extent;
use trip_viz_transit::{LinkedTrip, LinkedTripIdentifier, LinkedTripSet};

use crate::error::{Result, ViewerError};
use crate::layers::{LayerHandle, LayerRegistry, Primitive};
use crate::map::MapSurface;
use crate::render::trip::{Emphasis, leg_line, od_primitives, transfer_marker};
use crate::selector::TRIP_PADDING;

pub const OD_REGION_LAYER: &str = "od_region";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OdRenderReport {
    pub trips: usize,
    pub legs_rendered: usize,
    /// Legs with fewer than two usable points
    pub legs_skipped: usize,
    /// Trips dropped because an earlier trip had the same id
    pub duplicates: usize,
    pub transfers: usize,
    /// Union of the rendered legs; the view is fit to this
    pub bounds: Option<Rect>,
}

#[derive(Debug)]
struct TripGroup {
    id: LinkedTripIdentifier,
    handle: LayerHandle,
}

struct DrawnTrip {
    primitives: Vec<Primitive>,
    legs_rendered: usize,
    legs_skipped: usize,
    extent: Extent,
}

fn draw_trip(trip: &LinkedTrip, emphasis: Emphasis) -> DrawnTrip {
    let mut drawn = DrawnTrip {
        primitives: Vec::with_capacity(trip.legs.len() + trip.transfers.len()),
        legs_rendered: 0,
        legs_skipped: 0,
        extent: Extent::new(),
    };

    for leg in &trip.legs {
        match leg_line(leg, emphasis) {
            Some(line) => {
                drawn.extent.include(&leg.path);
                drawn.primitives.push(line);
                drawn.legs_rendered += 1;
            }
            None => drawn.legs_skipped += 1,
        }
    }

    drawn.primitives.extend(
        trip.transfers
            .iter()
            .enumerate()
            .map(|(i, point)| transfer_marker(*point, i, emphasis)),
    );

    drawn
}

#[derive(Debug)]
pub struct OdView {
    region_layer: LayerHandle,
    trips: Vec<TripGroup>,
    set: LinkedTripSet,
    highlighted: Option<LinkedTripIdentifier>,
}

impl OdView {
    pub fn new(registry: &mut LayerRegistry) -> Self {
        Self {
            region_layer: registry.register(OD_REGION_LAYER),
            trips: Vec::new(),
            set: LinkedTripSet::default(),
            highlighted: None,
        }
    }

    pub fn region_layer(&self) -> LayerHandle {
        self.region_layer
    }

    pub fn trip_layer(&self, id: &LinkedTripIdentifier) -> Option<LayerHandle> {
        self.trips.iter().find(|t| &t.id == id).map(|t| t.handle)
    }

    pub fn linked_trips(&self) -> &[LinkedTrip] {
        &self.set.linked_trips
    }

    pub fn highlighted(&self) -> Option<&LinkedTripIdentifier> {
        self.highlighted.as_ref()
    }

    fn emphasis(&self, id: &LinkedTripIdentifier) -> Emphasis {
        match &self.highlighted {
            None => Emphasis::Normal,
            Some(h) if h == id => Emphasis::Highlighted,
            Some(_) => Emphasis::Dimmed,
        }
    }

    /// Draw a full linked-trip set, replacing the previous one, and fit the
    /// view to the rendered legs.
    ///
    /// Ids must be unique within a set; later trips reusing an id are
    /// dropped. Groups of trips missing from the new set are emptied and
    /// hidden, and their names stay registered so a returning id gets its
    /// old group back.
    pub fn render<M: MapSurface + ?Sized>(
        &mut self,
        mut set: LinkedTripSet,
        registry: &mut LayerRegistry,
        map: &mut M,
    ) -> OdRenderReport {
        for stale in self.trips.drain(..) {
            registry.clear(stale.handle, map);
            registry.set_visible(stale.handle, false, map);
        }
        self.highlighted = None;

        registry.replace(self.region_layer, od_primitives(&set.od), map);
        registry.set_visible(self.region_layer, true, map);

        let mut report = OdRenderReport::default();
        let mut extent = Extent::new();

        let mut seen = HashSet::new();
        set.linked_trips.retain(|trip| {
            let first = seen.insert(trip.id.clone());
            if !first {
                tracing::warn!(linked_trip = %trip.id, "dropping linked trip with a duplicate id");
                report.duplicates += 1;
            }
            first
        });

        for trip in &set.linked_trips {
            let handle = registry.register(format!("linked_trip/{}", trip.id));
            let drawn = draw_trip(trip, Emphasis::Normal);

            report.trips += 1;
            report.legs_rendered += drawn.legs_rendered;
            report.legs_skipped += drawn.legs_skipped;
            report.transfers += trip.transfers.len();
            if let Some(rect) = drawn.extent.rect() {
                extent.include_rect(rect);
            }
            if drawn.legs_skipped > 0 {
                tracing::debug!(linked_trip = %trip.id, skipped = drawn.legs_skipped, "skipped legs without a usable path");
            }

            registry.replace(handle, drawn.primitives, map);
            registry.set_visible(handle, true, map);
            self.trips.push(TripGroup {
                id: trip.id.clone(),
                handle,
            });
        }

        report.bounds = extent.rect();
        if let Some(bounds) = report.bounds {
            map.fit_bounds(bounds, TRIP_PADDING);
        }

        tracing::info!(
            trips = report.trips,
            legs = report.legs_rendered,
            skipped = report.legs_skipped,
            "rendered linked trips"
        );
        self.set = set;
        report
    }

    pub fn set_trip_visible<M: MapSurface + ?Sized>(
        &self,
        id: &LinkedTripIdentifier,
        visible: bool,
        registry: &mut LayerRegistry,
        map: &mut M,
    ) -> Result<()> {
        let handle = self
            .trip_layer(id)
            .ok_or_else(|| ViewerError::UnknownSample(id.to_string()))?;
        registry.set_visible(handle, visible, map);
        Ok(())
    }

    /// Emphasise one linked trip and dim the rest; `None` restores all.
    pub fn highlight<M: MapSurface + ?Sized>(
        &mut self,
        id: Option<&LinkedTripIdentifier>,
        registry: &mut LayerRegistry,
        map: &mut M,
    ) -> Result<()> {
        if let Some(id) = id {
            if self.trip_layer(id).is_none() {
                return Err(ViewerError::UnknownSample(id.to_string()));
            }
        }
        self.highlighted = id.cloned();

        for (trip, group) in self.set.linked_trips.iter().zip(&self.trips) {
            let drawn = draw_trip(trip, self.emphasis(&trip.id));
            registry.replace(group.handle, drawn.primitives, map);
        }
        Ok(())
    }
}
