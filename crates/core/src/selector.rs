//! The flat trip-sample list and the single active sample.

use trip_viz_transit::{TripIdentifier, TripSample};

use crate::error::{Result, ViewerError};
use crate::layers::{LayerHandle, LayerRegistry};
use crate::map::{MapSurface, Padding};
use crate::render::trip::{endpoint_markers, sample_route};

pub const TRIP_PADDING: Padding = Padding::uniform(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorState {
    /// Nothing loaded yet
    Empty,
    /// Loaded (possibly zero samples), nothing selected
    Listed,
    /// Index of the sample currently drawn
    Active(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleRow {
    pub index: usize,
    pub trip_id: TripIdentifier,
    pub text: String,
}

/// What the sample panel should show
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SampleList {
    NoSamples,
    Rows(Vec<SampleRow>),
}

/// The layers a selected sample is drawn into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TripLayers {
    pub route: LayerHandle,
    /// Origin and destination markers
    pub endpoints: LayerHandle,
}

#[derive(Debug)]
pub struct SampleSelector {
    samples: Vec<TripSample>,
    state: SelectorState,
    layers: TripLayers,
}

impl SampleSelector {
    pub fn new(layers: TripLayers) -> Self {
        Self {
            samples: Vec::new(),
            state: SelectorState::Empty,
            layers,
        }
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn samples(&self) -> &[TripSample] {
        &self.samples
    }

    pub fn layers(&self) -> TripLayers {
        self.layers
    }

    pub fn active(&self) -> Option<&TripSample> {
        match self.state {
            SelectorState::Active(index) => self.samples.get(index),
            _ => None,
        }
    }

    /// Replace the sample list. Whatever was drawn for the previous list is
    /// removed.
    pub fn load<M: MapSurface + ?Sized>(
        &mut self,
        samples: Vec<TripSample>,
        registry: &mut LayerRegistry,
        map: &mut M,
    ) {
        registry.clear(self.layers.route, map);
        registry.clear(self.layers.endpoints, map);
        self.samples = samples;
        self.state = SelectorState::Listed;
    }

    pub fn list(&self) -> SampleList {
        if self.samples.is_empty() {
            return SampleList::NoSamples;
        }

        SampleList::Rows(
            self.samples
                .iter()
                .enumerate()
                .map(|(index, sample)| SampleRow {
                    index,
                    trip_id: sample.id.clone(),
                    text: format!("Sample {}: {}", index + 1, sample.id),
                })
                .collect(),
        )
    }

    /// Draw sample `index`, replacing anything previously drawn.
    pub fn select<M: MapSurface + ?Sized>(
        &mut self,
        index: usize,
        registry: &mut LayerRegistry,
        map: &mut M,
    ) -> Result<&TripSample> {
        let sample = self
            .samples
            .get(index)
            .ok_or_else(|| ViewerError::UnknownSample(format!("#{}", index + 1)))?;

        let route = sample_route(sample);
        let bounds = route.as_ref().and_then(|r| r.bounding_rect());

        registry.replace(self.layers.route, route.into_iter().collect(), map);
        registry.replace(self.layers.endpoints, endpoint_markers(sample), map);

        if let Some(bounds) = bounds {
            map.fit_bounds(bounds, TRIP_PADDING);
        }

        tracing::debug!(trip_id = %sample.id, index, "selected sample");
        self.state = SelectorState::Active(index);
        Ok(sample)
    }

    pub fn select_id<M: MapSurface + ?Sized>(
        &mut self,
        id: &TripIdentifier,
        registry: &mut LayerRegistry,
        map: &mut M,
    ) -> Result<&TripSample> {
        let index = self
            .samples
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| ViewerError::UnknownSample(id.to_string()))?;
        self.select(index, registry, map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Shape;
    use crate::map::{HeadlessMap, MapView};
    use geo::{Point, line_string};
    use trip_viz_transit::Endpoint;

    fn sample(id: &str, x: f64) -> TripSample {
        let mut sample = TripSample::new(id);
        sample.path = Some(line_string![(x: x, y: 40.70), (x: x + 0.25, y: 40.75)]);
        sample.origin = Some(Endpoint::at(Point::new(x, 40.70)));
        sample.destination = Some(Endpoint::at(Point::new(x + 0.25, 40.75)));
        sample
    }

    fn setup() -> (SampleSelector, LayerRegistry, HeadlessMap) {
        let mut registry = LayerRegistry::new();
        let mut map = HeadlessMap::new();
        let layers = TripLayers {
            route: registry.register("trip_route"),
            endpoints: registry.register("access_egress"),
        };
        registry.set_visible(layers.route, true, &mut map);
        registry.set_visible(layers.endpoints, true, &mut map);
        (SampleSelector::new(layers), registry, map)
    }

    #[test]
    fn test_states() {
        let (mut selector, mut registry, mut map) = setup();
        assert_eq!(selector.state(), SelectorState::Empty);
        assert_eq!(selector.list(), SampleList::NoSamples);

        selector.load(vec![], &mut registry, &mut map);
        assert_eq!(selector.state(), SelectorState::Listed);
        assert_eq!(selector.list(), SampleList::NoSamples);

        selector.load(vec![sample("A", -112.0)], &mut registry, &mut map);
        selector.select(0, &mut registry, &mut map).unwrap();
        assert_eq!(selector.state(), SelectorState::Active(0));
        assert_eq!(selector.active().unwrap().id.as_str(), "A");
    }

    #[test]
    fn test_rows() {
        let (mut selector, mut registry, mut map) = setup();
        selector.load(vec![sample("A", -112.0), sample("B", -111.5)], &mut registry, &mut map);

        let SampleList::Rows(rows) = selector.list() else {
            panic!("expected rows");
        };
        assert_eq!(rows[1].text, "Sample 2: B");
        assert_eq!(rows[1].index, 1);
    }

    #[test]
    fn test_selection_replaces_previous_trip() {
        let (mut selector, mut registry, mut map) = setup();
        let a = sample("A", -112.0);
        let b = sample("B", -111.5);
        selector.load(vec![a, b.clone()], &mut registry, &mut map);

        selector.select(0, &mut registry, &mut map).unwrap();
        selector.select(1, &mut registry, &mut map).unwrap();

        let route = &map.group(selector.layers().route).unwrap().primitives;
        assert_eq!(route.len(), 1);
        assert!(matches!(&route[0].shape, Shape::Polyline(lines) if lines.0[0] == *b.path.as_ref().unwrap()));

        let endpoints = &map.group(selector.layers().endpoints).unwrap().primitives;
        let positions: Vec<Point> = endpoints
            .iter()
            .filter_map(|p| match p.shape {
                Shape::Marker { position, .. } => Some(position),
                _ => None,
            })
            .collect();
        assert_eq!(positions, vec![Point::new(-111.5, 40.70), Point::new(-111.25, 40.75)]);

        assert!(matches!(
            map.view(),
            Some(MapView::Fitted { padding, .. }) if padding == TRIP_PADDING
        ));
    }

    #[test]
    fn test_unknown_selection_keeps_state() {
        let (mut selector, mut registry, mut map) = setup();
        selector.load(vec![sample("A", -112.0)], &mut registry, &mut map);
        selector.select(0, &mut registry, &mut map).unwrap();

        assert!(matches!(
            selector.select(5, &mut registry, &mut map),
            Err(ViewerError::UnknownSample(_))
        ));
        assert!(selector.select_id(&"Z".into(), &mut registry, &mut map).is_err());
        assert_eq!(selector.state(), SelectorState::Active(0));
        assert_eq!(map.group(selector.layers().route).unwrap().primitives.len(), 1);

        selector.select_id(&"A".into(), &mut registry, &mut map).unwrap();
    }

    #[test]
    fn test_reload_clears_drawn_trip() {
        let (mut selector, mut registry, mut map) = setup();
        selector.load(vec![sample("A", -112.0)], &mut registry, &mut map);
        selector.select(0, &mut registry, &mut map).unwrap();

        selector.load(vec![sample("B", -111.5)], &mut registry, &mut map);
        assert_eq!(selector.state(), SelectorState::Listed);
        assert!(registry.group(selector.layers().route).is_empty());
        assert!(registry.group(selector.layers().endpoints).is_empty());
    }
}
