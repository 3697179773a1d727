//! Application state: owns the map, the UI and every component, and wires
//! them together on load and on user events.

use geo::Point;
use itertools::Itertools;
use trip_viz_transit::{
    DataFetcher, LinkedTripSet, RailLines, parse_linked_trips, parse_routes, parse_samples,
    parse_stops,
};

use crate::basemap::BasemapSwitcher;
use crate::config::{Dataset, PipelineVariant, ViewerConfig};
use crate::error::{Result, ViewerError};
use crate::layers::LayerRegistry;
use crate::map::MapSurface;
use crate::od::{OdRenderReport, OdView};
use crate::render::{ModeLayers, RenderReport, RoutePainter, StopPainter, render_facilities};
use crate::selector::{SampleSelector, TripLayers};
use crate::ui::{PanelView, StatusMessage, UiEvent, UiHook, UiSurface};

pub const BUS_STOP_LAYER: &str = "bus_stop";
pub const RAIL_STOP_LAYER: &str = "rail_stop";
pub const BUS_ROUTE_LAYER: &str = "bus_route";
pub const RAIL_ROUTE_LAYER: &str = "rail_route";
pub const TRIP_ROUTE_LAYER: &str = "trip_route";
pub const ACCESS_EGRESS_LAYER: &str = "access_egress";

fn no_linked_trips() -> ViewerError {
    ViewerError::UnknownLayer("linked trips are only drawn by the origin_destination variant".to_owned())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacilityLayers {
    pub stops: ModeLayers,
    pub routes: ModeLayers,
}

/// Outcome of loading every dataset of the configured variant
#[derive(Debug, Default)]
pub struct LoadReport {
    pub stops: Option<RenderReport>,
    pub routes: Option<RenderReport>,
    pub samples: Option<usize>,
    pub linked_trips: Option<OdRenderReport>,
    pub failures: Vec<ViewerError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, dataset: Dataset) -> bool {
        self.failures
            .iter()
            .any(|f| matches!(f, ViewerError::DataLoad { dataset: d, .. } if *d == dataset))
    }

    /// One line per load, e.g. `stops: 12 bus, 3 rail, 1 skipped; routes: failed`
    pub fn summary(&self) -> String {
        let stops = self.stops.map(|r| format!("{} bus, {} rail, {} skipped", r.bus, r.rail, r.skipped));
        let routes = self.routes.map(|r| format!("{} bus, {} rail", r.bus, r.rail));
        let samples = self.samples.map(|n| n.to_string());
        let linked = self
            .linked_trips
            .as_ref()
            .map(|r| format!("{} trips, {} legs", r.trips, r.legs_rendered));

        [
            (Dataset::Stops, stops),
            (Dataset::Routes, routes),
            (Dataset::Samples, samples),
            (Dataset::LinkedTrips, linked),
        ]
        .into_iter()
        .filter_map(|(dataset, outcome)| match outcome {
            Some(outcome) => Some(format!("{dataset}: {outcome}")),
            None if self.failed(dataset) => Some(format!("{dataset}: failed")),
            None => None,
        })
        .join("; ")
    }
}

pub struct Viewer<M: MapSurface, U: UiSurface> {
    config: ViewerConfig,
    rail_lines: RailLines,
    map: M,
    ui: U,
    registry: LayerRegistry,
    facilities: FacilityLayers,
    selector: SampleSelector,
    od: Option<OdView>,
    basemaps: BasemapSwitcher,
}

impl<M: MapSurface, U: UiSurface> Viewer<M, U> {
    /// Sets the initial view and basemap and registers every layer. Facility
    /// layers start hidden until bound to their checkboxes; trip layers are
    /// always shown.
    pub fn new(config: ViewerConfig, mut map: M, mut ui: U) -> Result<Self> {
        config.validate()?;

        let [lat, lng] = config.view.center;
        map.set_view(Point::new(lng, lat), config.view.zoom);

        let basemaps = BasemapSwitcher::from_config(&config, &mut map)?;
        ui.mark_basemap_active(basemaps.current());

        let mut registry = LayerRegistry::new();
        let facilities = FacilityLayers {
            stops: ModeLayers {
                bus: registry.register(BUS_STOP_LAYER),
                rail: registry.register(RAIL_STOP_LAYER),
            },
            routes: ModeLayers {
                bus: registry.register(BUS_ROUTE_LAYER),
                rail: registry.register(RAIL_ROUTE_LAYER),
            },
        };

        let trip_layers = TripLayers {
            route: registry.register(TRIP_ROUTE_LAYER),
            endpoints: registry.register(ACCESS_EGRESS_LAYER),
        };
        registry.set_visible(trip_layers.route, true, &mut map);
        registry.set_visible(trip_layers.endpoints, true, &mut map);

        let od = match config.variant {
            PipelineVariant::Flat => None,
            PipelineVariant::OriginDestination => Some(OdView::new(&mut registry)),
        };

        Ok(Self {
            rail_lines: config.rail_lines(),
            config,
            map,
            ui,
            registry,
            facilities,
            selector: SampleSelector::new(trip_layers),
            od,
            basemaps,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn facilities(&self) -> FacilityLayers {
        self.facilities
    }

    pub fn selector(&self) -> &SampleSelector {
        &self.selector
    }

    pub fn od(&self) -> Option<&OdView> {
        self.od.as_ref()
    }

    pub fn basemaps(&self) -> &BasemapSwitcher {
        &self.basemaps
    }

    async fn fetch(&self, fetcher: &dyn DataFetcher, dataset: Dataset) -> Result<Vec<u8>> {
        let location = self.config.data.location(dataset);
        tracing::debug!(%dataset, %location, "fetching");
        fetcher
            .fetch(&location)
            .await
            .map_err(|source| ViewerError::DataLoad { dataset, source })
    }

    fn fetched<T>(dataset: Dataset, parsed: trip_viz_transit::Result<T>) -> Result<T> {
        parsed.map_err(|source| ViewerError::DataLoad { dataset, source })
    }

    /// On failure the stop layers are emptied rather than left stale.
    pub async fn load_stops(&mut self, fetcher: &dyn DataFetcher) -> Result<RenderReport> {
        let stops = match self.fetch(fetcher, Dataset::Stops).await {
            Ok(bytes) => Self::fetched(Dataset::Stops, parse_stops(&bytes)),
            Err(e) => Err(e),
        };
        let targets = self.facilities.stops;

        match stops {
            Ok(stops) => Ok(render_facilities(
                &stops,
                targets,
                &self.rail_lines,
                &StopPainter,
                &mut self.registry,
                &mut self.map,
            )),
            Err(e) => {
                self.registry.clear(targets.bus, &mut self.map);
                self.registry.clear(targets.rail, &mut self.map);
                Err(e)
            }
        }
    }

    /// On failure the route layers are emptied rather than left stale.
    pub async fn load_routes(&mut self, fetcher: &dyn DataFetcher) -> Result<RenderReport> {
        let routes = match self.fetch(fetcher, Dataset::Routes).await {
            Ok(bytes) => Self::fetched(Dataset::Routes, parse_routes(&bytes)),
            Err(e) => Err(e),
        };
        let targets = self.facilities.routes;

        match routes {
            Ok(routes) => Ok(render_facilities(
                &routes,
                targets,
                &self.rail_lines,
                &RoutePainter,
                &mut self.registry,
                &mut self.map,
            )),
            Err(e) => {
                self.registry.clear(targets.bus, &mut self.map);
                self.registry.clear(targets.rail, &mut self.map);
                Err(e)
            }
        }
    }

    /// A failed load leaves an empty, listed selector.
    pub async fn load_samples(&mut self, fetcher: &dyn DataFetcher) -> Result<usize> {
        let samples = match self.fetch(fetcher, Dataset::Samples).await {
            Ok(bytes) => Self::fetched(Dataset::Samples, parse_samples(&bytes)),
            Err(e) => Err(e),
        };

        match samples {
            Ok(samples) => {
                let count = samples.len();
                self.selector.load(samples, &mut self.registry, &mut self.map);
                Ok(count)
            }
            Err(e) => {
                self.selector.load(Vec::new(), &mut self.registry, &mut self.map);
                Err(e)
            }
        }
    }

    /// Only meaningful for the O-D variant; the flat variant has nothing to
    /// draw linked trips into.
    pub async fn load_linked_trips(&mut self, fetcher: &dyn DataFetcher) -> Result<OdRenderReport> {
        if self.od.is_none() {
            return Err(no_linked_trips());
        }

        let set = match self.fetch(fetcher, Dataset::LinkedTrips).await {
            Ok(bytes) => Self::fetched(Dataset::LinkedTrips, parse_linked_trips(&bytes)),
            Err(e) => Err(e),
        };
        let od = self.od.as_mut().ok_or_else(no_linked_trips)?;

        match set {
            Ok(set) => Ok(od.render(set, &mut self.registry, &mut self.map)),
            Err(e) => {
                od.render(LinkedTripSet::default(), &mut self.registry, &mut self.map);
                Err(e)
            }
        }
    }

    /// Pages without a status bar only get the log line.
    fn show_status(&mut self, status: StatusMessage) {
        if self.ui.has_hook(UiHook::StatusBar) {
            self.ui.show_status(&status);
        } else {
            tracing::debug!(status = %status.text, "no status bar to show status on");
        }
    }

    fn report_failure(&mut self, error: &ViewerError) {
        tracing::warn!(%error, "viewer error");
        self.show_status(StatusMessage::error(error.to_string()));
    }

    /// Load every dataset of the configured variant. Datasets fail
    /// independently: a failure is reported and the rest still load.
    pub async fn load(&mut self, fetcher: &dyn DataFetcher) -> LoadReport {
        let mut report = LoadReport::default();

        for &dataset in self.config.variant.datasets() {
            let outcome = match dataset {
                Dataset::Samples => self.load_samples(fetcher).await.map(|n| report.samples = Some(n)),
                Dataset::Stops => self.load_stops(fetcher).await.map(|r| report.stops = Some(r)),
                Dataset::Routes => self.load_routes(fetcher).await.map(|r| report.routes = Some(r)),
                Dataset::LinkedTrips => self
                    .load_linked_trips(fetcher)
                    .await
                    .map(|r| report.linked_trips = Some(r)),
            };

            match outcome {
                Ok(()) => tracing::info!(%dataset, "loaded"),
                Err(e) => {
                    self.report_failure(&e);
                    report.failures.push(e);
                }
            }

            // a reload invalidates the rows and the active mark on the page
            if dataset == Dataset::Samples && self.ui.has_hook(UiHook::SampleList) {
                self.ui.render_sample_list(&self.selector.list());
            }
        }

        if report.is_complete() {
            self.show_status(StatusMessage::info(format!("Loaded {}", report.summary())));
        }
        report
    }

    /// Apply every layer checkbox's current state; checkboxes naming an
    /// unknown layer are skipped.
    pub fn bind_checkboxes(&mut self) {
        for checkbox in self.ui.layer_checkboxes() {
            match self.registry.handle(&checkbox.layer) {
                Some(handle) => self.registry.set_visible(handle, checkbox.checked, &mut self.map),
                None => tracing::warn!(layer = %checkbox.layer, "checkbox names an unknown layer"),
            }
        }
    }

    pub fn render_sample_list(&mut self) -> Result<()> {
        if !self.ui.has_hook(UiHook::SampleList) {
            return Err(ViewerError::MissingUiElement(UiHook::SampleList));
        }
        self.ui.render_sample_list(&self.selector.list());
        Ok(())
    }

    /// Load, then bind the UI to the populated layers, then draw the first
    /// sample. The O-D variant keeps the view fitted to the linked trips
    /// instead of jumping to a sample.
    pub async fn initialize(&mut self, fetcher: &dyn DataFetcher) -> Result<LoadReport> {
        let report = self.load(fetcher).await;

        self.bind_checkboxes();
        if let Err(e) = self.render_sample_list() {
            self.report_failure(&e);
            return Err(e);
        }

        if self.config.variant == PipelineVariant::Flat && !self.selector.samples().is_empty() {
            self.select_sample(0)?;
        }

        Ok(report)
    }

    pub fn select_sample(&mut self, index: usize) -> Result<()> {
        self.selector.select(index, &mut self.registry, &mut self.map)?;
        self.ui.mark_sample_active(index);
        Ok(())
    }

    pub fn switch_basemap(&mut self, name: &str) -> Result<bool> {
        let switched = self.basemaps.switch(name, &mut self.map)?;
        if switched {
            self.ui.mark_basemap_active(self.basemaps.current());
        }
        Ok(switched)
    }

    pub fn set_layer_visible(&mut self, layer: &str, visible: bool) -> Result<()> {
        let handle = self
            .registry
            .handle(layer)
            .ok_or_else(|| ViewerError::UnknownLayer(layer.to_owned()))?;
        self.registry.set_visible(handle, visible, &mut self.map);
        Ok(())
    }

    /// Errors are also shown on the page before being returned.
    pub fn handle(&mut self, event: UiEvent) -> Result<()> {
        let result = match event {
            UiEvent::LayerToggled { layer, checked } => self.set_layer_visible(&layer, checked),
            UiEvent::BasemapRequested(name) => self.switch_basemap(&name).map(|_| ()),
            UiEvent::SampleClicked(index) => self.select_sample(index),
            UiEvent::LinkedTripToggled { id, visible } => match self.od.as_ref() {
                Some(od) => od.set_trip_visible(&id, visible, &mut self.registry, &mut self.map),
                None => Err(no_linked_trips()),
            },
            UiEvent::LinkedTripHighlighted(id) => match self.od.as_mut() {
                Some(od) => od.highlight(id.as_ref(), &mut self.registry, &mut self.map),
                None => Err(no_linked_trips()),
            },
            UiEvent::PanelToggled(view) => {
                if self.ui.has_hook(UiHook::SamplePanel) {
                    self.ui.set_sample_panel_visible(view == PanelView::Shown);
                    Ok(())
                } else {
                    Err(ViewerError::MissingUiElement(UiHook::SamplePanel))
                }
            }
        };

        if let Err(e) = &result {
            self.report_failure(e);
        }
        result
    }
}
