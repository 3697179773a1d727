//! Viewer configuration.
//!
//! Every field has a default matching the Salt Lake City deployment, so an
//! empty JSON object is a complete config.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use trip_viz_transit::RailLines;

use crate::error::{Result, ViewerError};

/// The independently loaded input documents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Dataset {
    Stops,
    Routes,
    Samples,
    LinkedTrips,
}

/// Which prototype of the map is being driven
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineVariant {
    /// Facilities plus a flat list of trip samples
    #[default]
    Flat,
    /// Additionally draws O-D regions and linked trips
    OriginDestination,
}

impl PipelineVariant {
    pub fn datasets(self) -> &'static [Dataset] {
        match self {
            PipelineVariant::Flat => &[Dataset::Samples, Dataset::Stops, Dataset::Routes],
            PipelineVariant::OriginDestination => &[
                Dataset::Samples,
                Dataset::Stops,
                Dataset::Routes,
                Dataset::LinkedTrips,
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TileSource {
    pub url_template: String,
    #[serde(default)]
    pub attribution: String,
}

impl TileSource {
    /// A CARTO raster style such as `light_all` or `dark_all`
    pub fn carto(style: &str) -> Self {
        Self {
            url_template: format!("https://{{s}}.basemaps.cartocdn.com/{style}/{{z}}/{{x}}/{{y}}{{r}}.png"),
            attribution: "© OpenStreetMap © CARTO".to_owned(),
        }
    }
}

/// Where each document lives. Relative paths are resolved against `base`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub base: String,
    pub stops: String,
    pub routes: String,
    pub samples: String,
    pub linked_trips: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            base: String::new(),
            stops: "data/UTA/UTA_Stops.geojson".to_owned(),
            routes: "data/UTA/UTA_Routes.geojson".to_owned(),
            samples: "data/samples/samples.json".to_owned(),
            linked_trips: "data/samples/linked_trips.json".to_owned(),
        }
    }
}

impl DataSources {
    pub fn location(&self, dataset: Dataset) -> String {
        let path = match dataset {
            Dataset::Stops => &self.stops,
            Dataset::Routes => &self.routes,
            Dataset::Samples => &self.samples,
            Dataset::LinkedTrips => &self.linked_trips,
        };

        if self.base.is_empty() || path.starts_with('/') || path.contains("://") {
            path.clone()
        } else {
            format!("{}/{}", self.base.trim_end_matches('/'), path)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct InitialView {
    /// `[lat, lng]`
    pub center: [f64; 2],
    pub zoom: u8,
}

impl Default for InitialView {
    fn default() -> Self {
        Self {
            center: [40.758, -111.89],
            zoom: 12,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub variant: PipelineVariant,
    pub data: DataSources,
    pub basemaps: BTreeMap<String, TileSource>,
    pub initial_basemap: String,
    pub view: InitialView,
    /// Overrides the built-in rail line names for route classification
    pub rail_lines: Option<Vec<String>>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            variant: PipelineVariant::default(),
            data: DataSources::default(),
            basemaps: BTreeMap::from([
                ("light".to_owned(), TileSource::carto("light_all")),
                ("dark".to_owned(), TileSource::carto("dark_all")),
            ]),
            initial_basemap: "light".to_owned(),
            view: InitialView::default(),
            rail_lines: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ViewerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.basemaps.contains_key(&self.initial_basemap) {
            return Err(ViewerError::InvalidConfig(format!(
                "initial basemap '{}' is not in the basemap set",
                self.initial_basemap
            )));
        }
        Ok(())
    }

    pub fn rail_lines(&self) -> RailLines {
        match &self.rail_lines {
            Some(names) => RailLines::new(names),
            None => RailLines::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_viz_transit::TransportMode;

    #[test]
    fn test_empty_json_is_default() {
        let config = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.initial_basemap, "light");
        assert_eq!(config.basemaps.len(), 2);
        assert_eq!(
            config.basemaps["dark"].url_template,
            "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png"
        );
    }

    #[test]
    fn test_overrides() {
        let config = ViewerConfig::from_json_str(
            r#"{
                "variant": "origin_destination",
                "data": {"base": "https://example.org/viz/", "stops": "stops.geojson"},
                "rail_lines": ["Orange Line"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.variant, PipelineVariant::OriginDestination);
        assert_eq!(
            config.data.location(Dataset::Stops),
            "https://example.org/viz/stops.geojson"
        );
        assert_eq!(
            config.data.location(Dataset::Samples),
            "https://example.org/viz/data/samples/samples.json"
        );
        assert_eq!(
            config.rail_lines().classify(Some("orange line")),
            Some(TransportMode::Rail)
        );
    }

    #[test]
    fn test_unknown_initial_basemap_rejected() {
        let err = ViewerConfig::from_json_str(r#"{"initial_basemap": "satellite"}"#).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig(_)));
    }

    #[test]
    fn test_variant_datasets() {
        assert!(!PipelineVariant::Flat.datasets().contains(&Dataset::LinkedTrips));
        assert!(PipelineVariant::OriginDestination.datasets().contains(&Dataset::LinkedTrips));
    }
}
