//! Background tile layer selection.

use std::collections::BTreeMap;

use crate::config::{TileSource, ViewerConfig};
use crate::error::{Result, ViewerError};
use crate::map::MapSurface;

trip_viz_transit::impl_identifier!(BasemapName);

/// Keeps exactly one basemap attached to the map.
#[derive(Debug)]
pub struct BasemapSwitcher {
    sources: BTreeMap<BasemapName, TileSource>,
    current: BasemapName,
}

impl BasemapSwitcher {
    /// Attaches `initial`, which must be one of `sources`.
    pub fn new<M: MapSurface + ?Sized>(
        sources: BTreeMap<BasemapName, TileSource>,
        initial: BasemapName,
        map: &mut M,
    ) -> Result<Self> {
        let source = sources
            .get(&initial)
            .ok_or_else(|| ViewerError::UnknownBasemap(initial.to_string()))?;
        map.add_tiles(&initial, source);

        Ok(Self {
            sources,
            current: initial,
        })
    }

    pub fn from_config<M: MapSurface + ?Sized>(config: &ViewerConfig, map: &mut M) -> Result<Self> {
        let sources = config
            .basemaps
            .iter()
            .map(|(name, source)| (BasemapName::new(name), source.clone()))
            .collect();
        Self::new(sources, BasemapName::new(&config.initial_basemap), map)
    }

    pub fn current(&self) -> &BasemapName {
        &self.current
    }

    pub fn names(&self) -> impl Iterator<Item = &BasemapName> {
        self.sources.keys()
    }

    /// Returns `Ok(false)` without touching the map if `name` is already active.
    pub fn switch<M: MapSurface + ?Sized>(&mut self, name: &str, map: &mut M) -> Result<bool> {
        if self.current.as_str() == name {
            return Ok(false);
        }

        let (next, source) = self
            .sources
            .get_key_value(&BasemapName::new(name))
            .ok_or_else(|| ViewerError::UnknownBasemap(name.to_owned()))?;

        map.remove_tiles(&self.current);
        map.add_tiles(next, source);
        tracing::info!(from = %self.current, to = %next, "switched basemap");
        self.current = next.clone();

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::HeadlessMap;

    fn switcher(map: &mut HeadlessMap) -> BasemapSwitcher {
        BasemapSwitcher::from_config(&ViewerConfig::default(), map).unwrap()
    }

    #[test]
    fn test_initial_basemap_attached() {
        let mut map = HeadlessMap::new();
        let basemaps = switcher(&mut map);
        assert_eq!(basemaps.current().as_str(), "light");
        assert_eq!(map.tile_count(), 1);
        assert_eq!(basemaps.names().count(), 2);
    }

    #[test]
    fn test_switch_to_active_is_noop() {
        let mut map = HeadlessMap::new();
        let mut basemaps = switcher(&mut map);
        let ops = map.tile_operations();

        assert!(!basemaps.switch("light", &mut map).unwrap());
        assert_eq!(map.tile_operations(), ops);
        assert_eq!(map.tile_count(), 1);
    }

    #[test]
    fn test_light_to_dark_leaves_one_layer() {
        let mut map = HeadlessMap::new();
        let mut basemaps = switcher(&mut map);

        assert!(basemaps.switch("dark", &mut map).unwrap());
        assert_eq!(basemaps.current().as_str(), "dark");
        assert_eq!(map.tile_count(), 1);

        let (name, source) = map.tiles().next().unwrap();
        assert_eq!(name.as_str(), "dark");
        assert!(source.url_template.contains("dark_all"));
    }

    #[test]
    fn test_unknown_basemap_rejected_before_mutation() {
        let mut map = HeadlessMap::new();
        let mut basemaps = switcher(&mut map);
        let ops = map.tile_operations();

        let err = basemaps.switch("satellite", &mut map).unwrap_err();
        assert!(matches!(err, ViewerError::UnknownBasemap(name) if name == "satellite"));
        assert_eq!(map.tile_operations(), ops);
        assert_eq!(basemaps.current().as_str(), "light");
    }

    #[test]
    fn test_unknown_initial_basemap() {
        let mut map = HeadlessMap::new();
        let result = BasemapSwitcher::new(BTreeMap::new(), BasemapName::new("light"), &mut map);
        assert!(result.is_err());
        assert_eq!(map.tile_count(), 0);
    }
}
