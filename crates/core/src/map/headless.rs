use std::collections::BTreeMap;

use geo::{Point, Rect};

use super::{MapSurface, Padding};
use crate::basemap::BasemapName;
use crate::config::TileSource;
use crate::layers::{LayerGroup, LayerHandle, LayerName, Primitive};

/// Snapshot of a group as last shown
#[derive(Clone, Debug, PartialEq)]
pub struct AttachedGroup {
    pub name: LayerName,
    pub primitives: Vec<Primitive>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MapView {
    Centered { center: Point, zoom: u8 },
    Fitted { bounds: Rect, padding: Padding },
}

/// Map engine that keeps everything it is shown in memory.
///
/// Counts every group and tile operation, so callers can assert that a
/// request caused no engine work at all.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    groups: BTreeMap<LayerHandle, AttachedGroup>,
    tiles: Vec<(BasemapName, TileSource)>,
    view: Option<MapView>,
    group_operations: usize,
    tile_operations: usize,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, handle: LayerHandle) -> Option<&AttachedGroup> {
        self.groups.get(&handle)
    }

    /// Attached groups in registration order
    pub fn groups(&self) -> impl Iterator<Item = (LayerHandle, &AttachedGroup)> {
        self.groups.iter().map(|(handle, group)| (*handle, group))
    }

    pub fn tiles(&self) -> impl Iterator<Item = (&BasemapName, &TileSource)> {
        self.tiles.iter().map(|(name, source)| (name, source))
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn view(&self) -> Option<MapView> {
        self.view
    }

    pub fn group_operations(&self) -> usize {
        self.group_operations
    }

    pub fn tile_operations(&self) -> usize {
        self.tile_operations
    }
}

impl MapSurface for HeadlessMap {
    fn show_group(&mut self, handle: LayerHandle, group: &LayerGroup) {
        self.group_operations += 1;
        self.groups.insert(
            handle,
            AttachedGroup {
                name: group.name().clone(),
                primitives: group.primitives().to_vec(),
            },
        );
    }

    fn hide_group(&mut self, handle: LayerHandle) {
        self.group_operations += 1;
        self.groups.remove(&handle);
    }

    fn add_tiles(&mut self, name: &BasemapName, source: &TileSource) {
        self.tile_operations += 1;
        self.tiles.push((name.clone(), source.clone()));
    }

    fn remove_tiles(&mut self, name: &BasemapName) {
        self.tile_operations += 1;
        self.tiles.retain(|(attached, _)| attached != name);
    }

    fn set_view(&mut self, center: Point, zoom: u8) {
        self.view = Some(MapView::Centered { center, zoom });
    }

    fn fit_bounds(&mut self, bounds: Rect, padding: Padding) {
        self.view = Some(MapView::Fitted { bounds, padding });
    }
}
