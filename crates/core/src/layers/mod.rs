//! Named groups of primitives and their visibility.
//!
//! The registry owns every primitive; a primitive moved into one group
//! cannot be in another. Visibility is tracked separately from contents and
//! mirrored onto the [`MapSurface`] passed to each mutating call.

mod primitive;

use std::collections::HashMap;

pub use primitive::{Label, LabelKind, Primitive, Shape};

use crate::map::MapSurface;

trip_viz_transit::impl_identifier!(LayerName);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerHandle(usize);

#[derive(Clone, Debug)]
pub struct LayerGroup {
    name: LayerName,
    primitives: Vec<Primitive>,
    visible: bool,
}

impl LayerGroup {
    pub fn name(&self) -> &LayerName {
        &self.name
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct LayerRegistry {
    groups: Vec<LayerGroup>,
    by_name: HashMap<LayerName, LayerHandle>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering a name twice returns the same handle.
    pub fn register(&mut self, name: impl Into<LayerName>) -> LayerHandle {
        let name = name.into();
        if let Some(handle) = self.by_name.get(&name) {
            return *handle;
        }

        let handle = LayerHandle(self.groups.len());
        self.groups.push(LayerGroup {
            name: name.clone(),
            primitives: Vec::new(),
            visible: false,
        });
        self.by_name.insert(name, handle);
        handle
    }

    pub fn handle(&self, name: &str) -> Option<LayerHandle> {
        self.by_name.get(&LayerName::new(name)).copied()
    }

    /// Handles are only minted by [`register`](Self::register), so lookup cannot miss.
    pub fn group(&self, handle: LayerHandle) -> &LayerGroup {
        &self.groups[handle.0]
    }

    pub fn groups(&self) -> impl Iterator<Item = (LayerHandle, &LayerGroup)> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, group)| (LayerHandle(i), group))
    }

    pub fn insert<M: MapSurface + ?Sized>(
        &mut self,
        handle: LayerHandle,
        primitive: Primitive,
        map: &mut M,
    ) {
        self.groups[handle.0].primitives.push(primitive);
        self.sync(handle, map);
    }

    /// Clear and repopulate in one surface update.
    pub fn replace<M: MapSurface + ?Sized>(
        &mut self,
        handle: LayerHandle,
        primitives: Vec<Primitive>,
        map: &mut M,
    ) {
        let group = &mut self.groups[handle.0];
        if group.primitives.is_empty() && primitives.is_empty() {
            return;
        }
        group.primitives = primitives;
        self.sync(handle, map);
    }

    /// Removes every primitive, leaving visibility untouched. Clearing an
    /// empty group does nothing.
    pub fn clear<M: MapSurface + ?Sized>(&mut self, handle: LayerHandle, map: &mut M) {
        self.replace(handle, Vec::new(), map);
    }

    pub fn set_visible<M: MapSurface + ?Sized>(
        &mut self,
        handle: LayerHandle,
        visible: bool,
        map: &mut M,
    ) {
        let group = &mut self.groups[handle.0];
        if group.visible == visible {
            return;
        }
        group.visible = visible;

        if visible {
            map.show_group(handle, group);
        } else {
            map.hide_group(handle);
        }
        tracing::debug!(layer = %group.name, visible, "layer visibility changed");
    }

    pub fn is_visible(&self, handle: LayerHandle) -> bool {
        self.groups[handle.0].visible
    }

    fn sync<M: MapSurface + ?Sized>(&self, handle: LayerHandle, map: &mut M) {
        let group = &self.groups[handle.0];
        if group.visible {
            map.show_group(handle, group);
        }
    }
}
