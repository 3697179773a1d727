//! The map engine seam.
//!
//! Everything the pipeline asks of a map engine goes through [`MapSurface`]:
//! showing and hiding layer groups, swapping tile layers and moving the view.
//! [`HeadlessMap`] is an in-memory engine used by the export tool and tests.

mod headless;

use geo::{Point, Rect};

pub use headless::{AttachedGroup, HeadlessMap, MapView};

use crate::basemap::BasemapName;
use crate::config::TileSource;
use crate::layers::{LayerGroup, LayerHandle};

/// Pixel padding kept between fitted bounds and the viewport edge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    pub x: u32,
    pub y: u32,
}

impl Padding {
    pub const fn uniform(pixels: u32) -> Self {
        Self {
            x: pixels,
            y: pixels,
        }
    }
}

pub trait MapSurface {
    /// Attach the group, or replace its contents if it is already attached.
    fn show_group(&mut self, handle: LayerHandle, group: &LayerGroup);

    fn hide_group(&mut self, handle: LayerHandle);

    fn add_tiles(&mut self, name: &BasemapName, source: &TileSource);

    fn remove_tiles(&mut self, name: &BasemapName);

    fn set_view(&mut self, center: Point, zoom: u8);

    fn fit_bounds(&mut self, bounds: Rect, padding: Padding);
}
