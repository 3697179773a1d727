//! The page seam: what the viewer reads from and reflects back to the UI.

mod headless;

pub use headless::HeadlessUi;

use trip_viz_transit::LinkedTripIdentifier;

use crate::basemap::BasemapName;
use crate::selector::SampleList;

/// Page elements the viewer cannot work without
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "title_case")]
pub enum UiHook {
    SampleList,
    SamplePanel,
    StatusBar,
}

/// A checkbox carrying a layer-name attribute
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerCheckbox {
    pub layer: String,
    pub checked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelView {
    Shown,
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

/// User interactions the viewer reacts to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    LayerToggled { layer: String, checked: bool },
    BasemapRequested(String),
    /// Zero-based row index in the sample list
    SampleClicked(usize),
    LinkedTripToggled { id: LinkedTripIdentifier, visible: bool },
    LinkedTripHighlighted(Option<LinkedTripIdentifier>),
    PanelToggled(PanelView),
}

pub trait UiSurface {
    fn has_hook(&self, hook: UiHook) -> bool;

    /// Current state of every layer checkbox on the page
    fn layer_checkboxes(&self) -> Vec<LayerCheckbox>;

    fn mark_basemap_active(&mut self, name: &BasemapName);

    fn render_sample_list(&mut self, list: &SampleList);

    fn mark_sample_active(&mut self, index: usize);

    fn set_sample_panel_visible(&mut self, visible: bool);

    fn show_status(&mut self, status: &StatusMessage);
}
