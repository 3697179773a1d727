use std::collections::HashSet;

use strum::IntoEnumIterator;

use super::{LayerCheckbox, StatusMessage, UiHook, UiSurface};
use crate::basemap::BasemapName;
use crate::selector::SampleList;

/// UI that records what it is told to show
#[derive(Debug)]
pub struct HeadlessUi {
    hooks: HashSet<UiHook>,
    checkboxes: Vec<LayerCheckbox>,
    active_basemap: Option<BasemapName>,
    sample_list: Option<SampleList>,
    active_sample: Option<usize>,
    panel_visible: bool,
    statuses: Vec<StatusMessage>,
}

impl Default for HeadlessUi {
    fn default() -> Self {
        Self {
            hooks: UiHook::iter().collect(),
            checkboxes: Vec::new(),
            active_basemap: None,
            sample_list: None,
            active_sample: None,
            panel_visible: true,
            statuses: Vec::new(),
        }
    }
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checkbox(mut self, layer: impl Into<String>, checked: bool) -> Self {
        self.checkboxes.push(LayerCheckbox {
            layer: layer.into(),
            checked,
        });
        self
    }

    pub fn without_hook(mut self, hook: UiHook) -> Self {
        self.hooks.remove(&hook);
        self
    }

    /// Mirrors a user ticking or unticking a checkbox before the change event fires.
    pub fn set_checked(&mut self, layer: &str, checked: bool) {
        for checkbox in self.checkboxes.iter_mut().filter(|c| c.layer == layer) {
            checkbox.checked = checked;
        }
    }

    pub fn active_basemap(&self) -> Option<&BasemapName> {
        self.active_basemap.as_ref()
    }

    pub fn sample_list(&self) -> Option<&SampleList> {
        self.sample_list.as_ref()
    }

    pub fn active_sample(&self) -> Option<usize> {
        self.active_sample
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn statuses(&self) -> &[StatusMessage] {
        &self.statuses
    }
}

impl UiSurface for HeadlessUi {
    fn has_hook(&self, hook: UiHook) -> bool {
        self.hooks.contains(&hook)
    }

    fn layer_checkboxes(&self) -> Vec<LayerCheckbox> {
        self.checkboxes.clone()
    }

    fn mark_basemap_active(&mut self, name: &BasemapName) {
        self.active_basemap = Some(name.clone());
    }

    fn render_sample_list(&mut self, list: &SampleList) {
        self.sample_list = Some(list.clone());
        self.active_sample = None;
    }

    fn mark_sample_active(&mut self, index: usize) {
        self.active_sample = Some(index);
    }

    fn set_sample_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
    }

    fn show_status(&mut self, status: &StatusMessage) {
        self.statuses.push(status.clone());
    }
}
