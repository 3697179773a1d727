//! Map-layer pipeline for visualizing transit facilities and sampled trips.
//!
//! [`viewer::Viewer`] loads the facility and trip documents, renders them
//! into named layer groups and reacts to UI events. The map engine and the
//! page are both behind traits ([`map::MapSurface`], [`ui::UiSurface`]) so
//! the pipeline runs the same against a browser map or the in-memory
//! [`map::HeadlessMap`].

pub mod basemap;
pub mod config;
pub mod error;
pub mod layers;
pub mod map;
pub mod od;
pub mod render;
pub mod resource;
pub mod selector;
pub mod ui;
pub mod viewer;

pub use error::{Result, ViewerError};
pub use viewer::{LoadReport, Viewer};

// Re-export transit from the transit crate
pub use trip_viz_transit as transit;
