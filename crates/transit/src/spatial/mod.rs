//! Spatial extent utilities.

pub mod extent;

pub use extent::{union_rect, Extent};
