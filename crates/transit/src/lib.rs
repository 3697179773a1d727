//! # trip-viz-transit
//!
//! Facility and trip data for the trip-visualization map.
//!
//! ## Features
//!
//! - **Mode classification**: stop and route attributes mapped to bus/rail
//! - **Document parsing**: stops/routes GeoJSON, trip samples, linked trips
//! - **Spatial extent**: bounding-box union for fitting the view
//! - **Pluggable networking**: implement your own data fetching
//!
//! ## Example
//!
//! ```
//! use trip_viz_transit::prelude::*;
//!
//! let doc = br#"{"type": "FeatureCollection", "features": [
//!     {"type": "Feature", "properties": {"mode": "TRAX", "stop_name": "Courthouse"},
//!      "geometry": {"type": "Point", "coordinates": [-111.8941, 40.7590]}}
//! ]}"#;
//!
//! let stops = parse_stops(doc).unwrap();
//! assert_eq!(stops[0].classify(&RailLines::default()), Some(TransportMode::Rail));
//! ```

pub mod classify;
pub mod document;
pub mod identifiers;
pub mod models;
pub mod network;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::classify::{classify_leg_mode, classify_route_mode, classify_stop_mode, RailLines};
    pub use crate::document::{parse_linked_trips, parse_routes, parse_samples, parse_stops};
    pub use crate::identifiers::*;
    pub use crate::models::{traits::*, types::*};
    pub use crate::network::traits::*;
    pub use crate::spatial::Extent;
}

pub use prelude::*;
