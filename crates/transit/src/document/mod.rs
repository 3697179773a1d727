//! Parsing of the static documents the map is driven by.
//!
//! Every parser takes raw bytes, so it does not matter whether they came
//! from disk, HTTP or memory. Coordinates are normalised to `x = lon`,
//! `y = lat` whatever order the document uses.

mod facilities;
mod linked;
mod raw;
mod samples;

pub use facilities::{parse_routes, parse_stops};
pub use linked::parse_linked_trips;
pub use samples::parse_samples;
