//! Facility and trip data models, types, and traits.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::{Facility, FacilityLabel};
pub use types::{
    Endpoint, Leg, LinkedTrip, LinkedTripSet, OdRegions, Result, RouteFeature, StopFeature,
    TransitError, TransportMode, TripSample,
};
