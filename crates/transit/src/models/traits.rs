//! Core traits for facility entities.
//!
//! A renderer only needs to know how a feature classifies and what it is
//! called; everything engine-specific lives on the painter side.

use crate::classify::{classify_stop_mode, RailLines};
use crate::models::types::*;

/// Human-readable label for a rendered feature
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacilityLabel {
    /// e.g. the stop or route name
    pub title: String,
    /// The raw mode attribute, shown beneath the title
    pub detail: Option<String>,
}

/// A stop or route that can be classified and labelled
pub trait Facility {
    /// Raw mode-bearing attribute
    fn mode_attribute(&self) -> Option<&str>;

    /// Canonical mode, `None` if the feature must be skipped
    fn classify(&self, rail_lines: &RailLines) -> Option<TransportMode>;

    fn label(&self) -> FacilityLabel;
}

impl Facility for StopFeature {
    fn mode_attribute(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    fn classify(&self, _rail_lines: &RailLines) -> Option<TransportMode> {
        classify_stop_mode(self.mode_attribute())
    }

    fn label(&self) -> FacilityLabel {
        FacilityLabel {
            title: self.name.to_string(),
            detail: self.mode.as_deref().map(str::to_owned),
        }
    }
}

impl Facility for RouteFeature {
    fn mode_attribute(&self) -> Option<&str> {
        self.route_type.as_deref()
    }

    fn classify(&self, rail_lines: &RailLines) -> Option<TransportMode> {
        rail_lines.classify(self.mode_attribute())
    }

    fn label(&self) -> FacilityLabel {
        FacilityLabel {
            title: self.name.to_string(),
            detail: self.route_type.as_deref().map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, MultiLineString, Point};

    #[test]
    fn test_stop_facility() {
        let stop = StopFeature {
            name: "Central Station".into(),
            mode: Some("TRAX".into()),
            location: Point::new(-111.9045, 40.7608),
        };

        assert_eq!(stop.classify(&RailLines::default()), Some(TransportMode::Rail));
        assert_eq!(
            stop.label(),
            FacilityLabel {
                title: "Central Station".into(),
                detail: Some("TRAX".into()),
            }
        );
    }

    #[test]
    fn test_route_facility_uses_rail_lines() {
        let route = RouteFeature {
            name: "701".into(),
            route_type: Some("Blue Line".into()),
            geometry: MultiLineString::new(vec![line_string![
                (x: -111.90, y: 40.76),
                (x: -111.89, y: 40.70),
            ]]),
        };

        assert_eq!(route.classify(&RailLines::default()), Some(TransportMode::Rail));
        assert_eq!(
            route.classify(&RailLines::new(["red line"])),
            Some(TransportMode::Bus)
        );
    }
}
