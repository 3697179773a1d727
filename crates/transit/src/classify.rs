//! Mode classification of raw facility attributes.
//!
//! Stops and routes follow different policies: a stop whose mode attribute
//! names neither a bus nor a rail service is unclassified and gets dropped,
//! while any route that is not a known rail line is treated as a bus route.

use std::sync::Arc;

use crate::models::types::TransportMode;

const STOP_BUS_MARKERS: [&str; 2] = ["bus", "micro"];
const STOP_RAIL_MARKERS: [&str; 2] = ["trax", "frontrunner"];

/// Rail line names recognised in a route's `routetype` attribute
pub const DEFAULT_RAIL_LINES: [&str; 5] = [
    "blue line",
    "red line",
    "green line",
    "s line",
    "frontrunner",
];

fn normalized(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(str::to_lowercase)
}

/// Classify a stop's `mode` attribute.
///
/// Bus markers win over rail markers when both appear.
pub fn classify_stop_mode(raw: Option<&str>) -> Option<TransportMode> {
    let mode = normalized(raw)?;

    if STOP_BUS_MARKERS.iter().any(|m| mode.contains(m)) {
        Some(TransportMode::Bus)
    } else if STOP_RAIL_MARKERS.iter().any(|m| mode.contains(m)) {
        Some(TransportMode::Rail)
    } else {
        None
    }
}

/// Classify a trip leg's `mode`.
///
/// Leg exports tag modes canonically (`bus`, `rail`), so those are accepted
/// first; anything else goes through the stop vocabulary, which leaves
/// `car`, `walk/bike` and the like unclassified.
pub fn classify_leg_mode(raw: Option<&str>) -> Option<TransportMode> {
    let mode = raw.map(str::trim).filter(|s| !s.is_empty())?;
    mode.parse().ok().or_else(|| classify_stop_mode(Some(mode)))
}

/// The set of rail line names route classification matches against
#[derive(Clone, Debug, PartialEq)]
pub struct RailLines {
    names: Vec<Arc<str>>,
}

impl RailLines {
    /// Names are matched case-insensitively, so they are stored lowercased.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().to_lowercase())
                .filter(|n| !n.is_empty())
                .map(Arc::from)
                .collect(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_ref())
    }

    /// Classify a route's `routetype` attribute.
    ///
    /// A present, non-empty value is never unclassified: no rail match means bus.
    pub fn classify(&self, raw: Option<&str>) -> Option<TransportMode> {
        let route_type = normalized(raw)?;

        if self.names.iter().any(|n| route_type.contains(n.as_ref())) {
            Some(TransportMode::Rail)
        } else {
            Some(TransportMode::Bus)
        }
    }
}

impl Default for RailLines {
    fn default() -> Self {
        Self::new(DEFAULT_RAIL_LINES)
    }
}

/// Classify a route type against [`DEFAULT_RAIL_LINES`]
pub fn classify_route_mode(raw: Option<&str>) -> Option<TransportMode> {
    RailLines::default().classify(raw)
}
