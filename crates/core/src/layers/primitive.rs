use geo::{BoundingRect, Geometry, LineString, MultiLineString, Point, Rect};

use crate::render::{curve::QuadraticCurve, style::Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    /// Shown on click
    Popup,
    /// Shown on hover
    Tooltip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub title: String,
    pub detail: Option<String>,
    pub kind: LabelKind,
}

impl Label {
    pub fn popup(title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            title: title.into(),
            detail,
            kind: LabelKind::Popup,
        }
    }

    pub fn tooltip(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: None,
            kind: LabelKind::Tooltip,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Circle marker with a screen-space radius
    Marker { position: Point, radius: f32 },
    Polyline(MultiLineString),
    /// Polygon or multi-polygon region
    Region(Geometry),
    Curve(QuadraticCurve),
}

/// One visual element handed to the map engine
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub style: Style,
    pub label: Option<Label>,
}

impl Primitive {
    pub fn new(shape: Shape, style: Style) -> Self {
        Self {
            shape,
            style,
            label: None,
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    pub fn polyline(line: LineString, style: Style) -> Self {
        Self::new(Shape::Polyline(MultiLineString::new(vec![line])), style)
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        match &self.shape {
            Shape::Marker { position, .. } => Some(position.bounding_rect()),
            Shape::Polyline(line) => line.bounding_rect(),
            Shape::Region(geometry) => geometry.bounding_rect(),
            Shape::Curve(curve) => curve.bounding_rect(),
        }
    }
}
