//! Quadratic Bézier curves, drawn as `M start Q control end` SVG paths.

use geo::{Coord, LineString, Point, Rect, coord};
use trip_viz_transit::spatial::Extent;

const BOUNDS_SEGMENTS: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraticCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadraticCurve {
    pub fn new(start: Point, control: Point, end: Point) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Arc from `start` to `end` whose control point sits off the chord
    /// midpoint, perpendicular to it, at `bend` times the chord length.
    /// Positive bends curve to the left of the direction of travel.
    pub fn arc(start: Point, end: Point, bend: f64) -> Self {
        let mid = (start + end) / 2.0;
        let d = end - start;
        let control = Point::new(mid.x() - d.y() * bend, mid.y() + d.x() * bend);
        Self::new(start, control, end)
    }

    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// Flatten into `segments` straight pieces
    pub fn sample(&self, segments: usize) -> LineString {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| Coord::from(self.point_at(i as f64 / segments as f64)))
            .collect()
    }

    /// Path data for an SVG `<path d=...>`; `project` maps geographic points
    /// to layer pixels.
    pub fn svg_path(&self, project: impl Fn(Point) -> Coord) -> String {
        let p0 = project(self.start);
        let p1 = project(self.control);
        let p2 = project(self.end);
        format!("M{},{} Q{},{} {},{}", p0.x, p0.y, p1.x, p1.y, p2.x, p2.y)
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut extent = Extent::new();
        extent.include(&self.sample(BOUNDS_SEGMENTS));
        extent.rect()
    }
}

/// Identity projection, for engines that take geographic path data directly
pub fn unprojected(point: Point) -> Coord {
    coord! { x: point.x(), y: point.y() }
}
