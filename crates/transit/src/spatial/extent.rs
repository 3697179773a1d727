//! Running bounding box over rendered geometries.
//!
//! Used to fit the view to everything a render pass drew. Geometries without
//! a bounding rect (empty line strings, empty collections) leave the extent
//! untouched.

use geo::{coord, BoundingRect, Rect};

/// Smallest rect covering both inputs
pub fn union_rect(a: Rect, b: Rect) -> Rect {
    Rect::new(
        coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    rect: Option<Rect>,
}

impl Extent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_rect(&mut self, rect: Rect) {
        self.rect = Some(match self.rect {
            Some(current) => union_rect(current, rect),
            None => rect,
        });
    }

    pub fn include<G>(&mut self, geometry: &G)
    where
        G: BoundingRect<f64>,
        G::Output: Into<Option<Rect>>,
    {
        if let Some(rect) = geometry.bounding_rect().into() {
            self.include_rect(rect);
        }
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn is_empty(&self) -> bool {
        self.rect.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{line_string, LineString, Point};

    #[test]
    fn test_union_of_lines() {
        let mut extent = Extent::new();
        extent.include(&line_string![(x: -111.95, y: 40.70), (x: -111.90, y: 40.75)]);
        extent.include(&line_string![(x: -111.85, y: 40.60), (x: -111.88, y: 40.72)]);

        let rect = extent.rect().unwrap();
        assert_relative_eq!(rect.min().x, -111.95);
        assert_relative_eq!(rect.min().y, 40.60);
        assert_relative_eq!(rect.max().x, -111.85);
        assert_relative_eq!(rect.max().y, 40.75);
    }

    #[test]
    fn test_empty_geometry_ignored() {
        let mut extent = Extent::new();
        extent.include(&LineString::<f64>::new(vec![]));
        assert!(extent.is_empty());

        extent.include(&Point::new(-111.9, 40.7));
        let rect = extent.rect().unwrap();
        assert_relative_eq!(rect.width(), 0.0);
        assert_relative_eq!(rect.min().x, -111.9);
    }
}
