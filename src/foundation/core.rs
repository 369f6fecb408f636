pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Axis-aligned box described by its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Corner with the smallest coordinates.
    pub min: Point,
    /// Corner with the largest coordinates.
    pub max: Point,
}

impl Bounds {
    /// Box from two corners, taken as given.
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing every point.
    ///
    /// X and Y extremes are taken independently, so the corners of the result need not be
    /// any of the input points. Returns `None` for an empty input.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        })
    }

    /// Smallest box enclosing every corner of every input box.
    pub fn enclosing(boxes: impl IntoIterator<Item = Bounds>) -> Option<Self> {
        Self::from_points(boxes.into_iter().flat_map(Bounds::corners))
    }

    /// `[min, max]`.
    pub fn corners(self) -> [Point; 2] {
        [self.min, self.max]
    }

    /// Horizontal extent.
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    /// Normalized kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::from_points(self.min, self.max)
    }
}

impl From<Rect> for Bounds {
    fn from(r: Rect) -> Self {
        Self {
            min: Point::new(r.x0, r.y0),
            max: Point::new(r.x1, r.y1),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
