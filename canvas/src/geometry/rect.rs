use super::point::*;
use super::vector::*;

///
/// The size of a 2D region
///
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Extent2 {
    pub width:  f32,
    pub height: f32,
}

impl Extent2 {
    #[inline]
    pub fn new(width: f32, height: f32) -> Extent2 {
        Extent2 { width, height }
    }
}

///
/// An axis-aligned rectangle, stored as a minimum corner and an extent
///
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Aarect {
    pub min:    Point2,
    pub extent: Extent2,
}

///
/// Corner radii for a rounded rectangle, in bottom-left, bottom-right, top-left, top-right order
///
/// A positive radius rounds the corner with a circular arc, a negative radius cuts the corner
/// with a straight bevel, and zero leaves the corner sharp.
///
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct CornerRadii {
    pub bottom_left:    f32,
    pub bottom_right:   f32,
    pub top_left:       f32,
    pub top_right:      f32,
}

impl CornerRadii {
    #[inline]
    pub fn uniform(radius: f32) -> CornerRadii {
        CornerRadii {
            bottom_left:    radius,
            bottom_right:   radius,
            top_left:       radius,
            top_right:      radius,
        }
    }
}

impl Aarect {
    ///
    /// Creates a rectangle from its minimum corner and extent
    ///
    #[inline]
    pub fn new(min: Point2, extent: Extent2) -> Aarect {
        Aarect { min, extent }
    }

    ///
    /// Creates the smallest rectangle containing both corner points
    ///
    pub fn from_corners(p1: Point2, p2: Point2) -> Aarect {
        let min = Point2::new(p1.x.min(p2.x), p1.y.min(p2.y));
        let max = Point2::new(p1.x.max(p2.x), p1.y.max(p2.y));

        Aarect {
            min:    min,
            extent: Extent2::new(max.x - min.x, max.y - min.y),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.extent.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.extent.height
    }

    ///
    /// The bottom-left corner (the minimum corner in y-up coordinates)
    ///
    #[inline]
    pub fn bottom_left(&self) -> Point2 {
        self.min
    }

    #[inline]
    pub fn bottom_right(&self) -> Point2 {
        Point2::new(self.min.x + self.extent.width, self.min.y)
    }

    #[inline]
    pub fn top_left(&self) -> Point2 {
        Point2::new(self.min.x, self.min.y + self.extent.height)
    }

    #[inline]
    pub fn top_right(&self) -> Point2 {
        Point2::new(self.min.x + self.extent.width, self.min.y + self.extent.height)
    }

    ///
    /// Extends this rectangle so that it contains the specified point
    ///
    pub fn union_point(&self, point: Point2) -> Aarect {
        let min = Point2::new(self.min.x.min(point.x), self.min.y.min(point.y));
        let max_x = (self.min.x + self.extent.width).max(point.x);
        let max_y = (self.min.y + self.extent.height).max(point.y);

        Aarect {
            min:    min,
            extent: Extent2::new(max_x - min.x, max_y - min.y),
        }
    }

    ///
    /// This rectangle scaled about the origin
    ///
    pub fn scaled(&self, scale: f32) -> Aarect {
        Aarect {
            min:    Point2::new(self.min.x * scale, self.min.y * scale),
            extent: Extent2::new(self.extent.width * scale, self.extent.height * scale),
        }
    }

    ///
    /// This rectangle displaced by a vector
    ///
    pub fn translated(&self, offset: Vector2) -> Aarect {
        Aarect {
            min:    self.min + offset,
            extent: self.extent,
        }
    }
}
