use super::vector::*;

use std::ops::{Add, AddAssign, Sub};

///
/// A position in 2D space
///
/// Points are distinct from `Vector2`s: a point is a location, a vector is a displacement.
/// Subtracting two points produces the vector between them.
///
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    ///
    /// Creates a point from its coordinates
    ///
    #[inline]
    pub fn new(x: f32, y: f32) -> Point2 {
        Point2 { x, y }
    }

    ///
    /// The point halfway between this point and another
    ///
    #[inline]
    pub fn midpoint(self, other: Point2) -> Point2 {
        Point2::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    ///
    /// Distance from this point to another
    ///
    #[inline]
    pub fn distance_to(self, other: Point2) -> f32 {
        (other - self).hypot()
    }
}

impl Add<Vector2> for Point2 {
    type Output = Point2;

    #[inline]
    fn add(self, rhs: Vector2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign<Vector2> for Point2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub<Vector2> for Point2 {
    type Output = Point2;

    #[inline]
    fn sub(self, rhs: Vector2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<Point2> for Point2 {
    type Output = Vector2;

    #[inline]
    fn sub(self, rhs: Point2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
