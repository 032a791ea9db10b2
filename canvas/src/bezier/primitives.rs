use super::roots::*;
use crate::geometry::*;

use smallvec::SmallVec;

// Bezier segments are evaluated through their polynomial coefficients rather than by repeated
// de-Casteljau interpolation: the coefficients are shared between point evaluation, tangents and
// the root finders, and they extrapolate naturally for t values outside of 0..1.

///
/// Polynomial coefficients `(a, b, c)` of a quadratic bezier component: `B(t) = a*t^2 + b*t + c`
///
#[inline]
fn quadratic_coefficients(p1: f32, c1: f32, p2: f32) -> (f32, f32, f32) {
    let a = p1 - 2.0 * c1 + p2;
    let b = 2.0 * (c1 - p1);
    let c = p1;

    (a, b, c)
}

///
/// Polynomial coefficients `(a, b, c, d)` of a cubic bezier component: `B(t) = a*t^3 + b*t^2 + c*t + d`
///
#[inline]
fn cubic_coefficients(p1: f32, c1: f32, c2: f32, p2: f32) -> (f32, f32, f32, f32) {
    let a = -p1 + 3.0 * c1 - 3.0 * c2 + p2;
    let b = 3.0 * p1 - 6.0 * c1 + 3.0 * c2;
    let c = -3.0 * p1 + 3.0 * c1;
    let d = p1;

    (a, b, c, d)
}

///
/// A point on the line segment from `p1` to `p2` (`t` outside of 0..1 extrapolates)
///
#[inline]
pub fn linear_point_at(p1: Point2, p2: Point2, t: f32) -> Point2 {
    p1 + (p2 - p1) * t
}

///
/// A point on the quadratic bezier segment `p1`, `c1`, `p2`
///
#[inline]
pub fn quadratic_point_at(p1: Point2, c1: Point2, p2: Point2, t: f32) -> Point2 {
    let (ax, bx, cx) = quadratic_coefficients(p1.x, c1.x, p2.x);
    let (ay, by, cy) = quadratic_coefficients(p1.y, c1.y, p2.y);

    Point2::new((ax * t + bx) * t + cx, (ay * t + by) * t + cy)
}

///
/// A point on the cubic bezier segment `p1`, `c1`, `c2`, `p2`
///
#[inline]
pub fn cubic_point_at(p1: Point2, c1: Point2, c2: Point2, p2: Point2, t: f32) -> Point2 {
    let (ax, bx, cx, dx) = cubic_coefficients(p1.x, c1.x, c2.x, p2.x);
    let (ay, by, cy, dy) = cubic_coefficients(p1.y, c1.y, c2.y, p2.y);

    Point2::new(((ax * t + bx) * t + cx) * t + dx, ((ay * t + by) * t + cy) * t + dy)
}

///
/// The tangent of a line segment (constant along the segment)
///
#[inline]
pub fn linear_tangent_at(p1: Point2, p2: Point2, _t: f32) -> Vector2 {
    p2 - p1
}

///
/// The tangent of a quadratic bezier segment at `t`
///
#[inline]
pub fn quadratic_tangent_at(p1: Point2, c1: Point2, p2: Point2, t: f32) -> Vector2 {
    let (ax, bx, _) = quadratic_coefficients(p1.x, c1.x, p2.x);
    let (ay, by, _) = quadratic_coefficients(p1.y, c1.y, p2.y);

    Vector2::new(2.0 * ax * t + bx, 2.0 * ay * t + by)
}

///
/// The tangent of a cubic bezier segment at `t`
///
#[inline]
pub fn cubic_tangent_at(p1: Point2, c1: Point2, c2: Point2, p2: Point2, t: f32) -> Vector2 {
    let (ax, bx, cx, _) = cubic_coefficients(p1.x, c1.x, c2.x, p2.x);
    let (ay, by, cy, _) = cubic_coefficients(p1.y, c1.y, c2.y, p2.y);

    Vector2::new((3.0 * ax * t + 2.0 * bx) * t + cx, (3.0 * ay * t + 2.0 * by) * t + cy)
}

///
/// The x positions where the line segment crosses the horizontal line at `y`
///
/// Crossings at the segment end points (t exactly 0 or 1) are included, so two segments that
/// join end-to-end both report the shared point.
///
pub fn linear_find_x_given_y(p1: Point2, p2: Point2, y: f32) -> Roots {
    solve_linear(p2.y - p1.y, p1.y - y)
        .into_iter()
        .filter(|t| *t >= 0.0 && *t <= 1.0)
        .map(|t| linear_point_at(p1, p2, t).x)
        .collect()
}

///
/// The x positions where the quadratic bezier segment crosses the horizontal line at `y`
///
pub fn quadratic_find_x_given_y(p1: Point2, c1: Point2, p2: Point2, y: f32) -> Roots {
    let (a, b, c) = quadratic_coefficients(p1.y, c1.y, p2.y);

    solve_quadratic(a, b, c - y)
        .into_iter()
        .filter(|t| *t >= 0.0 && *t <= 1.0)
        .map(|t| quadratic_point_at(p1, c1, p2, t).x)
        .collect()
}

///
/// The x positions where the cubic bezier segment crosses the horizontal line at `y`
///
pub fn cubic_find_x_given_y(p1: Point2, c1: Point2, c2: Point2, p2: Point2, y: f32) -> Roots {
    let (a, b, c, d) = cubic_coefficients(p1.y, c1.y, c2.y, p2.y);

    solve_cubic(a, b, c, d - y)
        .into_iter()
        .filter(|t| *t >= 0.0 && *t <= 1.0)
        .map(|t| cubic_point_at(p1, c1, c2, p2, t).x)
        .collect()
}

///
/// The t value where the normal of the line segment passes through `point`
///
/// This is the perpendicular projection of the point onto the (infinite) line carrying the
/// segment; the result is not clamped to 0..1.
///
pub fn linear_find_t_for_normal_through_point(p1: Point2, p2: Point2, point: Point2) -> Roots {
    let direction = p2 - p1;
    let squared_length = direction.squared_hypot();

    if squared_length == 0.0 {
        SmallVec::new()
    } else {
        let mut roots = SmallVec::new();
        roots.push((point - p1).dot(direction) / squared_length);
        roots
    }
}

///
/// The t values where the normal of the quadratic bezier segment passes through `point`
///
/// Solves `dot(B(t) - point, B'(t)) = 0`, which expands to a cubic in t.
///
pub fn quadratic_find_t_for_normal_through_point(p1: Point2, c1: Point2, p2: Point2, point: Point2) -> Roots {
    let (ax, bx, cx) = quadratic_coefficients(p1.x, c1.x, p2.x);
    let (ay, by, cy) = quadratic_coefficients(p1.y, c1.y, p2.y);

    let a = Vector2::new(ax, ay);
    let b = Vector2::new(bx, by);
    let d = Vector2::new(cx - point.x, cy - point.y);

    solve_cubic(
        2.0 * a.dot(a),
        3.0 * a.dot(b),
        b.dot(b) + 2.0 * a.dot(d),
        b.dot(d),
    )
}

///
/// The flatness of a line segment, which is always 1.0
///
#[inline]
pub fn linear_flatness(_p1: Point2, _p2: Point2) -> f32 {
    1.0
}

///
/// The flatness of a quadratic bezier segment: the chord length divided by the length of the
/// control polygon. 1.0 means the segment is a straight line.
///
pub fn quadratic_flatness(p1: Point2, c1: Point2, p2: Point2) -> f32 {
    let polygon_length = (c1 - p1).hypot() + (p2 - c1).hypot();

    if polygon_length == 0.0 {
        1.0
    } else {
        (p2 - p1).hypot() / polygon_length
    }
}

///
/// The flatness of a cubic bezier segment
///
pub fn cubic_flatness(p1: Point2, c1: Point2, c2: Point2, p2: Point2) -> f32 {
    let polygon_length = (c1 - p1).hypot() + (c2 - c1).hypot() + (p2 - c2).hypot();

    if polygon_length == 0.0 {
        1.0
    } else {
        (p2 - p1).hypot() / polygon_length
    }
}

///
/// Offsets the line segment perpendicular to its direction of travel. A positive offset moves
/// the segment to starboard (to the right when looking along the direction of travel).
///
pub fn parallel_line(p1: Point2, p2: Point2, offset: f32) -> (Point2, Point2) {
    let starboard = -((p2 - p1).normal());
    let displacement = starboard * offset;

    (p1 + displacement, p2 + displacement)
}
