use crate::geometry::*;

///
/// The role of a point within a contour's point list
///
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BezierPointKind {
    /// A point on the curve; closes the segment formed by the controls collected since the previous anchor
    Anchor,

    /// The control point of a quadratic segment
    QuadraticControl,

    /// The first control point of a cubic segment
    CubicControl1,

    /// The second control point of a cubic segment
    CubicControl2,
}

///
/// A point of a glyph outline or graphic path contour
///
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct BezierPoint {
    pub position:   Point2,
    pub kind:       BezierPointKind,
}

impl BezierPoint {
    #[inline]
    pub fn new(position: Point2, kind: BezierPointKind) -> BezierPoint {
        BezierPoint { position, kind }
    }

    #[inline]
    pub fn anchor(position: Point2) -> BezierPoint {
        BezierPoint::new(position, BezierPointKind::Anchor)
    }

    #[inline]
    pub fn quadratic_control(position: Point2) -> BezierPoint {
        BezierPoint::new(position, BezierPointKind::QuadraticControl)
    }

    #[inline]
    pub fn cubic_control_1(position: Point2) -> BezierPoint {
        BezierPoint::new(position, BezierPointKind::CubicControl1)
    }

    #[inline]
    pub fn cubic_control_2(position: Point2) -> BezierPoint {
        BezierPoint::new(position, BezierPointKind::CubicControl2)
    }
}

///
/// Normalizes the point list of a closed contour so that it can be walked one segment at a time
///
/// Three things are fixed up here:
///
/// * Two abutting quadratic control points get an implicit anchor inserted at their midpoint
///   (TrueType outlines store long runs of off-curve points this way). The pairing wraps around
///   the end of the list, so a contour that consists only of control points is handled too.
/// * The list is rotated so that it starts with an anchor.
/// * The first anchor is appended again at the end, closing the contour.
///
/// Returns an empty list when the input cannot form a contour (fewer than two points, or no
/// anchor can be derived).
///
pub fn normalize_points(points: &[BezierPoint]) -> Vec<BezierPoint> {
    if points.len() < 2 {
        return vec![];
    }

    let mut normalized = Vec::with_capacity(points.len() + 2);

    let mut previous = points[points.len() - 1];
    for &point in points {
        if point.kind == BezierPointKind::QuadraticControl && previous.kind == BezierPointKind::QuadraticControl {
            normalized.push(BezierPoint::anchor(previous.position.midpoint(point.position)));
        }

        normalized.push(point);
        previous = point;
    }

    // Rotate the list so that it starts with an anchor
    let first_anchor = normalized.iter().position(|point| point.kind == BezierPointKind::Anchor);
    let first_anchor = match first_anchor {
        Some(index) => index,
        None => {
            return vec![];
        }
    };
    normalized.rotate_left(first_anchor);

    // Close the contour by repeating the first anchor
    normalized.push(normalized[0]);

    normalized
}
