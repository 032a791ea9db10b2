use super::curve::*;
use super::point::*;
use crate::geometry::*;

///
/// How the outside corners between the offset segments of a parallel contour are joined
///
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LineJoinStyle {
    /// Extend the segments until they intersect
    Miter,

    /// Bridge the gap with a straight segment
    Bevel,
}

///
/// The channel that follows `channel` in the edge coloring sequence
///
/// The first edge of a contour is Yellow; after that the edges alternate Cyan and Magenta so
/// that neighbouring edges never share both channels.
///
fn next_channel(channel: EdgeChannel) -> EdgeChannel {
    if channel == EdgeChannel::Cyan {
        EdgeChannel::Magenta
    } else {
        EdgeChannel::Cyan
    }
}

///
/// Builds a closed, colorized contour of bezier curves from a list of contour points
///
/// The points are normalized first (see `normalize_points`), then walked: every anchor emits the
/// segment accumulated since the previous anchor, with the degree determined by the control
/// points seen in between.
///
/// A contour of a single curve is a teardrop: its one edge is recolored White so that it shows
/// up in all channels of a multi-channel SDF.
///
pub fn contour_from_points(points: &[BezierPoint]) -> Vec<BezierCurve> {
    let points = normalize_points(points);

    let mut curves = vec![];

    let mut pending: Option<CurveKind> = None;
    let mut p1 = Point2::default();
    let mut c1 = Point2::default();
    let mut c2 = Point2::default();
    let mut channel = EdgeChannel::Yellow;

    for point in points {
        match point.kind {
            BezierPointKind::Anchor => {
                match pending {
                    None => {}

                    Some(CurveKind::Linear) => {
                        curves.push(BezierCurve::linear(p1, point.position).with_channel(channel));
                        channel = next_channel(channel);
                    }

                    Some(CurveKind::Quadratic) => {
                        curves.push(BezierCurve::quadratic(p1, c1, point.position).with_channel(channel));
                        channel = next_channel(channel);
                    }

                    Some(CurveKind::Cubic) => {
                        curves.push(BezierCurve::cubic(p1, c1, c2, point.position).with_channel(channel));
                        channel = next_channel(channel);
                    }
                }

                p1 = point.position;
                pending = Some(CurveKind::Linear);
            }

            BezierPointKind::QuadraticControl => {
                c1 = point.position;
                pending = Some(CurveKind::Quadratic);
            }

            BezierPointKind::CubicControl1 => {
                c1 = point.position;
                pending = Some(CurveKind::Cubic);
            }

            BezierPointKind::CubicControl2 => {
                c2 = point.position;
                debug_assert!(pending == Some(CurveKind::Cubic));
            }
        }
    }

    // A single-curve contour is a teardrop and must be visible in every channel
    if curves.len() == 1 {
        curves[0].channel = EdgeChannel::White;
    }

    curves
}

///
/// Reverses the direction of a whole contour, turning it inside out
///
/// This is how the inner offset of a stroke becomes a hole: the curve order is reversed and so
/// is each curve.
///
pub fn inverse_contour(contour: &[BezierCurve]) -> Vec<BezierCurve> {
    contour.iter().rev().map(|curve| curve.reverse()).collect()
}

///
/// Builds the contour running parallel to `contour` at the specified offset
///
/// Every curve is subdivided until flat and offset as a line segment, which leaves gaps and
/// overlaps at the joints; consecutive segments are then either accepted as-is, cut at their
/// intersection, extended to their miter point, or bridged. The same rule closes the seam
/// between the last and first segments.
///
/// Positive offsets move the contour to starboard of the direction of travel. Very tight
/// curvature combined with a large offset can self-intersect; avoiding that is up to the caller.
///
pub fn parallel_contour(
    contour: &[BezierCurve],
    offset: f32,
    join_style: LineJoinStyle,
    tolerance: f32,
) -> Vec<BezierCurve> {
    // Flatten the contour and offset every flat piece, leaving the joints unrepaired
    let mut offset_segments = vec![];
    for curve in contour {
        for flat_piece in curve.subdivide_until_flat(tolerance) {
            offset_segments.push(flat_piece.to_parallel_line(offset));
        }
    }

    // Walk the segments and repair each joint
    let mut result: Vec<BezierCurve> = vec![];

    for segment in offset_segments {
        let mut segment = segment;
        let mut bridge = None;

        if let Some(previous) = result.last_mut() {
            if previous.p2 == segment.p1 {
                // Already connected
            } else if let Some(cut) = segment_intersection(previous.p1, previous.p2, segment.p1, segment.p2) {
                previous.p2 = cut;
                segment.p1 = cut;
            } else {
                let miter = if join_style == LineJoinStyle::Miter {
                    line_intersection(previous.p1, previous.p2, segment.p1, segment.p2)
                } else {
                    None
                };

                if let Some(corner) = miter {
                    previous.p2 = corner;
                    segment.p1 = corner;
                } else {
                    bridge = Some(BezierCurve::linear(previous.p2, segment.p1));
                }
            }
        }

        if let Some(bridge) = bridge {
            result.push(bridge);
        }
        result.push(segment);
    }

    // Repair the seam between the end of the contour and its start
    if result.len() >= 2 {
        let first = result[0];
        let last = *result.last().unwrap();

        if last.p2 != first.p1 {
            let cut = segment_intersection(last.p1, last.p2, first.p1, first.p2).or_else(|| {
                if join_style == LineJoinStyle::Miter {
                    line_intersection(last.p1, last.p2, first.p1, first.p2)
                } else {
                    None
                }
            });

            match cut {
                Some(corner) => {
                    result.last_mut().unwrap().p2 = corner;
                    result[0].p1 = corner;
                }

                None => {
                    let bridge = BezierCurve::linear(last.p2, first.p1);
                    result.push(bridge);
                }
            }
        }
    }

    result
}

///
/// The intersection of the infinite lines through `p1`-`p2` and `p3`-`p4`, or None when they are parallel
///
fn line_intersection(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<Point2> {
    let v1 = p2 - p1;
    let v2 = p4 - p3;

    let denominator = v1.cross(v2);
    if denominator.abs() <= f32::EPSILON {
        return None;
    }

    let s = (p3 - p1).cross(v2) / denominator;

    Some(p1 + v1 * s)
}

///
/// The intersection of the segments `p1`-`p2` and `p3`-`p4`, or None when they do not meet
/// within both segments
///
fn segment_intersection(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Option<Point2> {
    let v1 = p2 - p1;
    let v2 = p4 - p3;

    let denominator = v1.cross(v2);
    if denominator.abs() <= f32::EPSILON {
        return None;
    }

    let s = (p3 - p1).cross(v2) / denominator;
    let u = (p3 - p1).cross(v1) / denominator;

    if s >= 0.0 && s <= 1.0 && u >= 0.0 && u <= 1.0 {
        Some(p1 + v1 * s)
    } else {
        None
    }
}
