use super::primitives::*;
use super::roots::*;
use crate::geometry::*;

///
/// The degree of a bezier curve segment
///
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CurveKind {
    Linear,
    Quadratic,
    Cubic,
}

///
/// The color channels a curve is active in when rendering a multi-channel signed distance field
///
/// Edges of a contour alternate between two channel pairs so that bilinear interpolation can
/// reconstruct sharp corners where differently-colored edges meet (the Chlumsky technique).
///
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EdgeChannel {
    /// Active in red and green
    Yellow,

    /// Active in red and blue
    Magenta,

    /// Active in green and blue
    Cyan,

    /// Active in all three channels
    White,
}

impl EdgeChannel {
    #[inline]
    pub fn has_red(self) -> bool {
        self != EdgeChannel::Cyan
    }

    #[inline]
    pub fn has_green(self) -> bool {
        self != EdgeChannel::Magenta
    }

    #[inline]
    pub fn has_blue(self) -> bool {
        self != EdgeChannel::Yellow
    }
}

///
/// A linear, quadratic or cubic bezier curve segment
///
/// All four points are always present: the control points that a lower-degree curve does not use
/// are ignored. Curves are value types and are freely copied.
///
#[derive(Copy, Clone, Debug)]
pub struct BezierCurve {
    pub kind:       CurveKind,
    pub channel:    EdgeChannel,
    pub p1:         Point2,
    pub c1:         Point2,
    pub c2:         Point2,
    pub p2:         Point2,
}

///
/// The result of a nearest-point query from a point to a curve, used to build signed distance fields
///
#[derive(Copy, Clone, Debug)]
pub struct SdfDistance<'a> {
    /// Vector from the nearest point on the curve back to the query point
    pub pn: Vector2,

    /// The curve the query was made against
    pub curve: &'a BezierCurve,

    /// Position of the nearest point on the curve (0..1)
    pub t: f32,

    /// Squared distance between the query point and the nearest point
    pub sq_distance: f32,
}

impl PartialEq for BezierCurve {
    fn eq(&self, other: &BezierCurve) -> bool {
        if self.kind != other.kind {
            return false;
        }

        match self.kind {
            CurveKind::Linear => self.p1 == other.p1 && self.p2 == other.p2,
            CurveKind::Quadratic => self.p1 == other.p1 && self.c1 == other.c1 && self.p2 == other.p2,
            CurveKind::Cubic => {
                self.p1 == other.p1 && self.c1 == other.c1 && self.c2 == other.c2 && self.p2 == other.p2
            }
        }
    }
}

impl BezierCurve {
    ///
    /// Creates a line segment
    ///
    #[inline]
    pub fn linear(p1: Point2, p2: Point2) -> BezierCurve {
        BezierCurve {
            kind:       CurveKind::Linear,
            channel:    EdgeChannel::White,
            p1:         p1,
            c1:         Point2::default(),
            c2:         Point2::default(),
            p2:         p2,
        }
    }

    ///
    /// Creates a quadratic curve segment
    ///
    #[inline]
    pub fn quadratic(p1: Point2, c1: Point2, p2: Point2) -> BezierCurve {
        BezierCurve {
            kind:       CurveKind::Quadratic,
            channel:    EdgeChannel::White,
            p1:         p1,
            c1:         c1,
            c2:         Point2::default(),
            p2:         p2,
        }
    }

    ///
    /// Creates a cubic curve segment
    ///
    #[inline]
    pub fn cubic(p1: Point2, c1: Point2, c2: Point2, p2: Point2) -> BezierCurve {
        BezierCurve {
            kind:       CurveKind::Cubic,
            channel:    EdgeChannel::White,
            p1:         p1,
            c1:         c1,
            c2:         c2,
            p2:         p2,
        }
    }

    ///
    /// This curve, assigned to the specified SDF color channel
    ///
    #[inline]
    pub fn with_channel(mut self, channel: EdgeChannel) -> BezierCurve {
        self.channel = channel;
        self
    }

    ///
    /// A point on the curve. Values of `t` outside of 0..1 extrapolate beyond the segment.
    ///
    #[inline]
    pub fn point_at(&self, t: f32) -> Point2 {
        match self.kind {
            CurveKind::Linear => linear_point_at(self.p1, self.p2, t),
            CurveKind::Quadratic => quadratic_point_at(self.p1, self.c1, self.p2, t),
            CurveKind::Cubic => cubic_point_at(self.p1, self.c1, self.c2, self.p2, t),
        }
    }

    ///
    /// The tangent vector of the curve at `t`
    ///
    #[inline]
    pub fn tangent_at(&self, t: f32) -> Vector2 {
        match self.kind {
            CurveKind::Linear => linear_tangent_at(self.p1, self.p2, t),
            CurveKind::Quadratic => quadratic_tangent_at(self.p1, self.c1, self.p2, t),
            CurveKind::Cubic => cubic_tangent_at(self.p1, self.c1, self.c2, self.p2, t),
        }
    }

    ///
    /// The x positions where this curve crosses the horizontal line at `y` (0 to 3 values)
    ///
    #[inline]
    pub fn solve_x_by_y(&self, y: f32) -> Roots {
        match self.kind {
            CurveKind::Linear => linear_find_x_given_y(self.p1, self.p2, y),
            CurveKind::Quadratic => quadratic_find_x_given_y(self.p1, self.c1, self.p2, y),
            CurveKind::Cubic => cubic_find_x_given_y(self.p1, self.c1, self.c2, self.p2, y),
        }
    }

    ///
    /// The t values where the curve's normal passes through `point`
    ///
    /// Not implemented for cubic curves: the SDF rasterizer only ever sees the linear and
    /// quadratic curves that glyph outlines are made of.
    ///
    #[inline]
    pub fn solve_t_for_normals_intersecting_point(&self, point: Point2) -> Roots {
        match self.kind {
            CurveKind::Linear => linear_find_t_for_normal_through_point(self.p1, self.p2, point),
            CurveKind::Quadratic => quadratic_find_t_for_normal_through_point(self.p1, self.c1, self.p2, point),
            CurveKind::Cubic => unimplemented!("normal solving is not supported for cubic curves"),
        }
    }

    ///
    /// Splits the curve at `t` into two curves of the same kind whose union reproduces the original
    ///
    pub fn split(&self, t: f32) -> (BezierCurve, BezierCurve) {
        match self.kind {
            CurveKind::Linear => {
                let mid = linear_point_at(self.p1, self.p2, t);

                (
                    BezierCurve::linear(self.p1, mid).with_channel(self.channel),
                    BezierCurve::linear(mid, self.p2).with_channel(self.channel),
                )
            }

            CurveKind::Quadratic => {
                let outer_a = linear_point_at(self.p1, self.c1, t);
                let outer_b = linear_point_at(self.c1, self.p2, t);
                let mid = linear_point_at(outer_a, outer_b, t);

                (
                    BezierCurve::quadratic(self.p1, outer_a, mid).with_channel(self.channel),
                    BezierCurve::quadratic(mid, outer_b, self.p2).with_channel(self.channel),
                )
            }

            CurveKind::Cubic => {
                let outer_a = linear_point_at(self.p1, self.c1, t);
                let bridge = linear_point_at(self.c1, self.c2, t);
                let outer_b = linear_point_at(self.c2, self.p2, t);

                let inner_a = linear_point_at(outer_a, bridge, t);
                let inner_b = linear_point_at(bridge, outer_b, t);
                let mid = linear_point_at(inner_a, inner_b, t);

                (
                    BezierCurve::cubic(self.p1, outer_a, inner_a, mid).with_channel(self.channel),
                    BezierCurve::cubic(mid, inner_b, outer_b, self.p2).with_channel(self.channel),
                )
            }
        }
    }

    ///
    /// The flatness of this curve: 1.0 for a straight segment, smaller the further the control
    /// points stray from the chord
    ///
    #[inline]
    pub fn flatness(&self) -> f32 {
        match self.kind {
            CurveKind::Linear => linear_flatness(self.p1, self.p2),
            CurveKind::Quadratic => quadratic_flatness(self.p1, self.c1, self.p2),
            CurveKind::Cubic => cubic_flatness(self.p1, self.c1, self.c2, self.p2),
        }
    }

    ///
    /// Recursively splits this curve at the midpoint until every piece has a flatness of at least
    /// `1.0 - tolerance`
    ///
    pub fn subdivide_until_flat(&self, tolerance: f32) -> Vec<BezierCurve> {
        let mut pieces = vec![];
        self.subdivide_until_flat_into(&mut pieces, 1.0 - tolerance);

        pieces
    }

    fn subdivide_until_flat_into(&self, pieces: &mut Vec<BezierCurve>, minimum_flatness: f32) {
        if self.flatness() >= minimum_flatness {
            pieces.push(*self);
        } else {
            let (first, second) = self.split(0.5);

            first.subdivide_until_flat_into(pieces, minimum_flatness);
            second.subdivide_until_flat_into(pieces, minimum_flatness);
        }
    }

    ///
    /// The line segment parallel to this curve's chord at the specified offset (positive offset
    /// is starboard of the direction of travel)
    ///
    /// The result is always a linear curve: callers flatten first, so the control point
    /// information would not survive offsetting anyway.
    ///
    pub fn to_parallel_line(&self, offset: f32) -> BezierCurve {
        let (p1, p2) = parallel_line(self.p1, self.p2, offset);

        BezierCurve::linear(p1, p2).with_channel(self.channel)
    }

    ///
    /// This curve with its direction of travel reversed
    ///
    #[inline]
    pub fn reverse(&self) -> BezierCurve {
        BezierCurve {
            kind:       self.kind,
            channel:    self.channel,
            p1:         self.p2,
            c1:         self.c2,
            c2:         self.c1,
            p2:         self.p1,
        }
    }

    ///
    /// This curve with all of its points transformed
    ///
    pub fn transform(&self, transform: &Transform2D) -> BezierCurve {
        BezierCurve {
            kind:       self.kind,
            channel:    self.channel,
            p1:         transform.transform_point(self.p1),
            c1:         transform.transform_point(self.c1),
            c2:         transform.transform_point(self.c2),
            p2:         transform.transform_point(self.p2),
        }
    }

    ///
    /// The nearest point on this curve to `point`, as a squared distance plus the data needed to
    /// derive the signed distance
    ///
    /// Candidate positions are the perpendicular feet of the point on the curve; clamping them
    /// to 0..1 adds the curve end points as implicit candidates.
    ///
    pub fn sdf_distance(&self, point: Point2) -> SdfDistance {
        let mut nearest = SdfDistance {
            pn:             Vector2::default(),
            curve:          self,
            t:              0.0,
            sq_distance:    f32::MAX,
        };

        for t in self.solve_t_for_normals_intersecting_point(point) {
            let t = t.clamp(0.0, 1.0);

            let pn = point - self.point_at(t);
            let sq_distance = pn.squared_hypot();

            if sq_distance < nearest.sq_distance {
                nearest.t = t;
                nearest.pn = pn;
                nearest.sq_distance = sq_distance;
            }
        }

        nearest
    }
}

impl<'a> SdfDistance<'a> {
    ///
    /// The orthogonality of the line from the query point to its foot on the curve: the cross
    /// product of the unit tangent and the unit foot-to-point vector. Its sign reveals which side
    /// of the curve the point lies on.
    ///
    #[inline]
    pub fn orthogonality(&self) -> f32 {
        let tangent = self.curve.tangent_at(self.t);

        tangent.normalize().cross(self.pn.normalize())
    }

    ///
    /// The distance from the query point to the curve
    ///
    #[inline]
    pub fn distance(&self) -> f32 {
        self.sq_distance.sqrt()
    }

    ///
    /// The signed distance from the query point to the curve: positive when the point is outside
    /// the filled region (starboard of the edge), negative when inside
    ///
    #[inline]
    pub fn signed_distance(&self) -> f32 {
        let distance = self.distance();

        if self.orthogonality() < 0.0 {
            distance
        } else {
            -distance
        }
    }

    ///
    /// The ordering used to pick the curve an SDF pixel belongs to. Square distance decides;
    /// when two curves are equally far (within 0.01) the one met more squarely - the larger
    /// absolute orthogonality - wins, which settles which edge's channels apply at joints.
    ///
    pub fn is_closer_than(&self, other: &SdfDistance) -> bool {
        if (self.sq_distance - other.sq_distance).abs() < 0.01 {
            self.orthogonality().abs() > other.orthogonality().abs()
        } else {
            self.sq_distance < other.sq_distance
        }
    }
}
