use crate::bezier::*;
use crate::color::*;
use crate::geometry::*;

use itertools::Itertools;

use std::iter;
use std::ops::Range;

///
/// A layered vector graphics object
///
/// A path represents a set of layers, each with a fill color; a layer is a set of contours; and
/// a contour is a closed run of bezier curves. The storage is three parallel lists: every
/// `BezierPoint` of every contour concatenated together, the (exclusive) end index of each
/// contour within the point list, and the (exclusive) end index of each layer within the contour
/// list along with the layer's fill color.
///
/// Paths are built up with pen commands (`move_to`, `line_to`, `arc_to` and so on) and then
/// compiled to curves for rasterization. A path without layers is "monochrome": the fill color
/// is supplied externally when it is rendered.
///
#[derive(Clone, PartialEq, Debug, Default)]
pub struct GraphicPath {
    /// All bezier points of all contours and layers
    points: Vec<BezierPoint>,

    /// For each closed contour, one past the index of its last point
    contour_ends: Vec<usize>,

    /// For each closed layer, one past the index of its last contour, plus the layer's fill color
    layer_ends: Vec<(usize, Rgba)>,
}

impl GraphicPath {
    ///
    /// Creates an empty path
    ///
    pub fn new() -> GraphicPath {
        GraphicPath::default()
    }

    ///
    /// Removes all points, contours and layers
    ///
    pub fn clear(&mut self) {
        self.points.clear();
        self.contour_ends.clear();
        self.layer_ends.clear();
    }

    ///
    /// The number of closed contours
    ///
    #[inline]
    pub fn number_of_contours(&self) -> usize {
        self.contour_ends.len()
    }

    ///
    /// The number of closed layers
    ///
    #[inline]
    pub fn number_of_layers(&self) -> usize {
        self.layer_ends.len()
    }

    ///
    /// True if this path stores its own fill colors
    ///
    #[inline]
    pub fn has_layers(&self) -> bool {
        !self.layer_ends.is_empty()
    }

    ///
    /// True if points have been added since the last contour was closed
    ///
    pub fn is_contour_open(&self) -> bool {
        self.contour_ends.last().copied().unwrap_or(0) != self.points.len()
    }

    ///
    /// True if there are contours (or an open contour) not yet assigned to a layer
    ///
    pub fn is_layer_open(&self) -> bool {
        if self.points.is_empty() {
            false
        } else if self.is_contour_open() {
            true
        } else {
            self.layer_ends.last().map(|(end, _)| *end).unwrap_or(0) != self.contour_ends.len()
        }
    }

    ///
    /// The position of the pen, or the origin when no contour is open
    ///
    pub fn current_position(&self) -> Point2 {
        if self.is_contour_open() {
            self.points.last().unwrap().position
        } else {
            Point2::default()
        }
    }

    ///
    /// Closes the current contour (no effect if no contour is open)
    ///
    pub fn close_contour(&mut self) {
        if self.is_contour_open() {
            self.contour_ends.push(self.points.len());
        }
    }

    ///
    /// Closes the current contour, then gathers all contours since the previous layer into a new
    /// layer with the given fill color
    ///
    pub fn close_layer(&mut self, fill_color: Rgba) {
        self.close_contour();

        if self.is_layer_open() {
            self.layer_ends.push((self.contour_ends.len(), fill_color));
        }
    }

    ///
    /// Closes any open contour and starts a new one at `position`
    ///
    pub fn move_to(&mut self, position: Point2) {
        self.close_contour();
        self.points.push(BezierPoint::anchor(position));
    }

    ///
    /// Starts a new contour displaced from the current position
    ///
    pub fn move_relative_to(&mut self, direction: Vector2) {
        debug_assert!(self.is_contour_open());

        let position = self.current_position() + direction;
        self.close_contour();
        self.points.push(BezierPoint::anchor(position));
    }

    ///
    /// Adds a straight segment to `position`
    ///
    pub fn line_to(&mut self, position: Point2) {
        debug_assert!(self.is_contour_open());

        self.points.push(BezierPoint::anchor(position));
    }

    ///
    /// Adds a straight segment in the specified direction
    ///
    pub fn line_relative_to(&mut self, direction: Vector2) {
        debug_assert!(self.is_contour_open());

        let position = self.current_position() + direction;
        self.points.push(BezierPoint::anchor(position));
    }

    ///
    /// Adds a quadratic curve to `position` with control point `control`
    ///
    pub fn quadratic_curve_to(&mut self, control: Point2, position: Point2) {
        debug_assert!(self.is_contour_open());

        self.points.push(BezierPoint::quadratic_control(control));
        self.points.push(BezierPoint::anchor(position));
    }

    ///
    /// Adds a quadratic curve with its control point and end point relative to the current position
    ///
    pub fn quadratic_curve_relative_to(&mut self, control_direction: Vector2, direction: Vector2) {
        debug_assert!(self.is_contour_open());

        let position = self.current_position();
        self.points.push(BezierPoint::quadratic_control(position + control_direction));
        self.points.push(BezierPoint::anchor(position + direction));
    }

    ///
    /// Adds a cubic curve to `position` with control points `control1` and `control2`
    ///
    pub fn cubic_curve_to(&mut self, control1: Point2, control2: Point2, position: Point2) {
        debug_assert!(self.is_contour_open());

        self.points.push(BezierPoint::cubic_control_1(control1));
        self.points.push(BezierPoint::cubic_control_2(control2));
        self.points.push(BezierPoint::anchor(position));
    }

    ///
    /// Adds a cubic curve with its control points and end point relative to the current position
    ///
    pub fn cubic_curve_relative_to(&mut self, control_direction1: Vector2, control_direction2: Vector2, direction: Vector2) {
        debug_assert!(self.is_contour_open());

        let position = self.current_position();
        self.points.push(BezierPoint::cubic_control_1(position + control_direction1));
        self.points.push(BezierPoint::cubic_control_2(position + control_direction2));
        self.points.push(BezierPoint::anchor(position + direction));
    }

    ///
    /// Adds a circular arc from the current position to `position`
    ///
    /// The arc is approximated with a single cubic curve using Riskus' construction
    /// ("Approximation of a cubic bezier curve by circular arcs and vice versa"). A positive
    /// radius draws the arc counter-clockwise, a negative radius clockwise.
    ///
    pub fn arc_to(&mut self, radius: f32, position: Point2) {
        debug_assert!(self.is_contour_open());

        let r = radius.abs();
        let p1 = self.current_position();
        let p2 = position;
        let pm = p1.midpoint(p2);

        let vm2 = p2 - pm;

        // Half the angle spanned between the center-to-endpoint vectors
        let alpha = (vm2.hypot() / r).asin();

        // The center lies along the normal of the half-chord at Pm
        let center = pm + vm2.normal() * (alpha.cos() * radius);

        let vc1 = p1 - center;
        let vc2 = p2 - center;

        let q1 = vc1.squared_hypot();
        let q2 = q1 + vc1.dot(vc2);
        let k2 = (4.0 / 3.0) * ((2.0 * q1 * q2).sqrt() - q2) / vc1.cross(vc2);

        let control1 = center + vc1 + vc1.perpendicular() * k2;
        let control2 = center + vc2 - vc2.perpendicular() * k2;

        self.cubic_curve_to(control1, control2, p2);
    }

    ///
    /// Adds a rectangle as a closed contour, with optional rounded or beveled corners
    ///
    /// Corner radii are given in bottom-left, bottom-right, top-left, top-right order; a positive
    /// radius rounds the corner with an arc, a negative radius cuts it with a straight bevel.
    /// The contour runs counter-clockwise, so the rectangle is filled.
    ///
    pub fn add_rectangle(&mut self, rect: Aarect, corners: CornerRadii) {
        debug_assert!(!self.is_contour_open());

        let bl_radius = corners.bottom_left.abs();
        let br_radius = corners.bottom_right.abs();
        let tl_radius = corners.top_left.abs();
        let tr_radius = corners.top_right.abs();

        let blc = rect.bottom_left();
        let brc = rect.bottom_right();
        let tlc = rect.top_left();
        let trc = rect.top_right();

        let blc1 = blc + Vector2::new(0.0, bl_radius);
        let blc2 = blc + Vector2::new(bl_radius, 0.0);
        let brc1 = brc + Vector2::new(-br_radius, 0.0);
        let brc2 = brc + Vector2::new(0.0, br_radius);
        let trc1 = trc + Vector2::new(0.0, -tr_radius);
        let trc2 = trc + Vector2::new(-tr_radius, 0.0);
        let tlc1 = tlc + Vector2::new(tl_radius, 0.0);
        let tlc2 = tlc + Vector2::new(0.0, -tl_radius);

        self.move_to(blc1);
        if corners.bottom_left > 0.0 {
            self.arc_to(bl_radius, blc2);
        } else if corners.bottom_left < 0.0 {
            self.line_to(blc2);
        }

        self.line_to(brc1);
        if corners.bottom_right > 0.0 {
            self.arc_to(br_radius, brc2);
        } else if corners.bottom_right < 0.0 {
            self.line_to(brc2);
        }

        self.line_to(trc1);
        if corners.top_right > 0.0 {
            self.arc_to(tr_radius, trc2);
        } else if corners.top_right < 0.0 {
            self.line_to(trc2);
        }

        self.line_to(tlc1);
        if corners.top_left > 0.0 {
            self.arc_to(tl_radius, tlc2);
        } else if corners.top_left < 0.0 {
            self.line_to(tlc2);
        }

        self.close_contour();
    }

    ///
    /// Adds a circle as a closed counter-clockwise contour of four 90 degree arcs
    ///
    pub fn add_circle(&mut self, center: Point2, radius: f32) {
        debug_assert!(!self.is_contour_open());

        self.move_to(Point2::new(center.x, center.y - radius));
        self.arc_to(radius, Point2::new(center.x + radius, center.y));
        self.arc_to(radius, Point2::new(center.x, center.y + radius));
        self.arc_to(radius, Point2::new(center.x - radius, center.y));
        self.arc_to(radius, Point2::new(center.x, center.y - radius));
        self.close_contour();
    }

    ///
    /// Adds a closed contour from a list of contour points
    ///
    pub fn add_contour_points(&mut self, contour: &[BezierPoint]) {
        debug_assert!(!self.is_contour_open());

        self.points.extend(contour.iter().copied());
        self.close_contour();
    }

    ///
    /// Adds a closed contour from a list of curves
    ///
    /// The first point of the first curve is not emitted: the contour wraps around, so the last
    /// curve's end point supplies it.
    ///
    pub fn add_contour_curves(&mut self, contour: &[BezierCurve]) {
        debug_assert!(!self.is_contour_open());

        for curve in contour {
            match curve.kind {
                CurveKind::Linear => {
                    self.points.push(BezierPoint::anchor(curve.p2));
                }

                CurveKind::Quadratic => {
                    self.points.push(BezierPoint::quadratic_control(curve.c1));
                    self.points.push(BezierPoint::anchor(curve.p2));
                }

                CurveKind::Cubic => {
                    self.points.push(BezierPoint::cubic_control_1(curve.c1));
                    self.points.push(BezierPoint::cubic_control_2(curve.c2));
                    self.points.push(BezierPoint::anchor(curve.p2));
                }
            }
        }

        self.close_contour();
    }

    ///
    /// Appends all contours and layers of another path to this one
    ///
    pub fn append(&mut self, other: &GraphicPath) {
        debug_assert!(!self.is_contour_open());
        debug_assert!(!other.is_contour_open());

        // Our open layer can only stay open if the other path brings no layers of its own
        debug_assert!(!other.has_layers() || !self.is_layer_open());

        let point_offset = self.points.len();
        let contour_offset = self.contour_ends.len();

        self.layer_ends
            .extend(other.layer_ends.iter().map(|(end, color)| (end + contour_offset, *color)));
        self.contour_ends.extend(other.contour_ends.iter().map(|end| end + point_offset));
        self.points.extend(other.points.iter().copied());
    }

    ///
    /// Appends a path and closes it as a layer with the given fill color
    ///
    pub fn add_path(&mut self, path: &GraphicPath, fill_color: Rgba) {
        self.append(path);
        self.close_layer(fill_color);
    }

    ///
    /// Appends the stroke of a path as a layer with the given color
    ///
    pub fn add_stroke(
        &mut self,
        path: &GraphicPath,
        stroke_color: Rgba,
        stroke_width: f32,
        join_style: LineJoinStyle,
        tolerance: f32,
    ) {
        self.append(&path.to_stroke(stroke_width, join_style, tolerance));
        self.close_layer(stroke_color);
    }

    ///
    /// The range of the specified contour within the point list
    ///
    fn contour_range(&self, contour_nr: usize) -> Range<usize> {
        let start = if contour_nr == 0 { 0 } else { self.contour_ends[contour_nr - 1] };

        start..self.contour_ends[contour_nr]
    }

    ///
    /// The points of the specified contour
    ///
    pub fn points_of_contour(&self, contour_nr: usize) -> &[BezierPoint] {
        &self.points[self.contour_range(contour_nr)]
    }

    ///
    /// Iterates over the point lists of all closed contours
    ///
    pub fn contours<'a>(&'a self) -> impl 'a + Iterator<Item = &'a [BezierPoint]> {
        iter::once(0)
            .chain(self.contour_ends.iter().copied())
            .tuple_windows()
            .map(move |(start, end)| &self.points[start..end])
    }

    ///
    /// Compiles the specified contour to curves
    ///
    /// Contours with fewer than three points have no area and are invisible (single-point
    /// contours are used as anchors when compositing compound glyphs), so they produce no curves.
    ///
    pub fn curves_of_contour(&self, contour_nr: usize) -> Vec<BezierCurve> {
        let points = self.points_of_contour(contour_nr);

        if points.len() < 3 {
            vec![]
        } else {
            contour_from_points(points)
        }
    }

    ///
    /// Compiles every contour of a monochrome path into one flat curve list
    ///
    pub fn to_curves(&self) -> Vec<BezierCurve> {
        debug_assert!(!self.has_layers());

        self.contours()
            .flat_map(|points| {
                if points.len() < 3 {
                    vec![]
                } else {
                    contour_from_points(points)
                }
            })
            .collect()
    }

    ///
    /// The range of the specified layer within the contour list
    ///
    fn layer_contour_range(&self, layer_nr: usize) -> Range<usize> {
        let start = if layer_nr == 0 { 0 } else { self.layer_ends[layer_nr - 1].0 };

        start..self.layer_ends[layer_nr].0
    }

    ///
    /// Extracts a layer as a monochrome path plus its fill color
    ///
    pub fn layer(&self, layer_nr: usize) -> (GraphicPath, Rgba) {
        debug_assert!(self.has_layers());

        let mut path = GraphicPath::new();
        for contour_nr in self.layer_contour_range(layer_nr) {
            let range = self.contour_range(contour_nr);
            path.add_contour_points(&self.points[range]);
        }

        (path, self.color_of_layer(layer_nr))
    }

    ///
    /// The fill color of the specified layer
    ///
    pub fn color_of_layer(&self, layer_nr: usize) -> Rgba {
        self.layer_ends[layer_nr].1
    }

    ///
    /// Changes the fill color of the specified layer
    ///
    pub fn set_color_of_layer(&mut self, layer_nr: usize, fill_color: Rgba) {
        self.layer_ends[layer_nr].1 = fill_color;
    }

    ///
    /// True when every layer shares one fill color (or when there are no layers at all)
    ///
    pub fn all_layers_have_same_color(&self) -> bool {
        if !self.has_layers() {
            return true;
        }

        let first_color = self.layer_ends[0].1;
        self.layer_ends.iter().all(|(_, color)| *color == first_color)
    }

    ///
    /// Drops the layer structure when it carries no information (all layers share one color)
    ///
    pub fn try_remove_layers(&mut self) {
        if self.has_layers() && self.all_layers_have_same_color() {
            self.layer_ends.clear();
        }
    }

    ///
    /// Merges contiguous layers that share the same fill color
    ///
    pub fn optimize_layers(&mut self) {
        if self.layer_ends.is_empty() {
            return;
        }

        let mut merged: Vec<(usize, Rgba)> = Vec::with_capacity(self.layer_ends.len());
        for &(end, color) in self.layer_ends.iter() {
            // Extend the previous layer instead of starting a new one when the color repeats
            match merged.last_mut() {
                Some((last_end, last_color)) if *last_color == color => {
                    *last_end = end;
                }
                _ => {
                    merged.push((end, color));
                }
            }
        }

        self.layer_ends = merged;
    }

    ///
    /// The bounding box of all points in this path
    ///
    pub fn bounding_box(&self) -> Aarect {
        let mut points = self.points.iter();

        let first = match points.next() {
            Some(point) => point.position,
            None => {
                return Aarect::default();
            }
        };

        points.fold(Aarect::from_corners(first, first), |bounds, point| {
            bounds.union_point(point.position)
        })
    }

    ///
    /// This path with every point transformed
    ///
    pub fn transform(&self, transform: &Transform2D) -> GraphicPath {
        GraphicPath {
            points: self
                .points
                .iter()
                .map(|point| BezierPoint::new(transform.transform_point(point.position), point.kind))
                .collect(),
            contour_ends: self.contour_ends.clone(),
            layer_ends: self.layer_ends.clone(),
        }
    }

    ///
    /// Converts this path into the outline of its stroke
    ///
    /// Every contour is offset to starboard by half the stroke width and to port by the other
    /// half; the port contour is inverted so that it cuts the hole between the two offsets.
    ///
    pub fn to_stroke(&self, stroke_width: f32, join_style: LineJoinStyle, tolerance: f32) -> GraphicPath {
        debug_assert!(!self.has_layers());
        debug_assert!(!self.is_contour_open());

        let mut stroke = GraphicPath::new();

        let starboard_offset = stroke_width / 2.0;
        let port_offset = -starboard_offset;

        for contour_nr in 0..self.number_of_contours() {
            let base_contour = self.curves_of_contour(contour_nr);

            let starboard_contour = parallel_contour(&base_contour, starboard_offset, join_style, tolerance);
            stroke.add_contour_curves(&starboard_contour);

            let port_contour = inverse_contour(&parallel_contour(&base_contour, port_offset, join_style, tolerance));
            stroke.add_contour_curves(&port_contour);
        }

        stroke
    }

    ///
    /// Scales and translates this path so that it is centered within `extent`, inset by `padding`
    /// on every side
    ///
    pub fn center_scale(&self, extent: Extent2, padding: f32) -> GraphicPath {
        let max_width = (extent.width - padding * 2.0).max(1.0);
        let max_height = (extent.height - padding * 2.0).max(1.0);

        let bounds = self.bounding_box();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return GraphicPath::new();
        }

        let scale = (max_width / bounds.width()).min(max_height / bounds.height());
        let scaled_bounds = bounds.scaled(scale);

        let offset = (Point2::default() - scaled_bounds.min)
            + Vector2::new(
                (extent.width - scaled_bounds.width()) * 0.5,
                (extent.height - scaled_bounds.height()) * 0.5,
            );

        self.transform(&Transform2D::translate(offset.x, offset.y).after(Transform2D::scale(scale, scale)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_path(size: f32) -> GraphicPath {
        let mut path = GraphicPath::new();
        path.move_to(Point2::new(0.0, 0.0));
        path.line_to(Point2::new(size, 0.0));
        path.line_to(Point2::new(size, size));
        path.line_to(Point2::new(0.0, size));
        path.close_contour();

        path
    }

    #[test]
    fn pen_commands_build_contours() {
        let mut path = GraphicPath::new();

        assert!(!path.is_contour_open());

        path.move_to(Point2::new(0.0, 0.0));
        assert!(path.is_contour_open());
        assert!(path.current_position() == Point2::new(0.0, 0.0));

        path.line_to(Point2::new(5.0, 0.0));
        path.line_relative_to(Vector2::new(0.0, 5.0));
        assert!(path.current_position() == Point2::new(5.0, 5.0));

        path.close_contour();
        assert!(!path.is_contour_open());
        assert!(path.number_of_contours() == 1);

        // Closing again has no effect
        path.close_contour();
        assert!(path.number_of_contours() == 1);
    }

    #[test]
    fn move_to_closes_the_open_contour() {
        let mut path = square_path(1.0);
        path.move_to(Point2::new(10.0, 10.0));
        path.line_to(Point2::new(11.0, 10.0));
        path.line_to(Point2::new(11.0, 11.0));
        path.move_to(Point2::new(20.0, 20.0));

        // The second move_to closed the second contour
        assert!(path.number_of_contours() == 2);
    }

    #[test]
    fn square_compiles_to_four_lines() {
        let curves = square_path(10.0).to_curves();

        assert!(curves.len() == 4);
        assert!(curves.iter().all(|curve| curve.kind == CurveKind::Linear));
        assert!(curves.last().unwrap().p2 == curves[0].p1);
    }

    #[test]
    fn tiny_contours_are_invisible() {
        let mut path = GraphicPath::new();
        path.move_to(Point2::new(3.0, 4.0));
        path.close_contour();
        path.move_to(Point2::new(5.0, 6.0));
        path.line_to(Point2::new(7.0, 8.0));
        path.close_contour();

        assert!(path.number_of_contours() == 2);
        assert!(path.to_curves().is_empty());
    }

    #[test]
    fn arc_stays_on_the_circle() {
        // A quarter arc from the bottom of a radius-10 circle to its right
        let mut path = GraphicPath::new();
        path.move_to(Point2::new(0.0, -10.0));
        path.arc_to(10.0, Point2::new(10.0, 0.0));
        path.close_contour();

        let curves = contour_from_points(path.points_of_contour(0));
        let curve = curves[0];
        assert!(curve.kind == CurveKind::Cubic);

        // Riskus bound: the approximation stays within 0.0003 * radius of the true arc
        for step in 0..=32 {
            let p = curve.point_at(step as f32 / 32.0);
            let radius = (p - Point2::new(0.0, 0.0)).hypot();

            assert!((radius - 10.0).abs() < 0.0003 * 10.0, "off circle by {}", (radius - 10.0).abs());
        }
    }

    #[test]
    fn circle_bounding_box() {
        let mut path = GraphicPath::new();
        path.add_circle(Point2::new(5.0, 5.0), 4.0);

        let bounds = path.bounding_box();

        // The anchors sit on the circle and the control points outside it, so the box hugs the
        // circle from outside
        assert!(bounds.min.x <= 1.001 && bounds.min.y <= 1.001);
        assert!(bounds.min.x > 0.5 && bounds.min.y > 0.5);
        assert!(bounds.width() >= 7.99 && bounds.width() < 9.0);
    }

    #[test]
    fn sharp_rectangle_has_four_anchors() {
        let mut path = GraphicPath::new();
        path.add_rectangle(
            Aarect::new(Point2::new(1.0, 2.0), Extent2::new(4.0, 3.0)),
            CornerRadii::default(),
        );

        assert!(path.number_of_contours() == 1);
        assert!(path.points_of_contour(0).len() == 4);

        let curves = path.to_curves();
        assert!(curves.len() == 4);

        // Counter-clockwise: the bottom edge travels in +x
        assert!(curves[0].p1 == Point2::new(1.0, 2.0));
        assert!(curves[0].p2 == Point2::new(5.0, 2.0));
    }

    #[test]
    fn rounded_rectangle_has_eight_anchors() {
        let mut path = GraphicPath::new();
        path.add_rectangle(
            Aarect::new(Point2::new(0.0, 0.0), Extent2::new(10.0, 10.0)),
            CornerRadii::uniform(2.0),
        );

        let curves = path.to_curves();

        // Four straight edges and four corner arcs
        assert!(curves.len() == 8);
        assert!(curves.iter().filter(|curve| curve.kind == CurveKind::Cubic).count() == 4);
        assert!(curves.iter().filter(|curve| curve.kind == CurveKind::Linear).count() == 4);
    }

    #[test]
    fn beveled_rectangle_cuts_the_corners() {
        let mut path = GraphicPath::new();
        path.add_rectangle(
            Aarect::new(Point2::new(0.0, 0.0), Extent2::new(10.0, 10.0)),
            CornerRadii::uniform(-2.0),
        );

        let curves = path.to_curves();

        assert!(curves.len() == 8);
        assert!(curves.iter().all(|curve| curve.kind == CurveKind::Linear));
    }

    #[test]
    fn layers_capture_contours_in_order() {
        let red = Rgba::opaque(1.0, 0.0, 0.0);
        let blue = Rgba::opaque(0.0, 0.0, 1.0);

        let mut path = GraphicPath::new();
        path.move_to(Point2::new(0.0, 0.0));
        path.line_to(Point2::new(1.0, 0.0));
        path.line_to(Point2::new(1.0, 1.0));
        path.close_layer(red);

        path.move_to(Point2::new(2.0, 0.0));
        path.line_to(Point2::new(3.0, 0.0));
        path.line_to(Point2::new(3.0, 1.0));
        path.close_layer(blue);

        assert!(path.has_layers());
        assert!(path.number_of_layers() == 2);
        assert!(path.color_of_layer(0) == red);
        assert!(path.color_of_layer(1) == blue);

        let (first_layer, first_color) = path.layer(0);
        assert!(first_color == red);
        assert!(first_layer.number_of_contours() == 1);
        assert!(!first_layer.has_layers());
        assert!(first_layer.points_of_contour(0)[0].position == Point2::new(0.0, 0.0));
    }

    #[test]
    fn optimize_layers_merges_contiguous_colors() {
        let red = Rgba::opaque(1.0, 0.0, 0.0);
        let blue = Rgba::opaque(0.0, 0.0, 1.0);

        let mut path = GraphicPath::new();
        for color in [red, red, blue].iter() {
            path.move_to(Point2::new(0.0, 0.0));
            path.line_to(Point2::new(1.0, 0.0));
            path.line_to(Point2::new(1.0, 1.0));
            path.close_layer(*color);
        }

        path.optimize_layers();

        assert!(path.number_of_layers() == 2);
        assert!(path.color_of_layer(0) == red);
        assert!(path.layer(0).0.number_of_contours() == 2);
        assert!(path.color_of_layer(1) == blue);
    }

    #[test]
    fn try_remove_layers_needs_a_single_color() {
        let red = Rgba::opaque(1.0, 0.0, 0.0);
        let blue = Rgba::opaque(0.0, 0.0, 1.0);

        let mut path = GraphicPath::new();
        for color in [red, blue].iter() {
            path.move_to(Point2::new(0.0, 0.0));
            path.line_to(Point2::new(1.0, 0.0));
            path.line_to(Point2::new(1.0, 1.0));
            path.close_layer(*color);
        }

        path.try_remove_layers();
        assert!(path.has_layers());

        path.set_color_of_layer(1, red);
        path.try_remove_layers();
        assert!(!path.has_layers());
    }

    #[test]
    fn append_offsets_indices() {
        let mut first = square_path(1.0);
        let second = square_path(2.0);

        first.append(&second);

        assert!(first.number_of_contours() == 2);
        assert!(first.points_of_contour(1).len() == 4);
        assert!(first.points_of_contour(1)[1].position == Point2::new(2.0, 0.0));
    }

    #[test]
    fn stroke_makes_two_contours_per_contour() {
        let stroke = square_path(10.0).to_stroke(2.0, LineJoinStyle::Miter, 0.05);

        assert!(stroke.number_of_contours() == 2);

        let bounds = stroke.bounding_box();
        assert!(bounds.min.distance_to(Point2::new(-1.0, -1.0)) < 1e-4);
        assert!(bounds.top_right().distance_to(Point2::new(11.0, 11.0)) < 1e-4);
    }

    #[test]
    fn center_scale_fits_the_extent() {
        let path = square_path(10.0);
        let scaled = path.center_scale(Extent2::new(100.0, 60.0), 5.0);

        let bounds = scaled.bounding_box();

        // Scaled by 5 (limited by the height) and centered in the extent
        assert!((bounds.width() - 50.0).abs() < 1e-3);
        assert!((bounds.height() - 50.0).abs() < 1e-3);
        assert!((bounds.min.x - 25.0).abs() < 1e-3);
        assert!((bounds.min.y - 5.0).abs() < 1e-3);
    }
}
