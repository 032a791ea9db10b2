use crate::pixel::*;

use quill_canvas::bezier::*;
use quill_canvas::geometry::*;
use quill_canvas::GraphicPath;

///
/// The signed distance from `point` to the nearest curve in the list
///
/// Square distance picks the nearest curve; when two curves are equally far - which happens at
/// every joint - the one met more squarely wins (see `SdfDistance::is_closer_than`). An empty
/// curve list is "everywhere deeply inside nothing" and yields the most negative distance.
///
fn signed_distance_at(point: Point2, curves: &[BezierCurve]) -> f32 {
    let mut remaining = curves.iter();

    let mut nearest = match remaining.next() {
        Some(curve) => curve.sdf_distance(point),
        None => {
            return -f32::MAX;
        }
    };

    for curve in remaining {
        let candidate = curve.sdf_distance(point);

        if candidate.is_closer_than(&nearest) {
            nearest = candidate;
        }
    }

    nearest.signed_distance()
}

fn sdf_row(row: &mut [Sdf8], y: f32, curves: &[BezierCurve]) {
    for (x, pixel) in row.iter_mut().enumerate() {
        *pixel = Sdf8::from(signed_distance_at(Point2::new(x as f32, y), curves));
    }
}

///
/// Fills a signed distance field from the closed contours described by `curves`
///
/// Every pixel receives the signed distance from its bottom-left corner to the nearest curve,
/// clamped to the `Sdf8` range. Each pixel is a pure function of the curve list, so the rows
/// are computed in parallel.
///
#[cfg(feature = "multithreading")]
pub fn fill_sdf(image: &mut PixmapViewMut<'_, Sdf8>, curves: &[BezierCurve]) {
    use rayon::prelude::*;

    let width = image.width();
    let height = image.height();
    let stride = image.stride();

    if width == 0 || height == 0 {
        return;
    }

    image
        .data_mut()
        .par_chunks_mut(stride)
        .take(height)
        .enumerate()
        .for_each(|(y, row)| {
            sdf_row(&mut row[..width], y as f32, curves);
        });
}

///
/// Fills a signed distance field from the closed contours described by `curves`
///
/// Every pixel receives the signed distance from its bottom-left corner to the nearest curve,
/// clamped to the `Sdf8` range.
///
#[cfg(not(feature = "multithreading"))]
pub fn fill_sdf(image: &mut PixmapViewMut<'_, Sdf8>, curves: &[BezierCurve]) {
    if image.width() == 0 || image.height() == 0 {
        return;
    }

    for (y, row) in image.rows_mut().enumerate() {
        sdf_row(row, y as f32, curves);
    }
}

///
/// Fills a signed distance field from a monochrome path
///
pub fn fill_sdf_path(image: &mut PixmapViewMut<'_, Sdf8>, path: &GraphicPath) {
    fill_sdf(image, &path.to_curves());
}
