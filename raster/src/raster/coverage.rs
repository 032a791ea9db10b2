use crate::pixel::*;

use quill_canvas::bezier::*;
use quill_canvas::GraphicPath;

use itertools::Itertools;
use smallvec::SmallVec;
use wide::u8x16;

/// Coverage contributed by one fully-covered sub-sample: five sub-samples saturate a pixel
const SUB_SAMPLE_COVERAGE: u8 = 51;

///
/// Fills the closed contours described by `curves` into an 8-bit coverage mask
///
/// Every scanline is sampled at five sub-pixel heights; each sub-sample that lands inside the
/// shape adds 51 to the pixels it covers, so a fully covered pixel reaches 255. Pixels at the
/// ends of a span receive coverage proportional to the fraction of the pixel the span overlaps.
///
/// The curves can form any number of contours, in any order; only the even-odd crossing
/// structure matters. Spans outside the pixmap are clipped away.
///
pub fn fill_coverage(image: &mut PixmapViewMut<'_, u8>, curves: &[BezierCurve]) {
    if image.width() == 0 || image.height() == 0 {
        return;
    }

    for (row_y, row) in image.rows_mut().enumerate() {
        fill_row(row, row_y, curves);
    }
}

///
/// Fills a monochrome path into an 8-bit coverage mask
///
pub fn fill_coverage_path(image: &mut PixmapViewMut<'_, u8>, path: &GraphicPath) {
    fill_coverage(image, &path.to_curves());
}

fn fill_row(row: &mut [u8], row_y: usize, curves: &[BezierCurve]) {
    // 5 times vertical super-sampling
    for sub_sample in 0..5 {
        let y = row_y as f32 + 0.1 + 0.2 * sub_sample as f32;

        // An odd crossing count means a root was lost to numerical noise at a curve joint;
        // retry the sample slightly higher before giving up on it
        let spans = fill_spans_at_y(curves, y).or_else(|| fill_spans_at_y(curves, y + 0.01));

        match spans {
            Some(spans) => {
                for (start_x, end_x) in spans {
                    fill_row_span(row, start_x, end_x);
                }
            }

            None => {
                log::debug!("dropping unstable coverage sample at y={}", y);
            }
        }
    }
}

///
/// The inside spans of the shape along the horizontal line at `y`, or None when the crossing
/// count is odd (numerically unstable sample)
///
fn fill_spans_at_y(curves: &[BezierCurve], y: f32) -> Option<SmallVec<[(f32, f32); 8]>> {
    let mut crossings: SmallVec<[f32; 16]> =
        curves.iter().flat_map(|curve| curve.solve_x_by_y(y)).collect();

    // Sort the crossings; curves that join end-to-end produce the same x twice, so exact
    // duplicates are collapsed
    crossings.sort_by(|a, b| a.total_cmp(b));
    crossings.dedup();

    if crossings.len() % 2 != 0 {
        return None;
    }

    Some(crossings.into_iter().tuples().collect())
}

///
/// Adds one sub-sample of coverage to the pixels between two x positions
///
fn fill_row_span(row: &mut [u8], start_x: f32, end_x: f32) {
    if start_x >= row.len() as f32 || end_x < 0.0 {
        return;
    }

    let start_column = start_x.max(0.0) as usize;
    let end_column = ((end_x + 1.0) as usize).min(row.len());
    let columns = end_column - start_column;

    if columns == 1 {
        fill_partial_pixels(row, start_column, start_x, end_x);
    } else {
        fill_partial_pixels(row, start_column, start_x, end_x);
        fill_full_pixels(row, start_column + 1, columns - 2);
        fill_partial_pixels(row, end_column - 1, start_x, end_x);
    }
}

///
/// Adds partial coverage to a boundary pixel, proportional to how much of the pixel the span
/// overlaps
///
fn fill_partial_pixels(row: &mut [u8], index: usize, start_x: f32, end_x: f32) {
    let left = index as f32;
    let right = left + 1.0;
    let pixel_coverage = end_x.clamp(left, right) - start_x.clamp(left, right);

    let pixel = &mut row[index];
    *pixel = (pixel_coverage * SUB_SAMPLE_COVERAGE as f32 + *pixel as f32).min(255.0) as u8;
}

///
/// Adds one full sub-sample of coverage to a run of interior pixels, sixteen pixels at a time
///
fn fill_full_pixels(row: &mut [u8], start: usize, count: usize) {
    let interior = &mut row[start..start + count];
    let step = u8x16::splat(SUB_SAMPLE_COVERAGE);

    let mut chunks = interior.chunks_exact_mut(16);
    for chunk in &mut chunks {
        let mut pixels = [0u8; 16];
        pixels.copy_from_slice(chunk);

        let pixels = u8x16::new(pixels).saturating_add(step);
        chunk.copy_from_slice(&pixels.to_array());
    }

    for pixel in chunks.into_remainder() {
        *pixel = pixel.saturating_add(SUB_SAMPLE_COVERAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_canvas::geometry::*;

    #[test]
    fn span_fills_whole_pixels() {
        let mut row = vec![0u8; 10];
        fill_row_span(&mut row, 0.0, 10.0);

        assert!(row.iter().all(|pixel| *pixel == 51));
    }

    #[test]
    fn span_fills_partial_edges() {
        let mut row = vec![0u8; 10];
        fill_row_span(&mut row, 2.5, 7.5);

        assert!(row[0] == 0 && row[1] == 0);
        assert!(row[2] == 25 || row[2] == 26);
        assert!(row[3] == 51 && row[6] == 51);
        assert!(row[7] == 25 || row[7] == 26);
        assert!(row[8] == 0 && row[9] == 0);
    }

    #[test]
    fn span_clips_to_the_row() {
        let mut row = vec![0u8; 4];
        fill_row_span(&mut row, -10.0, 14.0);

        assert!(row.iter().all(|pixel| *pixel == 51));

        // Entirely outside spans leave the row untouched
        let mut row = vec![0u8; 4];
        fill_row_span(&mut row, 5.0, 9.0);
        fill_row_span(&mut row, -9.0, -5.0);
        assert!(row.iter().all(|pixel| *pixel == 0));
    }

    #[test]
    fn sixteen_wide_fill_matches_scalar() {
        let mut wide_row = vec![0u8; 100];
        fill_full_pixels(&mut wide_row, 3, 90);

        let mut scalar_row = vec![0u8; 100];
        for pixel in scalar_row[3..93].iter_mut() {
            *pixel = pixel.saturating_add(SUB_SAMPLE_COVERAGE);
        }

        assert!(wide_row == scalar_row);
    }

    #[test]
    fn full_coverage_saturates() {
        let mut row = vec![250u8; 8];
        fill_full_pixels(&mut row, 0, 8);

        assert!(row.iter().all(|pixel| *pixel == 255));
    }

    #[test]
    fn duplicate_crossings_collapse() {
        // Two line segments joining at x=5 on this scanline: the shared crossing must only
        // count once, leaving an even number of crossings
        let curves = vec![
            BezierCurve::linear(Point2::new(0.0, 0.0), Point2::new(0.0, 10.0)),
            BezierCurve::linear(Point2::new(5.0, 10.0), Point2::new(5.0, 5.0)),
            BezierCurve::linear(Point2::new(5.0, 5.0), Point2::new(5.0, 0.0)),
        ];

        let spans = fill_spans_at_y(&curves, 5.0).unwrap();

        assert!(spans.len() == 1);
        assert!((spans[0].0 - 0.0).abs() < 1e-5);
        assert!((spans[0].1 - 5.0).abs() < 1e-5);
    }
}
