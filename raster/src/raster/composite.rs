use super::coverage::*;
use crate::pixel::*;

use quill_canvas::GraphicPath;
use quill_canvas::Rgba;

use wide::f32x4;

///
/// Blends `color`, masked by an 8-bit coverage image, onto `dst` with the premultiplied
/// over-operator
///
pub fn composite_mask(dst: &mut PixmapViewMut<'_, ScRgba16>, color: Rgba, mask: &PixmapView<'_, u8>) {
    debug_assert!(dst.width() == mask.width());
    debug_assert!(dst.height() == mask.height());

    let source = f32x4::new([color.r, color.g, color.b, color.a]);

    for y in 0..mask.height() {
        let mask_row = mask.row(y);
        let dst_row = dst.row_mut(y);

        for (pixel, coverage) in dst_row.iter_mut().zip(mask_row.iter()) {
            if *coverage == 0 {
                continue;
            }

            let coverage = *coverage as f32 / 255.0;
            let src = source * f32x4::splat(coverage);
            let src_alpha = src.to_array()[3];

            let blended = src + pixel.to_f32x4() * f32x4::splat(1.0 - src_alpha);
            *pixel = ScRgba16::from_f32x4(blended);
        }
    }
}

///
/// Fills a monochrome path and blends it onto `dst` in the given color
///
pub fn composite_color(dst: &mut PixmapViewMut<'_, ScRgba16>, color: Rgba, path: &GraphicPath) {
    debug_assert!(!path.has_layers());
    debug_assert!(!path.is_contour_open());

    let mut mask = Pixmap::<u8>::new(dst.width(), dst.height());
    fill_coverage_path(&mut mask.view_mut(), path);

    composite_mask(dst, color, &mask.view());
}

///
/// Blends a multicolor path onto `dst`, one layer at a time in layer order
///
pub fn composite(dst: &mut PixmapViewMut<'_, ScRgba16>, path: &GraphicPath) {
    debug_assert!(path.has_layers());
    debug_assert!(!path.is_layer_open());

    for layer_nr in 0..path.number_of_layers() {
        let (layer, fill_color) = path.layer(layer_nr);

        composite_color(dst, fill_color, &layer);
    }
}
