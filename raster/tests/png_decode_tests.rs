use quill_raster::codec::*;
use quill_raster::color::*;
use quill_raster::pixel::*;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use std::io::Write;

// ---------------------------------------------------------------------------------------------
// Encoders for test images: the png crate produces realistic files (with adaptive filtering),
// and the hand-rolled chunk builder produces files with exactly the metadata chunks we want
// ---------------------------------------------------------------------------------------------

fn encode_png(width: u32, height: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]) -> Vec<u8> {
    encode_png_with_filter(width, height, color, depth, png::FilterType::NoFilter, data)
}

fn encode_png_with_filter(
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    filter: png::FilterType,
    data: &[u8],
) -> Vec<u8> {
    let mut bytes = vec![];

    let mut encoder = png::Encoder::new(&mut bytes, width, height);
    encoder.set_color(color);
    encoder.set_depth(depth);
    encoder.set_filter(filter);

    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(data).unwrap();
    writer.finish().unwrap();

    bytes
}

fn chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut bytes = vec![];
    bytes.extend_from_slice(&(data.len() as u32).to_be_bytes());
    bytes.extend_from_slice(chunk_type);
    bytes.extend_from_slice(data);

    // The CRC is read but not verified, so the fixtures don't bother computing it
    bytes.extend_from_slice(&[0, 0, 0, 0]);

    bytes
}

fn ihdr_chunk(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
    let mut data = vec![];
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);

    chunk(b"IHDR", &data)
}

/// Compresses raw scanlines (each prefixed with a filter-type byte) into an IDAT chunk
fn idat_chunk(rows: &[&[u8]]) -> Vec<u8> {
    chunk(b"IDAT", &deflate_rows(rows))
}

fn deflate_rows(rows: &[&[u8]]) -> Vec<u8> {
    let mut raw = vec![];
    for row in rows {
        raw.push(0u8);
        raw.extend_from_slice(row);
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw).unwrap();
    encoder.finish().unwrap()
}

fn png_file(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = vec![137, 80, 78, 71, 13, 10, 26, 10];
    for c in chunks {
        bytes.extend_from_slice(c);
    }
    bytes.extend_from_slice(&chunk(b"IEND", &[]));

    bytes
}

fn assert_pixel_near(pixel: &ScRgba16, expected: [f32; 4], tolerance: f32) {
    let actual = [pixel.r(), pixel.g(), pixel.b(), pixel.a()];
    for i in 0..4 {
        assert!(
            (actual[i] - expected[i]).abs() <= tolerance,
            "expected {:?} but found {:?}",
            expected,
            actual
        );
    }
}

// ---------------------------------------------------------------------------------------------
// Successful decodes
// ---------------------------------------------------------------------------------------------

#[test]
fn two_by_two_rgb_flips_vertically() {
    // Top file row is red, green; bottom file row is blue, white
    let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
    let bytes = encode_png(2, 2, png::ColorType::Rgb, png::BitDepth::Eight, &data);

    let image = decode_png(&bytes).unwrap();

    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 2);

    // The output is bottom-up, so row 0 is the file's bottom row
    assert_pixel_near(image.pixel(0, 0), [0.0, 0.0, 1.0, 1.0], 0.0);
    assert_pixel_near(image.pixel(1, 0), [1.0, 1.0, 1.0, 1.0], 0.0);
    assert_pixel_near(image.pixel(0, 1), [1.0, 0.0, 0.0, 1.0], 0.0);
    assert_pixel_near(image.pixel(1, 1), [0.0, 1.0, 0.0, 1.0], 0.0);
}

#[test]
fn rgba_pixels_are_premultiplied() {
    let bytes = encode_png(1, 1, png::ColorType::Rgba, png::BitDepth::Eight, &[128, 128, 128, 128]);

    let image = decode_png(&bytes).unwrap();

    let alpha = 128.0 / 255.0;
    let linear = srgb_gamma_to_linear(128.0 / 255.0);

    assert_pixel_near(
        image.pixel(0, 0),
        [linear * alpha, linear * alpha, linear * alpha, alpha],
        5e-4,
    );

    // The reference values from the sRGB curve itself
    assert!((linear - 0.21586).abs() < 1e-4);
    assert!((image.pixel(0, 0).r() - 0.10835).abs() < 5e-4);
}

#[test]
fn greyscale_expands_to_all_channels() {
    let bytes = encode_png(3, 1, png::ColorType::Grayscale, png::BitDepth::Eight, &[0, 128, 255]);

    let image = decode_png(&bytes).unwrap();
    let mid = srgb_gamma_to_linear(128.0 / 255.0);

    assert_pixel_near(image.pixel(0, 0), [0.0, 0.0, 0.0, 1.0], 0.0);
    assert_pixel_near(image.pixel(1, 0), [mid, mid, mid, 1.0], 5e-4);
    assert_pixel_near(image.pixel(2, 0), [1.0, 1.0, 1.0, 1.0], 0.0);
}

#[test]
fn sixteen_bit_greyscale_alpha() {
    // Full-scale grey at half alpha, big-endian samples
    let bytes = encode_png(
        1,
        1,
        png::ColorType::GrayscaleAlpha,
        png::BitDepth::Sixteen,
        &[0xff, 0xff, 0x80, 0x00],
    );

    let image = decode_png(&bytes).unwrap();
    let alpha = 32768.0 / 65535.0;

    assert_pixel_near(image.pixel(0, 0), [alpha, alpha, alpha, alpha], 1e-3);
}

#[test]
fn sixteen_bit_rgb() {
    let bytes = encode_png(
        1,
        1,
        png::ColorType::Rgb,
        png::BitDepth::Sixteen,
        &[0xff, 0xff, 0x00, 0x00, 0x80, 0x00],
    );

    let image = decode_png(&bytes).unwrap();
    let half = srgb_gamma_to_linear(32768.0 / 65535.0);

    assert_pixel_near(image.pixel(0, 0), [1.0, 0.0, half, 1.0], 1e-3);
}

#[test]
fn every_filter_type_round_trips() {
    // A deterministic pseudo-random image, encoded once per filter type; the decoder has to
    // reproduce the same linear pixels every time
    let width = 33usize;
    let height = 17usize;

    let mut seed = 0x1234_5678u32;
    let mut samples = vec![0u8; width * height * 4];
    for sample in samples.iter_mut() {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        *sample = (seed >> 24) as u8;
    }

    let filters = [
        png::FilterType::NoFilter,
        png::FilterType::Sub,
        png::FilterType::Up,
        png::FilterType::Avg,
        png::FilterType::Paeth,
    ];

    for filter in filters.iter() {
        let bytes = encode_png_with_filter(
            width as u32,
            height as u32,
            png::ColorType::Rgba,
            png::BitDepth::Eight,
            *filter,
            &samples,
        );
        let image = decode_png(&bytes).unwrap();

        for y in 0..height {
            for x in 0..width {
                let offset = (y * width + x) * 4;
                let alpha = samples[offset + 3] as f32 / 255.0;
                let expected = [
                    srgb_gamma_to_linear(samples[offset] as f32 / 255.0) * alpha,
                    srgb_gamma_to_linear(samples[offset + 1] as f32 / 255.0) * alpha,
                    srgb_gamma_to_linear(samples[offset + 2] as f32 / 255.0) * alpha,
                    alpha,
                ];

                // Remember the vertical flip
                assert_pixel_near(image.pixel(x, height - 1 - y), expected, 2e-3);
            }
        }
    }
}

#[test]
fn multiple_idat_chunks_concatenate() {
    // The same zlib stream split over two IDAT chunks must decode identically
    let stream = deflate_rows(&[&[200, 100, 50]]);
    let (first_half, second_half) = stream.split_at(stream.len() / 2);

    let split_file = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"IDAT", first_half),
        chunk(b"IDAT", second_half),
    ]);
    let whole_file = png_file(&[ihdr_chunk(1, 1, 8, 2), chunk(b"IDAT", &stream)]);

    let split_image = decode_png(&split_file).unwrap();
    let whole_image = decode_png(&whole_file).unwrap();

    assert_eq!(split_image.pixel(0, 0), whole_image.pixel(0, 0));
    assert!(split_image.pixel(0, 0).r() > 0.0);
}

#[test]
fn unknown_ancillary_chunks_are_skipped() {
    let bytes = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"tEXt", b"comment\0hello"),
        idat_chunk(&[&[255, 255, 255]]),
        chunk(b"tIME", &[0; 7]),
    ]);

    let image = decode_png(&bytes).unwrap();

    assert_pixel_near(image.pixel(0, 0), [1.0, 1.0, 1.0, 1.0], 0.0);
}

// ---------------------------------------------------------------------------------------------
// Color space chunks
// ---------------------------------------------------------------------------------------------

#[test]
fn gama_chunk_replaces_the_transfer_function() {
    let gamma = 45455.0f32 / 100_000.0;
    let bytes = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"gAMA", &45455u32.to_be_bytes()),
        idat_chunk(&[&[128, 128, 128]]),
    ]);

    let image = decode_png(&bytes).unwrap();
    let expected = (128.0f32 / 255.0).powf(1.0 / gamma);

    assert_pixel_near(image.pixel(0, 0), [expected, expected, expected, 1.0], 1e-3);
}

#[test]
fn srgb_chunk_overrides_gama() {
    let plain = png_file(&[ihdr_chunk(1, 1, 8, 2), idat_chunk(&[&[128, 60, 200]])]);
    let overridden = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"gAMA", &45455u32.to_be_bytes()),
        chunk(b"sRGB", &[0]),
        idat_chunk(&[&[128, 60, 200]]),
    ]);

    let plain_image = decode_png(&plain).unwrap();
    let overridden_image = decode_png(&overridden).unwrap();

    assert_eq!(plain_image.pixel(0, 0), overridden_image.pixel(0, 0));
}

#[test]
fn chrm_with_srgb_primaries_is_nearly_identity() {
    let mut chrm = vec![];
    for value in [31270u32, 32900, 64000, 33000, 30000, 60000, 15000, 6000].iter() {
        chrm.extend_from_slice(&value.to_be_bytes());
    }

    let with_chrm = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"cHRM", &chrm),
        idat_chunk(&[&[200, 50, 120]]),
    ]);
    let plain = png_file(&[ihdr_chunk(1, 1, 8, 2), idat_chunk(&[&[200, 50, 120]])]);

    let with_chrm_image = decode_png(&with_chrm).unwrap();
    let plain_image = decode_png(&plain).unwrap();
    let reference = plain_image.pixel(0, 0);

    assert_pixel_near(
        with_chrm_image.pixel(0, 0),
        [reference.r(), reference.g(), reference.b(), reference.a()],
        2e-3,
    );
}

#[test]
fn chrm_with_rec2020_primaries_preserves_white() {
    // Different primaries, same D65 white point: white stays white
    let mut chrm = vec![];
    for value in [31270u32, 32900, 70800, 29200, 17000, 79700, 13100, 4600].iter() {
        chrm.extend_from_slice(&value.to_be_bytes());
    }

    let bytes = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"cHRM", &chrm),
        idat_chunk(&[&[255, 255, 255]]),
    ]);

    let image = decode_png(&bytes).unwrap();

    assert_pixel_near(image.pixel(0, 0), [1.0, 1.0, 1.0, 1.0], 2e-3);
}

#[test]
fn iccp_rec2100_pq_profile_scales_to_scrgb() {
    let mut iccp = vec![];
    iccp.extend_from_slice(b"ITUR_2100_PQ_FULL\0");
    iccp.push(0); // compression method
    iccp.extend_from_slice(&[0, 0]); // the profile data itself is ignored

    let bytes = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"iCCP", &iccp),
        idat_chunk(&[&[255, 255, 255]]),
    ]);

    let image = decode_png(&bytes).unwrap();

    // A full-scale PQ sample is 10000 cd/m2, which is 125.0 on the scRGB scale
    assert_pixel_near(image.pixel(0, 0), [125.0, 125.0, 125.0, 1.0], 0.5);
}

#[test]
fn unrecognized_iccp_profiles_are_ignored() {
    let mut iccp = vec![];
    iccp.extend_from_slice(b"some other profile\0");
    iccp.push(0);
    iccp.extend_from_slice(&[1, 2, 3]);

    let with_iccp = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"iCCP", &iccp),
        idat_chunk(&[&[128, 60, 200]]),
    ]);
    let plain = png_file(&[ihdr_chunk(1, 1, 8, 2), idat_chunk(&[&[128, 60, 200]])]);

    assert_eq!(
        decode_png(&with_iccp).unwrap().pixel(0, 0),
        decode_png(&plain).unwrap().pixel(0, 0)
    );
}

// ---------------------------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------------------------

#[test]
fn rejects_bad_signature() {
    let mut bytes = png_file(&[ihdr_chunk(1, 1, 8, 2), idat_chunk(&[&[0, 0, 0]])]);
    bytes[0] = 0x42;

    assert!(matches!(decode_png(&bytes), Err(PngError::InvalidSignature)));
}

#[test]
fn rejects_truncated_header() {
    assert!(matches!(decode_png(&[137, 80, 78]), Err(PngError::Truncated)));
}

#[test]
fn rejects_missing_ihdr() {
    let bytes = png_file(&[idat_chunk(&[&[0, 0, 0]])]);

    assert!(matches!(decode_png(&bytes), Err(PngError::MissingIhdr)));
}

#[test]
fn rejects_chunk_running_past_the_file() {
    let mut bytes = vec![137, 80, 78, 71, 13, 10, 26, 10];
    bytes.extend_from_slice(&100u32.to_be_bytes());
    bytes.extend_from_slice(b"IDAT");
    bytes.extend_from_slice(&[1, 2, 3, 4]);

    assert!(matches!(decode_png(&bytes), Err(PngError::InvalidChunkLength)));
}

#[test]
fn rejects_oversized_chunk_length() {
    let mut bytes = vec![137, 80, 78, 71, 13, 10, 26, 10];
    bytes.extend_from_slice(&0x8000_0000u32.to_be_bytes());
    bytes.extend_from_slice(b"IDAT");

    assert!(matches!(decode_png(&bytes), Err(PngError::InvalidChunkLength)));
}

#[test]
fn rejects_paletted_images() {
    let bytes = png_file(&[ihdr_chunk(1, 1, 8, 3), idat_chunk(&[&[0]])]);

    assert!(matches!(decode_png(&bytes), Err(PngError::Unsupported(_))));
}

#[test]
fn rejects_unknown_color_type_bits() {
    let bytes = png_file(&[ihdr_chunk(1, 1, 8, 8), idat_chunk(&[&[0]])]);

    assert!(matches!(decode_png(&bytes), Err(PngError::Unsupported(_))));
}

#[test]
fn rejects_unsupported_bit_depth() {
    let bytes = png_file(&[ihdr_chunk(1, 1, 4, 0), idat_chunk(&[&[0]])]);

    assert!(matches!(decode_png(&bytes), Err(PngError::Unsupported(_))));
}

#[test]
fn rejects_interlaced_images() {
    let mut data = vec![];
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(&[8, 2, 0, 0, 1]);

    let bytes = png_file(&[chunk(b"IHDR", &data), idat_chunk(&[&[0, 0, 0]])]);

    assert!(matches!(decode_png(&bytes), Err(PngError::Unsupported(_))));
}

#[test]
fn rejects_oversized_dimensions() {
    let bytes = png_file(&[ihdr_chunk(16385, 1, 8, 2)]);

    assert!(matches!(decode_png(&bytes), Err(PngError::DimensionTooLarge)));
}

#[test]
fn rejects_zero_gamma() {
    let bytes = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"gAMA", &0u32.to_be_bytes()),
        idat_chunk(&[&[0, 0, 0]]),
    ]);

    assert!(matches!(decode_png(&bytes), Err(PngError::InvalidGamma)));
}

#[test]
fn rejects_invalid_rendering_intent() {
    let bytes = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"sRGB", &[4]),
        idat_chunk(&[&[0, 0, 0]]),
    ]);

    assert!(matches!(decode_png(&bytes), Err(PngError::InvalidRenderingIntent)));
}

#[test]
fn rejects_unterminated_iccp_name() {
    let bytes = png_file(&[
        ihdr_chunk(1, 1, 8, 2),
        chunk(b"iCCP", b"no terminator here"),
        idat_chunk(&[&[0, 0, 0]]),
    ]);

    assert!(matches!(decode_png(&bytes), Err(PngError::StringNotNullTerminated)));
}

#[test]
fn rejects_unknown_filter_type() {
    let bytes = png_file(&[ihdr_chunk(1, 1, 8, 2), {
        // A line whose filter-type byte is 9
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&[9, 0, 0, 0]).unwrap();
        chunk(b"IDAT", &encoder.finish().unwrap())
    }]);

    assert!(matches!(decode_png(&bytes), Err(PngError::UnknownFilterType(9))));
}

#[test]
fn rejects_wrong_decompressed_size() {
    // Two rows of data for a one-row image
    let bytes = png_file(&[ihdr_chunk(1, 1, 8, 2), idat_chunk(&[&[0, 0, 0], &[0, 0, 0]])]);

    assert!(matches!(decode_png(&bytes), Err(PngError::DecompressionSizeMismatch)));
}

#[test]
fn decoder_reports_dimensions_before_decoding() {
    let bytes = encode_png(7, 3, png::ColorType::Rgb, png::BitDepth::Eight, &[0; 7 * 3 * 3]);
    let decoder = PngDecoder::new(&bytes).unwrap();

    assert_eq!(decoder.width(), 7);
    assert_eq!(decoder.height(), 3);
}
