use crate::color::*;
use crate::pixel::*;

use flate2::read::ZlibDecoder;
use thiserror::Error;
use wide::f32x4;

use std::io::Read;

/// PNG file signature
const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Largest width or height the decoder will accept
const MAX_DIMENSION: usize = 16384;

/// Profile name of the iCCP chunk that selects the Rec.2100 PQ interpretation
const REC2100_PQ_PROFILE: &[u8] = b"ITUR_2100_PQ_FULL";

///
/// The ways a PNG file can fail to decode
///
/// All of these are recoverable at the call site: decoding aborts and no partial pixmap is
/// returned.
///
#[derive(Error, Debug)]
pub enum PngError {
    #[error("invalid PNG file signature")]
    InvalidSignature,

    #[error("chunk length must be smaller than 2GB and lie within the file")]
    InvalidChunkLength,

    #[error("missing IHDR chunk")]
    MissingIhdr,

    #[error("unsupported feature: {0}")]
    Unsupported(&'static str),

    #[error("image width or height is too large")]
    DimensionTooLarge,

    #[error("gamma value can not be zero")]
    InvalidGamma,

    #[error("invalid sRGB rendering intent")]
    InvalidRenderingIntent,

    #[error("unknown line-filter type {0}")]
    UnknownFilterType(u8),

    #[error("uncompressed image data has incorrect size")]
    DecompressionSizeMismatch,

    #[error("string is not null terminated")]
    StringNotNullTerminated,

    #[error("file ends in the middle of a header or chunk")]
    Truncated,

    #[error("corrupt image data: {0}")]
    Inflate(#[from] std::io::Error),
}

///
/// A PNG decoder for one in-memory file
///
/// The decoder borrows the file buffer for its whole lifetime, so the IDAT chunk data can be
/// referenced without copying. Constructing the decoder parses the chunk structure and resolves
/// the color space; `decode_image` then inflates and converts the pixel data.
///
/// Supported files are non-interlaced, non-paletted, 8- or 16-bit greyscale or true color, with
/// or without alpha. The output is always linear premultiplied scRGB with the bottom image row
/// first, ready for the texture atlas.
///
pub struct PngDecoder<'a> {
    width:              usize,
    height:             usize,
    bit_depth:          u32,
    is_color:           bool,
    has_alpha:          bool,
    bytes_per_line:     usize,
    stride:             usize,
    bytes_per_pixel:    usize,

    /// IDAT chunk payloads, in file order, borrowed from the file buffer
    idat_chunks:        Vec<&'a [u8]>,

    /// Converts linear decoded RGB to linear sRGB
    color_to_srgb:      Mat3,

    /// Converts file samples to linear light
    transfer:           TransferLut,
}

///
/// Decodes a PNG file from a byte buffer in one step
///
pub fn decode_png(bytes: &[u8]) -> Result<Pixmap<ScRgba16>, PngError> {
    PngDecoder::new(bytes)?.decode_image()
}

impl<'a> PngDecoder<'a> {
    ///
    /// Parses the chunk structure of a PNG file and resolves its color space
    ///
    pub fn new(bytes: &'a [u8]) -> Result<PngDecoder<'a>, PngError> {
        if bytes.get(0..8).ok_or(PngError::Truncated)? != &SIGNATURE[..] {
            return Err(PngError::InvalidSignature);
        }

        // Walk the chunks, remembering the ones that matter. Later color chunks override
        // earlier ones, so they are applied in a fixed order below rather than in file order.
        let mut ihdr_data = None;
        let mut chrm_data = None;
        let mut gama_data = None;
        let mut iccp_data = None;
        let mut srgb_data = None;
        let mut idat_chunks = vec![];

        let mut offset = 8;
        loop {
            let length = read_u32_be(bytes, offset)? as usize;
            if length >= 0x8000_0000 {
                return Err(PngError::InvalidChunkLength);
            }

            let chunk_type = bytes.get(offset + 4..offset + 8).ok_or(PngError::Truncated)?;

            let data_start = offset + 8;
            let data_end = data_start + length;
            if data_end + 4 > bytes.len() {
                return Err(PngError::InvalidChunkLength);
            }
            let data = &bytes[data_start..data_end];

            let mut finished = false;
            match chunk_type {
                b"IHDR" => ihdr_data = Some(data),
                b"IDAT" => idat_chunks.push(data),
                b"cHRM" => chrm_data = Some(data),
                b"gAMA" => gama_data = Some(data),
                b"iCCP" => iccp_data = Some(data),
                b"sRGB" => srgb_data = Some(data),
                b"IEND" => finished = true,
                other => log::debug!("skipping chunk {}", String::from_utf8_lossy(other)),
            }

            if finished {
                break;
            }

            // Move past the data and the CRC (read but not verified)
            offset = data_end + 4;
        }

        let ihdr_data = ihdr_data.ok_or(PngError::MissingIhdr)?;
        let mut decoder = PngDecoder::from_ihdr(ihdr_data, idat_chunks)?;

        if let Some(data) = chrm_data {
            decoder.read_chrm(data)?;
        }
        if let Some(data) = gama_data {
            decoder.read_gama(data)?;
        }

        // Overrides cHRM and gAMA
        if let Some(data) = iccp_data {
            decoder.read_iccp(data)?;
        }

        // Overrides cHRM, gAMA and iCCP
        if let Some(data) = srgb_data {
            decoder.read_srgb(data)?;
        }

        Ok(decoder)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    fn from_ihdr(data: &[u8], idat_chunks: Vec<&'a [u8]>) -> Result<PngDecoder<'a>, PngError> {
        if data.len() < 13 {
            return Err(PngError::Truncated);
        }

        let width = read_u32_be(data, 0)? as usize;
        let height = read_u32_be(data, 4)? as usize;
        let bit_depth = data[8] as u32;
        let color_type = data[9];
        let compression_method = data[10];
        let filter_method = data[11];
        let interlace_method = data[12];

        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(PngError::DimensionTooLarge);
        }
        if bit_depth != 8 && bit_depth != 16 {
            return Err(PngError::Unsupported("only bit depths of 8 and 16 are implemented"));
        }
        if compression_method != 0 {
            return Err(PngError::Unsupported("only deflate compression is allowed"));
        }
        if filter_method != 0 {
            return Err(PngError::Unsupported("only adaptive filtering is allowed"));
        }
        if interlace_method != 0 {
            return Err(PngError::Unsupported("interlaced images are not implemented"));
        }

        if color_type & 0xf8 != 0 {
            return Err(PngError::Unsupported("invalid color type"));
        }
        if color_type & 1 != 0 {
            return Err(PngError::Unsupported("paletted images are not supported"));
        }
        let is_color = color_type & 2 != 0;
        let has_alpha = color_type & 4 != 0;

        let samples_per_pixel = (has_alpha as usize) + if is_color { 3 } else { 1 };
        let bits_per_pixel = samples_per_pixel * bit_depth as usize;
        let bytes_per_line = (bits_per_pixel * width + 7) / 8;

        Ok(PngDecoder {
            width:              width,
            height:             height,
            bit_depth:          bit_depth,
            is_color:           is_color,
            has_alpha:          has_alpha,
            bytes_per_line:     bytes_per_line,

            // One filter-type byte in front of every line
            stride:             bytes_per_line + 1,
            bytes_per_pixel:    (bits_per_pixel / 8).max(1),
            idat_chunks:        idat_chunks,
            color_to_srgb:      Mat3::identity(),
            transfer:           TransferLut::srgb(bit_depth),
        })
    }

    fn read_chrm(&mut self, data: &[u8]) -> Result<(), PngError> {
        if data.len() < 32 {
            return Err(PngError::Truncated);
        }

        let mut values = [0.0f32; 8];
        for (index, value) in values.iter_mut().enumerate() {
            *value = read_u32_be(data, index * 4)? as f32 / 100_000.0;
        }

        let color_to_xyz = color_primaries_to_rgb_to_xyz(
            values[0], values[1], values[2], values[3], values[4], values[5], values[6], values[7],
        );
        self.color_to_srgb = XYZ_TO_SRGB.multiply(&color_to_xyz);

        Ok(())
    }

    fn read_gama(&mut self, data: &[u8]) -> Result<(), PngError> {
        let gamma = read_u32_be(data, 0)? as f32 / 100_000.0;
        if gamma == 0.0 {
            return Err(PngError::InvalidGamma);
        }

        self.transfer = TransferLut::power(1.0 / gamma, self.bit_depth);

        Ok(())
    }

    fn read_iccp(&mut self, data: &[u8]) -> Result<(), PngError> {
        let profile_name = read_null_terminated(data)?;

        if profile_name == REC2100_PQ_PROFILE {
            // The rule for this profile is to ignore the embedded ICC data completely and build
            // the conversion from scratch
            self.color_to_srgb = XYZ_TO_SRGB.multiply(&REC2100_TO_XYZ);
            self.transfer = TransferLut::rec2100_pq(self.bit_depth);
        }

        Ok(())
    }

    fn read_srgb(&mut self, data: &[u8]) -> Result<(), PngError> {
        let rendering_intent = *data.get(0).ok_or(PngError::Truncated)?;
        if rendering_intent > 3 {
            return Err(PngError::InvalidRenderingIntent);
        }

        self.color_to_srgb = Mat3::identity();
        self.transfer = TransferLut::srgb(self.bit_depth);

        Ok(())
    }

    ///
    /// Inflates, unfilters and converts the image data into a bottom-up scRGB pixmap
    ///
    pub fn decode_image(&self) -> Result<Pixmap<ScRgba16>, PngError> {
        let image_data_size = self.stride * self.height;

        let mut image_data = self.decompress_idat(image_data_size)?;
        self.unfilter_lines(&mut image_data)?;

        let mut image = Pixmap::new(self.width, self.height);
        self.data_to_image(&image_data, &mut image);

        Ok(image)
    }

    fn decompress_idat(&self, expected_size: usize) -> Result<Vec<u8>, PngError> {
        let mut inflated = Vec::with_capacity(expected_size);

        // A single IDAT chunk can be inflated straight out of the file buffer; multiple chunks
        // are merged first
        if self.idat_chunks.len() == 1 {
            let decoder = ZlibDecoder::new(self.idat_chunks[0]);
            decoder.take(expected_size as u64 + 1).read_to_end(&mut inflated)?;
        } else {
            let compressed: Vec<u8> = self.idat_chunks.iter().flat_map(|chunk| chunk.iter().copied()).collect();

            let decoder = ZlibDecoder::new(&compressed[..]);
            decoder.take(expected_size as u64 + 1).read_to_end(&mut inflated)?;
        }

        if inflated.len() != expected_size {
            return Err(PngError::DecompressionSizeMismatch);
        }

        Ok(inflated)
    }

    fn unfilter_lines(&self, image_data: &mut [u8]) -> Result<(), PngError> {
        let zero_line = vec![0u8; self.bytes_per_line];

        for y in 0..self.height {
            let (before, current) = image_data.split_at_mut(y * self.stride);

            let prev_line = if y == 0 {
                &zero_line[..]
            } else {
                let prev_start = (y - 1) * self.stride + 1;
                &before[prev_start..prev_start + self.bytes_per_line]
            };

            self.unfilter_line(&mut current[..self.stride], prev_line)?;
        }

        Ok(())
    }

    fn unfilter_line(&self, line: &mut [u8], prev_line: &[u8]) -> Result<(), PngError> {
        let filter_type = line[0];
        let line = &mut line[1..];

        match filter_type {
            0 => {}
            1 => unfilter_line_sub(line, self.bytes_per_pixel),
            2 => unfilter_line_up(line, prev_line),
            3 => unfilter_line_average(line, prev_line, self.bytes_per_pixel),
            4 => unfilter_line_paeth(line, prev_line, self.bytes_per_pixel),
            other => {
                return Err(PngError::UnknownFilterType(other));
            }
        }

        Ok(())
    }

    fn extract_pixel(&self, line: &[u8], x: usize) -> [u16; 4] {
        let mut offset = x * self.bytes_per_pixel;
        let two_bytes = self.bit_depth == 16;

        let r;
        let g;
        let b;
        if self.is_color {
            r = get_sample(line, &mut offset, two_bytes);
            g = get_sample(line, &mut offset, two_bytes);
            b = get_sample(line, &mut offset, two_bytes);
        } else {
            // Greyscale: one sample covers all three channels
            r = get_sample(line, &mut offset, two_bytes);
            g = r;
            b = r;
        }

        let a = if self.has_alpha {
            get_sample(line, &mut offset, two_bytes)
        } else if two_bytes {
            65535
        } else {
            255
        };

        [r, g, b, a]
    }

    fn data_to_image(&self, image_data: &[u8], image: &mut Pixmap<ScRgba16>) {
        let alpha_scale = if self.bit_depth == 16 { 1.0 / 65535.0 } else { 1.0 / 255.0 };

        for y in 0..self.height {
            // PNG stores rows top to bottom; the output pixmap is bottom-up
            let inverted_y = self.height - y - 1;

            let line_start = inverted_y * self.stride + 1;
            let line = &image_data[line_start..line_start + self.bytes_per_line];
            let row = image.row_mut(y);

            for (x, pixel) in row.iter_mut().enumerate() {
                let [r, g, b, a] = self.extract_pixel(line, x);

                let linear_rgb = f32x4::new([
                    self.transfer.look_up(r),
                    self.transfer.look_up(g),
                    self.transfer.look_up(b),
                    1.0,
                ]);
                let linear_srgb = self.color_to_srgb.transform(linear_rgb);
                let alpha = a as f32 * alpha_scale;

                // Premultiply so the pixel can be used in a texture map directly
                *pixel = ScRgba16::from_f32x4(linear_srgb * f32x4::splat(alpha));
            }
        }
    }
}

fn read_u32_be(bytes: &[u8], offset: usize) -> Result<u32, PngError> {
    let slice = bytes.get(offset..offset + 4).ok_or(PngError::Truncated)?;

    Ok(u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

fn read_null_terminated(bytes: &[u8]) -> Result<&[u8], PngError> {
    bytes
        .iter()
        .position(|byte| *byte == 0)
        .map(|end| &bytes[..end])
        .ok_or(PngError::StringNotNullTerminated)
}

fn get_sample(line: &[u8], offset: &mut usize, two_bytes: bool) -> u16 {
    let mut value = line[*offset] as u16;
    *offset += 1;

    if two_bytes {
        value = (value << 8) | line[*offset] as u16;
        *offset += 1;
    }

    value
}

fn unfilter_line_sub(line: &mut [u8], bytes_per_pixel: usize) {
    for i in bytes_per_pixel..line.len() {
        line[i] = line[i].wrapping_add(line[i - bytes_per_pixel]);
    }
}

fn unfilter_line_up(line: &mut [u8], prev_line: &[u8]) {
    for (byte, up) in line.iter_mut().zip(prev_line.iter()) {
        *byte = byte.wrapping_add(*up);
    }
}

fn unfilter_line_average(line: &mut [u8], prev_line: &[u8], bytes_per_pixel: usize) {
    for i in 0..line.len() {
        let left = if i >= bytes_per_pixel { line[i - bytes_per_pixel] as u16 } else { 0 };
        let up = prev_line[i] as u16;

        line[i] = line[i].wrapping_add(((left + up) / 2) as u8);
    }
}

fn unfilter_line_paeth(line: &mut [u8], prev_line: &[u8], bytes_per_pixel: usize) {
    for i in 0..line.len() {
        let left = if i >= bytes_per_pixel { line[i - bytes_per_pixel] } else { 0 };
        let up = prev_line[i];
        let up_left = if i >= bytes_per_pixel { prev_line[i - bytes_per_pixel] } else { 0 };

        line[i] = line[i].wrapping_add(paeth_predictor(left, up, up_left));
    }
}

///
/// The Paeth predictor picks whichever of the left, up and up-left neighbours is closest to
/// their linear combination, favouring left, then up
///
fn paeth_predictor(left: u8, up: u8, up_left: u8) -> u8 {
    let a = left as i16;
    let b = up as i16;
    let c = up_left as i16;

    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        up
    } else {
        up_left
    }
}
