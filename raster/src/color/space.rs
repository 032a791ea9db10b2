use once_cell::sync::Lazy;
use wide::f32x4;

///
/// A 3x3 color conversion matrix
///
/// Columns are stored as SIMD vectors with a zero w lane, so transforming an `[r, g, b, a]`
/// pixel applies the matrix to the color components while the alpha passes through untouched.
///
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Mat3 {
    cols: [f32x4; 3],
}

impl Mat3 {
    ///
    /// The identity matrix
    ///
    pub fn identity() -> Mat3 {
        Mat3::from_columns([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0])
    }

    ///
    /// Creates a matrix from its three columns
    ///
    pub fn from_columns(c0: [f32; 3], c1: [f32; 3], c2: [f32; 3]) -> Mat3 {
        Mat3 {
            cols: [
                f32x4::new([c0[0], c0[1], c0[2], 0.0]),
                f32x4::new([c1[0], c1[1], c1[2], 0.0]),
                f32x4::new([c2[0], c2[1], c2[2], 0.0]),
            ],
        }
    }

    fn column(&self, index: usize) -> [f32; 3] {
        let [x, y, z, _] = self.cols[index].to_array();

        [x, y, z]
    }

    ///
    /// Applies this matrix to the x, y, z lanes of a pixel; the w lane passes through
    ///
    #[inline]
    pub fn transform(&self, v: f32x4) -> f32x4 {
        let [x, y, z, w] = v.to_array();

        self.cols[0] * f32x4::splat(x)
            + self.cols[1] * f32x4::splat(y)
            + self.cols[2] * f32x4::splat(z)
            + f32x4::new([0.0, 0.0, 0.0, w])
    }

    ///
    /// Applies this matrix to a plain 3-component vector
    ///
    pub fn transform_vec3(&self, v: [f32; 3]) -> [f32; 3] {
        let [x, y, z, _] = self.transform(f32x4::new([v[0], v[1], v[2], 0.0])).to_array();

        [x, y, z]
    }

    ///
    /// The inverse of this matrix
    ///
    pub fn inverse(&self) -> Mat3 {
        let c0 = self.column(0);
        let c1 = self.column(1);
        let c2 = self.column(2);

        let determinant = dot3(c0, cross3(c1, c2));

        // The rows of the inverse are the cross products of the column pairs
        let r0 = scale3(cross3(c1, c2), 1.0 / determinant);
        let r1 = scale3(cross3(c2, c0), 1.0 / determinant);
        let r2 = scale3(cross3(c0, c1), 1.0 / determinant);

        Mat3::from_columns(
            [r0[0], r1[0], r2[0]],
            [r0[1], r1[1], r2[1]],
            [r0[2], r1[2], r2[2]],
        )
    }

    ///
    /// The matrix product `self * rhs`
    ///
    pub fn multiply(&self, rhs: &Mat3) -> Mat3 {
        Mat3 {
            cols: [
                self.transform(rhs.cols[0]),
                self.transform(rhs.cols[1]),
                self.transform(rhs.cols[2]),
            ],
        }
    }
}

#[inline]
fn dot3(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn scale3(v: [f32; 3], s: f32) -> [f32; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

///
/// Builds the RGB-to-XYZ matrix for a color space given in CIE xy chromaticity coordinates
///
/// The tristimulus direction of each primary follows from its chromaticity; the white point
/// fixes the scale of each primary so that RGB (1, 1, 1) maps exactly onto the white point's
/// XYZ coordinates.
///
pub fn color_primaries_to_rgb_to_xyz(
    wx: f32,
    wy: f32,
    rx: f32,
    ry: f32,
    gx: f32,
    gy: f32,
    bx: f32,
    by: f32,
) -> Mat3 {
    let r = [rx, ry, 1.0 - rx - ry];
    let g = [gx, gy, 1.0 - gx - gy];
    let b = [bx, by, 1.0 - bx - by];

    // White point tristimulus values from its chromaticity, normalized to Y = 1
    let w = [wx / wy, 1.0, (1.0 - wx - wy) / wy];

    // C is the chromaticity matrix; solve C * s = w for the per-primary scales
    let chromaticities = Mat3::from_columns(r, g, b);
    let scales = chromaticities.inverse().transform_vec3(w);

    Mat3::from_columns(scale3(r, scales[0]), scale3(g, scales[1]), scale3(b, scales[2]))
}

/// The matrix converting linear sRGB to CIE XYZ (sRGB primaries, D65 white point)
pub static SRGB_TO_XYZ: Lazy<Mat3> =
    Lazy::new(|| color_primaries_to_rgb_to_xyz(0.3127, 0.3290, 0.64, 0.33, 0.30, 0.60, 0.15, 0.06));

/// The matrix converting CIE XYZ to linear sRGB
pub static XYZ_TO_SRGB: Lazy<Mat3> = Lazy::new(|| SRGB_TO_XYZ.inverse());

/// The matrix converting linear Rec.2020 RGB to CIE XYZ
pub static REC2020_TO_XYZ: Lazy<Mat3> =
    Lazy::new(|| color_primaries_to_rgb_to_xyz(0.3127, 0.3290, 0.708, 0.292, 0.170, 0.797, 0.131, 0.046));

/// Rec.2100 shares the Rec.2020 primaries
pub static REC2100_TO_XYZ: Lazy<Mat3> = Lazy::new(|| *REC2020_TO_XYZ);
