// SMPTE ST 2084 (PQ) constants
const PQ_M1: f32 = 0.1593017578125;
const PQ_M2: f32 = 78.84375;
const PQ_C1: f32 = 0.8359375;
const PQ_C2: f32 = 18.8515625;
const PQ_C3: f32 = 18.6875;

/// PQ encodes luminance up to 10000 cd/m2; scRGB puts SDR white (1,1,1) at 80 cd/m2
const PQ_TO_SCRGB: f32 = 10000.0 / 80.0;

///
/// The sRGB electro-optical transfer function: converts a gamma-encoded sRGB sample in 0..1 to
/// linear light
///
#[inline]
pub fn srgb_gamma_to_linear(u: f32) -> f32 {
    if u <= 0.04045 {
        u / 12.92
    } else {
        ((u + 0.055) / 1.055).powf(2.4)
    }
}

///
/// The inverse of `srgb_gamma_to_linear`
///
#[inline]
pub fn srgb_linear_to_gamma(u: f32) -> f32 {
    if u <= 0.003_130_8 {
        u * 12.92
    } else {
        1.055 * u.powf(1.0 / 2.4) - 0.055
    }
}

///
/// The Rec.2100 PQ inverse EOTF: converts a PQ-encoded sample in 0..1 to linear scRGB light
///
/// The result is scaled so that PQ's 10000 cd/m2 peak lands on the scRGB scale, where 1.0 is
/// the 80 cd/m2 SDR reference white. A full-scale PQ sample therefore decodes to 125.0.
///
pub fn rec2100_pq_gamma_to_linear(n: f32) -> f32 {
    let n_m2 = n.powf(1.0 / PQ_M2);
    let numerator = (n_m2 - PQ_C1).max(0.0);

    (numerator / (PQ_C2 - PQ_C3 * n_m2)).powf(1.0 / PQ_M1) * PQ_TO_SCRGB
}

///
/// The inverse of `rec2100_pq_gamma_to_linear`
///
pub fn rec2100_pq_linear_to_gamma(l: f32) -> f32 {
    let l = l / PQ_TO_SCRGB;
    let l_m1 = l.powf(PQ_M1);

    ((PQ_C1 + PQ_C2 * l_m1) / (1.0 + PQ_C3 * l_m1)).powf(PQ_M2)
}

///
/// A sample-to-linear look-up table for one transfer function
///
/// The PNG decoder converts every color sample through one of these, so the transfer function
/// is evaluated once per table entry rather than once per sample. The table has one entry per
/// representable sample value (256 or 65536 entries), and a full-scale sample maps to an input
/// of exactly 1.0.
///
pub struct TransferLut {
    table: Vec<f32>,
}

impl TransferLut {
    ///
    /// Builds the look-up table for the sRGB transfer function
    ///
    pub fn srgb(bit_depth: u32) -> TransferLut {
        TransferLut::build(bit_depth, srgb_gamma_to_linear)
    }

    ///
    /// Builds the look-up table for the Rec.2100 PQ transfer function (scaled to scRGB)
    ///
    pub fn rec2100_pq(bit_depth: u32) -> TransferLut {
        TransferLut::build(bit_depth, rec2100_pq_gamma_to_linear)
    }

    ///
    /// Builds the look-up table for a pure power transfer function
    ///
    pub fn power(exponent: f32, bit_depth: u32) -> TransferLut {
        TransferLut::build(bit_depth, move |u| u.powf(exponent))
    }

    fn build(bit_depth: u32, gamma_to_linear: impl Fn(f32) -> f32) -> TransferLut {
        debug_assert!(bit_depth == 8 || bit_depth == 16);

        let entries = if bit_depth == 8 { 256usize } else { 65536usize };
        let full_scale = (entries - 1) as f32;

        let table = (0..entries).map(|sample| gamma_to_linear(sample as f32 / full_scale)).collect();

        TransferLut { table }
    }

    ///
    /// Converts a sample to linear light. `sample` ranges over the values representable at the
    /// table's bit depth.
    ///
    #[inline]
    pub fn look_up(&self, sample: u16) -> f32 {
        self.table[sample as usize]
    }
}
