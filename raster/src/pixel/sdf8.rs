///
/// A pixel of a single-channel signed distance field
///
/// The byte stores a signed normalized value: +/-127 maps to +/-`MAX_DISTANCE` pixels, and
/// values outside that range saturate. Positive distances are outside the shape, negative
/// distances inside.
///
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Sdf8(i8);

impl Sdf8 {
    ///
    /// The largest distance in pixels the field can represent
    ///
    /// This needs to be at least the diagonal distance between two pixels (sqrt(2)) so that
    /// bilinear interpolation between any pair of samples stays meaningful.
    ///
    pub const MAX_DISTANCE: f32 = 3.0;

    ///
    /// The distance in pixels this sample represents
    ///
    #[inline]
    pub fn distance(self) -> f32 {
        (self.0 as f32 / 127.0) * Sdf8::MAX_DISTANCE
    }

    ///
    /// The raw signed byte
    ///
    #[inline]
    pub fn to_byte(self) -> i8 {
        self.0
    }
}

impl From<f32> for Sdf8 {
    #[inline]
    fn from(distance: f32) -> Sdf8 {
        let normalized = (distance * (1.0 / Sdf8::MAX_DISTANCE)).clamp(-1.0, 1.0);

        Sdf8((normalized * 127.0).round() as i8)
    }
}

impl From<Sdf8> for f32 {
    #[inline]
    fn from(sample: Sdf8) -> f32 {
        sample.distance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_within_quantization_error() {
        let step = Sdf8::MAX_DISTANCE / 127.0;

        for i in -40..=40 {
            let distance = i as f32 * 0.1;
            let round_tripped = Sdf8::from(distance).distance();
            let expected = distance.clamp(-Sdf8::MAX_DISTANCE, Sdf8::MAX_DISTANCE);

            assert!(
                (round_tripped - expected).abs() <= step,
                "{} round-tripped to {}",
                distance,
                round_tripped
            );
        }
    }

    #[test]
    fn saturates_at_the_limits() {
        assert!(Sdf8::from(1000.0).to_byte() == 127);
        assert!(Sdf8::from(-1000.0).to_byte() == -127);
        assert!(Sdf8::from(-f32::MAX).to_byte() == -127);
    }

    #[test]
    fn zero_is_exact() {
        assert!(Sdf8::from(0.0).distance() == 0.0);
    }
}
