use smallvec::{smallvec, SmallVec};

use std::f32::consts::PI;

/// The real roots of a polynomial of degree 3 or lower
pub type Roots = SmallVec<[f32; 3]>;

/// Coefficients smaller than this are treated as 0 when deciding the degree of a polynomial
const COEFFICIENT_EPSILON: f32 = 1e-7;

///
/// Solves `a*t + b = 0`
///
/// A degenerate (constant) polynomial has no roots, even when it is zero everywhere.
///
pub fn solve_linear(a: f32, b: f32) -> Roots {
    if a.abs() < COEFFICIENT_EPSILON {
        smallvec![]
    } else {
        smallvec![-b / a]
    }
}

///
/// Solves `a*t^2 + b*t + c = 0`
///
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Roots {
    if a.abs() < COEFFICIENT_EPSILON {
        return solve_linear(b, c);
    }

    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        smallvec![]
    } else if discriminant == 0.0 {
        smallvec![-b / (2.0 * a)]
    } else {
        let sqrt_discriminant = discriminant.sqrt();
        smallvec![(-b + sqrt_discriminant) / (2.0 * a), (-b - sqrt_discriminant) / (2.0 * a)]
    }
}

///
/// Solves `a*t^3 + b*t^2 + c*t + d = 0`
///
/// Uses Cardano's method, with the trigonometric branch when all three roots are real. Roots are
/// returned in no particular order.
///
pub fn solve_cubic(a: f32, b: f32, c: f32, d: f32) -> Roots {
    if a.abs() < COEFFICIENT_EPSILON {
        return solve_quadratic(b, c, d);
    }

    // Normalize to t^3 + a2*t^2 + a1*t + a0
    let a2 = b / a;
    let a1 = c / a;
    let a0 = d / a;

    let q = (3.0 * a1 - a2 * a2) / 9.0;
    let r = (9.0 * a2 * a1 - 27.0 * a0 - 2.0 * a2 * a2 * a2) / 54.0;
    let discriminant = q * q * q + r * r;
    let shift = a2 / 3.0;

    if discriminant < 0.0 {
        // Three distinct real roots
        let theta = (r / (-q * q * q).sqrt()).clamp(-1.0, 1.0).acos();
        let magnitude = 2.0 * (-q).sqrt();

        smallvec![
            magnitude * (theta / 3.0).cos() - shift,
            magnitude * ((theta + 2.0 * PI) / 3.0).cos() - shift,
            magnitude * ((theta + 4.0 * PI) / 3.0).cos() - shift,
        ]
    } else if discriminant == 0.0 {
        // Repeated real roots
        let s = r.cbrt();

        if s == 0.0 {
            smallvec![-shift]
        } else {
            smallvec![2.0 * s - shift, -s - shift]
        }
    } else {
        // One real root
        let sqrt_discriminant = discriminant.sqrt();
        let s = (r + sqrt_discriminant).cbrt();
        let t = (r - sqrt_discriminant).cbrt();

        smallvec![s + t - shift]
    }
}
