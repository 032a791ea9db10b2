use super::point::*;
use super::vector::*;

///
/// A 2D affine transformation, stored as the top two rows of a 3x3 matrix
///
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform2D {
    rows: [[f32; 3]; 2],
}

impl Default for Transform2D {
    fn default() -> Self {
        Transform2D::identity()
    }
}

impl Transform2D {
    ///
    /// The identity transform
    ///
    #[inline]
    pub fn identity() -> Transform2D {
        Transform2D {
            rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        }
    }

    ///
    /// A transform that displaces points by the specified amounts
    ///
    #[inline]
    pub fn translate(dx: f32, dy: f32) -> Transform2D {
        Transform2D {
            rows: [[1.0, 0.0, dx], [0.0, 1.0, dy]],
        }
    }

    ///
    /// A transform that scales points about the origin
    ///
    #[inline]
    pub fn scale(sx: f32, sy: f32) -> Transform2D {
        Transform2D {
            rows: [[sx, 0.0, 0.0], [0.0, sy, 0.0]],
        }
    }

    ///
    /// Composes two transforms: the result applies `self` after `first`
    ///
    pub fn after(self, first: Transform2D) -> Transform2D {
        let a = self.rows;
        let b = first.rows;

        let mut rows = [[0.0; 3]; 2];
        for row in 0..2 {
            for col in 0..3 {
                rows[row][col] = a[row][0] * b[0][col] + a[row][1] * b[1][col];
            }
            rows[row][2] += a[row][2];
        }

        Transform2D { rows }
    }

    ///
    /// Applies this transform to a point
    ///
    #[inline]
    pub fn transform_point(&self, point: Point2) -> Point2 {
        let [r0, r1] = self.rows;

        Point2::new(
            r0[0] * point.x + r0[1] * point.y + r0[2],
            r1[0] * point.x + r1[1] * point.y + r1[2],
        )
    }

    ///
    /// Applies this transform to a displacement (ignoring the translation part)
    ///
    #[inline]
    pub fn transform_vector(&self, vector: Vector2) -> Vector2 {
        let [r0, r1] = self.rows;

        Vector2::new(r0[0] * vector.x + r0[1] * vector.y, r1[0] * vector.x + r1[1] * vector.y)
    }
}
