//! 2D affine transformation matrices.
//!
//! A matrix is stored as the six coefficients `[a b c d e f]` of
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```
//!
//! which is the layout PDF content streams use for `cm` operands.

/// A 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// The identity transform.
    pub fn identity() -> Self {
        Matrix {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// A pure translation.
    pub fn translation(dx: f64, dy: f64) -> Self {
        Matrix {
            e: dx,
            f: dy,
            ..Matrix::identity()
        }
    }

    /// A pure scale.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Matrix {
            a: sx,
            d: sy,
            ..Matrix::identity()
        }
    }

    /// A rotation about the origin by `radians`.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Matrix {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// A rotation about the point (px, py) by `radians`.
    ///
    /// Equivalent to translate(px, py), rotate, translate(-px, -py).
    pub fn rotation_about(radians: f64, px: f64, py: f64) -> Self {
        Matrix::translation(px, py)
            .pre_concat(&Matrix::rotation(radians))
            .pre_concat(&Matrix::translation(-px, -py))
    }

    /// Returns `self * other`, so `other` applies first when transforming a
    /// point.
    pub fn pre_concat(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Transforms the point (x, y).
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// The coefficients in `cm` operand order.
    pub fn as_coeffs(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}
