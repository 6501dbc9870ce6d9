//! 2D transformation matrices for rotated content, i.e. the draft watermark.

use crate::units::*;

/// A PDF transformation matrix `[a b c d e f]`, where (0,0) is the bottom-left of the page:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// Transforms chain with [`then`](Transform::then); operations apply in the order they
/// are chained.
///
/// ```
/// use permit_pdf::{Transform, Pt};
///
/// // tilt by 45 degrees, then move the origin to the middle of a letter page
/// let transform = Transform::rotate(std::f32::consts::FRAC_PI_4)
///     .with_translate(Pt(306.0), Pt(396.0));
/// let (x, y) = transform.apply(Pt(0.0), Pt(0.0));
/// assert_eq!((x, y), (Pt(306.0), Pt(396.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no transformation)
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a translation transform
    pub fn translate(x: Pt, y: Pt) -> Self {
        Transform {
            e: *x,
            f: *y,
            ..Self::identity()
        }
    }

    /// Create a rotation transform (angle in radians, counter-clockwise)
    pub fn rotate(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Combine this transform with another (self * other)
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Add a translation to this transform
    pub fn with_translate(self, x: Pt, y: Pt) -> Self {
        self.then(Transform::translate(x, y))
    }

    /// Map a point through the transform
    pub fn apply(&self, x: Pt, y: Pt) -> (Pt, Pt) {
        (
            Pt(self.a * x.0 + self.c * y.0 + self.e),
            Pt(self.b * x.0 + self.d * y.0 + self.f),
        )
    }

    pub(crate) fn matrix(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_maps_x_onto_y() {
        let (x, y) = Transform::rotate(FRAC_PI_2).apply(Pt(10.0), Pt(0.0));
        assert!(x.0.abs() < 1e-5);
        assert!((y.0 - 10.0).abs() < 1e-5);
    }

    #[test]
    fn rotation_happens_before_translation() {
        let t = Transform::rotate(FRAC_PI_2).with_translate(Pt(100.0), Pt(0.0));
        let (x, y) = t.apply(Pt(10.0), Pt(0.0));
        assert!((x.0 - 100.0).abs() < 1e-4);
        assert!((y.0 - 10.0).abs() < 1e-4);
    }
}
