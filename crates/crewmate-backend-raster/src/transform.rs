//! 2D affine transforms.

/// A point in user or device space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Interpolates per axis, with separate fractions for x and y.
    pub fn lerp2(&self, other: &Point, tx: f64, ty: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * tx,
            self.y + (other.y - self.y) * ty,
        )
    }

    /// Rotates about the origin by `angle` radians.
    pub fn rotated(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Affine transform mapping `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
///
/// `translate`, `rotate` and `scale` compose in local space: the new
/// operation applies to points before the existing transform, matching the
/// usual 2D canvas convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::identity()
        }
    }

    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Returns the transform that applies `self`, then `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    pub fn translate(&self, tx: f64, ty: f64) -> Transform {
        Transform::translation(tx, ty).then(self)
    }

    pub fn rotate(&self, angle: f64) -> Transform {
        Transform::rotation(angle).then(self)
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Transform {
        Transform::scaling(sx, sy).then(self)
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` when singular.
    pub fn invert(&self) -> Option<Transform> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return None;
        }
        let inv = 1.0 / det;
        Some(Transform {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    /// Uniform length scale (square root of |det|).
    pub fn scale_factor(&self) -> f64 {
        self.determinant().abs().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(p: Point, x: f64, y: f64) -> bool {
        (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9
    }

    #[test]
    fn test_local_composition_order() {
        // translate then rotate: rotation happens in the translated frame.
        let t = Transform::identity()
            .translate(10.0, 0.0)
            .rotate(std::f64::consts::FRAC_PI_2);
        assert!(close(t.apply(Point::new(1.0, 0.0)), 10.0, 1.0));
    }

    #[test]
    fn test_mirror() {
        let t = Transform::identity().translate(50.0, 20.0).scale(-1.0, 1.0);
        assert!(close(t.apply(Point::new(5.0, 3.0)), 45.0, 23.0));
        assert!((t.scale_factor() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invert() {
        let t = Transform::identity()
            .translate(3.0, -7.0)
            .rotate(0.3)
            .scale(2.0, 2.0);
        let inv = t.invert().unwrap();
        let p = Point::new(1.25, -4.5);
        let q = inv.apply(t.apply(p));
        assert!(close(q, p.x, p.y));
        assert!((t.scale_factor() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_singular() {
        assert!(Transform::scaling(0.0, 1.0).invert().is_none());
    }

    #[test]
    fn test_point_rotation_matches_formula() {
        let p = Point::new(2.0, 1.0).rotated(-0.04);
        let (s, c) = (-0.04f64).sin_cos();
        assert!(close(p, 2.0 * c - 1.0 * s, 2.0 * s + 1.0 * c));
    }
}
