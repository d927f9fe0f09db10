use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// The largest representable vector, useful as a starting point for componentwise minimums.
pub const VECTOR_MAX: Vector3 = Vector3 {
    x: f64::MAX,
    y: f64::MAX,
    z: f64::MAX,
};

/// The smallest representable vector, useful as a starting point for componentwise maximums.
pub const VECTOR_MIN: Vector3 = Vector3 {
    x: f64::MIN,
    y: f64::MIN,
    z: f64::MIN,
};

/// A vector in 3D space. Also used for linear RGB colors, where x, y and z are r, g and b.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Instantiate a new Vector3.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A Vector3 with every component set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub const fn zero() -> Self {
        Self::splat(0.)
    }

    pub const fn up() -> Self {
        Self::new(0., 1., 0.)
    }

    /// Find the dot product between two Vector3s.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross two Vector3s.
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: -self.x * other.z + self.z * other.x,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Find the magnitude of this Vector3.
    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Normalize this Vector3 by dividing it by its own magnitude.
    ///
    /// A zero-length vector has no direction, so it is returned unchanged
    /// (as the zero vector) rather than turning into NaNs.
    pub fn normalize(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude > 0. {
            self / magnitude
        } else {
            self
        }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// Componentwise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Componentwise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Clamp every component into `[lo, hi]`.
    pub fn clamp(self, lo: f64, hi: f64) -> Self {
        Self::new(
            self.x.clamp(lo, hi),
            self.y.clamp(lo, hi),
            self.z.clamp(lo, hi),
        )
    }

    /// Reflect this direction off a surface with the given (unit) normal.
    /// The result points away from the surface when `self` points into it.
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2. * self.dot(normal))
    }

    /// Mirror this vector about the given (unit) normal, e.g. turn a direction
    /// towards a light into the direction the light bounces off in.
    pub fn mirror(self, normal: Self) -> Self {
        normal * (2. * normal.dot(self)) - self
    }

    /// Component by index, 0 = x, 1 = y, 2 = z.
    pub fn axis(self, i: usize) -> f64 {
        match i {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
        }
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        rhs * self
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Vector3::new(1., 0., 0.);
        let y = Vector3::new(0., 1., 0.);
        assert_eq!(x.cross(y), Vector3::new(0., 0., 1.));
        assert_eq!(y.cross(x), Vector3::new(0., 0., -1.));
    }

    #[test]
    fn normalize_has_unit_length() {
        let v = Vector3::new(3., -4., 12.).normalize();
        assert_relative_eq!(v.magnitude(), 1., epsilon = 1e-12);
    }

    #[test]
    fn normalize_zero_is_zero() {
        let v = Vector3::zero().normalize();
        assert_eq!(v, Vector3::zero());
        assert!(v.is_finite());
    }

    #[test]
    fn reflect_and_mirror_agree() {
        let n = Vector3::up();
        let d = Vector3::new(1., -1., 0.).normalize();

        let r = d.reflect(n);
        assert_relative_eq!(r.x, d.x, epsilon = 1e-12);
        assert_relative_eq!(r.y, -d.y, epsilon = 1e-12);

        // mirroring the reversed direction is the same reflection
        let m = (-d).mirror(n);
        assert_relative_eq!(m.x, r.x, epsilon = 1e-12);
        assert_relative_eq!(m.y, r.y, epsilon = 1e-12);
        assert_relative_eq!(m.z, r.z, epsilon = 1e-12);
    }
}
