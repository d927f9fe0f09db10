use super::Vector3;

#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    /// Instantiate a new Ray. The direction does not need to be normalized, but
    /// `t` values are measured in multiples of its length.
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// The point `origin + t * direction`.
    pub fn along(&self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }

    /// This ray with a unit direction, along with the length of the original
    /// direction. A `t` on the unit ray divided by that length is the same
    /// point's `t` on this ray. `None` for a zero direction.
    pub fn unit(&self) -> Option<(Ray, f64)> {
        let len = self.direction.magnitude();
        if len == 0. || !len.is_finite() {
            return None;
        }
        Some((Ray::new(self.origin, self.direction / len), len))
    }
}
