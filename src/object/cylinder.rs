use crate::{
    material::Material,
    math::{solve_quadratic, Ray, Vector3},
};

use super::{Hit, Intersect, SceneObject, NO_INTERSECTION};

/// A finite, open cylinder (no end caps) centered on `center`, extending
/// `height / 2` along the axis in both directions.
#[derive(Debug, Clone)]
pub struct Cylinder {
    pub center: Vector3,

    /// Axis direction. Normalized on construction.
    pub axis: Vector3,
    pub radius: f64,
    pub height: f64,
    pub material: Material,
}

impl Cylinder {
    pub fn new(
        center: Vector3,
        radius: f64,
        axis: Vector3,
        height: f64,
        material: Material,
    ) -> Self {
        Self {
            center,
            axis: axis.normalize(),
            radius,
            height,
            material,
        }
    }

    /// Split `v` into its components along and orthogonal to the axis.
    fn decompose(&self, v: Vector3) -> (f64, Vector3) {
        let along = v.dot(self.axis);
        (along, v - self.axis * along)
    }
}

impl Intersect for Cylinder {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let (unit, len) = ray.unit()?;
        let (_, dir_perp) = self.decompose(unit.direction);
        let (_, oc_perp) = self.decompose(unit.origin - self.center);

        // |oc_perp + t * dir_perp|^2 = r^2; a ray parallel to the axis has a
        // vanishing leading coefficient and no solution
        let roots = solve_quadratic(
            dir_perp.dot(dir_perp),
            2. * oc_perp.dot(dir_perp),
            oc_perp.dot(oc_perp) - self.radius * self.radius,
        );

        let half_height = self.height * 0.5;
        let t = roots
            .iter()
            .filter(|&t| t > 0.)
            .filter(|&t| (unit.along(t) - self.center).dot(self.axis).abs() <= half_height)
            .fold(NO_INTERSECTION, f64::min);

        if t == NO_INTERSECTION {
            return None;
        }

        let t = t / len;
        let point = ray.along(t);
        let (_, radial) = self.decompose(point - self.center);

        Some(Hit::new(point, radial.normalize(), t))
    }
}

impl SceneObject for Cylinder {
    fn material(&self) -> &Material {
        &self.material
    }
}
