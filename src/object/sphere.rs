use crate::{
    material::Material,
    math::{solve_quadratic, Ray, Vector3},
};

use super::{Hit, Intersect, SceneObject};

/// A sphere.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vector3,
    pub radius: f64,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let (unit, len) = ray.unit()?;
        let oc = unit.origin - self.center;
        let roots = solve_quadratic(
            1.,
            2. * unit.direction.dot(oc),
            oc.dot(oc) - self.radius * self.radius,
        );

        // roots are ascending, so the first forward one is the closest
        let t = roots.iter().find(|&t| t > 0.)? / len;
        let point = ray.along(t);

        Some(Hit::new(point, (point - self.center).normalize(), t))
    }
}

impl SceneObject for Sphere {
    fn material(&self) -> &Material {
        &self.material
    }
}
