use crate::{
    material::Material,
    math::{Ray, Vector3, EPSILON},
};

use super::{Hit, Intersect, SceneObject};

/// An infinite plane.
///
/// The reported normal is always the plane's own normal, even when the plane
/// is hit from behind, so planes are only lit correctly from their front side.
#[derive(Debug, Clone)]
pub struct Plane {
    /// A point on the plane.
    pub center: Vector3,

    /// The unit normal of the plane.
    pub normal: Vector3,

    /// The plane's material.
    pub material: Material,
}

impl Plane {
    /// Create a plane; the normal is normalized here.
    pub fn new(center: Vector3, normal: Vector3, material: Material) -> Self {
        Self {
            center,
            normal: normal.normalize(),
            material,
        }
    }
}

impl Intersect for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        // with a unit direction the denominator is a cosine
        let (unit, len) = ray.unit()?;
        let denom = self.normal.dot(unit.direction);
        if denom.abs() < EPSILON {
            return None;
        }

        let t = self.normal.dot(self.center - ray.origin) / denom / len;
        if t > 0. {
            Some(Hit::new(ray.along(t), self.normal, t))
        } else {
            None
        }
    }
}

impl SceneObject for Plane {
    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn floor() -> Plane {
        Plane::new(Vector3::zero(), Vector3::new(0., 2., 0.), Material::default())
    }

    #[test]
    fn hit_lies_on_plane() {
        let plane = floor();
        let ray = Ray::new(Vector3::new(1., 3., -2.), Vector3::new(0.3, -1., 0.2));
        let hit = plane.intersect(&ray).expect("ray should hit the floor");

        assert_relative_eq!(hit.t, 3., epsilon = 1e-12);
        assert_relative_eq!(hit.point.y, 0., epsilon = 1e-12);
        assert_eq!(hit.point, ray.along(hit.t));
        assert_eq!(hit.normal, Vector3::up());
    }

    #[test]
    fn short_direction_hits() {
        let ray = Ray::new(Vector3::new(0., 5., 0.), Vector3::new(0., -1e-13, 0.));
        let hit = floor().intersect(&ray).expect("ray should hit the floor");

        assert_relative_eq!(hit.t, 5e13, max_relative = 1e-12);
        assert_relative_eq!(hit.point.y, 0., epsilon = 1e-9);
    }

    #[test]
    fn zero_direction_misses() {
        let ray = Ray::new(Vector3::new(0., 5., 0.), Vector3::zero());
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let ray = Ray::new(Vector3::new(0., 1., 0.), Vector3::new(1., 0., 0.));
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn plane_behind_ray_misses() {
        let ray = Ray::new(Vector3::new(0., 1., 0.), Vector3::new(0., 1., 0.));
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn normal_is_not_flipped_from_behind() {
        let ray = Ray::new(Vector3::new(0., -1., 0.), Vector3::new(0., 1., 0.));
        let hit = floor().intersect(&ray).expect("ray should hit the floor");
        assert_eq!(hit.normal, Vector3::up());
    }
}
