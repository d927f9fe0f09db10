mod aabb;
mod cylinder;
mod mesh;
mod plane;
mod sphere;

use crate::{
    material::Material,
    math::{Ray, Vector3},
};

pub use aabb::*;
pub use cylinder::*;
pub use mesh::*;
pub use plane::*;
pub use sphere::*;

/// Ray parameter standing in for "no hit". Larger than any real `t`, so a
/// running minimum started at this value is replaced by the first real hit.
pub const NO_INTERSECTION: f64 = f64::MAX;

/// The result of a ray intersection: always in front of the ray origin (`t > 0`).
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    /// The point struck, `ray.along(t)`.
    pub point: Vector3,

    /// The unit surface normal at `point`.
    pub normal: Vector3,

    /// The ray parameter of the hit.
    pub t: f64,
}

impl Hit {
    pub fn new(point: Vector3, normal: Vector3, t: f64) -> Self {
        Self { point, normal, t }
    }
}

/// A trait that represents any type that can be intersected by a Ray.
pub trait Intersect {
    /// Find the closest intersection in front of the ray, if any, between the
    /// ray provided and this shape.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;
}

/// A trait that represents any type that is a scene object, and can thus be viewed in the final render.
pub trait SceneObject: Intersect + Send + Sync {
    /// Grab this scene object's material.
    fn material(&self) -> &Material;
}
