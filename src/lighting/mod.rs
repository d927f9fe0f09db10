mod point;

use crate::{math::Vector3, object::Hit, scene::Scene};

pub use point::*;

/// The result of a light's influence on a ray intersection: the geometric
/// diffuse and specular factors, before they are scaled by the light's color
/// and the material's reflectances. Both are zero when the point is in shadow.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightShading {
    pub diffuse: f64,
    pub specular: f64,
}

impl LightShading {
    pub fn new(diffuse: f64, specular: f64) -> Self {
        Self { diffuse, specular }
    }
}

/// This trait represents any object that is a light.
/// It provides details about the light, as well as the result
/// of shading due to the light at a certain point.
pub trait Light: Send + Sync {
    fn color(&self) -> Vector3;

    /// Shade `hit` as seen from direction `view` (unit, pointing from the hit
    /// towards the viewer), for a surface with the given Phong exponent.
    fn shading(&self, hit: &Hit, view: Vector3, shininess: f64, scene: &Scene) -> LightShading;
}
