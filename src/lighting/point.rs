use crate::{
    math::{Ray, Vector3},
    object::Hit,
    scene::Scene,
};

use super::{Light, LightShading};

/// A point light, which is a light that emits in all directions from a specified position.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    /// The position in space of this light.
    pub position: Vector3,

    /// The color of this light.
    pub color: Vector3,
}

impl Point {
    pub fn new(position: Vector3, color: Vector3) -> Self {
        Self { position, color }
    }
}

impl Light for Point {
    fn color(&self) -> Vector3 {
        self.color
    }

    fn shading(&self, hit: &Hit, view: Vector3, shininess: f64, scene: &Scene) -> LightShading {
        // vector pointing from hit to light pos
        let lvec = self.position - hit.point;

        // a light sitting on the surface contributes nothing
        let dist = lvec.magnitude();
        if dist == 0. {
            return LightShading::default();
        }
        let lvec = lvec / dist;

        // apply shadowing; only occluders between the point and the light count
        let bias = scene.options.shadow_bias;
        let shadow_ray = Ray::new(hit.point + lvec * bias, lvec);
        if let Some((_, shadow_hit)) = scene.intersect(&shadow_ray) {
            if shadow_hit.t < dist - bias {
                return LightShading::default();
            }
        }

        // calculate diffuse
        let n_dot_l = hit.normal.dot(lvec);
        let diffuse = n_dot_l.max(0.);

        // calculate specular, only for lights in front of the surface whose
        // reflection heads towards the viewer
        let r_dot_v = lvec.mirror(hit.normal).dot(view);
        let specular = if n_dot_l >= 0. && r_dot_v >= 0. {
            r_dot_v.powf(shininess)
        } else {
            0.
        };

        LightShading::new(diffuse, specular)
    }
}
