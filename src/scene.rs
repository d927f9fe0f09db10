use std::{path::Path, time::Instant};

use log::info;
use rayon::prelude::*;

use crate::{
    camera::Camera,
    lighting::Light,
    material::Material,
    math::{Lerp, Ray, Vector3},
    object::{Hit, SceneObject, NO_INTERSECTION},
    raster::Image,
};

/// Scene options. Defaults are provided.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    /// The maximum number of mirror bounces following a primary ray. The
    /// recursion in [`Scene::trace`] is at most `max_depth + 1` calls deep.
    pub max_depth: u32,

    /// The color of the global ambient light.
    pub ambient: Vector3,

    /// The color of rays that hit nothing.
    pub background: Vector3,

    /// How far shadow rays start from the surface, towards the light.
    pub shadow_bias: f64,

    /// How far reflected rays start from the surface, along the normal.
    pub reflection_bias: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            max_depth: 5,
            ambient: Vector3::zero(),
            background: Vector3::zero(),
            shadow_bias: 1e-4,
            reflection_bias: 1e-4,
        }
    }
}

/// A scene, which contains a list of objects, lights, and a camera to render from.
///
/// Nothing in a scene changes while rendering, so it is shared between render
/// threads by reference.
#[derive(Default)]
pub struct Scene {
    pub objects: Vec<Box<dyn SceneObject>>,
    pub lights: Vec<Box<dyn Light>>,
    pub camera: Camera,
    pub options: SceneOptions,
}

impl Scene {
    /// Find the nearest object struck by a ray.
    ///
    /// On a tie the object added to the scene first wins.
    pub fn intersect(&self, ray: &Ray) -> Option<(&dyn SceneObject, Hit)> {
        let mut nearest = None;
        let mut t_min = NO_INTERSECTION;

        // iterate over every object in the scene and test for an intersection
        for object in self.objects.iter() {
            if let Some(hit) = object.intersect(ray) {
                if hit.t < t_min {
                    t_min = hit.t;
                    nearest = Some((object.as_ref(), hit));
                }
            }
        }

        nearest
    }

    /// Trace out a ray, getting its color. Primary rays start at depth 0.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Vector3 {
        if depth > self.options.max_depth {
            return Vector3::zero();
        }

        let (object, hit) = match self.intersect(ray) {
            Some(r) => r,
            None => return self.options.background,
        };

        let material = object.material();
        let direction = ray.direction.normalize();
        let mut color = self.lighting(&hit, -direction, material);

        if material.mirror > 0. && depth < self.options.max_depth {
            let reflected = direction.reflect(hit.normal);

            // step off the surface on the side the reflected ray leaves from,
            // which is behind the normal for surfaces hit from their back
            let side = if reflected.dot(hit.normal) < 0. { -1. } else { 1. };
            let origin = hit.point + hit.normal * (side * self.options.reflection_bias);

            let mirrored = self.trace(&Ray::new(origin, reflected), depth + 1);
            color = color.lerp(mirrored, material.mirror);
        }

        color
    }

    /// Phong lighting at a hit: the ambient term plus, for every light that
    /// is not shadowed, its diffuse and specular terms.
    pub fn lighting(&self, hit: &Hit, view: Vector3, material: &Material) -> Vector3 {
        let mut color = self.options.ambient * material.ambient;

        for light in self.lights.iter() {
            let shading = light.shading(hit, view, material.shininess, self);
            color += light.color()
                * (material.diffuse * shading.diffuse + material.specular * shading.specular);
        }

        color
    }

    /// Trace the primary ray of a pixel, where the bottom-left of the image is (0, 0).
    /// The result is clamped into `[0, 1]`.
    pub fn trace_pixel(&self, x: u32, y: u32) -> Vector3 {
        self.trace(&self.camera.primary_ray(x, y), 0).clamp(0., 1.)
    }

    /// Render the full image, one column per task on the current rayon pool.
    pub fn render(&self) -> Image {
        let (width, height) = (self.camera.width, self.camera.height);
        let mut image = Image::new(width, height);

        info!(
            "Rendering {}x{} with up to {} threads",
            width,
            height,
            rayon::current_num_threads()
        );
        let now = Instant::now();

        image
            .par_columns_mut()
            .enumerate()
            .for_each(|(x, column)| {
                for (y, pixel) in column.iter_mut().enumerate() {
                    *pixel = self.trace_pixel(x as u32, y as u32);
                }
            });

        info!("Rendered in {:.2?}", now.elapsed());
        image
    }

    /// Render the image out to the desired save file.
    pub fn render_to<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.render().save(path)
    }
}
