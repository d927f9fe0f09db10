use crate::math::Vector3;

/// A 24-bit color, RGB. Only used at the very end of the pipeline, when a
/// rendered image is quantized for saving; shading works on linear
/// [`Vector3`] colors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Instantiate a new Color from 3 f64s, expected to be in the range 0-1.
    pub fn newf(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: (r.clamp(0., 1.) * 255.0).round() as u8,
            g: (g.clamp(0., 1.) * 255.0).round() as u8,
            b: (b.clamp(0., 1.) * 255.0).round() as u8,
        }
    }
}

impl From<Vector3> for Color {
    fn from(v: Vector3) -> Self {
        Self::newf(v.x, v.y, v.z)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(c: Color) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

/// The Phong reflectance of a scene object.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Reflected fraction of the scene's ambient light.
    pub ambient: Vector3,

    /// Lambertian reflectance.
    pub diffuse: Vector3,

    /// Specular reflectance, scaled by the Phong highlight term.
    pub specular: Vector3,

    /// Phong exponent. Higher is a tighter highlight.
    pub shininess: f64,

    /// How much of the final color comes from the mirror reflection (0 to 1)
    /// rather than from local lighting.
    pub mirror: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vector3::splat(0.1),
            diffuse: Vector3::splat(0.8),
            specular: Vector3::splat(0.2),
            shininess: 32.,
            mirror: 0.,
        }
    }
}
