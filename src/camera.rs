use log::warn;

use crate::math::{Ray, Vector3};

/// A pinhole camera looking from `eye` towards `center`. Represents a viewable
/// area that a scene can be rendered to.
///
/// Pixel (0, 0) is the bottom-left corner of the image.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vector3,
    pub center: Vector3,
    pub up: Vector3,

    /// Vertical field of view, in degrees.
    pub fovy: f64,
    pub width: u32,
    pub height: u32,

    /// One pixel step to the right on the image plane.
    x_dir: Vector3,

    /// One pixel step up on the image plane.
    y_dir: Vector3,
    lower_left: Vector3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vector3::new(0., 0., 5.),
            Vector3::zero(),
            Vector3::up(),
            60.,
            300,
            200,
        )
    }
}

impl Camera {
    pub fn new(
        eye: Vector3,
        center: Vector3,
        up: Vector3,
        fovy: f64,
        width: u32,
        height: u32,
    ) -> Self {
        let mut camera = Self {
            eye,
            center,
            up,
            fovy,
            width,
            height,
            x_dir: Vector3::zero(),
            y_dir: Vector3::zero(),
            lower_left: Vector3::zero(),
        };
        camera.recalculate();

        if camera.is_degenerate() {
            warn!(
                "degenerate camera (eye {:?}, center {:?}, up {:?}, {}x{}); every pixel will see the same ray",
                eye, center, up, width, height
            );
        }

        camera
    }

    /// True when the image plane collapsed: `eye == center`, `up` parallel to
    /// the view direction, or an empty image size.
    pub fn is_degenerate(&self) -> bool {
        let zero = Vector3::zero();
        !(self.x_dir.is_finite() && self.y_dir.is_finite())
            || self.x_dir == zero
            || self.y_dir == zero
    }

    /// Recompute the image plane. The plane passes through `center`, so its
    /// size scales with the distance to the eye.
    fn recalculate(&mut self) {
        let view = (self.center - self.eye).normalize();
        let dist = self.center.distance(self.eye);
        let (w, h) = (self.width as f64, self.height as f64);

        let image_height = 2. * dist * (0.5 * self.fovy.to_radians()).tan();
        let image_width = w / h * image_height;

        self.x_dir = view.cross(self.up).normalize() * (image_width / w);
        self.y_dir = self.x_dir.cross(view).normalize() * (image_height / h);
        self.lower_left = self.center - self.x_dir * (0.5 * w) - self.y_dir * (0.5 * h);
    }

    /// The ray from the eye through pixel (x, y), with a unit direction.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        let target = self.lower_left + self.x_dir * x as f64 + self.y_dir * y as f64;
        Ray::new(self.eye, (target - self.eye).normalize())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn collapsed_image_plane_is_degenerate() {
        assert!(!Camera::default().is_degenerate());

        let parallel_up = Camera::new(
            Vector3::new(0., 5., 0.),
            Vector3::zero(),
            Vector3::up(),
            60.,
            10,
            10,
        );
        assert!(parallel_up.is_degenerate());

        let eye_on_center = Camera::new(Vector3::zero(), Vector3::zero(), Vector3::up(), 60., 10, 10);
        assert!(eye_on_center.is_degenerate());
    }

    #[test]
    fn middle_pixel_looks_at_center() {
        let camera = Camera::new(
            Vector3::new(0., 0., 10.),
            Vector3::zero(),
            Vector3::up(),
            45.,
            100,
            50,
        );
        let ray = camera.primary_ray(50, 25);

        assert_eq!(ray.origin, camera.eye);
        assert_abs_diff_eq!(ray.direction.x, 0., epsilon = 1e-12);
        assert_abs_diff_eq!(ray.direction.y, 0., epsilon = 1e-12);
        assert_abs_diff_eq!(ray.direction.z, -1., epsilon = 1e-12);
    }

    #[test]
    fn origin_pixel_is_bottom_left() {
        let camera = Camera::default();
        let ray = camera.primary_ray(0, 0);

        assert!(ray.direction.x < 0.);
        assert!(ray.direction.y < 0.);
        assert_abs_diff_eq!(ray.direction.magnitude(), 1., epsilon = 1e-12);
    }

    #[test]
    fn vertical_field_of_view_is_respected() {
        let camera = Camera::new(
            Vector3::new(0., 0., 1.),
            Vector3::zero(),
            Vector3::up(),
            90.,
            10,
            10,
        );
        // the top edge of the image plane is at 45 degrees
        let ray = camera.primary_ray(5, 10);
        assert_abs_diff_eq!(ray.direction.y, -ray.direction.z, epsilon = 1e-12);
    }
}
