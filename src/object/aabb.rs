use crate::math::{gamma, Ray, Vector3, VECTOR_MAX, VECTOR_MIN};

/// An axis-aligned bounding box, stored by its minimum and maximum corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// The smallest box containing every point. Empty input gives an empty
    /// (inverted) box that no ray hits.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vector3>,
    {
        let (min, max) = points
            .into_iter()
            .fold((VECTOR_MAX, VECTOR_MIN), |(min, max), p| {
                (min.min(p), max.max(p))
            });

        Self::new(min, max)
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Slab test: does the ray enter the box at some `t >= 0`?
    ///
    /// Errs towards reporting a hit. Each far slab distance is padded by the
    /// rounding error of its computation, so rays that graze a face or edge
    /// are never rejected.
    pub fn intersect(&self, ray: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut t_near = 0f64;
        let mut t_far = f64::INFINITY;

        for i in 0..3 {
            let (o, d) = (ray.origin.axis(i), ray.direction.axis(i));
            let (lo, hi) = (self.min.axis(i), self.max.axis(i));

            if d == 0. {
                // parallel to this slab: inside it or never
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }

            let inv = 1. / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t1 += t1.abs() * 2. * gamma(3);

            // f64::max/min drop a NaN operand, which keeps the interval as is
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return false;
            }
        }

        true
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::from_points(std::iter::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vector3::splat(-1.), Vector3::splat(1.))
    }

    #[test]
    fn from_points_is_componentwise_min_max() {
        let b = Aabb::from_points(vec![
            Vector3::new(1., -2., 3.),
            Vector3::new(-4., 5., 0.),
            Vector3::new(2., 0., -6.),
        ]);
        assert_eq!(b.min, Vector3::new(-4., -2., -6.));
        assert_eq!(b.max, Vector3::new(2., 5., 3.));
    }

    #[test]
    fn hits_from_outside() {
        let ray = Ray::new(Vector3::new(-5., 0.3, 0.2), Vector3::new(1., 0., 0.));
        assert!(unit_box().intersect(&ray));
    }

    #[test]
    fn hits_from_inside() {
        let ray = Ray::new(Vector3::zero(), Vector3::new(0.3, -0.2, 1.));
        assert!(unit_box().intersect(&ray));
    }

    #[test]
    fn misses_beside_and_behind() {
        let beside = Ray::new(Vector3::new(-5., 2., 0.), Vector3::new(1., 0., 0.));
        assert!(!unit_box().intersect(&beside));

        let behind = Ray::new(Vector3::new(5., 0., 0.), Vector3::new(1., 0., 0.));
        assert!(!unit_box().intersect(&behind));

        let diagonal = Ray::new(Vector3::new(-5., -5., 0.), Vector3::new(1., 0.2, 0.));
        assert!(!unit_box().intersect(&diagonal));
    }

    #[test]
    fn grazing_face_is_kept() {
        // travels exactly in the plane of the top face
        let ray = Ray::new(Vector3::new(-5., 1., 0.), Vector3::new(1., 0., 0.));
        assert!(unit_box().intersect(&ray));

        // touches the box only along an edge
        let corner = Ray::new(Vector3::new(-2., 0., 0.), Vector3::new(1., 1., 0.));
        assert!(unit_box().intersect(&corner));
    }

    #[test]
    fn flat_box_is_hit() {
        // a single triangle in the z = 0 plane has a zero-thickness box
        let flat = Aabb::from_points(vec![
            Vector3::new(0., 0., 0.),
            Vector3::new(1., 0., 0.),
            Vector3::new(0., 1., 0.),
        ]);
        let ray = Ray::new(Vector3::new(0.2, 0.2, 3.), Vector3::new(0., 0., -1.));
        assert!(flat.intersect(&ray));
    }

    #[test]
    fn empty_box_is_never_hit() {
        let ray = Ray::new(Vector3::zero(), Vector3::new(1., 0., 0.));
        assert!(!Aabb::default().intersect(&ray));
        assert!(Aabb::default().is_empty());
    }
}
