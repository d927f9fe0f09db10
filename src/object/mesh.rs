use crate::{
    material::Material,
    math::{det3, safe_acos, Ray, Vector3, EPSILON},
};

use super::{Aabb, Hit, Intersect, SceneObject, NO_INTERSECTION};

/// Where a mesh takes its hit normals from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Every point of a triangle uses the triangle's own normal.
    Flat,

    /// Vertex normals are blended with the hit's barycentric coordinates.
    Phong,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: Vector3,

    /// Angle-weighted average of the incident triangles' normals.
    pub normal: Vector3,
}

impl Vertex {
    pub fn new(position: Vector3) -> Self {
        Self {
            position,
            normal: Vector3::zero(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Indices into the mesh's vertex list, counter-clockwise when seen from the front.
    pub indices: [usize; 3],

    /// The precomputed face normal.
    pub normal: Vector3,
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self {
            indices,
            normal: Vector3::zero(),
        }
    }
}

/// A ray/triangle intersection: the ray parameter and the barycentric
/// coordinates of the hit, so that `ray.along(t) == alpha*p0 + beta*p1 + gamma*p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub t: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

fn triangle_normal(p0: Vector3, p1: Vector3, p2: Vector3) -> Vector3 {
    (p1 - p0).cross(p2 - p0).normalize()
}

/// The interior angle of the triangle at each of its corners, used to weigh
/// the triangle's normal when it is accumulated into that corner's vertex.
fn angle_weights(p0: Vector3, p1: Vector3, p2: Vector3) -> [f64; 3] {
    let e01 = (p1 - p0).normalize();
    let e12 = (p2 - p1).normalize();
    let e20 = (p0 - p2).normalize();

    [
        safe_acos(e01.dot(-e20)),
        safe_acos(e12.dot(-e01)),
        safe_acos(e20.dot(-e12)),
    ]
}

/// A triangle mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,

    /// Box around every vertex, tested before any triangle.
    pub bounding_box: Aabb,
    pub draw_mode: DrawMode,
    pub material: Material,
}

impl Mesh {
    /// Build a mesh and derive its normals and bounding box.
    ///
    /// # Panics
    ///
    /// If a triangle refers to a vertex index outside `positions`.
    pub fn new(
        positions: Vec<Vector3>,
        triangles: Vec<[usize; 3]>,
        draw_mode: DrawMode,
        material: Material,
    ) -> Self {
        let mut mesh = Self {
            vertices: positions.into_iter().map(Vertex::new).collect(),
            triangles: triangles.into_iter().map(Triangle::new).collect(),
            bounding_box: Aabb::default(),
            draw_mode,
            material,
        };
        mesh.recalculate();
        mesh
    }

    /// Recompute everything derived from vertex positions. Must be called
    /// after the geometry changes.
    pub fn recalculate(&mut self) {
        self.compute_normals();
        self.compute_bounding_box();
    }

    fn corners(&self, triangle: &Triangle) -> (Vector3, Vector3, Vector3) {
        let [i0, i1, i2] = triangle.indices;
        (
            self.vertices[i0].position,
            self.vertices[i1].position,
            self.vertices[i2].position,
        )
    }

    /// Recompute the face normal of every triangle and the angle-weighted
    /// normal of every vertex. Vertices not used by any triangle get a zero normal.
    pub fn compute_normals(&mut self) {
        for i in 0..self.triangles.len() {
            let (p0, p1, p2) = self.corners(&self.triangles[i]);
            self.triangles[i].normal = triangle_normal(p0, p1, p2);
        }

        for vertex in self.vertices.iter_mut() {
            vertex.normal = Vector3::zero();
        }

        for triangle in self.triangles.iter() {
            let [i0, i1, i2] = triangle.indices;
            let weights = angle_weights(
                self.vertices[i0].position,
                self.vertices[i1].position,
                self.vertices[i2].position,
            );

            for (&i, w) in triangle.indices.iter().zip(weights) {
                self.vertices[i].normal += triangle.normal * w;
            }
        }

        for vertex in self.vertices.iter_mut() {
            vertex.normal = vertex.normal.normalize();
        }
    }

    pub fn compute_bounding_box(&mut self) {
        self.bounding_box = Aabb::from_points(self.vertices.iter().map(|v| v.position));
    }

    /// Cheap rejection test: a ray that misses the box misses every triangle.
    pub fn intersect_bounding_box(&self, ray: &Ray) -> bool {
        self.bounding_box.intersect(ray)
    }

    /// Intersect a single triangle of this mesh by solving
    /// `origin + t*direction = alpha*p0 + beta*p1 + (1 - alpha - beta)*p2`
    /// with Cramer's rule. Edges and corners count as inside.
    pub fn intersect_triangle(&self, triangle: &Triangle, ray: &Ray) -> Option<TriangleHit> {
        let (p0, p1, p2) = self.corners(triangle);

        let a = p0 - p2;
        let b = p1 - p2;
        let c = -ray.direction;
        let rhs = ray.origin - p2;

        // |det| is at most |a x b| |c|; relative to that it is the cosine
        // between the ray and the triangle normal
        let det = det3(a, b, c);
        let scale = a.cross(b).magnitude() * c.magnitude();
        if scale == 0. || det.abs() < EPSILON * scale {
            // ray parallel to the triangle, or the triangle has no area
            return None;
        }

        let alpha = det3(rhs, b, c) / det;
        let beta = det3(a, rhs, c) / det;
        let t = det3(a, b, rhs) / det;
        let gamma = 1. - alpha - beta;

        if t <= 0. || alpha < 0. || beta < 0. || gamma < 0. {
            return None;
        }

        Some(TriangleHit {
            t,
            alpha,
            beta,
            gamma,
        })
    }

    /// The shading normal at a hit on `triangle`, depending on the draw mode.
    pub fn normal_at(&self, triangle: &Triangle, hit: &TriangleHit) -> Vector3 {
        match self.draw_mode {
            DrawMode::Flat => triangle.normal,
            DrawMode::Phong => {
                let [i0, i1, i2] = triangle.indices;
                (self.vertices[i0].normal * hit.alpha
                    + self.vertices[i1].normal * hit.beta
                    + self.vertices[i2].normal * hit.gamma)
                    .normalize()
            }
        }
    }
}

impl Intersect for Mesh {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        if !self.intersect_bounding_box(ray) {
            return None;
        }

        let mut nearest: Option<(&Triangle, TriangleHit)> = None;
        let mut t_min = NO_INTERSECTION;

        for triangle in self.triangles.iter() {
            if let Some(hit) = self.intersect_triangle(triangle, ray) {
                if hit.t < t_min {
                    t_min = hit.t;
                    nearest = Some((triangle, hit));
                }
            }
        }

        let (triangle, hit) = nearest?;
        Some(Hit::new(
            ray.along(hit.t),
            self.normal_at(triangle, &hit),
            hit.t,
        ))
    }
}

impl SceneObject for Mesh {
    fn material(&self) -> &Material {
        &self.material
    }
}
