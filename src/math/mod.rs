mod ray;
mod vector;

pub use ray::*;
pub use vector::*;

/// Below this magnitude a cosine (or a determinant relative to its largest
/// possible value) is treated as zero.
pub const EPSILON: f64 = 1e-12;

/// Linearly interpolate between two values.
pub fn lerp(a: f64, b: f64, c: f64) -> f64 {
    a + (b - a) * c
}

/// A type that can be linearly interpolated between two values of itself.
pub trait Lerp {
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Lerp for Vector3 {
    fn lerp(self, other: Self, t: f64) -> Self {
        Vector3::new(
            lerp(self.x, other.x, t),
            lerp(self.y, other.y, t),
            lerp(self.z, other.z, t),
        )
    }
}

/// Bound on the relative rounding error accumulated by `n` floating point
/// operations.
pub fn gamma(n: i32) -> f64 {
    let n = n as f64;
    let machine_epsilon = f64::EPSILON * 0.5;
    (machine_epsilon * n) / (1. - n * machine_epsilon)
}

/// `acos` with its argument clamped into `[-1, 1]`, so dot products of unit
/// vectors that drift slightly out of range don't produce NaN.
pub fn safe_acos(x: f64) -> f64 {
    x.clamp(-1., 1.).acos()
}

/// The determinant of the 3x3 matrix whose columns are `a`, `b` and `c`.
pub fn det3(a: Vector3, b: Vector3, c: Vector3) -> f64 {
    a.dot(b.cross(c))
}

/// The real roots of a quadratic, in ascending order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Roots {
    Zero,
    One(f64),
    Two(f64, f64),
}

impl Roots {
    pub fn iter(&self) -> impl Iterator<Item = f64> {
        let roots = match *self {
            Roots::Zero => [None, None],
            Roots::One(t) => [Some(t), None],
            Roots::Two(t0, t1) => [Some(t0), Some(t1)],
        };
        roots.into_iter().flatten()
    }
}

/// Solve `a*t^2 + b*t + c = 0` for real `t`.
///
/// Only an exactly zero `a` degrades to the linear equation `b*t + c = 0`, so
/// badly scaled but genuine quadratics keep both roots. If the linear equation
/// is degenerate too there are no roots. A vanishing discriminant gives a
/// single (double) root.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Roots {
    if a == 0. {
        if b == 0. {
            return Roots::Zero;
        }
        return Roots::One(-c / b);
    }

    let discriminant = b * b - 4. * a * c;
    if discriminant < 0. {
        return Roots::Zero;
    }
    if discriminant == 0. {
        return Roots::One(-b / (2. * a));
    }

    // avoid cancellation between -b and the root of the discriminant
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let (t0, t1) = (q / a, c / q);

    if t0 <= t1 {
        Roots::Two(t0, t1)
    } else {
        Roots::Two(t1, t0)
    }
}
