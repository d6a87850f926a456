//! Small helpers for `(x, y, z)` tuples used as points and vectors.

pub type Vec3 = (f64, f64, f64);

pub const ZERO: Vec3 = (0.0, 0.0, 0.0);

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    (a.0 + b.0, a.1 + b.1, a.2 + b.2)
}

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    (a.0 - b.0, a.1 - b.1, a.2 - b.2)
}

#[inline]
pub fn scale(a: Vec3, s: f64) -> Vec3 {
    (a.0 * s, a.1 * s, a.2 * s)
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

#[inline]
pub fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
pub fn is_finite(a: Vec3) -> bool {
    a.0.is_finite() && a.1.is_finite() && a.2.is_finite()
}

/// Multiplies a symmetric 3x3 tensor by a vector.
#[inline]
pub fn mat_vec(m: &[[f64; 3]; 3], v: Vec3) -> Vec3 {
    (
        m[0][0] * v.0 + m[0][1] * v.1 + m[0][2] * v.2,
        m[1][0] * v.0 + m[1][1] * v.1 + m[1][2] * v.2,
        m[2][0] * v.0 + m[2][1] * v.1 + m[2][2] * v.2,
    )
}

/// Returns `m (3 x xᵀ - |x|² I)`, the quadrupole of a point mass at offset `x`.
pub fn point_quadrupole(m: f64, x: Vec3) -> [[f64; 3]; 3] {
    let c = [x.0, x.1, x.2];
    let r2 = dot(x, x);
    let mut q = [[0.0; 3]; 3];
    for k in 0..3 {
        for l in 0..3 {
            q[k][l] = 3.0 * c[k] * c[l];
        }
        q[k][k] -= r2;
    }
    for row in q.iter_mut() {
        for v in row.iter_mut() {
            *v *= m;
        }
    }
    q
}
