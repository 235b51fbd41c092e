use glam::{Mat4, Vec3};

/// A 4x4 transform in column-major order, consumed as-is by the GPU pipeline.
///
/// `glam::Mat4` is only used as storage here: every matrix below is laid out
/// by hand and `mult` does its own product.
pub type Matrix = Mat4;

pub fn identity() -> Matrix {
    Mat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

pub fn translation(t: Vec3) -> Matrix {
    Mat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        t.x, t.y, t.z, 1.0,
    ])
}

pub fn scaling(s: Vec3) -> Matrix {
    Mat4::from_cols_array(&[
        s.x, 0.0, 0.0, 0.0, //
        0.0, s.y, 0.0, 0.0, //
        0.0, 0.0, s.z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Right-handed rotation about +X. Maps +Y towards +Z.
pub fn rotation_x(angle: f32) -> Matrix {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0, //
        0.0, c, s, 0.0, //
        0.0, -s, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Right-handed rotation about +Y. Maps +Z towards +X.
pub fn rotation_y(angle: f32) -> Matrix {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols_array(&[
        c, 0.0, -s, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        s, 0.0, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Right-handed rotation about +Z. Maps +X towards +Y.
pub fn rotation_z(angle: f32) -> Matrix {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols_array(&[
        c, s, 0.0, 0.0, //
        -s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Symmetric perspective projection.
///
/// With `d = 1 / tan(fov_y / 2)`, view-space depth `z ∈ [-near, -far]` lands
/// on NDC depth `[-1, 1]` after the divide by `w = -z`.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix {
    let d = 1.0 / (fov_y / 2.0).tan();
    let depth = far - near;
    Mat4::from_cols_array(&[
        d / aspect, 0.0, 0.0, 0.0, //
        0.0, d, 0.0, 0.0, //
        0.0, 0.0, -(far + near) / depth, -1.0, //
        0.0, 0.0, -2.0 * far * near / depth, 0.0,
    ])
}

/// Orthonormal camera basis `(u, v, w)` where `w` points from `center` back
/// to `eye`.
pub fn view_basis(eye: Vec3, center: Vec3, up: Vec3) -> (Vec3, Vec3, Vec3) {
    let w = (eye - center).normalize();
    let u = up.cross(w).normalize();
    let v = w.cross(u);
    (u, v, w)
}

/// Right-handed view matrix. The rotation block has `u`, `v`, `w` as its rows
/// and the translation column is `-basis · eye`.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Matrix {
    let (u, v, w) = view_basis(eye, center, up);
    Mat4::from_cols_array(&[
        u.x, v.x, w.x, 0.0, //
        u.y, v.y, w.y, 0.0, //
        u.z, v.z, w.z, 0.0, //
        -u.dot(eye), -v.dot(eye), -w.dot(eye), 1.0,
    ])
}

/// Column-vector product `a · b`.
pub fn mult(a: &Matrix, b: &Matrix) -> Matrix {
    let lhs = a.to_cols_array_2d();
    let rhs = b.to_cols_array_2d();
    let mut out = [[0.0_f32; 4]; 4];

    // out[col][row] = sum_k a[k][row] * b[col][k]
    for (col, out_col) in out.iter_mut().enumerate() {
        for (row, cell) in out_col.iter_mut().enumerate() {
            for k in 0..4 {
                *cell += lhs[k][row] * rhs[col][k];
            }
        }
    }

    Mat4::from_cols_array_2d(&out)
}

/// Formats a matrix row by row, the way it reads on paper.
pub fn format_rows(m: &Matrix) -> String {
    let cols = m.to_cols_array_2d();
    let mut out = String::new();
    for row in 0..4 {
        for col in cols.iter() {
            out.push_str(&format!("{:>6.2} ", col[row]));
        }
        out.push('\n');
    }
    out
}
