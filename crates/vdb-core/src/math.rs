//! Small closed-form matrix and vector routines.
//!
//! Matrices are [`glam::Mat4`], which stores its elements column-major.
//! [`MatrixAt`] adds the row/column addressing used throughout the settings
//! file format and the built-in cameras.

use glam::{Mat4, Vec3, Vec4};

use crate::camera::Orientation;

/// Row/column element access for 4x4 matrices.
pub trait MatrixAt {
    /// Returns the element at (`row`, `col`).
    fn at(&self, row: usize, col: usize) -> f32;

    /// Sets the element at (`row`, `col`).
    fn set_at(&mut self, row: usize, col: usize, value: f32);
}

impl MatrixAt for Mat4 {
    fn at(&self, row: usize, col: usize) -> f32 {
        self.col(col)[row]
    }

    fn set_at(&mut self, row: usize, col: usize, value: f32) {
        self.col_mut(col)[row] = value;
    }
}

/// Builds a matrix from its rows, written the way it reads on paper.
#[must_use]
pub fn from_rows(rows: [[f32; 4]; 4]) -> Mat4 {
    Mat4::from_cols_array_2d(&rows).transpose()
}

/// Rotation of `t` radians about the X axis.
#[must_use]
pub fn rotate_x(t: f32) -> Mat4 {
    Mat4::from_rotation_x(t)
}

/// Rotation of `t` radians about the Y axis.
#[must_use]
pub fn rotate_y(t: f32) -> Mat4 {
    Mat4::from_rotation_y(t)
}

/// Rotation of `t` radians about the Z axis.
#[must_use]
pub fn rotate_z(t: f32) -> Mat4 {
    Mat4::from_rotation_z(t)
}

/// `Rx * Ry * Rz`
#[must_use]
pub fn rotate_xyz(rx: f32, ry: f32, rz: f32) -> Mat4 {
    rotate_x(rx) * (rotate_y(ry) * rotate_z(rz))
}

/// `Rz * Ry * Rx`
#[must_use]
pub fn rotate_zyx(rz: f32, ry: f32, rx: f32) -> Mat4 {
    rotate_z(rz) * (rotate_y(ry) * rotate_x(rx))
}

/// Translation by (`x`, `y`, `z`).
#[must_use]
pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

/// Axis-aligned scale.
#[must_use]
pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

/// Skew-symmetric matrix of `v`, such that `skew(v) * w == v.cross(w)`.
///
/// The homogeneous row and column are zero.
#[must_use]
pub fn skew(v: Vec3) -> Mat4 {
    from_rows([
        [0.0, -v.z, v.y, 0.0],
        [v.z, 0.0, -v.x, 0.0],
        [-v.y, v.x, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
    ])
}

/// Applies the inverse of a rigid transform `a` to `b` without inverting `a`.
#[must_use]
pub fn mul_se3_inverse(a: Mat4, b: Vec4) -> Vec4 {
    let c = b.truncate() - a.w_axis.truncate() * b.w;
    let rotation = glam::Mat3::from_mat4(a);
    (rotation.transpose() * c).extend(b.w)
}

/// Restores an orthonormal basis in the upper-left 3x3 block of `r`.
///
/// The first two columns are nudged symmetrically away from each other by
/// half their dot product each and renormalized; the third column is
/// rebuilt as their cross product. The fourth row and column of `r` are
/// carried over untouched.
#[must_use]
pub fn orthogonalize(r: Mat4) -> Mat4 {
    let x = r.x_axis.truncate();
    let y = r.y_axis.truncate();
    let e = x.dot(y);
    let ny = ((y - 0.5 * e * x) / (1.0 - 0.25 * e * e)).normalize_or_zero();
    let nx = (x - 0.5 * e * ny).normalize_or_zero();
    let nz = nx.cross(ny);
    Mat4::from_cols(
        nx.extend(r.at(3, 0)),
        ny.extend(r.at(3, 1)),
        nz.extend(r.at(3, 2)),
        r.w_axis,
    )
}

/// Whether the upper-left 3x3 block of `r` is a right-handed orthonormal
/// basis within `eps`.
#[must_use]
pub fn is_orthonormal(r: Mat4, eps: f32) -> bool {
    let x = r.x_axis.truncate();
    let y = r.y_axis.truncate();
    let z = r.z_axis.truncate();
    (x.length_squared() - 1.0).abs() <= eps
        && (y.length_squared() - 1.0).abs() <= eps
        && x.dot(y).abs() <= eps
        && x.cross(y).abs_diff_eq(z, eps)
}

/// Axis permutation applied before the built-in cameras, which assume +Y is up.
///
/// Maps the configured up axis of the scene onto +Y.
#[must_use]
pub fn up_permutation(up: Orientation) -> Mat4 {
    match up {
        Orientation::YUp => Mat4::IDENTITY,
        Orientation::ZUp => from_rows([
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]),
        Orientation::XUp => from_rows([
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]),
        Orientation::ZDown => from_rows([
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, -1.0, 0.0],
            [-1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]),
        Orientation::YDown => from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, -1.0, 0.0, 0.0],
            [0.0, 0.0, -1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]),
        Orientation::XDown => from_rows([
            [0.0, 0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0, 0.0],
            [0.0, -1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    fn assert_orthonormal(m: Mat4, tol: f32) {
        let cols = [m.x_axis.truncate(), m.y_axis.truncate(), m.z_axis.truncate()];
        for (i, a) in cols.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < tol, "column {i} has length {}", a.length());
            for b in &cols[i + 1..] {
                assert!(a.dot(*b).abs() < tol, "columns not orthogonal: {}", a.dot(*b));
            }
        }
    }

    #[test]
    fn test_at_is_row_col() {
        let m = from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(m.at(0, 1), 2.0);
        assert_eq!(m.at(1, 0), 5.0);
        assert_eq!(m.at(3, 2), 15.0);

        let mut m = Mat4::IDENTITY;
        m.set_at(0, 3, 7.0);
        assert_eq!(m.w_axis.x, 7.0);
    }

    #[test]
    fn test_translate_puts_offset_in_last_column() {
        let t = translate(1.0, 2.0, 3.0);
        assert_eq!(t.at(0, 3), 1.0);
        assert_eq!(t.at(1, 3), 2.0);
        assert_eq!(t.at(2, 3), 3.0);
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let p = rotate_z(std::f32::consts::FRAC_PI_2) * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p - Vec4::new(0.0, 1.0, 0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_rotate_orders() {
        let (a, b, c) = (0.3, -0.7, 1.1);
        let xyz = rotate_xyz(a, b, c);
        let zyx = rotate_zyx(c, b, a);
        assert!(xyz.abs_diff_eq(rotate_x(a) * rotate_y(b) * rotate_z(c), 1e-6));
        assert!(zyx.abs_diff_eq(rotate_z(c) * rotate_y(b) * rotate_x(a), 1e-6));
    }

    #[test]
    fn test_skew_matches_cross() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        let w = Vec3::new(0.3, 0.4, -1.0);
        let p = skew(v) * w.extend(0.0);
        assert!((p.truncate() - v.cross(w)).length() < 1e-6);
    }

    #[test]
    fn test_se3_inverse() {
        let a = translate(1.0, 2.0, 3.0) * rotate_xyz(0.2, 0.4, -0.3);
        let p = Vec4::new(0.5, -1.0, 2.0, 1.0);
        let expected = a.inverse() * p;
        assert!((mul_se3_inverse(a, p) - expected).length() < 1e-5);
    }

    #[test]
    fn test_orthogonalize_keeps_translation() {
        let mut r = rotate_xyz(0.1, 0.2, 0.3);
        r.set_at(0, 3, 4.0);
        r.set_at(1, 3, 5.0);
        r.set_at(2, 3, 6.0);
        let o = orthogonalize(r);
        assert_eq!(o.w_axis, r.w_axis);
        assert!(o.abs_diff_eq(r, 1e-5));
    }

    #[test]
    fn test_orthogonalize_zero_matrix_does_not_produce_nan() {
        let o = orthogonalize(Mat4::ZERO);
        assert!(!o.is_nan());
    }

    #[test]
    fn test_is_orthonormal() {
        assert!(is_orthonormal(rotate_xyz(0.3, -0.7, 1.1), 1e-5));
        assert!(is_orthonormal(translate(1.0, 2.0, 3.0), 1e-5));
        assert!(!is_orthonormal(scale(1.01, 1.0, 1.0), 1e-5));
        // Mirrored basis.
        assert!(!is_orthonormal(scale(1.0, 1.0, -1.0), 1e-5));
        assert!(!is_orthonormal(Mat4::ZERO, 1e-5));
    }

    #[test]
    fn test_up_permutation_maps_up_axis_to_y() {
        let cases = [
            (Orientation::ZUp, Vec3::Z),
            (Orientation::YUp, Vec3::Y),
            (Orientation::XUp, Vec3::X),
            (Orientation::ZDown, Vec3::NEG_Z),
            (Orientation::YDown, Vec3::NEG_Y),
            (Orientation::XDown, Vec3::NEG_X),
        ];
        for (up, axis) in cases {
            let mapped = up_permutation(up).transform_vector3(axis);
            assert!((mapped - Vec3::Y).length() < 1e-6, "{up:?} maps up to {mapped}");
            assert_orthonormal(up_permutation(up), 1e-6);
        }
    }

    proptest! {
        #[test]
        fn prop_orthogonalize_perturbed_rotation(
            rx in -PI..PI,
            ry in -PI..PI,
            rz in -PI..PI,
            noise in prop::array::uniform9(-1e-4f32..1e-4),
        ) {
            let mut r = rotate_xyz(rx, ry, rz);
            for (i, n) in noise.iter().enumerate() {
                let (row, col) = (i % 3, i / 3);
                r.set_at(row, col, r.at(row, col) + n);
            }
            assert_orthonormal(orthogonalize(r), 1e-5);
        }
    }
}
