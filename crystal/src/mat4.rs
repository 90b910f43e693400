use std::ops::{Add, Index, Mul};

use crate::{
    angle::Angle,
    scalar::{One, Zero},
    unit::Unit,
    vector::{Vec3, Vec4},
};

/// A 4x4 matrix stored row by row. Vectors are treated as columns, so
/// `&a * &b` applies `b` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4<T> {
    pub(crate) data: [[T; 4]; 4],
}

impl<T> Mat4<T> {
    #[rustfmt::skip]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        c0r0: T, c1r0: T, c2r0: T, c3r0: T,
        c0r1: T, c1r1: T, c2r1: T, c3r1: T,
        c0r2: T, c1r2: T, c2r2: T, c3r2: T,
        c0r3: T, c1r3: T, c2r3: T, c3r3: T,
    ) -> Self {
        Self::from_rows([
            [c0r0, c1r0, c2r0, c3r0],
            [c0r1, c1r1, c2r1, c3r1],
            [c0r2, c1r2, c2r2, c3r2],
            [c0r3, c1r3, c2r3, c3r3],
        ])
    }

    pub const fn from_rows(data: [[T; 4]; 4]) -> Self {
        Self { data }
    }
}

impl<T: Copy + Zero + One> Mat4<T> {
    pub fn zero() -> Self {
        Self::from_rows([[T::zero(); 4]; 4])
    }

    pub fn identity() -> Self {
        let mut matrix = Self::zero();
        for idx in 0..4 {
            matrix.data[idx][idx] = T::one();
        }
        matrix
    }

    /// Applies the matrix to a point (`w = 1`).
    pub fn transform_point(&self, point: &Vec3<T>) -> Vec4<T>
    where
        T: Add<T, Output = T> + Mul<T, Output = T>,
    {
        self * &point.extend(T::one())
    }
}

impl Mat4<f32> {
    /// Right handed perspective projection mapping the view frustum onto
    /// the OpenGL clip volume (`-1 <= z <= 1`).
    pub fn perspective(fovy: Angle<f32>, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fovy * 0.5).tan();
        let depth = near - far;

        Self::new(
            f / aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, (far + near) / depth, 2.0 * far * near / depth,
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// Right handed view matrix looking from `eye` at `target`.
    ///
    /// Returns `None` if `eye` and `target` coincide or if `up` is parallel to
    /// the view direction.
    pub fn look_at(eye: &Vec3<f32>, target: &Vec3<f32>, up: &Vec3<f32>) -> Option<Self> {
        let forward = Unit::try_new_normalize(*target - *eye, f32::EPSILON)?;
        let right = Unit::try_new_normalize(forward.cross_product(up), f32::EPSILON)?;
        let up = right.cross_product(&forward);

        Some(Self::new(
            right.x(), right.y(), right.z(), -right.dot_product(eye),
            up.x(), up.y(), up.z(), -up.dot_product(eye),
            -forward.x(), -forward.y(), -forward.z(), forward.dot_product(eye),
            0.0, 0.0, 0.0, 1.0,
        ))
    }
}

impl<T> Index<(usize, usize)> for Mat4<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row][col]
    }
}

impl<T> From<Mat4<T>> for [[T; 4]; 4] {
    fn from(value: Mat4<T>) -> Self {
        value.data
    }
}

impl<'a, 'b, T> Mul<&'b Mat4<T>> for &'a Mat4<T>
where
    T: Copy + Zero + Add<T, Output = T> + Mul<T, Output = T>,
{
    type Output = Mat4<T>;

    fn mul(self, rhs: &'b Mat4<T>) -> Self::Output {
        let mut out = Mat4::from_rows([[T::zero(); 4]; 4]);
        for row in 0..4 {
            for col in 0..4 {
                let mut value = T::zero();
                for idx in 0..4 {
                    value = value + self.data[row][idx] * rhs.data[idx][col];
                }
                out.data[row][col] = value;
            }
        }
        out
    }
}

impl<'a, 'b, T> Mul<&'b Vec4<T>> for &'a Mat4<T>
where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T>,
{
    type Output = Vec4<T>;

    fn mul(self, rhs: &'b Vec4<T>) -> Self::Output {
        let v = rhs.data;
        let row = |r: &[T; 4]| r[0] * v[0] + r[1] * v[1] + r[2] * v[2] + r[3] * v[3];

        Vec4::new(
            row(&self.data[0]),
            row(&self.data[1]),
            row(&self.data[2]),
            row(&self.data[3]),
        )
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use crate::{angle::IntoAngle, test_util::MatrixCmp};

    use super::*;

    #[test]
    fn mat4_identity() {
        let is = Mat4::<f32>::identity();
        let should = Mat4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        MatrixCmp::<f32>::DEFAULT.eq(&is, &should);
    }

    #[test]
    fn mat4_mul_applies_rhs_first() {
        let translate = Mat4::new(
            1.0f32, 0.0, 0.0, 1.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        let scale = Mat4::new(
            2.0f32, 0.0, 0.0, 0.0,
            0.0, 2.0, 0.0, 0.0,
            0.0, 0.0, 2.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        let p = Vec3::new(1.0f32, 1.0, 1.0);

        let is = (&translate * &scale).transform_point(&p).truncate();

        MatrixCmp::<f32>::DEFAULT.eq_vec3(&is, &Vec3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn mat4_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(3.0f32, 2.0, 5.0);
        let target = Vec3::new(0.0f32, 0.0, 0.0);
        let view = Mat4::look_at(&eye, &target, &Vec3::unit_y()).unwrap();

        let origin = view.transform_point(&eye).truncate();
        MatrixCmp::<f32>::DEFAULT.eq_vec3(&origin, &Vec3::zero());

        let distance = (target - eye).dot_product(&(target - eye)).sqrt();
        let looked_at = view.transform_point(&target).truncate();
        MatrixCmp::<f32>::DEFAULT.eq_vec3(&looked_at, &Vec3::new(0.0, 0.0, -distance));
    }

    #[test]
    fn mat4_look_at_degenerate() {
        let eye = Vec3::new(0.0f32, 4.0, 0.0);

        assert!(Mat4::look_at(&eye, &eye, &Vec3::unit_y()).is_none());
        assert!(Mat4::look_at(&eye, &Vec3::zero(), &Vec3::unit_y()).is_none());
    }

    #[test]
    fn mat4_perspective_depth_range() {
        let projection = Mat4::perspective(45.0f32.deg(), 4.0 / 3.0, 0.1, 100.0);

        let near = projection.transform_point(&Vec3::new(0.0, 0.0, -0.1));
        let far = projection.transform_point(&Vec3::new(0.0, 0.0, -100.0));

        assert!((near.z() / near.w() + 1.0).abs() < 1e-4);
        assert!((far.z() / far.w() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn mat4_index_is_row_col() {
        let m = Mat4::new(
            1.0, 2.0, 3.0, 4.0,
            5.0, 6.0, 7.0, 8.0,
            9.0, 10.0, 11.0, 12.0,
            13.0, 14.0, 15.0, 16.0,
        );

        assert_eq!(m[(0, 3)], 4.0);
        assert_eq!(m[(3, 0)], 13.0);
    }
}
