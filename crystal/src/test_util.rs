use std::fmt;

use crate::{mat4::Mat4, vector::Vec3};

#[derive(Debug, Clone)]
pub struct MatrixCmp<T> {
    error_margin: T,
}

impl MatrixCmp<f32> {
    pub const DEFAULT: Self = Self { error_margin: 1e-5 };

    fn eq_slices(&self, is: &[f32], should: &[f32], what: impl fmt::Display) {
        for (idx, (v1, v2)) in is.iter().zip(should.iter()).enumerate() {
            let diff_abs = (v1 - v2).abs();

            assert!(
                diff_abs <= self.error_margin,
                "{}: is: {:?} should: {:?} (+- {:?}) @ {}",
                what,
                v1,
                v2,
                self.error_margin,
                idx
            );
        }
    }

    pub fn eq(&self, mat_one: &Mat4<f32>, mat_two: &Mat4<f32>) {
        for row in 0..4 {
            self.eq_slices(&mat_one.data[row], &mat_two.data[row], format!("row {}", row));
        }
    }

    pub fn eq_vec3(&self, vec_one: &Vec3<f32>, vec_two: &Vec3<f32>) {
        self.eq_slices(&vec_one.data, &vec_two.data, "vec3");
    }
}

impl Default for MatrixCmp<f32> {
    fn default() -> Self {
        Self::DEFAULT
    }
}
