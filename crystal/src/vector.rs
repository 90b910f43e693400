use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::scalar::{One, Zero};

/// Three component column vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3<T> {
    pub(crate) data: [T; 3],
}

/// Four component column vector, used for homogeneous coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4<T> {
    pub(crate) data: [T; 4],
}

impl<T> Vec3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { data: [x, y, z] }
    }
}

impl<T: Copy> Vec3<T> {
    pub fn x(&self) -> T {
        self.data[0]
    }

    pub fn y(&self) -> T {
        self.data[1]
    }

    pub fn z(&self) -> T {
        self.data[2]
    }

    pub fn to_array(self) -> [T; 3] {
        self.data
    }

    /// Extends the vector by a fourth component.
    pub fn extend(self, w: T) -> Vec4<T> {
        Vec4::new(self.data[0], self.data[1], self.data[2], w)
    }

    pub fn dot_product(&self, rhs: &Self) -> T
    where
        T: Mul<T, Output = T> + Add<T, Output = T>,
    {
        self.data[0] * rhs.data[0] + self.data[1] * rhs.data[1] + self.data[2] * rhs.data[2]
    }

    pub fn cross_product(&self, rhs: &Self) -> Self
    where
        T: Mul<T, Output = T> + Sub<T, Output = T>,
    {
        let [a1, a2, a3] = self.data;
        let [b1, b2, b3] = rhs.data;

        let s1 = a2 * b3 - a3 * b2;
        let s2 = a3 * b1 - a1 * b3;
        let s3 = a1 * b2 - a2 * b1;

        Vec3::new(s1, s2, s3)
    }
}

impl<T: Zero> Vec3<T> {
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }
}

impl<T: Zero + One> Vec3<T> {
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero(), T::zero())
    }

    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one(), T::zero())
    }

    pub fn unit_z() -> Self {
        Self::new(T::zero(), T::zero(), T::one())
    }
}

impl<T> Vec4<T> {
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self {
            data: [x, y, z, w],
        }
    }
}

impl<T: Copy> Vec4<T> {
    pub fn x(&self) -> T {
        self.data[0]
    }

    pub fn y(&self) -> T {
        self.data[1]
    }

    pub fn z(&self) -> T {
        self.data[2]
    }

    pub fn w(&self) -> T {
        self.data[3]
    }

    pub fn to_array(self) -> [T; 4] {
        self.data
    }

    /// Drops the fourth component.
    pub fn truncate(self) -> Vec3<T> {
        Vec3::new(self.data[0], self.data[1], self.data[2])
    }
}

impl<T> From<[T; 3]> for Vec3<T> {
    fn from(data: [T; 3]) -> Self {
        Self { data }
    }
}

impl<T> From<Vec3<T>> for [T; 3] {
    fn from(value: Vec3<T>) -> Self {
        value.data
    }
}

impl<T> From<[T; 4]> for Vec4<T> {
    fn from(data: [T; 4]) -> Self {
        Self { data }
    }
}

impl<T> From<Vec4<T>> for [T; 4] {
    fn from(value: Vec4<T>) -> Self {
        value.data
    }
}

macro_rules! impl_vec_binop {
    ( $( $vec:ident $len:literal ),+ ) => {
        $(
            impl<T: Copy + Add<T, Output = T>> Add for $vec<T> {
                type Output = Self;

                fn add(mut self, rhs: Self) -> Self::Output {
                    for idx in 0..$len {
                        self.data[idx] = self.data[idx] + rhs.data[idx];
                    }
                    self
                }
            }

            impl<T: Copy + Sub<T, Output = T>> Sub for $vec<T> {
                type Output = Self;

                fn sub(mut self, rhs: Self) -> Self::Output {
                    for idx in 0..$len {
                        self.data[idx] = self.data[idx] - rhs.data[idx];
                    }
                    self
                }
            }

            impl<T: Copy + Mul<T, Output = T>> Mul<T> for $vec<T> {
                type Output = Self;

                fn mul(mut self, rhs: T) -> Self::Output {
                    for value in self.data.iter_mut() {
                        *value = *value * rhs;
                    }
                    self
                }
            }

            impl<T: Copy + Div<T, Output = T>> Div<T> for $vec<T> {
                type Output = Self;

                fn div(mut self, rhs: T) -> Self::Output {
                    for value in self.data.iter_mut() {
                        *value = *value / rhs;
                    }
                    self
                }
            }

            impl<T: Copy + Neg<Output = T>> Neg for $vec<T> {
                type Output = Self;

                fn neg(mut self) -> Self::Output {
                    for value in self.data.iter_mut() {
                        *value = -*value;
                    }
                    self
                }
            }

            impl<T: Copy + Add<T, Output = T>> AddAssign for $vec<T> {
                fn add_assign(&mut self, rhs: Self) {
                    *self = *self + rhs;
                }
            }

            impl<T: Copy + Sub<T, Output = T>> SubAssign for $vec<T> {
                fn sub_assign(&mut self, rhs: Self) {
                    *self = *self - rhs;
                }
            }
        )+
    };
}

impl_vec_binop! { Vec3 3, Vec4 4 }
