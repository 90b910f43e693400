use crate::vector::Vec3;

pub trait Normed {
    type Norm;

    fn norm(&self) -> Self::Norm;
    fn norm_squared(&self) -> Self::Norm;
    fn scale_mut(&mut self, n: Self::Norm);
    fn unscale_mut(&mut self, n: Self::Norm);
}

macro_rules! impl_normed_float {
    ( $( $float:ty )+ ) => {
        $(
            impl Normed for $float {
                type Norm = $float;

                fn norm(&self) -> Self::Norm {
                    self.abs()
                }

                fn norm_squared(&self) -> Self::Norm {
                    self * self
                }

                fn scale_mut(&mut self, n: Self::Norm) {
                    *self *= n;
                }

                fn unscale_mut(&mut self, n: Self::Norm) {
                    *self /= n;
                }
            }

            impl Normed for Vec3<$float> {
                type Norm = $float;

                fn norm(&self) -> Self::Norm {
                    self.norm_squared().sqrt()
                }

                fn norm_squared(&self) -> Self::Norm {
                    self.dot_product(self)
                }

                fn scale_mut(&mut self, n: Self::Norm) {
                    *self = *self * n;
                }

                fn unscale_mut(&mut self, n: Self::Norm) {
                    *self = *self / n;
                }
            }
        )+
    }
}

impl_normed_float! { f32 f64 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_norm() {
        let v = Vec3::new(3.0f32, 4.0, 12.0);

        assert_eq!(v.norm_squared(), 169.0);
        assert_eq!(v.norm(), 13.0);
    }

    #[test]
    fn vec3_unscale() {
        let mut v = Vec3::new(2.0f32, -4.0, 8.0);
        v.unscale_mut(2.0);

        assert_eq!(v, Vec3::new(1.0, -2.0, 4.0));
    }
}
