//! Small single-precision linear algebra for the cel shading pipeline.

mod angle;
mod mat4;
mod norm;
mod scalar;
mod unit;
mod vector;

#[cfg(feature = "serde-serialize")]
mod serde;

#[cfg(test)]
mod test_util;

pub mod prelude {
    pub use crate::angle::{Angle, IntoAngle};
    pub use crate::mat4::Mat4;
    pub use crate::norm::Normed;
    pub use crate::scalar::{One, Zero};
    pub use crate::unit::Unit;
    pub use crate::vector::{Vec3, Vec4};
}
