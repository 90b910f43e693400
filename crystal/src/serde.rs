use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    mat4::Mat4,
    vector::{Vec3, Vec4},
};

// vectors are written as plain arrays, e.g. `direction = [1.0, 1.0, 1.0]`
macro_rules! impl_serde_array {
    ( $( $ty:ident => $array:ty ),+ ) => {
        $(
            impl<T: Serialize> Serialize for $ty<T> {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    self.data.serialize(serializer)
                }
            }

            impl<'de, T: Deserialize<'de>> Deserialize<'de> for $ty<T> {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    <$array>::deserialize(deserializer).map(|data| $ty { data })
                }
            }
        )+
    };
}

impl_serde_array! {
    Vec3 => [T; 3],
    Vec4 => [T; 4],
    Mat4 => [[T; 4]; 4]
}
