use std::{fmt, ops::Deref};

use crate::norm::Normed;

/// A value that is known to have a norm of one.
#[repr(transparent)]
pub struct Unit<T> {
    value: T,
}

impl<T> Unit<T>
where
    T: Normed,
    T::Norm: Clone,
{
    pub fn new_normalize(value: T) -> Self {
        Self::new_and_get(value).0
    }

    pub fn new_and_get(mut value: T) -> (Self, T::Norm) {
        let n = value.norm();
        value.unscale_mut(n.clone());
        (Unit { value }, n)
    }

    /// Normalizes `value` unless its norm is less than or equal to `min_norm`.
    pub fn try_new_normalize(value: T, min_norm: T::Norm) -> Option<Self>
    where
        T::Norm: PartialOrd,
    {
        Self::try_new_and_get(value, min_norm).map(|(unit, _)| unit)
    }

    pub fn try_new_and_get(mut value: T, min_norm: T::Norm) -> Option<(Self, T::Norm)>
    where
        T::Norm: PartialOrd,
    {
        let n = value.norm();
        if n <= min_norm {
            None
        } else {
            value.unscale_mut(n.clone());
            Some((Unit { value }, n))
        }
    }
}

impl<T> Unit<T> {
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Unit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Unit").field(&self.value).finish()
    }
}

impl<T: Clone> Clone for Unit<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl<T: Copy> Copy for Unit<T> {}

impl<T: PartialEq> PartialEq for Unit<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Deref for Unit<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3;

    #[test]
    fn unit_rejects_zero_vector() {
        assert!(Unit::try_new_normalize(Vec3::new(0.0f32, 0.0, 0.0), 0.0).is_none());
    }

    #[test]
    fn unit_returns_norm() {
        let (unit, norm) = Unit::new_and_get(Vec3::new(0.0f32, 3.0, 4.0));

        assert_eq!(norm, 5.0);
        assert_eq!(*unit, Vec3::new(0.0, 0.6, 0.8));
    }
}
