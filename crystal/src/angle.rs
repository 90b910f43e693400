pub trait IntoAngle: Sized {
    fn rad(self) -> Angle<Self>;
    fn deg(self) -> Angle<Self>;
}

impl IntoAngle for f32 {
    fn rad(self) -> Angle<Self> {
        Angle::from_rad(self)
    }

    fn deg(self) -> Angle<Self> {
        Angle::from_deg(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Angle<T> {
    radians: T,
}

impl Angle<f32> {
    const PI_180: f32 = ::std::f32::consts::PI / 180.0;

    pub fn from_rad(radians: f32) -> Self {
        Self { radians }
    }

    pub fn from_deg(degree: f32) -> Self {
        Self::from_rad(degree * Self::PI_180)
    }

    pub fn to_rad(&self) -> f32 {
        self.radians
    }

    pub fn to_deg(&self) -> f32 {
        self.radians / Self::PI_180
    }

    pub fn sin(&self) -> f32 {
        self.radians.sin()
    }

    pub fn cos(&self) -> f32 {
        self.radians.cos()
    }

    pub fn tan(&self) -> f32 {
        self.radians.tan()
    }
}

impl std::ops::Mul<f32> for Angle<f32> {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::from_rad(self.radians * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_degrad() {
        assert!((Angle::from_deg(90.0).to_rad() - 1.5707964).abs() < 1e-6);
        assert!((Angle::from_rad(0.7853982).to_deg() - 45.0).abs() < 1e-4);
    }

    #[test]
    fn angle_trig() {
        assert!((60.0f32.deg().cos() - 0.5).abs() < 1e-6);
        assert!(90.0f32.deg().cos().abs() < 1e-6);
        assert!((45.0f32.deg().tan() - 1.0).abs() < 1e-6);
    }
}
