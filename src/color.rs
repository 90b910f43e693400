use crystal::prelude::*;
use serde::{Deserialize, Serialize};

/// Linear RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color {
    color: Vec4<f32>,
}

impl Color {
    pub const BLACK: Color = Color {
        color: Vec4::new(0.0, 0.0, 0.0, 1.0),
    };
    pub const WHITE: Color = Color {
        color: Vec4::new(1.0, 1.0, 1.0, 1.0),
    };
    pub const ORANGE: Color = Color {
        color: Vec4::new(1.0, 0.5, 0.2, 1.0),
    };

    const CLAMP_MAX: f32 = u8::MAX as f32;

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: Vec4::new(
                f32::from(r) / Color::CLAMP_MAX,
                f32::from(g) / Color::CLAMP_MAX,
                f32::from(b) / Color::CLAMP_MAX,
                f32::from(a) / Color::CLAMP_MAX,
            ),
        }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, u8::MAX)
    }

    /// Out of range components are clamped into `[0, 1]`.
    pub fn rgba_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            color: Vec4::new(
                r.clamp(0.0, 1.0),
                g.clamp(0.0, 1.0),
                b.clamp(0.0, 1.0),
                a.clamp(0.0, 1.0),
            ),
        }
    }

    pub fn rgb_f32(r: f32, g: f32, b: f32) -> Self {
        Self::rgba_f32(r, g, b, 1.0)
    }

    pub fn r(&self) -> f32 {
        self.color.x()
    }

    pub fn g(&self) -> f32 {
        self.color.y()
    }

    pub fn b(&self) -> f32 {
        self.color.z()
    }

    pub fn a(&self) -> f32 {
        self.color.w()
    }

    /// Multiplies the RGB channels by `factor`, keeping alpha.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::rgba_f32(
            self.r() * factor,
            self.g() * factor,
            self.b() * factor,
            self.a(),
        )
    }

    pub fn is_valid(&self) -> bool {
        self.color
            .to_array()
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let convert = |c: f32| (c.clamp(0.0, 1.0) * Color::CLAMP_MAX).round() as u8;
        [
            convert(self.r()),
            convert(self.g()),
            convert(self.b()),
            convert(self.a()),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}
