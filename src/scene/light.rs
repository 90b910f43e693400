use crystal::prelude::Vec3;

use crate::color::Color;
use crate::config::{LightConfig, MaterialConfig};
use crate::shading::lighting;

/// A light infinitely far away. Only its direction matters: `direction`
/// points from the surface towards the light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3<f32>,
}

impl DirectionalLight {
    pub fn new(direction: Vec3<f32>) -> Self {
        Self { direction }
    }

    pub fn diffuse(&self, normal: &Vec3<f32>) -> f32 {
        lighting::diffuse_intensity(normal, &self.direction)
    }

    pub fn specular(&self, normal: &Vec3<f32>, view_dir: &Vec3<f32>, shininess: f32) -> f32 {
        lighting::specular_intensity(normal, &self.direction, view_dir, shininess)
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::from(&LightConfig::default())
    }
}

impl From<&LightConfig> for DirectionalLight {
    fn from(config: &LightConfig) -> Self {
        Self::new(config.direction)
    }
}

/// Fixed reflectance coefficients shared by the whole mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
    pub color: Color,
}

impl Material {
    /// Flat color for a face receiving `diffuse` and `specular` light.
    /// The ambient term is added here, so unlit faces are not black.
    pub fn shade(&self, diffuse: f32, specular: f32) -> Color {
        let lit = (self.ambient + self.diffuse * diffuse).clamp(0.0, 1.0);
        let base = self.color.scaled(lit);
        let highlight = self.specular * specular;

        Color::rgba_f32(
            base.r() + highlight,
            base.g() + highlight,
            base.b() + highlight,
            base.a(),
        )
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::from(&MaterialConfig::default())
    }
}

impl From<&MaterialConfig> for Material {
    fn from(config: &MaterialConfig) -> Self {
        Self {
            ambient: config.ambient,
            diffuse: config.diffuse,
            specular: config.specular,
            shininess: config.shininess,
            color: config.color,
        }
    }
}
