//! Frame sequencing on top of an abstract drawing surface.

pub mod record;
pub mod software;

use crystal::prelude::*;
use log::debug;

use crate::{
    color::Color,
    config::Config,
    scene::{
        camera::Camera,
        light::{DirectionalLight, Material},
        mesh::Mesh,
    },
    shading::{
        geometry, lighting,
        silhouette::{Segment, SilhouetteDetector},
    },
};

/// Everything the renderer needs from a graphics backend.
///
/// The context is an explicit value owned by the caller. A backend that
/// fails to draw reports it through `Error` and the frame is abandoned.
pub trait RenderContext {
    type Error;

    fn clear(&mut self, color: Color) -> Result<(), Self::Error>;

    fn set_camera(&mut self, view: &Mat4<f32>, projection: &Mat4<f32>) -> Result<(), Self::Error>;

    /// Draws a flat colored triangle given in world space. No culling.
    fn draw_triangle(&mut self, positions: [Vec3<f32>; 3], color: Color) -> Result<(), Self::Error>;

    /// Draws world space segments with a pixel `width`, unlit.
    fn draw_lines(&mut self, segments: &[Segment], width: f32, color: Color) -> Result<(), Self::Error>;

    fn present(&mut self) -> Result<(), Self::Error>;

    fn close_requested(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub outline_segments: usize,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    pub light: DirectionalLight,
    pub material: Material,
    pub quantize: bool,
    pub levels: u32,
    pub clear_color: Color,
    pub outline_width: f32,
    pub outline_color: Color,
    pub detector: SilhouetteDetector,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Renderer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            light: DirectionalLight::from(&config.light),
            material: Material::from(&config.material),
            quantize: config.shading.quantize,
            levels: config.shading.levels,
            clear_color: config.shading.clear_color,
            outline_width: config.outline.width,
            outline_color: config.outline.color,
            detector: SilhouetteDetector::new(
                config.outline.threshold_deg.deg(),
                config.outline.inflation,
            ),
        }
    }

    /// Flat color of the face at `index` as seen from `camera`.
    pub fn face_color(&self, mesh: &Mesh, index: usize, camera: &Camera) -> Option<Color> {
        let normal = mesh.face_normal(index)?;

        let mut diffuse = self.light.diffuse(&normal);
        let mut specular = 0.0;
        if self.material.specular > 0.0 {
            let center = geometry::face_center(mesh, mesh.faces().get(index)?)?;
            let view_dir = camera.position() - center;
            specular = self.light.specular(&normal, &view_dir, self.material.shininess);
        }

        if self.quantize {
            diffuse = lighting::quantize(diffuse, self.levels);
            specular = lighting::quantize(specular, self.levels);
        }

        Some(self.material.shade(diffuse, specular))
    }

    /// Draws one frame: outline first, then every face with its banded
    /// color, then presents.
    pub fn render_frame<C: RenderContext>(
        &self,
        ctx: &mut C,
        mesh: &Mesh,
        camera: &Camera,
    ) -> Result<FrameStats, C::Error> {
        ctx.clear(self.clear_color)?;
        ctx.set_camera(camera.view_matrix(), camera.projection_matrix())?;

        let segments = self.detector.detect(mesh, &camera.position());
        ctx.draw_lines(&segments, self.outline_width, self.outline_color)?;

        let mut stats = FrameStats {
            triangles: 0,
            outline_segments: segments.len(),
        };

        for (index, face) in mesh.faces().iter().enumerate() {
            if let (Some(positions), Some(color)) =
                (mesh.positions(face), self.face_color(mesh, index, camera))
            {
                ctx.draw_triangle(positions, color)?;
                stats.triangles += 1;
            }
        }

        ctx.present()?;

        debug!(
            "Frame: {} triangles, {} outline segments",
            stats.triangles, stats.outline_segments
        );
        Ok(stats)
    }
}
