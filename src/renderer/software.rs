//! CPU rasterizer writing into an RGBA image. Stands in for a window: frames
//! can be dumped to disk as PNG files and the context asks to close once a
//! fixed number of frames has been presented.

use std::{fs, io, path::PathBuf};

use crystal::prelude::*;
use image::{Rgba, RgbaImage};
use log::{debug, info};

use super::RenderContext;
use crate::{color::Color, config::Config, shading::silhouette::Segment};

/// Clip space `w` below this lies behind (or on) the eye.
const MIN_CLIP_W: f32 = 1e-6;

#[derive(thiserror::Error, Debug)]
pub enum SoftwareError {
    #[error("Failed to write frame: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A vertex after projection: pixel coordinates plus NDC depth.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScreenPoint {
    x: f32,
    y: f32,
    z: f32,
}

pub struct SoftwareContext {
    color: RgbaImage,
    depth: Vec<f32>,
    clip_from_world: Mat4<f32>,
    output_dir: Option<PathBuf>,
    frames_presented: u32,
    max_frames: u32,
}

impl SoftwareContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color: RgbaImage::new(width, height),
            depth: vec![f32::INFINITY; width as usize * height as usize],
            clip_from_world: Mat4::identity(),
            output_dir: None,
            frames_presented: 0,
            max_frames: 1,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, SoftwareError> {
        let ctx = Self::new(config.window.width, config.window.height)
            .with_max_frames(config.output.frames);

        match &config.output.directory {
            Some(dir) => ctx.with_output_dir(dir.clone()),
            None => Ok(ctx),
        }
    }

    /// Saves every presented frame into `dir`, creating it if needed.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Result<Self, SoftwareError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!("Writing frames to {}", dir.display());
        self.output_dir = Some(dir);
        Ok(self)
    }

    pub fn with_max_frames(mut self, max_frames: u32) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.color
    }

    pub fn frames_presented(&self) -> u32 {
        self.frames_presented
    }

    fn to_clip(&self, point: &Vec3<f32>) -> Vec4<f32> {
        self.clip_from_world.transform_point(point)
    }

    fn project(&self, point: &Vec3<f32>) -> Option<ScreenPoint> {
        self.to_screen(self.to_clip(point))
    }

    fn to_screen(&self, clip: Vec4<f32>) -> Option<ScreenPoint> {
        if clip.w() <= MIN_CLIP_W {
            return None;
        }

        let (width, height) = self.color.dimensions();
        Some(ScreenPoint {
            x: (clip.x() / clip.w() + 1.0) * 0.5 * width as f32,
            y: (1.0 - clip.y() / clip.w()) * 0.5 * height as f32,
            z: clip.z() / clip.w(),
        })
    }

    /// Writes one pixel if it is on screen, inside the depth range and
    /// closer than what is already there.
    fn plot(&mut self, x: i64, y: i64, z: f32, pixel: Rgba<u8>) {
        let (width, height) = self.color.dimensions();
        if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
            return;
        }
        if !(-1.0..=1.0).contains(&z) {
            return;
        }

        let index = y as usize * width as usize + x as usize;
        if z < self.depth[index] {
            self.depth[index] = z;
            self.color.put_pixel(x as u32, y as u32, pixel);
        }
    }

    fn fill_triangle(&mut self, points: [ScreenPoint; 3], pixel: Rgba<u8>) {
        let [a, b, c] = points;
        let area = edge(&a, &b, c.x, c.y);
        if area.abs() < f32::EPSILON {
            return;
        }

        let (width, height) = self.color.dimensions();
        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as i64;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as i64;
        let max_x = a.x.max(b.x).max(c.x).ceil().min(width as f32 - 1.0) as i64;
        let max_y = a.y.max(b.y).max(c.y).ceil().min(height as f32 - 1.0) as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(&b, &c, px, py) / area;
                let w1 = edge(&c, &a, px, py) / area;
                let w2 = edge(&a, &b, px, py) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = w0 * a.z + w1 * b.z + w2 * c.z;
                self.plot(x, y, z, pixel);
            }
        }
    }

    fn stroke_line(&mut self, start: ScreenPoint, end: ScreenPoint, width: f32, pixel: Rgba<u8>) {
        let brush = width.round().max(1.0) as i64;
        let low = -(brush - 1) / 2;
        let high = low + brush - 1;

        let (dx, dy) = (end.x - start.x, end.y - start.y);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;

        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = (start.x + dx * t).floor() as i64;
            let y = (start.y + dy * t).floor() as i64;
            let z = start.z + (end.z - start.z) * t;

            for oy in low..=high {
                for ox in low..=high {
                    self.plot(x + ox, y + oy, z, pixel);
                }
            }
        }
    }
}

/// Clips the clip space segment `a`-`b` against the view volume
/// (Liang-Barsky). Returns `None` if nothing of it is visible.
fn clip_segment(a: Vec4<f32>, b: Vec4<f32>) -> Option<(Vec4<f32>, Vec4<f32>)> {
    // signed distances to the six frustum planes plus the eye plane
    let distances = |v: &Vec4<f32>| {
        [
            v.w() + v.x(),
            v.w() - v.x(),
            v.w() + v.y(),
            v.w() - v.y(),
            v.w() + v.z(),
            v.w() - v.z(),
            v.w() - MIN_CLIP_W,
        ]
    };

    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for (da, db) in distances(&a).iter().zip(distances(&b).iter()) {
        let (da, db) = (*da, *db);
        if da < 0.0 && db < 0.0 {
            return None;
        }
        if da < 0.0 {
            t0 = t0.max(da / (da - db));
        } else if db < 0.0 {
            t1 = t1.min(da / (da - db));
        }
    }

    if t0 > t1 {
        return None;
    }
    Some((a + (b - a) * t0, a + (b - a) * t1))
}

/// Twice the signed area of `(a, b, p)`.
fn edge(a: &ScreenPoint, b: &ScreenPoint, px: f32, py: f32) -> f32 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

impl RenderContext for SoftwareContext {
    type Error = SoftwareError;

    fn clear(&mut self, color: Color) -> Result<(), Self::Error> {
        let pixel = Rgba(color.to_rgba8());
        for p in self.color.pixels_mut() {
            *p = pixel;
        }
        for d in self.depth.iter_mut() {
            *d = f32::INFINITY;
        }
        Ok(())
    }

    fn set_camera(&mut self, view: &Mat4<f32>, projection: &Mat4<f32>) -> Result<(), Self::Error> {
        self.clip_from_world = projection * view;
        Ok(())
    }

    fn draw_triangle(&mut self, positions: [Vec3<f32>; 3], color: Color) -> Result<(), Self::Error> {
        let [p0, p1, p2] = positions;
        if let (Some(a), Some(b), Some(c)) = (self.project(&p0), self.project(&p1), self.project(&p2)) {
            self.fill_triangle([a, b, c], Rgba(color.to_rgba8()));
        }
        Ok(())
    }

    fn draw_lines(&mut self, segments: &[Segment], width: f32, color: Color) -> Result<(), Self::Error> {
        let pixel = Rgba(color.to_rgba8());
        for segment in segments {
            let clipped = clip_segment(self.to_clip(&segment.start), self.to_clip(&segment.end));
            let screen = clipped.and_then(|(a, b)| self.to_screen(a).zip(self.to_screen(b)));
            if let Some((start, end)) = screen {
                self.stroke_line(start, end, width, pixel);
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        if let Some(dir) = &self.output_dir {
            let path = dir.join(format!("frame_{:04}.png", self.frames_presented));
            self.color.save(&path)?;
            debug!("Saved {}", path.display());
        }
        self.frames_presented += 1;
        Ok(())
    }

    fn close_requested(&self) -> bool {
        self.frames_presented >= self.max_frames
    }
}
