use std::time::{Duration, Instant};

use crystal::prelude::*;
use log::info;

use crate::{
    renderer::{RenderContext, Renderer},
    scene::{camera::Camera, mesh::Mesh},
};

pub struct FpsTracker {
    median: f32,
    frames: u64,
    instance: Instant,
    interval: Duration,
}

impl FpsTracker {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            median: 0.0,
            frames: 0,
            instance: Instant::now(),
            interval,
        }
    }

    /// Counts a frame. Returns `true` whenever a new estimate is available.
    pub fn update(&mut self) -> bool {
        self.frames += 1;

        let elapsed = self.instance.elapsed();
        if elapsed >= self.interval && !elapsed.is_zero() {
            let current = self.frames as f32 / elapsed.as_secs_f32();
            self.median = if self.median == 0.0 {
                current
            } else {
                (self.median + current) / 2.0
            };
            self.frames = 0;
            self.instance = Instant::now();
            true
        } else {
            false
        }
    }

    pub fn fps(&self) -> f32 {
        self.median
    }
}

impl Default for FpsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a renderer until the context asks to close.
pub struct GameLoop {
    orbit_per_frame: Angle<f32>,
    fps: FpsTracker,
}

impl GameLoop {
    pub fn new(orbit_per_frame: Angle<f32>) -> Self {
        Self {
            orbit_per_frame,
            fps: FpsTracker::new(),
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    /// Renders frames until `ctx.close_requested()`. The camera orbits its
    /// target between frames. Returns the number of frames rendered.
    pub fn run<C: RenderContext>(
        &mut self,
        ctx: &mut C,
        renderer: &Renderer,
        mesh: &Mesh,
        camera: &mut Camera,
    ) -> Result<u64, C::Error> {
        let mut frames = 0;

        while !ctx.close_requested() {
            if frames > 0 && self.orbit_per_frame.to_rad() != 0.0 {
                camera.orbit(self.orbit_per_frame);
            }

            renderer.render_frame(ctx, mesh, camera)?;
            frames += 1;

            if self.fps.update() {
                info!("FPS: {:.1}", self.fps.fps());
            }
        }

        info!("Rendered {} frames", frames);
        Ok(frames)
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(Angle::from_rad(0.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::renderer::record::{DrawCommand, RecordingContext};
    use crate::scene::mesh::Face;

    fn triangle() -> Mesh {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        match Mesh::new(vertices, Vec::new(), vec![Face::from_vertices([0, 1, 2])]) {
            Ok(mesh) => mesh,
            Err(e) => panic!("triangle rejected: {}", e),
        }
    }

    fn views(ctx: &RecordingContext) -> Vec<Mat4<f32>> {
        ctx.commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::SetCamera { view, .. } => Some(*view),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_runs_until_close_requested() {
        let mut ctx = RecordingContext::new(3);
        let mut camera = Camera::default();

        let frames = match GameLoop::default().run(&mut ctx, &Renderer::default(), &triangle(), &mut camera) {
            Ok(frames) => frames,
            Err(never) => match never {},
        };

        assert_eq!(frames, 3);
        assert_eq!(ctx.frames_presented(), 3);

        let views = views(&ctx);
        assert!(views.iter().all(|view| view == &views[0]));
    }

    #[test]
    fn test_orbit_moves_camera_between_frames() {
        let mut ctx = RecordingContext::new(2);
        let mut camera = Camera::default();
        let mut game_loop = GameLoop::new(Angle::from_deg(15.0));

        let _ = game_loop.run(&mut ctx, &Renderer::default(), &triangle(), &mut camera);

        let views = views(&ctx);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0], *Camera::default().view_matrix());
        assert_ne!(views[0], views[1]);
        assert_ne!(camera.position(), Camera::default().position());
    }

    #[test]
    fn test_closed_context_renders_nothing() {
        let mut ctx = RecordingContext::new(0);
        let mut camera = Camera::default();

        let frames = match GameLoop::default().run(&mut ctx, &Renderer::default(), &triangle(), &mut camera) {
            Ok(frames) => frames,
            Err(never) => match never {},
        };

        assert_eq!(frames, 0);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_fps_tracker_reports_after_interval() {
        let mut tracker = FpsTracker::with_interval(Duration::from_millis(20));
        assert!(!tracker.update());

        std::thread::sleep(Duration::from_millis(30));
        assert!(tracker.update());
        assert!(tracker.fps() > 0.0);
    }
}
