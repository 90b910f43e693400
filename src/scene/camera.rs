use crystal::prelude::*;

use crate::config::CameraConfig;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3<f32>,
    target: Vec3<f32>,
    up: Vec3<f32>,
    fovy: Angle<f32>,
    aspect: f32,
    near: f32,
    far: f32,
    view_matrix: Mat4<f32>,
    projection_matrix: Mat4<f32>,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::zero(),
            up: Vec3::unit_y(),
            fovy: 45.0f32.deg(),
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::builder()
            .position(config.position)
            .target(config.target)
            .up(config.up)
            .fovy(config.fovy_deg.deg())
            .aspect(aspect)
            .near(config.near)
            .far(config.far)
            .build()
    }

    pub fn position(&self) -> Vec3<f32> {
        self.position
    }

    pub fn fovy(&self) -> Angle<f32> {
        self.fovy
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view_matrix(&self) -> &Mat4<f32> {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4<f32> {
        &self.projection_matrix
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// Rotates the eye around the target about the vertical axis.
    pub fn orbit(&mut self, angle: Angle<f32>) {
        let offset = self.position - self.target;
        let (sin, cos) = (angle.sin(), angle.cos());
        let rotated = Vec3::new(
            offset.x() * cos + offset.z() * sin,
            offset.y(),
            -offset.x() * sin + offset.z() * cos,
        );
        self.position = self.target + rotated;
        self.update_view_matrix();
    }

    fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective(self.fovy, self.aspect, self.near, self.far);
    }

    fn update_view_matrix(&mut self) {
        self.view_matrix = match Mat4::look_at(&self.position, &self.target, &self.up) {
            Some(view) => view,
            None => {
                log::warn!(
                    "Degenerate camera (eye {:?}, target {:?}, up {:?}), using identity view",
                    self.position,
                    self.target,
                    self.up
                );
                Mat4::identity()
            }
        };
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub struct CameraBuilder {
    position: Vec3<f32>,
    target: Vec3<f32>,
    up: Vec3<f32>,
    fovy: Angle<f32>,
    aspect: f32,
    near: f32,
    far: f32,
}

impl CameraBuilder {
    pub fn position(&mut self, pos: Vec3<f32>) -> &mut Self {
        self.position = pos;
        self
    }

    pub fn target(&mut self, target: Vec3<f32>) -> &mut Self {
        self.target = target;
        self
    }

    pub fn up(&mut self, up: Vec3<f32>) -> &mut Self {
        self.up = up;
        self
    }

    pub fn fovy(&mut self, fovy: Angle<f32>) -> &mut Self {
        let fovy = fovy.to_rad();
        const MIN: f32 = 0.01;
        const MAX: f32 = std::f32::consts::PI - 0.01;

        let clamped = fovy.max(MIN).min(MAX);
        if (clamped - fovy).abs() > 1e-6 {
            log::warn!("FovY out of bounds: {} <= `{}` <= {}", MIN, fovy, MAX);
        }
        self.fovy = Angle::from_rad(clamped);
        self
    }

    pub fn aspect(&mut self, aspect: f32) -> &mut Self {
        if aspect <= 0.0 {
            log::warn!("Aspect is not positive: `{}`", aspect);
        }
        self.aspect = aspect;
        self
    }

    pub fn near(&mut self, near: f32) -> &mut Self {
        if near <= 0.0 {
            log::warn!("Near is negative: `{}`", near);
        }
        self.near = near;
        self
    }

    pub fn far(&mut self, far: f32) -> &mut Self {
        if far <= 0.0 {
            log::warn!("Far is negative: `{}`", far);
        }
        self.far = far;
        self
    }

    pub fn build(&mut self) -> Camera {
        if self.far < self.near {
            log::warn!("Far is closer than near: `{}` `{}`", self.far, self.near);
        }

        let mut cam = Camera {
            position: self.position,
            target: self.target,
            up: self.up,
            fovy: self.fovy,
            aspect: self.aspect,
            near: self.near,
            far: self.far,
            view_matrix: Mat4::identity(),
            projection_matrix: Mat4::identity(),
        };
        cam.update_projection_matrix();
        cam.update_view_matrix();
        cam
    }
}
