use std::convert::Infallible;

use crystal::prelude::*;

use super::RenderContext;
use crate::{color::Color, shading::silhouette::Segment};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    SetCamera {
        view: Mat4<f32>,
        projection: Mat4<f32>,
    },
    Triangle {
        positions: [Vec3<f32>; 3],
        color: Color,
    },
    Lines {
        segments: Vec<Segment>,
        width: f32,
        color: Color,
    },
    Present,
}

/// Backend that keeps every draw call instead of rasterizing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    frames_presented: u32,
    max_frames: u32,
}

impl RecordingContext {
    /// Requests closing after `max_frames` presents.
    pub fn new(max_frames: u32) -> Self {
        Self {
            max_frames,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames_presented(&self) -> u32 {
        self.frames_presented
    }

    /// Commands belonging to the frame at `index`, including its `Present`.
    pub fn frame(&self, index: usize) -> Option<&[DrawCommand]> {
        self.commands
            .split_inclusive(|command| *command == DrawCommand::Present)
            .filter(|frame| frame.last() == Some(&DrawCommand::Present))
            .nth(index)
    }
}

impl RenderContext for RecordingContext {
    type Error = Infallible;

    fn clear(&mut self, color: Color) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn set_camera(&mut self, view: &Mat4<f32>, projection: &Mat4<f32>) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::SetCamera {
            view: *view,
            projection: *projection,
        });
        Ok(())
    }

    fn draw_triangle(&mut self, positions: [Vec3<f32>; 3], color: Color) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Triangle { positions, color });
        Ok(())
    }

    fn draw_lines(&mut self, segments: &[Segment], width: f32, color: Color) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Lines {
            segments: segments.to_vec(),
            width,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::Present);
        self.frames_presented += 1;
        Ok(())
    }

    fn close_requested(&self) -> bool {
        self.frames_presented >= self.max_frames
    }
}
