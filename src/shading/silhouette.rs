//! Per-face silhouette classification.
//!
//! A face is part of the outline when the angle between its normal and the
//! direction towards the camera exceeds a threshold. Without edge adjacency
//! this flags back-facing and grazing faces rather than only true contour
//! edges; at the default 90° it is the classic "draw the back faces
//! inflated" outline.

use crystal::prelude::*;

use crate::scene::mesh::Mesh;
use crate::shading::geometry;

/// A line segment in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec3<f32>,
    pub end: Vec3<f32>,
}

impl Segment {
    pub fn new(start: Vec3<f32>, end: Vec3<f32>) -> Self {
        Self { start, end }
    }
}

const COS_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilhouetteDetector {
    threshold: Angle<f32>,
    inflation: f32,
}

impl Default for SilhouetteDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD_DEG.deg(), Self::DEFAULT_INFLATION)
    }
}

impl SilhouetteDetector {
    pub const DEFAULT_THRESHOLD_DEG: f32 = 90.0;
    pub const DEFAULT_INFLATION: f32 = 1.01;

    pub fn new(threshold: Angle<f32>, inflation: f32) -> Self {
        Self {
            threshold,
            inflation,
        }
    }

    pub fn threshold(&self) -> Angle<f32> {
        self.threshold
    }

    pub fn inflation(&self) -> f32 {
        self.inflation
    }

    /// `dot(normal, view_dir)` for the face at `index`, or `None` if the face
    /// has no normal or its center coincides with the camera.
    pub fn facing(&self, mesh: &Mesh, index: usize, camera: &Vec3<f32>) -> Option<f32> {
        let face = mesh.faces().get(index)?;
        let normal = mesh.face_normal(index)?;
        let center = geometry::face_center(mesh, face)?;
        let view_dir = Unit::try_new_normalize(*camera - center, 0.0)?;

        Some(normal.dot_product(&view_dir))
    }

    /// `cos(threshold)`, with rounding noise around zero snapped to exactly
    /// zero so a 90° threshold splits faces at `d = 0`.
    pub fn cutoff(&self) -> f32 {
        let cos = self.threshold.cos();
        if cos.abs() < COS_EPSILON {
            0.0
        } else {
            cos
        }
    }

    pub fn is_silhouette(&self, mesh: &Mesh, index: usize, camera: &Vec3<f32>) -> bool {
        let cutoff = self.cutoff();
        matches!(self.facing(mesh, index, camera), Some(d) if d < cutoff)
    }

    /// Indices of all flagged faces, in face order.
    pub fn silhouette_faces(&self, mesh: &Mesh, camera: &Vec3<f32>) -> Vec<usize> {
        (0..mesh.faces().len())
            .filter(|index| self.is_silhouette(mesh, *index, camera))
            .collect()
    }

    /// Outline segments of all flagged faces: three per face, edges in corner
    /// order, endpoints scaled by the inflation factor.
    pub fn detect(&self, mesh: &Mesh, camera: &Vec3<f32>) -> Vec<Segment> {
        let mut segments = Vec::new();

        for index in self.silhouette_faces(mesh, camera) {
            if let Some(positions) = mesh.positions(&mesh.faces()[index]) {
                segments.extend_from_slice(&self.outline(positions));
            }
        }

        segments
    }

    fn outline(&self, positions: [Vec3<f32>; 3]) -> [Segment; 3] {
        let [p0, p1, p2] = positions.map(|p| p * self.inflation);
        [
            Segment::new(p0, p1),
            Segment::new(p1, p2),
            Segment::new(p2, p0),
        ]
    }
}
