//! Per-face math behind the cel look: normals, banded lighting, outlines.

pub mod geometry;
pub mod lighting;
pub mod silhouette;
