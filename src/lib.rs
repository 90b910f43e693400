//! Cel (toon) shading of triangle meshes: banded flat lighting plus a
//! silhouette outline, drawn through a pluggable [`renderer::RenderContext`].

pub mod assets;
pub mod color;
pub mod config;
pub mod core;
pub mod renderer;
pub mod scene;
pub mod shading;

pub mod prelude {
    pub use crate::assets::obj::{self, FacePolicy, LoadError};
    pub use crate::color::Color;
    pub use crate::config::{Config, ConfigError};
    pub use crate::core::gameloop::{FpsTracker, GameLoop};
    pub use crate::renderer::{
        record::{DrawCommand, RecordingContext},
        software::{SoftwareContext, SoftwareError},
        FrameStats, RenderContext, Renderer,
    };
    pub use crate::scene::{
        camera::Camera,
        light::{DirectionalLight, Material},
        mesh::{Corner, Face, Mesh},
    };
    pub use crate::shading::silhouette::{Segment, SilhouetteDetector};
}
