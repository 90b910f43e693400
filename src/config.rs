//! Settings loaded from a TOML file. Every key is optional and falls back to
//! the built-in default.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crystal::prelude::Vec3;
use serde::{Deserialize, Serialize};

use crate::{assets::obj::FacePolicy, color::Color};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub model: PathBuf,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub material: MaterialConfig,
    pub shading: ShadingConfig,
    pub outline: OutlineConfig,
    pub loader: LoaderConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub position: Vec3<f32>,
    pub target: Vec3<f32>,
    pub up: Vec3<f32>,
    pub fovy_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Rotation of the eye around the target per rendered frame.
    pub orbit_deg_per_frame: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    /// Points from the surface towards the light.
    pub direction: Vec3<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterialConfig {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadingConfig {
    pub quantize: bool,
    pub levels: u32,
    pub clear_color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlineConfig {
    pub threshold_deg: f32,
    pub inflation: f32,
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    pub face_policy: FacePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Presented frames are written here as PNG files when set.
    pub directory: Option<PathBuf>,
    pub frames: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: PathBuf::from("sphere.obj"),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            material: MaterialConfig::default(),
            shading: ShadingConfig::default(),
            outline: OutlineConfig::default(),
            loader: LoaderConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Cel Shading".into(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::zero(),
            up: Vec3::unit_y(),
            fovy_deg: 45.0,
            near: 0.1,
            far: 100.0,
            orbit_deg_per_frame: 0.0,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            ambient: 0.2,
            diffuse: 0.8,
            specular: 0.0,
            shininess: 32.0,
            color: Color::ORANGE,
        }
    }
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            quantize: true,
            levels: 4,
            clear_color: Color::WHITE,
        }
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            threshold_deg: 90.0,
            inflation: 1.01,
            width: 3.0,
            color: Color::BLACK,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            frames: 1,
        }
    }
}

impl Config {
    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Width divided by height of the render surface.
    pub fn aspect(&self) -> f32 {
        self.window.width as f32 / self.window.height as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(message()))
            }
        }

        let window = &self.window;
        check(window.width > 0 && window.height > 0, || {
            format!("window size must be positive, got {}x{}", window.width, window.height)
        })?;

        let camera = &self.camera;
        check(camera.near > 0.0, || format!("camera.near must be > 0, got {}", camera.near))?;
        check(camera.far > camera.near, || {
            format!("camera.far ({}) must be greater than camera.near ({})", camera.far, camera.near)
        })?;
        check(camera.fovy_deg > 0.0 && camera.fovy_deg < 180.0, || {
            format!("camera.fovy_deg must be in (0, 180), got {}", camera.fovy_deg)
        })?;
        check(camera.position != camera.target, || {
            "camera.position and camera.target must differ".into()
        })?;

        check(self.shading.levels >= 1, || "shading.levels must be at least 1".into())?;
        check(self.shading.clear_color.is_valid(), || {
            "shading.clear_color components must be in [0, 1]".into()
        })?;

        let material = &self.material;
        for (name, value) in [
            ("ambient", material.ambient),
            ("diffuse", material.diffuse),
            ("specular", material.specular),
        ] {
            check((0.0..=1.0).contains(&value), || {
                format!("material.{} must be in [0, 1], got {}", name, value)
            })?;
        }
        check(material.shininess >= 0.0, || {
            format!("material.shininess must be >= 0, got {}", material.shininess)
        })?;
        check(material.color.is_valid(), || "material.color components must be in [0, 1]".into())?;

        let outline = &self.outline;
        check(outline.threshold_deg > 0.0 && outline.threshold_deg <= 180.0, || {
            format!("outline.threshold_deg must be in (0, 180], got {}", outline.threshold_deg)
        })?;
        check(outline.inflation > 0.0, || {
            format!("outline.inflation must be > 0, got {}", outline.inflation)
        })?;
        check(outline.width > 0.0, || format!("outline.width must be > 0, got {}", outline.width))?;
        check(outline.color.is_valid(), || "outline.color components must be in [0, 1]".into())?;

        check(self.output.frames >= 1, || "output.frames must be at least 1".into())?;

        Ok(())
    }
}
