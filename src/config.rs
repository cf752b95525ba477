//! Viewer configuration
//!
//! Every field defaults to the constants the neighborhood was authored
//! with, so an empty file (or no file at all) reproduces the default
//! scene. Values are read from RON:
//!
//! ```ron
//! (
//!     window: (width: 1600, height: 900),
//!     camera: (position: (-2.0, 60.0, -150.0)),
//!     input: (pan_interval_ms: 10, pan_step: 2.0),
//!     lighting: (hemisphere_intensity: 0.8),
//! )
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub input: InputConfig,
    pub lighting: LightingConfig,
    pub assets: AssetConfig,
    pub hud: HudConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Neighborhood".to_string(),
            width: 1200,
            height: 800,
            vsync: false,
        }
    }
}

/// Perspective camera and orbit controls.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub position: (f32, f32, f32),
    pub target: (f32, f32, f32),
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y: 75.0,
            near: 0.1,
            far: 1000.0,
            position: (-2.0, 44.0, -115.0),
            target: (0.0, 0.0, 0.0),
            min_distance: 1.0,
            max_distance: 600.0,
            rotate_speed: 0.005,
            zoom_speed: 0.5,
            pan_speed: 0.01,
        }
    }
}

/// Arrow-key panning.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Period of the pan tick in milliseconds.
    pub pan_interval_ms: u64,
    /// World units the camera moves per tick while an arrow is held.
    pub pan_step: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pan_interval_ms: 20,
            pan_step: 1.0,
        }
    }
}

impl InputConfig {
    pub fn pan_interval(&self) -> Duration {
        Duration::from_millis(self.pan_interval_ms)
    }
}

/// Hemisphere "daylight" plus one directional light. Colors are `0xRRGGBB`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub sky_color: u32,
    pub ground_color: u32,
    pub hemisphere_intensity: f32,
    pub directional_color: u32,
    pub directional_intensity: f32,
    /// Position of the directional light; it shines towards the origin.
    pub directional_position: (f32, f32, f32),
    /// Background used until (or instead of) the skybox.
    pub clear_color: u32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            sky_color: 0xffffbb,
            ground_color: 0x080820,
            hemisphere_intensity: 0.5,
            directional_color: 0xffffff,
            directional_intensity: 1.0,
            directional_position: (0.0, 1.0, 0.0),
            clear_color: 0x87ceeb,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory that relative texture, skybox and model paths resolve against.
    pub root: PathBuf,
    pub skybox: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("resources"),
            skybox: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HudConfig {
    pub visible: bool,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl ViewerConfig {
    /// Parses a RON document. Missing fields keep their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading viewer config from {}", path.display());
        Self::from_ron_str(&source)
    }

    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: format!(
                    "{}x{} is not a usable size",
                    self.window.width, self.window.height
                ),
            });
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return Err(ConfigError::Invalid {
                field: "camera.near",
                reason: format!(
                    "near {} must be positive and below far {}",
                    self.camera.near, self.camera.far
                ),
            });
        }
        if !(self.camera.fov_y > 0.0 && self.camera.fov_y < 180.0) {
            return Err(ConfigError::Invalid {
                field: "camera.fov_y",
                reason: format!("{} degrees is outside (0, 180)", self.camera.fov_y),
            });
        }
        if self.camera.min_distance <= 0.0 || self.camera.min_distance > self.camera.max_distance {
            return Err(ConfigError::Invalid {
                field: "camera.min_distance",
                reason: format!(
                    "{} must be positive and not above max_distance {}",
                    self.camera.min_distance, self.camera.max_distance
                ),
            });
        }
        if self.input.pan_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "input.pan_interval_ms",
                reason: "the pan tick needs a non-zero period".to_string(),
            });
        }
        Ok(())
    }
}

/// Converts `0xRRGGBB` to float RGB in `[0, 1]`.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
