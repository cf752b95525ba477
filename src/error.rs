//! Error types
//!
//! One enum per concern. Asset failures are expected at runtime (a missing
//! model simply leaves a gap in the neighborhood), everything else is a
//! programming or environment error surfaced to the binary.

use std::path::PathBuf;

use thiserror::Error;

use crate::gfx::scene::ObjectId;

/// Failure while reading or decoding a texture, skybox face or model.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load model {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("model {path} contains no triangles")]
    EmptyModel { path: PathBuf },

    #[error("skybox face {path} is {width}x{height}, expected {expected}x{expected}")]
    SkyboxFaceSize {
        path: PathBuf,
        width: u32,
        height: u32,
        expected: u32,
    },

    #[error("asset loader thread for {key} exited without reporting")]
    LoaderDisconnected { key: String },

    #[error("asset loader for {key} panicked: {message}")]
    LoaderPanicked { key: String, message: String },
}

/// Failure while reading the viewer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failure while building or editing the scene graph.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("no template named `{0}`")]
    UnknownTemplate(String),

    #[error("template `{0}` is defined twice")]
    DuplicateTemplate(String),

    #[error("no object with id {0:?}")]
    UnknownObject(ObjectId),

    #[error("no placement labelled `{0}`")]
    UnknownLabel(String),

    #[error("invalid animation: {0}")]
    Animation(#[from] AnimationError),
}

/// Failure while setting up or driving the GPU.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Invalid oscillation parameters.
#[derive(Debug, Error, PartialEq)]
pub enum AnimationError {
    #[error("lower bound {lower} must be below upper bound {upper}")]
    InvalidBounds { lower: f32, upper: f32 },

    #[error("step {0} must be positive and finite")]
    InvalidDelta(f32),
}
