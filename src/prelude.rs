//! # Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use neighborhood::prelude::*;
//!
//! let mut layout = SceneLayout::new();
//! layout
//!     .template("ball", Shape::Sphere { radius: 3.0 }, MaterialSpec::phong(0xad0000, 100.0))
//!     .place_labelled("ball", "ball", Transform::at(0.0, 3.0, 120.0))
//!     .oscillate("ball", Axis::X, 0.5, -20.0, 20.0);
//! assert!(layout.validate().is_ok());
//! ```

pub use crate::app::NeighborhoodApp;
pub use crate::config::ViewerConfig;

pub use crate::animation::{Animator, Direction, Oscillator};
pub use crate::assets::{AssetLoader, AssetRequest};
pub use crate::input::{ArrowKeys, KeyboardPan, PanKey};
pub use crate::layout::{
    neighborhood, repeat_count, Axis, GridPlacement, MaterialSpec, SceneAssembler, SceneLayout,
    Shape, Transform,
};

pub use crate::gfx::camera::{CameraManager, OrbitCamera};
pub use crate::gfx::rendering::RenderEngine;
pub use crate::gfx::scene::{ObjectId, Scene};

pub use crate::performance::{PerformanceMetrics, PerformanceMonitor};

pub use cgmath::Vector3;
