//! # Graphics Module
//!
//! The small retained-mode engine the neighborhood is drawn with.
//!
//! - **Camera** ([`camera`]) - orbit camera, mouse controller and uniforms
//! - **Geometry** ([`geometry`]) - box, plane, cylinder, sphere and triangle generators
//! - **Rendering** ([`rendering`]) - skybox and scene pipelines, frame submission
//! - **Resources** ([`resources`]) - materials, textures and global uniforms
//! - **Scene** ([`scene`]) - meshes, templates and placed objects
//! - **UI** ([`ui`]) - Dear ImGui overlay
//!
//! ```no_run
//! use neighborhood::config::ViewerConfig;
//! use neighborhood::gfx::{camera::CameraManager, scene::Scene};
//!
//! let config = ViewerConfig::default();
//! let scene = Scene::new(CameraManager::from_config(&config.camera, 1.5));
//! // let engine = RenderEngine::new(window, width, height, &config).await?;
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod ui;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
