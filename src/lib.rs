//! Neighborhood viewer
//!
//! Assembles a small hand-authored 3D neighborhood (lawn, houses, sidewalks,
//! pillars, lampposts, a bouncing ball and a few loaded models) and renders
//! it with wgpu inside a winit window.
//!
//! - [`layout`] describes what goes where and builds it into a scene
//! - [`assets`] decodes textures, models and skybox faces in the background
//! - [`animation`] and [`input`] drive the ball and the keyboard camera pan
//! - [`gfx`] is the renderer, camera and HUD
//! - [`app`] ties them together in the event loop

pub mod animation;
pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod layout;
pub mod performance;
pub mod prelude;
pub mod wgpu_utils;

pub use app::NeighborhoodApp;
