//! Core rendering functionality
//!
//! Render pipelines and the per-frame skybox, scene and overlay passes.

pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
