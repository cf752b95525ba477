// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles textures, uniform buffers, and bind groups for rendering.

pub mod global_bindings;
pub mod material;
pub mod texture_library;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, SceneLighting};
pub use material::{Material, MaterialId, MaterialManager, ShadingModel};
pub use texture_library::TextureLibrary;
pub use texture_resource::TextureResource;

use crate::gfx::scene::object::object_bind_group_layout;
use crate::wgpu_utils::BindGroupLayoutWithDesc;

/// Bind group layouts the scene pipeline expects at groups 1 and 2.
///
/// Created once by the render engine and shared with the scene, so every
/// object and material bind group matches the pipeline layout.
pub struct SceneBindLayouts {
    pub object: BindGroupLayoutWithDesc,
    pub material: BindGroupLayoutWithDesc,
}

impl SceneBindLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            object: object_bind_group_layout(device),
            material: material::material_bind_group_layout(device),
        }
    }
}
