//! Material system
//!
//! Three shading models cover the neighborhood: unlit `Basic` for curbs,
//! pillars and lampposts, diffuse `Lambert` for the lawn and `Phong` for the
//! houses and the ball. Materials are stored in [`MaterialManager`] and
//! objects reference them by ID.

use std::collections::HashMap;
use wgpu::Device;

use super::texture_library::TextureLibrary;
use crate::{
    config::hex_to_rgb,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Material ID for referencing materials
pub type MaterialId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingModel {
    /// Color and texture only, unaffected by lights.
    Basic,
    /// Diffuse lighting.
    Lambert,
    /// Diffuse plus Blinn-Phong specular.
    Phong,
}

impl ShadingModel {
    fn shader_index(self) -> f32 {
        match self {
            ShadingModel::Basic => 0.0,
            ShadingModel::Lambert => 1.0,
            ShadingModel::Phong => 2.0,
        }
    }
}

/// GPU uniform data for materials. Must match `Material` in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub color: [f32; 4],
    /// rgb = specular color, a = shininess
    pub specular: [f32; 4],
    /// xy = UV repeat, z = shading model, w = 1 when a texture is bound
    pub params: [f32; 4],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Layout shared by every material bind group: uniform, texture, sampler.
pub fn material_bind_group_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_fragment(binding_types::uniform())
        .next_binding_fragment(binding_types::texture_2d())
        .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
        .create(device, "Material Bind Group Layout")
}

struct MaterialGpu {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
    bound_to_texture: bool,
}

pub struct Material {
    pub name: String,
    pub shading: ShadingModel,
    pub color: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    /// Key of the diffuse map in the [`TextureLibrary`].
    pub texture: Option<String>,
    pub uv_repeat: [f32; 2],
    gpu: Option<MaterialGpu>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            shading: ShadingModel::Lambert,
            color: [0.8, 0.8, 0.8],
            specular: hex_to_rgb(0x111111),
            shininess: 30.0,
            texture: None,
            uv_repeat: [1.0, 1.0],
            gpu: None,
        }
    }
}

impl Material {
    pub fn new(name: &str, shading: ShadingModel, color: u32) -> Self {
        Self {
            name: name.to_string(),
            shading,
            color: hex_to_rgb(color),
            ..Default::default()
        }
    }

    pub fn basic(name: &str, color: u32) -> Self {
        Self::new(name, ShadingModel::Basic, color)
    }

    pub fn lambert(name: &str, color: u32) -> Self {
        Self::new(name, ShadingModel::Lambert, color)
    }

    pub fn phong(name: &str, color: u32, shininess: f32) -> Self {
        Self {
            shininess: shininess.max(0.0),
            ..Self::new(name, ShadingModel::Phong, color)
        }
    }

    /// Builder pattern: sample `key` as the diffuse map, tiled `repeat` times.
    pub fn with_texture(mut self, key: &str, repeat: [f32; 2]) -> Self {
        self.texture = Some(key.to_string());
        self.uv_repeat = repeat;
        self
    }

    pub fn uniform(&self, has_texture: bool) -> MaterialUniform {
        let [r, g, b] = self.color;
        let [sr, sg, sb] = self.specular;
        MaterialUniform {
            color: [r, g, b, 1.0],
            specular: [sr, sg, sb, self.shininess],
            params: [
                self.uv_repeat[0],
                self.uv_repeat[1],
                self.shading.shader_index(),
                if has_texture { 1.0 } else { 0.0 },
            ],
        }
    }

    /// Creates or refreshes GPU resources.
    ///
    /// The bind group is rebuilt when the diffuse map becomes available, so a
    /// texture that finishes loading after the material was first drawn still
    /// shows up.
    fn prepare_gpu(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
        textures: &TextureLibrary,
    ) {
        let Some(white) = textures.white() else {
            return;
        };
        let diffuse = self.texture.as_deref().and_then(|key| textures.get(key));
        let has_texture = diffuse.is_some();
        let bound = diffuse.unwrap_or(white);

        let needs_rebind = self
            .gpu
            .as_ref()
            .map_or(true, |gpu| gpu.bound_to_texture != has_texture);

        if needs_rebind {
            let ubo = match self.gpu.take() {
                Some(gpu) => gpu.ubo,
                None => MaterialUBO::new(device),
            };
            let bind_group = BindGroupBuilder::new(layout)
                .resource(ubo.binding_resource())
                .texture(&bound.view)
                .sampler(&bound.sampler)
                .create(device, &format!("Material Bind Group: {}", self.name));
            if has_texture {
                log::debug!("Material '{}' bound to its texture", self.name);
            }
            self.gpu = Some(MaterialGpu {
                ubo,
                bind_group,
                bound_to_texture: has_texture,
            });
        }

        let uniform = self.uniform(has_texture);
        if let Some(gpu) = &mut self.gpu {
            gpu.ubo.update_content(queue, uniform);
        }
    }

    /// Gets the bind group for rendering
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Centralized storage for all materials
///
/// Objects reference materials by ID rather than storing material data
/// directly, so clones share GPU resources.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material_id: MaterialId,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let default_material = Material::default();
        let default_material_id = default_material.name.clone();
        let mut materials = HashMap::new();
        materials.insert(default_material_id.clone(), default_material);

        Self {
            materials,
            default_material_id,
        }
    }

    /// Adds a material, replacing any material with the same name.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = material.name.clone();
        self.materials.insert(id.clone(), material);
        id
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.materials.contains_key(id)
    }

    pub fn get_default_material(&self) -> &Material {
        &self.materials[&self.default_material_id]
    }

    /// Gets the material for an object part with fallback to default
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &Material {
        material_id
            .and_then(|id| self.get_material(id))
            .unwrap_or_else(|| self.get_default_material())
    }

    /// Materials sampling the texture `key`.
    pub fn users_of_texture(&self, key: &str) -> Vec<&MaterialId> {
        self.materials
            .iter()
            .filter(|(_, material)| material.texture.as_deref() == Some(key))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Creates missing GPU resources and re-binds materials whose texture arrived.
    pub fn prepare_gpu(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
        textures: &TextureLibrary,
    ) {
        for material in self.materials.values_mut() {
            material.prepare_gpu(device, queue, layout, textures);
        }
    }
}
