//! Global uniform bindings for camera and lighting
//!
//! Everything shared by every draw in a frame lives in one uniform buffer
//! bound at group 0: the camera matrices, the hemisphere "daylight" and the
//! single directional light.

use cgmath::{InnerSpace, Vector3};

use crate::{
    config::{hex_to_rgb, LightingConfig},
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content.
///
/// MUST match the `Globals` struct in the shaders. Every member is 16-byte
/// aligned so no explicit padding fields are needed.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    /// rgb = sky color, a = hemisphere intensity
    sky_color: [f32; 4],
    ground_color: [f32; 4],
    /// xyz = unit vector towards the light, w = intensity
    light_direction: [f32; 4],
    light_color: [f32; 4],
}

/// Lights of the scene in shader-ready form.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneLighting {
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub hemisphere_intensity: f32,
    pub directional_color: [f32; 3],
    pub directional_intensity: f32,
    /// Unit vector pointing from the scene towards the light.
    pub direction_to_light: [f32; 3],
}

impl From<&LightingConfig> for SceneLighting {
    fn from(config: &LightingConfig) -> Self {
        let (x, y, z) = config.directional_position;
        let position = Vector3::new(x, y, z);
        // The light sits at `position` and shines towards the origin.
        let direction = if position.magnitude2() > f32::EPSILON {
            position.normalize()
        } else {
            Vector3::unit_y()
        };

        Self {
            sky_color: hex_to_rgb(config.sky_color),
            ground_color: hex_to_rgb(config.ground_color),
            hemisphere_intensity: config.hemisphere_intensity,
            directional_color: hex_to_rgb(config.directional_color),
            directional_intensity: config.directional_intensity,
            direction_to_light: direction.into(),
        }
    }
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self::from(&LightingConfig::default())
    }
}

impl GlobalUBOContent {
    pub fn new(camera: &CameraUniform, lighting: &SceneLighting) -> Self {
        let [sr, sg, sb] = lighting.sky_color;
        let [gr, gg, gb] = lighting.ground_color;
        let [dx, dy, dz] = lighting.direction_to_light;
        let [lr, lg, lb] = lighting.directional_color;

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            inv_view_proj: camera.inv_view_proj,
            sky_color: [sr, sg, sb, lighting.hemisphere_intensity],
            ground_color: [gr, gg, gb, 0.0],
            light_direction: [dx, dy, dz, lighting.directional_intensity],
            light_color: [lr, lg, lb, 1.0],
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Writes camera and light data for the coming frame.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: &CameraUniform,
    lighting: &SceneLighting,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, lighting));
}

/// Layout and bind group for the global uniforms (slot 0 in every pipeline).
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
