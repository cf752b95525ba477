use wgpu::Device;

use super::{transform::Transform, vertex::Vertex3D};
use crate::gfx::geometry::GeometryData;
use crate::gfx::resources::{MaterialId, MaterialManager};
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Index of a mesh in its [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Index of an object in its [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Geometry uploaded once and drawn by every object that references it.
pub struct Mesh {
    pub name: String,
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    pub index_count: u32,
    pub vertex_count: u32,
}

impl Mesh {
    pub fn from_geometry(name: &str, geometry: &GeometryData) -> Self {
        let vertices = geometry.to_vertices();
        Self {
            name: name.to_string(),
            index_count: geometry.indices.len() as u32,
            vertex_count: vertices.len() as u32,
            vertices,
            indices: geometry.indices.clone(),
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        self.vertex_buffer.is_some() && self.index_buffer.is_some()
    }

    /// Creates vertex and index buffers; CPU copies are released afterwards.
    pub fn upload(&mut self, device: &Device) {
        if self.is_uploaded() {
            return;
        }

        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Vertex Buffer: {}", self.name)),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Index Buffer: {}", self.name)),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
        self.vertices = Vec::new();
        self.indices = Vec::new();
    }
}

/// Per-object uniform: model matrix plus the matrix for normals.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
}

impl From<&Transform> for ObjectUniform {
    fn from(transform: &Transform) -> Self {
        Self {
            model: transform.matrix().into(),
            normal: transform.normal_matrix().into(),
        }
    }
}

pub fn object_bind_group_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_vertex(binding_types::uniform())
        .create(device, "Object Bind Group Layout")
}

struct ObjectGpuResources {
    ubo: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

/// One mesh drawn with one material.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPart {
    pub mesh: MeshId,
    pub material: Option<MaterialId>,
}

/// A placed instance of a template.
pub struct Object {
    pub name: String,
    pub parts: Vec<ObjectPart>,
    pub visible: bool,
    transform: Transform,
    dirty: bool,
    gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(name: &str, parts: Vec<ObjectPart>, transform: Transform) -> Self {
        Self {
            name: name.to_string(),
            parts,
            visible: true,
            transform,
            dirty: true,
            gpu_resources: None,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        if transform != self.transform {
            self.transform = transform;
            self.dirty = true;
        }
    }

    pub fn set_translation(&mut self, translation: cgmath::Vector3<f32>) {
        self.set_transform(self.transform.moved_to(translation));
    }

    /// True when the transform changed since the last GPU sync.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Creates the transform uniform on first use, then writes it when dirty.
    pub fn sync_gpu(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        let uniform = ObjectUniform::from(&self.transform);

        match &mut self.gpu_resources {
            Some(gpu) => {
                if self.dirty {
                    gpu.ubo.update_content(queue, uniform);
                }
            }
            None => {
                let ubo = UniformBuffer::new_with_data(device, &uniform);
                let bind_group = BindGroupBuilder::new(layout)
                    .resource(ubo.binding_resource())
                    .create(device, &format!("Object Bind Group: {}", self.name));
                self.gpu_resources = Some(ObjectGpuResources { ubo, bind_group });
            }
        }
        self.dirty = false;
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Draw helpers for the scene pass. Group 1 is the object, group 2 the material.
pub trait DrawObject {
    fn draw_mesh(&mut self, mesh: &Mesh);
    fn draw_object(&mut self, object: &Object, meshes: &[Mesh], materials: &MaterialManager);
}

impl DrawObject for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &Mesh) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_object(&mut self, object: &Object, meshes: &[Mesh], materials: &MaterialManager) {
        let Some(object_bind_group) = object.bind_group() else {
            return;
        };
        self.set_bind_group(1, object_bind_group, &[]);

        for part in &object.parts {
            let material = materials.get_material_for_object(part.material.as_ref());
            let (Some(material_bind_group), Some(mesh)) =
                (material.bind_group(), meshes.get(part.mesh.0))
            else {
                continue;
            };
            self.set_bind_group(2, material_bind_group, &[]);
            self.draw_mesh(mesh);
        }
    }
}
