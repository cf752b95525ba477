use std::collections::HashMap;

use wgpu::Device;

use crate::{
    assets::{DecodedImage, ModelData},
    error::SceneError,
    gfx::{
        camera::camera_utils::CameraManager,
        geometry::GeometryData,
        resources::{Material, MaterialId, MaterialManager, SceneBindLayouts, TextureLibrary},
    },
};

use super::{
    object::{Mesh, MeshId, Object, ObjectId, ObjectPart},
    transform::Transform,
};

/// Main scene: meshes, placed objects, materials, textures and the camera.
///
/// Templates name a list of mesh/material pairs; instantiating one adds an
/// object that shares the template's GPU geometry and materials.
pub struct Scene {
    pub camera_manager: CameraManager,
    pub meshes: Vec<Mesh>,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
    pub textures: TextureLibrary,
    templates: HashMap<String, Vec<ObjectPart>>,
}

impl Scene {
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            meshes: Vec::new(),
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            textures: TextureLibrary::new(),
            templates: HashMap::new(),
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.update();
    }

    pub fn add_mesh(&mut self, name: &str, geometry: &GeometryData) -> MeshId {
        self.meshes.push(Mesh::from_geometry(name, geometry));
        MeshId(self.meshes.len() - 1)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.material_manager.add_material(material)
    }

    /// Names a reusable list of mesh/material pairs.
    pub fn register_template(
        &mut self,
        name: &str,
        parts: Vec<ObjectPart>,
    ) -> Result<(), SceneError> {
        if self.templates.contains_key(name) {
            return Err(SceneError::DuplicateTemplate(name.to_string()));
        }
        log::debug!(
            "Registered template '{}' with {} part(s)",
            name,
            parts.len()
        );
        self.templates.insert(name.to_string(), parts);
        Ok(())
    }

    /// Registers a single-mesh template built from generated geometry.
    pub fn register_shape(
        &mut self,
        name: &str,
        geometry: &GeometryData,
        material: Material,
    ) -> Result<(), SceneError> {
        if self.has_template(name) {
            return Err(SceneError::DuplicateTemplate(name.to_string()));
        }
        let mesh = self.add_mesh(name, geometry);
        let material = self.add_material(material);
        self.register_template(
            name,
            vec![ObjectPart {
                mesh,
                material: Some(material),
            }],
        )
    }

    /// Turns a loaded model into a template, one part per model mesh.
    ///
    /// Model materials are Lambert-shaded with the file's diffuse color and
    /// are namespaced by the template name.
    pub fn register_model(&mut self, name: &str, model: &ModelData) -> Result<(), SceneError> {
        if self.has_template(name) {
            return Err(SceneError::DuplicateTemplate(name.to_string()));
        }

        let mut parts = Vec::with_capacity(model.meshes.len());
        for (index, model_mesh) in model.meshes.iter().enumerate() {
            let mesh = self.add_mesh(&format!("{}/{}", name, index), &model_mesh.geometry);
            let material = model_mesh.material.as_ref().map(|source| {
                let [r, g, b] = source.diffuse;
                let label = format!("{}/{}", name, source.name);
                let mut material = Material::lambert(&label, 0xffffff);
                material.color = [r, g, b];
                if let Some(shininess) = source.shininess {
                    material.shininess = shininess;
                }
                self.add_material(material)
            });
            parts.push(ObjectPart { mesh, material });
        }

        self.register_template(name, parts)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Places a new object built from `template`.
    pub fn instantiate(
        &mut self,
        template: &str,
        transform: &Transform,
    ) -> Result<ObjectId, SceneError> {
        let parts = self
            .templates
            .get(template)
            .ok_or_else(|| SceneError::UnknownTemplate(template.to_string()))?
            .clone();
        self.objects.push(Object::new(template, parts, *transform));
        Ok(ObjectId(self.objects.len() - 1))
    }

    pub fn object(&self, id: ObjectId) -> Result<&Object, SceneError> {
        self.objects.get(id.0).ok_or(SceneError::UnknownObject(id))
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut Object, SceneError> {
        self.objects.get_mut(id.0).ok_or(SceneError::UnknownObject(id))
    }

    /// Stores a decoded texture; materials sampling it are re-bound on the
    /// next [`prepare_gpu`](Self::prepare_gpu).
    pub fn set_texture(&mut self, key: &str, image: DecodedImage) {
        let users = self.material_manager.users_of_texture(key).len();
        log::debug!("Texture '{}' arrived for {} material(s)", key, users);
        self.textures.insert_image(key, image);
    }

    /// Uploads new meshes and textures, re-binds materials and writes dirty transforms.
    pub fn prepare_gpu(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layouts: &SceneBindLayouts,
    ) {
        for mesh in self.meshes.iter_mut() {
            mesh.upload(device);
        }

        self.textures.upload_pending(device, queue);
        self.material_manager
            .prepare_gpu(device, queue, &layouts.material, &self.textures);

        for object in self.objects.iter_mut() {
            if object.is_dirty() || object.bind_group().is_none() {
                object.sync_gpu(device, queue, &layouts.object);
            }
        }
    }

    pub fn statistics(&self) -> SceneStatistics {
        let mut total_triangles = 0u32;
        let mut total_vertices = 0u32;
        for object in self.objects.iter().filter(|object| object.visible) {
            for part in &object.parts {
                if let Some(mesh) = self.meshes.get(part.mesh.0) {
                    total_triangles += mesh.index_count / 3;
                    total_vertices += mesh.vertex_count;
                }
            }
        }

        SceneStatistics {
            object_count: self.objects.len(),
            template_count: self.templates.len(),
            mesh_count: self.meshes.len(),
            material_count: self.material_manager.len(),
            texture_count: self.textures.len(),
            total_triangles,
            total_vertices,
        }
    }

    /// Number of objects instantiated from `template`.
    pub fn count_instances(&self, template: &str) -> usize {
        self.objects
            .iter()
            .filter(|object| object.name == template)
            .count()
    }
}

/// Scene statistics for the HUD
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub template_count: usize,
    pub mesh_count: usize,
    pub material_count: usize,
    pub texture_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ModelMaterial, ModelMesh};
    use crate::config::CameraConfig;
    use crate::gfx::geometry::{generate_box, generate_sphere};

    fn empty_scene() -> Scene {
        Scene::new(CameraManager::from_config(&CameraConfig::default(), 1.5))
    }

    #[test]
    fn test_instantiate_shares_mesh() {
        let mut scene = empty_scene();
        scene
            .register_shape(
                "curb",
                &generate_box(4.0, 2.0, 80.0),
                Material::basic("curb", 0x2c393f),
            )
            .unwrap();
        let a = scene.instantiate("curb", &Transform::at(-40.0, 0.0, 140.0)).unwrap();
        let b = scene.instantiate("curb", &Transform::at(40.0, 0.0, 140.0)).unwrap();

        assert_ne!(a, b);
        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(
            scene.object(a).unwrap().parts,
            scene.object(b).unwrap().parts
        );
        assert_eq!(scene.count_instances("curb"), 2);
    }

    #[test]
    fn test_unknown_template_is_error() {
        let mut scene = empty_scene();
        assert_eq!(
            scene.instantiate("gazebo", &Transform::default()),
            Err(SceneError::UnknownTemplate("gazebo".to_string()))
        );
    }

    #[test]
    fn test_duplicate_template_is_error() {
        let mut scene = empty_scene();
        let sphere = generate_sphere(3.0, 8, 6);
        scene
            .register_shape("ball", &sphere, Material::phong("ball", 0xad0000, 100.0))
            .unwrap();
        assert_eq!(
            scene.register_shape("ball", &sphere, Material::basic("ball2", 0)),
            Err(SceneError::DuplicateTemplate("ball".to_string()))
        );
        assert_eq!(scene.meshes.len(), 1);
    }

    #[test]
    fn test_unknown_object_is_error() {
        let scene = empty_scene();
        assert!(matches!(
            scene.object(ObjectId(3)),
            Err(SceneError::UnknownObject(ObjectId(3)))
        ));
    }

    #[test]
    fn test_register_model_namespaces_materials() {
        let mut scene = empty_scene();
        let model = ModelData {
            name: "bench".to_string(),
            meshes: vec![
                ModelMesh {
                    geometry: generate_box(1.0, 1.0, 1.0),
                    material: Some(ModelMaterial {
                        name: "wood".to_string(),
                        diffuse: [0.5, 0.3, 0.1],
                        shininess: None,
                    }),
                },
                ModelMesh {
                    geometry: generate_box(2.0, 1.0, 1.0),
                    material: None,
                },
            ],
        };
        scene.register_model("bench", &model).unwrap();
        let id = scene.instantiate("bench", &Transform::default()).unwrap();

        let parts = &scene.object(id).unwrap().parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].material.as_deref(), Some("bench/wood"));
        assert_eq!(parts[1].material, None);
        assert_eq!(
            scene.material_manager.get_material("bench/wood").unwrap().color,
            [0.5, 0.3, 0.1]
        );
    }

    #[test]
    fn test_statistics_count_visible_geometry() {
        let mut scene = empty_scene();
        scene
            .register_shape(
                "block",
                &generate_box(1.0, 1.0, 1.0),
                Material::basic("block", 0),
            )
            .unwrap();
        scene.instantiate("block", &Transform::default()).unwrap();
        let hidden = scene.instantiate("block", &Transform::default()).unwrap();
        scene.object_mut(hidden).unwrap().visible = false;

        let stats = scene.statistics();
        assert_eq!(stats.object_count, 2);
        assert_eq!(stats.total_triangles, 12);
        assert_eq!(stats.total_vertices, 24);
        assert_eq!(stats.material_count, 2); // default + block
    }
}
