//! Wavefront OBJ models via `tobj`.

use std::path::Path;

use crate::{error::AssetError, gfx::geometry::GeometryData};

/// Diffuse properties taken from the model's MTL file.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMaterial {
    pub name: String,
    pub diffuse: [f32; 3],
    pub shininess: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelMesh {
    pub geometry: GeometryData,
    pub material: Option<ModelMaterial>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub name: String,
    pub meshes: Vec<ModelMesh>,
}

impl ModelData {
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.geometry.triangle_count()).sum()
    }
}

/// Loads a triangulated, single-indexed OBJ.
///
/// A missing or broken MTL file is not fatal; the meshes fall back to the
/// default material.
pub fn load_model(path: &Path) -> Result<ModelData, AssetError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| AssetError::Model {
        path: path.to_path_buf(),
        source,
    })?;

    let materials = materials.unwrap_or_else(|e| {
        log::warn!("No materials for {}: {}", path.display(), e);
        Vec::new()
    });

    let mut meshes = Vec::with_capacity(models.len());
    for model in &models {
        let mesh = &model.mesh;
        if mesh.indices.is_empty() {
            continue;
        }

        let mut geometry = GeometryData {
            vertices: mesh.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect(),
            tex_coords: mesh
                .texcoords
                .chunks_exact(2)
                // OBJ puts v = 0 at the bottom.
                .map(|t| [t[0], 1.0 - t[1]])
                .collect(),
            normals: Vec::new(),
            indices: mesh.indices.clone(),
        };

        if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len() {
            geometry.normals = mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect();
        } else {
            log::debug!(
                "'{}' in {} has no normals, computing them",
                model.name,
                path.display()
            );
            geometry.compute_normals();
        }

        let material = mesh
            .material_id
            .and_then(|id| materials.get(id))
            .map(|material| ModelMaterial {
                name: material.name.clone(),
                diffuse: material.diffuse.unwrap_or([0.8, 0.8, 0.8]),
                shininess: material.shininess,
            });

        meshes.push(ModelMesh { geometry, material });
    }

    if meshes.is_empty() {
        return Err(AssetError::EmptyModel {
            path: path.to_path_buf(),
        });
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    log::debug!("Loaded model '{}' with {} mesh(es)", name, meshes.len());

    Ok(ModelData { name, meshes })
}
