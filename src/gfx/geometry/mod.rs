//! # Procedural Geometry Generation
//!
//! Generates the primitive shapes the neighborhood is built from, so the
//! scene needs no model files for anything but grass, benches and animals.
//!
//! ## Supported Primitives
//!
//! - **Box**: width × height × depth cuboid (curbs, houses, bushes)
//! - **Plane**: flat XZ rectangle facing +Y (lawn, playground, sidewalk blocks)
//! - **Cylinder**: Y-axis cylinder or truncated cone (pillars, lampposts)
//! - **Sphere**: UV sphere (the bouncing ball)
//! - **Triangle**: a single double-sided triangle (gable walls)
//!
//! ## Usage
//!
//! ```rust
//! use neighborhood::gfx::geometry::{generate_box, generate_cylinder, generate_plane};
//!
//! let curb = generate_box(4.0, 2.0, 80.0);
//! let lawn = generate_plane(120.0, 280.0, 1, 1);
//! let lamp = generate_cylinder(2.0, 1.0, 5.0, 32);
//! assert_eq!(curb.triangle_count(), 12);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding seen from outside)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions, normals and UVs into the renderer's vertex format.
    ///
    /// Missing normals default to +Y and missing UVs to the origin.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }

    /// Appends one vertex and returns its index.
    fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
        index
    }

    /// Computes smooth per-vertex normals from triangle faces.
    ///
    /// Used for models whose files carry no normals.
    /// Triangles referencing a missing vertex add nothing.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![[0.0f32; 3]; self.vertices.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
            let vertex = |i: usize| self.vertices.get(i).copied();
            let (Some(v0), Some(v1), Some(v2)) = (vertex(i0), vertex(i1), vertex(i2)) else {
                continue;
            };

            let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
            let face_normal = cross(edge1, edge2);

            for &vertex in &[i0, i1, i2] {
                for axis in 0..3 {
                    normals[vertex][axis] += face_normal[axis];
                }
            }
        }

        self.normals = normals.into_iter().map(normalize_or_up).collect();
    }
}

pub(crate) fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn normalize_or_up(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > f32::EPSILON {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        [0.0, 1.0, 0.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_normals_of_flat_quad_point_up() {
        let mut quad = GeometryData {
            vertices: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 0.0, -1.0],
                [0.0, 0.0, -1.0],
            ],
            indices: vec![0, 1, 2, 2, 3, 0],
            ..Default::default()
        };
        quad.compute_normals();
        for normal in &quad.normals {
            assert_eq!(*normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_unreferenced_vertex_gets_fallback_normal() {
        let mut data = GeometryData {
            vertices: vec![[0.0; 3]; 4],
            indices: vec![],
            ..Default::default()
        };
        data.compute_normals();
        assert_eq!(data.normals, vec![[0.0, 1.0, 0.0]; 4]);
    }

    #[test]
    fn test_out_of_range_triangle_is_skipped() {
        let mut data = GeometryData {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, -1.0]],
            indices: vec![0, 1, 2, 0, 1, 7],
            ..Default::default()
        };
        data.compute_normals();
        assert_eq!(data.normals, vec![[0.0, 1.0, 0.0]; 3]);
    }

    #[test]
    fn test_to_vertices_fills_missing_attributes() {
        let data = GeometryData {
            vertices: vec![[1.0, 2.0, 3.0]],
            ..Default::default()
        };
        let vertices = data.to_vertices();
        assert_eq!(vertices[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(vertices[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[0].tex_coords, [0.0, 0.0]);
    }
}
