//! # Scene Management Module
//!
//! Retained-mode container for everything the renderer draws.
//!
//! ## Key Components
//!
//! - [`Scene`] - meshes, objects, materials, textures, templates and camera
//! - [`Object`] - a placed template instance with its own transform
//! - [`Transform`] - translation, Euler rotation and scale
//! - [`Vertex3D`] - vertex format with position, normal and texture coordinates
//!
//! ## Usage
//!
//! ```no_run
//! use neighborhood::config::CameraConfig;
//! use neighborhood::gfx::camera::CameraManager;
//! use neighborhood::gfx::geometry::generate_box;
//! use neighborhood::gfx::resources::Material;
//! use neighborhood::gfx::scene::{Scene, Transform};
//!
//! let mut scene = Scene::new(CameraManager::from_config(&CameraConfig::default(), 1.5));
//! scene
//!     .register_shape("curb", &generate_box(4.0, 2.0, 80.0), Material::basic("curb", 0x2c393f))
//!     .unwrap();
//! scene.instantiate("curb", &Transform::at(-40.0, 0.0, 140.0)).unwrap();
//! ```

pub mod object;
pub mod scene;
pub mod transform;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, Mesh, MeshId, Object, ObjectId, ObjectPart};
pub use scene::{Scene, SceneStatistics};
pub use transform::Transform;
pub use vertex::Vertex3D;
