//! # Scene layout
//!
//! Declarative description of what goes where: templates (shape plus
//! material), placements of those templates, models fetched in the
//! background, oscillating objects and the skybox. [`blueprint`] holds the
//! neighborhood itself and [`assembler`] turns a layout into a live scene.

pub mod assembler;
pub mod blueprint;
pub mod placement;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{
    error::SceneError,
    gfx::{
        geometry::{
            generate_box, generate_cylinder, generate_plane, generate_sphere, generate_triangle,
            GeometryData,
        },
        resources::Material,
    },
};

pub use crate::gfx::scene::Transform;
pub use assembler::SceneAssembler;
pub use blueprint::neighborhood;
pub use placement::{repeat_count, Axis, AxisRepeat, GridPlacement};

const CYLINDER_SEGMENTS: u32 = 32;
const SPHERE_LONGITUDE_SEGMENTS: u32 = 32;
const SPHERE_LATITUDE_SEGMENTS: u32 = 16;

/// Primitive geometry of a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box { width: f32, height: f32, depth: f32 },
    /// Flat on the ground, facing up.
    Plane { width: f32, depth: f32 },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    Sphere { radius: f32 },
    Triangle {
        a: [f32; 3],
        b: [f32; 3],
        c: [f32; 3],
    },
}

impl Shape {
    pub fn geometry(&self) -> GeometryData {
        match *self {
            Shape::Box { width, height, depth } => generate_box(width, height, depth),
            Shape::Plane { width, depth } => generate_plane(width, depth, 1, 1),
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => generate_cylinder(radius_top, radius_bottom, height, CYLINDER_SEGMENTS),
            Shape::Sphere { radius } => {
                generate_sphere(radius, SPHERE_LONGITUDE_SEGMENTS, SPHERE_LATITUDE_SEGMENTS)
            }
            Shape::Triangle { a, b, c } => generate_triangle(a, b, c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Unlit
    Basic,
    Lambert,
    Phong { shininess: f32 },
}

/// Diffuse map, relative to the asset root, tiled `repeat` times.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSpec {
    pub path: String,
    pub repeat: [f32; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSpec {
    pub shading: Shading,
    pub color: u32,
    pub texture: Option<TextureSpec>,
}

impl MaterialSpec {
    pub fn basic(color: u32) -> Self {
        Self {
            shading: Shading::Basic,
            color,
            texture: None,
        }
    }

    pub fn lambert(color: u32) -> Self {
        Self {
            shading: Shading::Lambert,
            ..Self::basic(color)
        }
    }

    pub fn phong(color: u32, shininess: f32) -> Self {
        Self {
            shading: Shading::Phong { shininess },
            ..Self::basic(color)
        }
    }

    pub fn textured(mut self, path: &str, repeat: [f32; 2]) -> Self {
        self.texture = Some(TextureSpec {
            path: path.to_string(),
            repeat,
        });
        self
    }

    pub fn to_material(&self, name: &str) -> Material {
        let material = match self.shading {
            Shading::Basic => Material::basic(name, self.color),
            Shading::Lambert => Material::lambert(name, self.color),
            Shading::Phong { shininess } => Material::phong(name, self.color, shininess),
        };
        match &self.texture {
            Some(texture) => material.with_texture(&texture.path, texture.repeat),
            None => material,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub shape: Shape,
    pub material: MaterialSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub template: String,
    pub transform: Transform,
    /// Name other layout entries (oscillations) refer to this instance by.
    pub label: Option<String>,
}

/// A model file and every transform it should be placed at once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub name: String,
    pub path: String,
    pub instances: Vec<Transform>,
}

/// Moves the labelled placement back and forth along `axis`.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillation {
    pub target: String,
    pub axis: Axis,
    pub delta: f32,
    pub lower: f32,
    pub upper: f32,
}

/// Cube faces in +X, -X, +Y, -Y, +Z, -Z order, relative to the asset root.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyboxSpec {
    pub faces: [PathBuf; 6],
}

impl SkyboxSpec {
    /// `<dir>/posx.<ext>`, `<dir>/negx.<ext>`, ...
    pub fn from_directory(dir: &str, extension: &str) -> Self {
        let faces = ["posx", "negx", "posy", "negy", "posz", "negz"]
            .map(|face| Path::new(dir).join(format!("{face}.{extension}")));
        Self { faces }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneLayout {
    pub templates: Vec<Template>,
    pub placements: Vec<Placement>,
    pub models: Vec<ModelRequest>,
    pub oscillations: Vec<Oscillation>,
    pub skybox: Option<SkyboxSpec>,
}

impl SceneLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template(&mut self, name: &str, shape: Shape, material: MaterialSpec) -> &mut Self {
        self.templates.push(Template {
            name: name.to_string(),
            shape,
            material,
        });
        self
    }

    pub fn place(&mut self, template: &str, transform: Transform) -> &mut Self {
        self.placements.push(Placement {
            template: template.to_string(),
            transform,
            label: None,
        });
        self
    }

    pub fn place_labelled(
        &mut self,
        template: &str,
        label: &str,
        transform: Transform,
    ) -> &mut Self {
        self.placements.push(Placement {
            template: template.to_string(),
            transform,
            label: Some(label.to_string()),
        });
        self
    }

    /// One placement per grid position, each a copy of `base` moved there.
    pub fn place_grid(
        &mut self,
        template: &str,
        grid: &GridPlacement,
        base: Transform,
    ) -> &mut Self {
        for position in grid.positions() {
            self.place(template, base.moved_to(position));
        }
        self
    }

    pub fn model(&mut self, name: &str, path: &str, instances: Vec<Transform>) -> &mut Self {
        self.models.push(ModelRequest {
            name: name.to_string(),
            path: path.to_string(),
            instances,
        });
        self
    }

    pub fn oscillate(
        &mut self,
        target: &str,
        axis: Axis,
        delta: f32,
        lower: f32,
        upper: f32,
    ) -> &mut Self {
        self.oscillations.push(Oscillation {
            target: target.to_string(),
            axis,
            delta,
            lower,
            upper,
        });
        self
    }

    pub fn skybox(&mut self, skybox: SkyboxSpec) -> &mut Self {
        self.skybox = Some(skybox);
        self
    }

    /// Number of placements of `template`.
    pub fn count(&self, template: &str) -> usize {
        self.placements
            .iter()
            .filter(|placement| placement.template == template)
            .count()
    }

    /// Distinct texture paths, in first-use order.
    pub fn texture_paths(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.templates
            .iter()
            .filter_map(|template| template.material.texture.as_ref())
            .map(|texture| texture.path.as_str())
            .filter(|path| seen.insert(*path))
            .collect()
    }

    /// Lists every dangling reference and duplicate name.
    pub fn validate(&self) -> Result<(), Vec<SceneError>> {
        let mut issues = Vec::new();
        let mut names = HashSet::new();

        let template_names = self.templates.iter().map(|t| t.name.as_str());
        let model_names = self.models.iter().map(|m| m.name.as_str());
        for name in template_names.chain(model_names) {
            if !names.insert(name) {
                issues.push(SceneError::DuplicateTemplate(name.to_string()));
            }
        }

        let shape_names: HashSet<&str> = self.templates.iter().map(|t| t.name.as_str()).collect();
        for placement in &self.placements {
            if !shape_names.contains(placement.template.as_str()) {
                issues.push(SceneError::UnknownTemplate(placement.template.clone()));
            }
        }

        for oscillation in &self.oscillations {
            let target = Some(oscillation.target.as_str());
            let labelled = self
                .placements
                .iter()
                .any(|placement| placement.label.as_deref() == target);
            if !labelled {
                issues.push(SceneError::UnknownLabel(oscillation.target.clone()));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::ShadingModel;

    #[test]
    fn test_material_spec_to_material() {
        let grass = MaterialSpec::lambert(0xffffff).textured("grass.jpg", [8.0, 4.0]);
        let material = grass.to_material("lawn");
        assert_eq!(material.name, "lawn");
        assert_eq!(material.shading, ShadingModel::Lambert);
        assert_eq!(material.texture.as_deref(), Some("grass.jpg"));
        assert_eq!(material.uv_repeat, [8.0, 4.0]);

        let ball = MaterialSpec::phong(0xad0000, 100.0).to_material("ball");
        assert_eq!(ball.shading, ShadingModel::Phong);
        assert_eq!(ball.shininess, 100.0);
    }

    #[test]
    fn test_place_grid_keeps_base_rotation() {
        let mut layout = SceneLayout::new();
        let tile = Shape::Plane {
            width: 40.0,
            depth: 40.0,
        };
        layout.template("tile", tile, MaterialSpec::basic(0));
        let grid = GridPlacement::along(cgmath::Vector3::new(0.0, 0.0, 0.0), Axis::Z, 10.0, 3);
        layout.place_grid("tile", &grid, Transform::default().with_rotation_y(1.0));

        assert_eq!(layout.count("tile"), 3);
        let mut rotations = layout.placements.iter().map(|p| p.transform.rotation.y);
        assert!(rotations.all(|y| y == 1.0));
        assert_eq!(layout.placements[2].transform.translation.z, 20.0);
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut layout = SceneLayout::new();
        layout
            .template(
                "box",
                Shape::Box {
                    width: 1.0,
                    height: 1.0,
                    depth: 1.0,
                },
                MaterialSpec::basic(0),
            )
            .template("box", Shape::Sphere { radius: 1.0 }, MaterialSpec::basic(0))
            .place("gazebo", Transform::default())
            .oscillate("ball", Axis::X, 0.5, -20.0, 20.0);

        let issues = layout.validate().unwrap_err();
        assert_eq!(
            issues,
            vec![
                SceneError::DuplicateTemplate("box".to_string()),
                SceneError::UnknownTemplate("gazebo".to_string()),
                SceneError::UnknownLabel("ball".to_string()),
            ]
        );
    }

    #[test]
    fn test_texture_paths_are_deduplicated() {
        let mut layout = SceneLayout::new();
        let plane = Shape::Plane {
            width: 1.0,
            depth: 1.0,
        };
        let textured = |path: &str, r: f32| MaterialSpec::basic(0).textured(path, [r, r]);
        layout
            .template("a", plane.clone(), textured("x.jpg", 1.0))
            .template("b", plane.clone(), textured("x.jpg", 2.0))
            .template("c", plane, textured("y.jpg", 1.0));
        assert_eq!(layout.texture_paths(), vec!["x.jpg", "y.jpg"]);
    }

    #[test]
    fn test_skybox_face_order() {
        let skybox = SkyboxSpec::from_directory("skybox", "jpg");
        assert_eq!(skybox.faces[0], PathBuf::from("skybox/posx.jpg"));
        assert_eq!(skybox.faces[5], PathBuf::from("skybox/negz.jpg"));
    }
}
