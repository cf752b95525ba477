use std::collections::HashMap;

use crate::{
    animation::{Animator, Oscillator},
    assets::{AssetLoader, AssetPayload, AssetRequest, LoadedAsset, SkyboxImages, Ticket},
    error::SceneError,
    gfx::scene::{ObjectId, Scene},
};

use super::{ModelRequest, SceneLayout};

/// Builds a [`SceneLayout`] into a [`Scene`] and finishes it as assets arrive.
///
/// Shapes are placed immediately. Textures show up on their materials once
/// decoded; models are registered and instantiated when their file loads.
/// A failed asset is logged and left out, the rest of the scene is unaffected.
#[derive(Debug, Default)]
pub struct SceneAssembler {
    animators: Vec<Animator>,
    pending_models: HashMap<Ticket, ModelRequest>,
    pending_textures: HashMap<Ticket, String>,
    skybox_ticket: Option<Ticket>,
}

impl SceneAssembler {
    pub fn assemble(
        layout: &SceneLayout,
        scene: &mut Scene,
        loader: &mut AssetLoader,
    ) -> Result<Self, SceneError> {
        let mut assembler = Self::default();

        for template in &layout.templates {
            let material = template.material.to_material(&template.name);
            scene.register_shape(&template.name, &template.shape.geometry(), material)?;
        }

        for path in layout.texture_paths() {
            let ticket = loader.request(AssetRequest::Texture {
                key: path.to_string(),
            });
            assembler.pending_textures.insert(ticket, path.to_string());
        }

        let mut labels: HashMap<&str, ObjectId> = HashMap::new();
        for placement in &layout.placements {
            let id = scene.instantiate(&placement.template, &placement.transform)?;
            if let Some(label) = &placement.label {
                labels.insert(label.as_str(), id);
            }
        }

        for oscillation in &layout.oscillations {
            let id = *labels
                .get(oscillation.target.as_str())
                .ok_or_else(|| SceneError::UnknownLabel(oscillation.target.clone()))?;
            let start = scene.object(id)?.transform().translation[oscillation.axis.index()];
            let oscillator = Oscillator::new(
                start,
                oscillation.delta,
                oscillation.lower,
                oscillation.upper,
            )?;
            assembler
                .animators
                .push(Animator::new(id, oscillation.axis, oscillator));
        }

        for model in &layout.models {
            let ticket = loader.request(AssetRequest::Model {
                key: model.path.clone(),
            });
            assembler.pending_models.insert(ticket, model.clone());
        }

        if let Some(skybox) = &layout.skybox {
            let ticket = loader.request(AssetRequest::Skybox {
                faces: skybox.faces.clone(),
            });
            assembler.skybox_ticket = Some(ticket);
        }

        log::info!(
            "Assembled {} objects from {} templates; {} asset(s) loading",
            scene.objects.len(),
            layout.templates.len(),
            assembler.pending(),
        );
        Ok(assembler)
    }

    /// Folds one finished load into the scene.
    ///
    /// A decoded skybox is handed back since it belongs to the renderer.
    pub fn apply(&mut self, loaded: LoadedAsset, scene: &mut Scene) -> Option<SkyboxImages> {
        let model = self.pending_models.remove(&loaded.ticket);
        let texture = self.pending_textures.remove(&loaded.ticket);
        if self.skybox_ticket == Some(loaded.ticket) {
            self.skybox_ticket = None;
        }

        let payload = match loaded.result {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Skipping {}: {}", loaded.key, e);
                return None;
            }
        };

        match payload {
            AssetPayload::Texture(image) => {
                let key = texture.unwrap_or(loaded.key);
                log::info!("Loaded texture {} ({}x{})", key, image.width, image.height);
                scene.set_texture(&key, image);
                None
            }
            AssetPayload::Model(data) => {
                let Some(request) = model else {
                    log::warn!("Model {} arrived without a request", loaded.key);
                    return None;
                };
                if let Err(e) = scene.register_model(&request.name, &data) {
                    log::warn!("Skipping model {}: {}", request.name, e);
                    return None;
                }
                for transform in &request.instances {
                    if let Err(e) = scene.instantiate(&request.name, transform) {
                        log::warn!("Failed to place {}: {}", request.name, e);
                    }
                }
                log::info!(
                    "Loaded model {} ({} triangles, {} instance(s))",
                    request.name,
                    data.triangle_count(),
                    request.instances.len()
                );
                None
            }
            AssetPayload::Skybox(images) => {
                log::info!("Loaded skybox ({}px faces)", images.size);
                Some(images)
            }
        }
    }

    /// Requests that have not been applied yet.
    pub fn pending(&self) -> usize {
        self.pending_models.len()
            + self.pending_textures.len()
            + usize::from(self.skybox_ticket.is_some())
    }

    pub fn animators(&self) -> &[Animator] {
        &self.animators
    }

    /// Steps every animator once.
    pub fn animate(&mut self, scene: &mut Scene) {
        for animator in self.animators.iter_mut() {
            if let Err(e) = animator.step(scene) {
                log::warn!("Animation of {:?} failed: {}", animator.object, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use super::*;
    use crate::{
        config::CameraConfig,
        gfx::camera::CameraManager,
        layout::{Axis, MaterialSpec, Shape, SkyboxSpec, Transform},
    };

    fn empty_scene() -> Scene {
        Scene::new(CameraManager::from_config(&CameraConfig::default(), 1.5))
    }

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("neighborhood-assembler-tests").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn small_layout() -> SceneLayout {
        let mut layout = SceneLayout::new();
        layout
            .template(
                "lawn",
                Shape::Plane {
                    width: 10.0,
                    depth: 10.0,
                },
                MaterialSpec::lambert(0xffffff).textured("grass.png", [2.0, 2.0]),
            )
            .template(
                "ball",
                Shape::Sphere { radius: 1.0 },
                MaterialSpec::phong(0xad0000, 100.0),
            )
            .place("lawn", Transform::default())
            .place_labelled("ball", "ball", Transform::at(2.0, 1.0, 0.0))
            .oscillate("ball", Axis::X, 0.5, -4.0, 4.0)
            .model(
                "tri",
                "tri.obj",
                vec![Transform::at(0.0, 0.0, 0.0), Transform::at(5.0, 0.0, 0.0)],
            )
            .model("missing", "missing.obj", vec![Transform::default()]);
        layout
    }

    #[test]
    fn test_assets_fill_in_and_failures_are_skipped() {
        let root = temp_root("fill");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 255, 0, 255]))
            .save(root.join("grass.png"))
            .unwrap();
        std::fs::write(root.join("tri.obj"), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let mut scene = empty_scene();
        let mut loader = AssetLoader::new(&root);
        let mut assembler =
            SceneAssembler::assemble(&small_layout(), &mut scene, &mut loader).unwrap();
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(assembler.pending(), 3);

        for loaded in loader.wait(Duration::from_secs(10)) {
            assert!(assembler.apply(loaded, &mut scene).is_none());
        }

        assert_eq!(assembler.pending(), 0);
        assert_eq!(scene.count_instances("tri"), 2);
        assert_eq!(scene.count_instances("missing"), 0);
        assert!(scene.textures.contains("grass.png"));
    }

    #[test]
    fn test_ball_animator_starts_at_placement() {
        let mut scene = empty_scene();
        let mut loader = AssetLoader::new(temp_root("animate"));
        let mut assembler =
            SceneAssembler::assemble(&small_layout(), &mut scene, &mut loader).unwrap();

        assert_eq!(assembler.animators().len(), 1);
        assert_eq!(assembler.animators()[0].oscillator.value(), 2.0);

        assembler.animate(&mut scene);
        let ball = assembler.animators()[0].object;
        assert_eq!(scene.object(ball).unwrap().transform().translation.x, 2.5);
    }

    #[test]
    fn test_unknown_label_is_error() {
        let mut layout = SceneLayout::new();
        let sphere = Shape::Sphere { radius: 1.0 };
        layout
            .template("ball", sphere, MaterialSpec::basic(0))
            .place("ball", Transform::default())
            .oscillate("ball", Axis::X, 0.5, -4.0, 4.0);

        let mut scene = empty_scene();
        let mut loader = AssetLoader::new(temp_root("label"));
        let error = SceneAssembler::assemble(&layout, &mut scene, &mut loader).unwrap_err();
        assert_eq!(error, SceneError::UnknownLabel("ball".to_string()));
    }

    #[test]
    fn test_missing_skybox_is_skipped() {
        let mut layout = SceneLayout::new();
        layout.skybox(SkyboxSpec::from_directory("nowhere", "jpg"));

        let mut scene = empty_scene();
        let mut loader = AssetLoader::new(temp_root("skybox"));
        let mut assembler = SceneAssembler::assemble(&layout, &mut scene, &mut loader).unwrap();
        assert_eq!(assembler.pending(), 1);

        for loaded in loader.wait(Duration::from_secs(10)) {
            assert!(assembler.apply(loaded, &mut scene).is_none());
        }
        assert_eq!(assembler.pending(), 0);
    }
}
