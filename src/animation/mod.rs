//! Per-frame animation of scene objects.

pub mod oscillator;

use crate::{
    error::SceneError,
    gfx::scene::{ObjectId, Scene},
    layout::Axis,
};

pub use oscillator::{Direction, Oscillator};

/// Drives one translation component of one object with an oscillator.
#[derive(Debug, Clone)]
pub struct Animator {
    pub object: ObjectId,
    pub axis: Axis,
    pub oscillator: Oscillator,
}

impl Animator {
    pub fn new(object: ObjectId, axis: Axis, oscillator: Oscillator) -> Self {
        Self {
            object,
            axis,
            oscillator,
        }
    }

    /// Advances the oscillator and writes the value into the object.
    pub fn step(&mut self, scene: &mut Scene) -> Result<f32, SceneError> {
        let object = scene.object_mut(self.object)?;
        let value = self.oscillator.step();
        let mut translation = object.transform().translation;
        translation[self.axis.index()] = value;
        object.set_translation(translation);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::gfx::camera::CameraManager;
    use crate::gfx::geometry::generate_sphere;
    use crate::gfx::resources::Material;
    use crate::gfx::scene::Transform;

    #[test]
    fn test_animator_moves_only_its_axis() {
        let mut scene = Scene::new(CameraManager::from_config(&CameraConfig::default(), 1.5));
        scene
            .register_shape(
                "ball",
                &generate_sphere(3.0, 8, 6),
                Material::phong("ball", 0xad0000, 100.0),
            )
            .unwrap();
        let id = scene.instantiate("ball", &Transform::at(0.0, 3.0, 120.0)).unwrap();

        let oscillator = Oscillator::new(0.0, 0.5, -20.0, 20.0).unwrap();
        let mut animator = Animator::new(id, Axis::X, oscillator);
        animator.step(&mut scene).unwrap();
        animator.step(&mut scene).unwrap();

        let object = scene.object(id).unwrap();
        assert_eq!(object.transform().translation.x, 1.0);
        assert_eq!(object.transform().translation.y, 3.0);
        assert_eq!(object.transform().translation.z, 120.0);
        assert!(object.is_dirty());
    }

    #[test]
    fn test_missing_object_is_error() {
        let mut scene = Scene::new(CameraManager::from_config(&CameraConfig::default(), 1.5));
        let oscillator = Oscillator::new(0.0, 1.0, 0.0, 2.0).unwrap();
        let mut animator = Animator::new(ObjectId(0), Axis::Y, oscillator);
        assert_eq!(
            animator.step(&mut scene),
            Err(SceneError::UnknownObject(ObjectId(0)))
        );
    }
}
