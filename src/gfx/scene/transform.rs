use cgmath::{Matrix3, Matrix4, Rad, SquareMatrix, Vector3, Zero};

/// Translation, Euler rotation and scale of one scene object.
///
/// Rotation angles are radians applied in X, Y, Z order, so the composed
/// matrix is `T * Rx * Ry * Rz * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vector3::new(x, y, z),
            ..Default::default()
        }
    }

    pub fn with_rotation_y(mut self, radians: f32) -> Self {
        self.rotation.y = radians;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    pub fn with_scale_xyz(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    /// Same rotation and scale, moved to `translation`.
    pub fn moved_to(mut self, translation: Vector3<f32>) -> Self {
        self.translation = translation;
        self
    }

    pub fn rotation_matrix(&self) -> Matrix3<f32> {
        Matrix3::from_angle_x(Rad(self.rotation.x))
            * Matrix3::from_angle_y(Rad(self.rotation.y))
            * Matrix3::from_angle_z(Rad(self.rotation.z))
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from(self.rotation_matrix())
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Inverse-transpose of the model matrix, for transforming normals.
    pub fn normal_matrix(&self) -> Matrix4<f32> {
        use cgmath::Matrix;

        let inverse_scale = Matrix4::from_nonuniform_scale(
            safe_recip(self.scale.x),
            safe_recip(self.scale.y),
            safe_recip(self.scale.z),
        );
        let inverse = inverse_scale * Matrix4::from(self.rotation_matrix()).transpose();
        let normal = inverse.transpose();
        if normal.is_finite() {
            normal
        } else {
            Matrix4::identity()
        }
    }
}

fn safe_recip(value: f32) -> f32 {
    if value.abs() > f32::EPSILON {
        1.0 / value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{InnerSpace, Vector4};

    #[test]
    fn test_identity_by_default() {
        assert_eq!(Transform::default().matrix(), Matrix4::identity());
    }

    #[test]
    fn test_matrix_scales_then_translates() {
        let transform = Transform::at(10.0, 0.0, 5.0).with_scale(2.0);
        let p = transform.matrix() * Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert_relative_eq!(p.x, 12.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 7.0);
    }

    #[test]
    fn test_rotation_about_y() {
        let transform = Transform::default().with_rotation_y(std::f32::consts::FRAC_PI_2);
        let p = transform.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_undoes_nonuniform_scale() {
        // A squashed object keeps its up-facing normals pointing up.
        let transform = Transform::default().with_scale_xyz(0.1, 0.3, 0.1);
        let n = transform.normal_matrix() * Vector4::new(0.0, 1.0, 0.0, 0.0);
        let n = n.truncate().normalize();
        assert_relative_eq!(n.y, 1.0, epsilon = 1e-6);
    }
}
