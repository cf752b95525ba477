use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::config::CameraConfig;
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Y-up camera orbiting a target point.
///
/// `yaw` is measured around +Y from the +Z axis, `pitch` is the elevation
/// above the ground plane. The eye is always derived from the angles, the
/// distance and the target.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    home: (Vector3<f32>, Vector3<f32>),
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    /// `pitch` is clamped to the default bounds so the eye never sits on the pole.
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let bounds = OrbitCameraBounds::default();
        let mut camera = Self {
            distance,
            pitch: pitch.clamp(bounds.min_pitch, bounds.max_pitch),
            yaw,
            eye: Vector3::zero(), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds,
            aspect,
            fovy: Deg(75.0).into(),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
            home: (Vector3::zero(), target),
        };
        camera.update();
        camera.home = (camera.eye, camera.target);
        camera
    }

    /// Places the camera at `eye` looking at `target`.
    pub fn from_eye_target(eye: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        let offset = eye - target;
        let distance = offset.magnitude().max(f32::EPSILON);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self::new(distance, pitch, yaw, target, aspect)
    }

    /// Builds the camera described by the viewer configuration.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let (ex, ey, ez) = config.position;
        let (tx, ty, tz) = config.target;
        let mut camera =
            Self::from_eye_target(Vector3::new(ex, ey, ez), Vector3::new(tx, ty, tz), aspect);
        camera.fovy = Deg(config.fov_y).into();
        camera.znear = config.near;
        camera.zfar = config.far;
        camera.bounds.min_distance = Some(config.min_distance);
        camera.bounds.max_distance = Some(config.max_distance);
        camera
    }

    /// Returns to the pose the camera was created with.
    pub fn reset_to_default(&mut self) {
        let (eye, target) = self.home;
        let offset = eye - target;
        self.target = target;
        self.distance = offset.magnitude().max(f32::EPSILON);
        let pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.yaw = offset.x.atan2(offset.z);
        self.update();
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    /// Zooms by an amount scaled with the current distance.
    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.0 + f32::EPSILON)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.clamp(min_yaw, f32::MAX);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.clamp(f32::MIN, max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Horizontal unit vector pointing to the right of the view.
    pub fn right(&self) -> Vector3<f32> {
        let forward = self.ground_forward();
        forward.cross(Vector3::unit_y())
    }

    /// View direction projected onto the ground plane.
    ///
    /// Looking straight down falls back to the yaw heading.
    pub fn ground_forward(&self) -> Vector3<f32> {
        let forward = self.target - self.eye;
        let flat = Vector3::new(forward.x, 0.0, forward.z);
        if flat.magnitude2() > f32::EPSILON {
            flat.normalize()
        } else {
            Vector3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
        }
    }

    /// Pans the camera in view space, scaled with the distance.
    ///
    /// `delta.0` moves along the view's right axis, `delta.1` along its up axis.
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let pan_scale = self.distance * 0.1;
        let movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        self.eye += movement;
        self.target += movement;
    }

    /// Slides eye and target along the ground by fixed world units.
    ///
    /// The view direction and distance stay unchanged.
    pub fn pan_ground(&mut self, right: f32, forward: f32) {
        let movement = self.right() * right + self.ground_forward() * forward;
        self.eye += movement;
        self.target += movement;
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        let view_proj = self.build_view_projection_matrix();
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(view_proj);
        self.uniform.inv_view_proj =
            convert_matrix4_to_array(view_proj.invert().unwrap_or_else(Matrix4::identity));
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: None,
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn street_camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default(), 1.5)
    }

    #[test]
    fn test_from_eye_target_reproduces_eye() {
        let camera = street_camera();
        assert_relative_eq!(camera.eye.x, -2.0, epsilon = 1e-3);
        assert_relative_eq!(camera.eye.y, 44.0, epsilon = 1e-3);
        assert_relative_eq!(camera.eye.z, -115.0, epsilon = 1e-3);
        assert_relative_eq!(camera.fovy.0, 75f32.to_radians(), epsilon = 1e-6);
    }

    #[test]
    fn test_ground_pan_keeps_view_direction() {
        let mut camera = street_camera();
        let before = camera.target - camera.eye;
        camera.pan_ground(3.0, -2.0);
        let after = camera.target - camera.eye;
        assert_relative_eq!(before.x, after.x, epsilon = 1e-4);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-4);
        assert_relative_eq!(before.z, after.z, epsilon = 1e-4);
        assert_relative_eq!(camera.target.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ground_axes_are_horizontal_and_orthogonal() {
        let camera = street_camera();
        let right = camera.right();
        let forward = camera.ground_forward();
        assert_relative_eq!(right.y, 0.0);
        assert_relative_eq!(forward.y, 0.0);
        assert_relative_eq!(right.dot(forward), 0.0, epsilon = 1e-6);
        // Looking towards +Z from the south, right is -X.
        assert!(forward.z > 0.9);
        assert!(right.x < -0.9);
    }

    #[test]
    fn test_zoom_respects_bounds() {
        let mut camera = street_camera();
        camera.set_distance(10_000.0);
        assert_eq!(camera.distance, 600.0);
        camera.set_distance(0.0);
        assert_eq!(camera.distance, 1.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = street_camera();
        camera.add_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_eye_straight_above_target_is_usable() {
        let mut camera =
            OrbitCamera::from_eye_target(Vector3::new(0.0, 100.0, 0.0), Vector3::zero(), 1.5);
        assert!(camera.pitch <= camera.bounds.max_pitch);
        let [x, y, z]: [f32; 3] = camera.eye.into();
        assert!(x.is_finite() && y.is_finite() && z.is_finite());
        // The view direction is no longer parallel to `up`.
        let view = (camera.target - camera.eye).normalize();
        assert!(view.cross(camera.up).magnitude() > 1e-3);

        camera.update_view_proj();
        let view_proj: Matrix4<f32> = camera.uniform.view_proj.into();
        assert!(view_proj[0][0].is_finite() && view_proj[3][3].is_finite());
    }

    #[test]
    fn test_reset_restores_home_pose() {
        let mut camera = street_camera();
        camera.add_yaw(1.0);
        camera.pan_ground(5.0, 5.0);
        camera.reset_to_default();
        assert_relative_eq!(camera.eye.x, -2.0, epsilon = 1e-3);
        assert_relative_eq!(camera.eye.z, -115.0, epsilon = 1e-3);
        assert_relative_eq!(camera.target.magnitude(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_inverse_view_proj_is_written() {
        let mut camera = street_camera();
        camera.update_view_proj();
        let view_proj: Matrix4<f32> = camera.uniform.view_proj.into();
        let inverse: Matrix4<f32> = camera.uniform.inv_view_proj.into();
        let identity = view_proj * inverse;
        assert_relative_eq!(identity[0][0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(identity[3][3], 1.0, epsilon = 1e-3);
    }
}
