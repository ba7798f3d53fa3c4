use crate::math;
use crate::math_prelude::*;

/// First person camera. Input handling lives outside the core and only
/// mutates the pose; the pipeline reads it once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub direction: Vec3,
    pub forward_velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::Z,
            forward_velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl Camera {
    // 85 deg
    pub const MIN_PITCH: f32 = -1.483_529_8;
    pub const MAX_PITCH: f32 = 1.483_529_8;

    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            yaw,
            pitch: pitch.clamp(Self::MIN_PITCH, Self::MAX_PITCH),
            ..Default::default()
        };
        camera.direction = camera.facing();
        camera
    }

    /// Unit vector the camera looks along: `+z` pitched about x, then yawed
    /// about y.
    pub fn facing(&self) -> Vec3 {
        let rotation = Mat4::from_rotation_y(self.yaw) * Mat4::from_rotation_x(self.pitch);
        math::normalize_or_zero(rotation.transform_vector3(Vec3::Z))
    }

    pub fn look_at_target(&self) -> Vec3 {
        self.position + self.facing()
    }

    pub fn view_matrix(&self) -> Mat4 {
        math::look_at(self.position, self.look_at_target(), Vec3::Y)
    }

    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(Self::MIN_PITCH, Self::MAX_PITCH);
        self.direction = self.facing();
    }

    pub fn set_forward_speed(&mut self, speed: f32) {
        self.direction = self.facing();
        self.forward_velocity = self.direction * speed;
    }

    /// Moves the camera by its forward velocity over `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.forward_velocity * dt;
    }

    /// Moves sideways, positive `distance` goes right.
    pub fn strafe(&mut self, distance: f32) {
        let right = math::normalize_or_zero(Vec3::Y.cross(self.facing()));
        self.position += right * distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn default_camera_has_identity_view() {
        let camera = Camera::default();
        assert_eq!(camera.look_at_target(), Vec3::Z);
        assert!(camera.view_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn yaw_turns_towards_positive_x() {
        let camera = Camera::new(Vec3::ZERO, FRAC_PI_2, 0.0);
        assert!(camera.facing().abs_diff_eq(Vec3::X, 1e-6));
        assert!(camera.direction.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 10.0);
        assert_eq!(camera.pitch, Camera::MAX_PITCH);
        camera.rotate(0.0, -20.0);
        assert_eq!(camera.pitch, Camera::MIN_PITCH);
    }

    #[test]
    fn target_is_offset_by_position() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 0.0, 0.0);
        assert!(camera
            .look_at_target()
            .abs_diff_eq(Vec3::new(1.0, 2.0, 4.0), 1e-6));
    }

    #[test]
    fn advance_and_strafe_move_the_camera() {
        let mut camera = Camera::default();
        camera.set_forward_speed(2.0);
        camera.advance(0.5);
        assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-6));
        camera.strafe(3.0);
        assert!(camera.position.abs_diff_eq(Vec3::new(3.0, 0.0, 1.0), 1e-6));
    }

    #[test]
    fn view_matrix_puts_target_in_front() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.0, -4.0), 0.3, -0.2);
        camera.rotate(0.1, 0.05);
        let target = camera.view_matrix() * camera.look_at_target().extend(1.0);
        assert!(target.abs_diff_eq(Vec4::new(0.0, 0.0, 1.0, 1.0), 1e-5));
    }
}
