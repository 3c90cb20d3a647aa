//! First-person free camera
//!
//! Orientation is two angles (pitch about x, yaw about y); there is no look
//! target. The view matrix is rebuilt by `update`, the projection is fixed
//! at construction.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{GpuMatrix, to_gpu_matrix};

/// Fixed perspective parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: CAMERA_FOV_Y,
            aspect: CAMERA_ASPECT,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl Projection {
    /// Left-handed perspective with a [0, 1] depth range
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect, self.near, self.far)
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    /// Pitch (radians)
    rot_x: f32,
    /// Yaw (radians)
    rot_y: f32,
    /// Movement speed (units per second)
    speed: f32,
    sensitivity: f32,
    view: Mat4,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Projection::default())
    }
}

impl Camera {
    /// Camera at the default overhead spot looking down at the table
    pub fn new(projection: Projection) -> Self {
        let mut camera = Self {
            position: CAMERA_START_POSITION,
            rot_x: CAMERA_START_PITCH,
            rot_y: CAMERA_START_YAW,
            speed: CAMERA_SPEED,
            sensitivity: CAMERA_SENSITIVITY,
            view: Mat4::IDENTITY,
            projection: projection.matrix(),
        };
        camera.update();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// (pitch, yaw) in radians
    pub fn angles(&self) -> (f32, f32) {
        (self.rot_x, self.rot_y)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Scale the mouse sensitivity relative to the default
    pub fn set_sensitivity_scale(&mut self, scale: f32) {
        self.sensitivity = CAMERA_SENSITIVITY * scale;
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn gpu_view_matrix(&self) -> GpuMatrix {
        to_gpu_matrix(self.view)
    }

    pub fn gpu_projection_matrix(&self) -> GpuMatrix {
        to_gpu_matrix(self.projection)
    }

    fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rot_y, self.rot_x, 0.0)
    }

    /// Unit look direction
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::Z
    }

    /// Move along a camera-local vector
    fn translate_local(&mut self, local: Vec3) {
        self.position += self.orientation() * local;
    }

    pub fn move_forward(&mut self, dt: f32) {
        self.move_forward_by(self.speed * dt);
    }

    pub fn move_back(&mut self, dt: f32) {
        self.move_forward_by(-self.speed * dt);
    }

    /// Move a fixed distance along the look direction (negative backs up)
    pub fn move_forward_by(&mut self, distance: f32) {
        self.translate_local(Vec3::new(0.0, 0.0, distance));
    }

    pub fn strafe_right(&mut self, dt: f32) {
        self.strafe_by(self.speed * dt);
    }

    pub fn strafe_left(&mut self, dt: f32) {
        self.strafe_by(-self.speed * dt);
    }

    /// Move a fixed distance along the camera's right axis
    pub fn strafe_by(&mut self, distance: f32) {
        self.translate_local(Vec3::new(distance, 0.0, 0.0));
    }

    /// Vertical moves follow world y regardless of pitch
    pub fn move_up(&mut self, dt: f32) {
        self.rise_by(self.speed * dt);
    }

    pub fn move_down(&mut self, dt: f32) {
        self.rise_by(-self.speed * dt);
    }

    pub fn rise_by(&mut self, distance: f32) {
        self.position.y += distance;
    }

    /// Accumulate a mouse delta into pitch (`dx`) and yaw (`dy`)
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.rot_x += dx * self.sensitivity;
        self.rot_y += dy * self.sensitivity;
    }

    /// Rebuild the view matrix from position and angles
    pub fn update(&mut self) {
        self.view = Mat4::look_to_lh(self.position, self.forward(), Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_update_is_deterministic() {
        let mut cam = Camera::default();
        cam.rotate(13.0, -7.0);
        cam.update();
        let first = cam.view_matrix().to_cols_array();
        cam.update();
        let second = cam.view_matrix().to_cols_array();
        assert_eq!(
            first.map(f32::to_bits),
            second.map(f32::to_bits),
        );

        let mut other = Camera::default();
        other.rotate(13.0, -7.0);
        other.update();
        assert_eq!(
            other.view_matrix().to_cols_array().map(f32::to_bits),
            first.map(f32::to_bits),
        );
    }

    #[test]
    fn test_view_maps_eye_to_origin() {
        let cam = Camera::default();
        let eye = cam.view_matrix().transform_point3(cam.position());
        assert!(approx(eye, Vec3::ZERO));
        // A point ahead of the camera lands on +z in view space
        let ahead = cam.view_matrix().transform_point3(cam.position() + cam.forward());
        assert!(approx(ahead, Vec3::Z), "got {ahead:?}");
    }

    #[test]
    fn test_default_looks_down_at_table() {
        let cam = Camera::default();
        let f = cam.forward();
        assert!(f.y < 0.0);
        assert!(f.z > 0.0);
    }

    #[test]
    fn test_rotate_uses_sensitivity() {
        let mut cam = Camera::default();
        let (pitch, yaw) = cam.angles();
        cam.rotate(100.0, -200.0);
        let (p2, y2) = cam.angles();
        assert!((p2 - pitch - 0.75).abs() < 1e-5);
        assert!((y2 - yaw + 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_move_forward_follows_look() {
        let mut cam = Camera::default();
        let start = cam.position();
        cam.move_forward(1.0);
        assert!(approx(cam.position() - start, cam.forward() * CAMERA_SPEED));
        cam.move_back(1.0);
        assert!(approx(cam.position(), start));
    }

    #[test]
    fn test_vertical_ignores_pitch() {
        let mut cam = Camera::default();
        let start = cam.position();
        cam.move_up(1.0);
        assert!(approx(cam.position() - start, Vec3::Y * CAMERA_SPEED));
    }

    #[test]
    fn test_strafe_is_horizontal_without_roll() {
        let mut cam = Camera::default();
        let start = cam.position();
        cam.strafe_right(1.0);
        let delta = cam.position() - start;
        assert!(delta.y.abs() < 1e-6);
        assert!(delta.x > 0.0);
    }

    #[test]
    fn test_projection_fixed() {
        let mut cam = Camera::default();
        let proj = cam.projection_matrix();
        cam.rotate(50.0, 50.0);
        cam.move_forward(2.0);
        cam.update();
        assert_eq!(cam.projection_matrix(), proj);
        assert_eq!(proj, Projection::default().matrix());
    }
}
