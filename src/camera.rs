//! # Camera
//!
//! A free-flying camera driven by keyboard and mouse.
//!
//! The camera keeps only its position, its orientation as yaw/pitch angles, and the
//! world-space "up" direction. The `front`, `right` and `up` basis vectors are derived
//! from those on every call, so a view matrix can never be built from a stale basis
//! after `world_up` or the angles change.
//!
//! ## Conventions
//!
//! - Angles are stored in degrees.
//! - A yaw of -90° with zero pitch looks down the negative Z axis.
//! - The view matrix is right-handed, produced with `nalgebra_glm::look_at_rh`.

use nalgebra_glm::{Mat4, Vec3};

/// Initial camera position in world space.
pub const DEFAULT_POSITION: [f32; 3] = [-1.5, 2.0, 8.0];

/// Default yaw in degrees.
pub const DEFAULT_YAW: f32 = -90.0;

/// Default pitch in degrees.
pub const DEFAULT_PITCH: f32 = 0.0;

/// Movement speed in world units per second.
pub const DEFAULT_SPEED: f32 = 2.5;

/// Degrees of rotation per unit of mouse movement.
pub const DEFAULT_SENSITIVITY: f32 = 0.1;

/// Default vertical field of view in degrees.
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch limit in degrees, keeps the front vector away from `world_up`.
pub const PITCH_LIMIT: f32 = 89.0;

/// Narrowest field of view reachable by scrolling, in degrees.
pub const MIN_ZOOM: f32 = 1.0;

/// Widest field of view reachable by scrolling, in degrees.
pub const MAX_ZOOM: f32 = 45.0;

/// Direction of a keyboard-driven camera move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    /// Along `world_up`, independent of pitch.
    Up,
    /// Against `world_up`, independent of pitch.
    Down,
}

/// Fly camera with position, yaw/pitch orientation and a zoom (field of view).
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// The world's vertical axis. Used for up/down movement and to orthogonalize the basis.
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::from(DEFAULT_POSITION))
    }
}

impl Camera {
    /// Creates a camera at `position` with the default orientation and tuning.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            world_up: Vec3::y(),
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Unit vector the camera looks along.
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        nalgebra_glm::normalize(&nalgebra_glm::vec3(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        ))
    }

    /// Unit vector pointing to the camera's right, perpendicular to `world_up`.
    pub fn right(&self) -> Vec3 {
        nalgebra_glm::normalize(&nalgebra_glm::cross(&self.front(), &self.world_up))
    }

    /// Unit vector pointing out of the top of the camera.
    pub fn up(&self) -> Vec3 {
        nalgebra_glm::normalize(&nalgebra_glm::cross(&self.right(), &self.front()))
    }

    /// Builds the world-to-camera transform from the current state.
    pub fn view_matrix(&self) -> Mat4 {
        nalgebra_glm::look_at_rh(&self.position, &(self.position + self.front()), &self.up())
    }

    /// Moves the camera along one of its axes for `delta_time` seconds.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.speed * delta_time;
        let offset = match direction {
            CameraMovement::Forward => self.front(),
            CameraMovement::Backward => -self.front(),
            CameraMovement::Left => -self.right(),
            CameraMovement::Right => self.right(),
            CameraMovement::Up => self.world_up,
            CameraMovement::Down => -self.world_up,
        };
        self.position += offset * velocity;
    }

    /// Turns the camera by a mouse offset. Positive `y_offset` looks up.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.sensitivity;
        self.pitch = (self.pitch + y_offset * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Narrows (positive `y_offset`) or widens the field of view.
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPSILON, "{a} != {b}");
    }

    fn assert_orthonormal(camera: &Camera) {
        let (front, right, up) = (camera.front(), camera.right(), camera.up());
        for v in [&front, &right, &up] {
            assert_close(nalgebra_glm::length(v), 1.0);
        }
        assert_close(nalgebra_glm::dot(&front, &right), 0.0);
        assert_close(nalgebra_glm::dot(&front, &up), 0.0);
        assert_close(nalgebra_glm::dot(&right, &up), 0.0);
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        assert_eq!(camera.position, nalgebra_glm::vec3(-1.5, 2.0, 8.0));
        let front = camera.front();
        assert_close(front.x, 0.0);
        assert_close(front.y, 0.0);
        assert_close(front.z, -1.0);
        assert_close(camera.right().x, 1.0);
        assert_close(camera.up().y, 1.0);
    }

    #[test]
    fn forward_for_one_second_moves_speed_units() {
        let mut camera = Camera::default();
        let start = camera.position;
        let front = camera.front();
        camera.process_keyboard(CameraMovement::Forward, 1.0);
        let moved = camera.position - start;
        assert_close(nalgebra_glm::length(&moved), 2.5);
        assert_close(nalgebra_glm::dot(&moved, &front), 2.5);
    }

    #[test]
    fn vertical_movement_ignores_pitch() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(130.0, 400.0);
        let start = camera.position;
        camera.process_keyboard(CameraMovement::Up, 2.0);
        let moved = camera.position - start;
        assert_close(moved.x, 0.0);
        assert_close(moved.y, 5.0);
        assert_close(moved.z, 0.0);

        camera.process_keyboard(CameraMovement::Down, 2.0);
        assert_close(nalgebra_glm::distance(&camera.position, &start), 0.0);
    }

    #[test]
    fn opposite_moves_cancel() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(250.0, -120.0);
        let start = camera.position;
        camera.process_keyboard(CameraMovement::Left, 0.5);
        camera.process_keyboard(CameraMovement::Right, 0.5);
        camera.process_keyboard(CameraMovement::Forward, 0.5);
        camera.process_keyboard(CameraMovement::Backward, 0.5);
        assert_close(nalgebra_glm::distance(&camera.position, &start), 0.0);
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut camera = Camera::default();
        let offsets = [
            (0.0, 5000.0),
            (12.0, -3.0),
            (-40.0, -9000.0),
            (7.5, 880.0),
            (0.0, 1.0),
            (-300.0, -1.0),
        ];
        for (x, y) in offsets {
            camera.process_mouse_movement(x, y);
            camera.process_mouse_scroll(y / 100.0);
            assert!(camera.pitch >= -PITCH_LIMIT && camera.pitch <= PITCH_LIMIT);
        }
        camera.process_mouse_movement(0.0, 10_000.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.process_mouse_movement(0.0, -10_000.0);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut camera = Camera::default();
        assert_orthonormal(&camera);
        for step in 0..50 {
            let x = (step as f32 * 37.0) % 211.0 - 100.0;
            let y = (step as f32 * 53.0) % 173.0 - 80.0;
            camera.process_mouse_movement(x, y);
            camera.process_keyboard(CameraMovement::Forward, 0.016);
            assert_orthonormal(&camera);
        }
        camera.process_mouse_movement(0.0, 10_000.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn basis_follows_world_up() {
        let mut camera = Camera::default();
        let right = camera.right();
        camera.world_up = -Vec3::y();
        assert_close(nalgebra_glm::dot(&camera.right(), &right), -1.0);
        assert_close(camera.up().y, -1.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn view_matrix_inverts_to_identity() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(63.0, -27.0);
        camera.process_keyboard(CameraMovement::Right, 0.7);
        let view = camera.view_matrix();
        let product = view * nalgebra_glm::inverse(&view);
        let identity = Mat4::identity();
        for (a, b) in product.iter().zip(identity.iter()) {
            assert!((a - b).abs() < 1e-4, "{product:?}");
        }
    }

    #[test]
    fn view_matrix_moves_camera_to_origin() {
        let camera = Camera::default();
        let eye = camera.view_matrix() * nalgebra_glm::vec4(-1.5, 2.0, 8.0, 1.0);
        assert_close(eye.x, 0.0);
        assert_close(eye.y, 0.0);
        assert_close(eye.z, 0.0);
    }

    #[test]
    fn zoom_clamped_between_limits() {
        let mut camera = Camera::default();
        camera.process_mouse_scroll(-10.0);
        assert_eq!(camera.zoom, MAX_ZOOM);
        camera.process_mouse_scroll(20.0);
        assert_eq!(camera.zoom, 25.0);
        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom, MIN_ZOOM);
    }
}
