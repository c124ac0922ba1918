//! # Viewer State
//!
//! [`ViewerState`] bundles the mutable state shared between input handling and
//! rendering: the camera, the view toggles, and the input gathered since the last frame.
//! The application owns exactly one and passes it by reference, so every mutation happens
//! on the event-loop thread between polling input and drawing.

use crate::camera::Camera;
use crate::input::{Action, FrameInput, InputState};
use crate::view_state::ViewState;

/// What the frame's input asked the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    pub quit_requested: bool,
}

#[derive(Debug, Default)]
pub struct ViewerState {
    pub camera: Camera,
    pub view: ViewState,
    pub input: InputState,
}

impl ViewerState {
    /// Drains pending input and applies it for a frame lasting `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32) -> InputOutcome {
        let frame = self.input.take_frame();
        self.apply(&frame, delta_time)
    }

    /// Applies one frame's worth of input to the camera and view state.
    pub fn apply(&mut self, frame: &FrameInput, delta_time: f32) -> InputOutcome {
        let mut outcome = InputOutcome::default();

        for action in &frame.actions {
            match action {
                Action::Quit => outcome.quit_requested = true,
                Action::ToggleProjection => {
                    self.view.toggle_projection();
                    log::info!("Projection: {}", self.view.projection_name());
                }
                Action::IncreaseUvScale => {
                    self.view.increase_uv_scale();
                    log_uv_scale(&self.view);
                }
                Action::DecreaseUvScale => {
                    self.view.decrease_uv_scale();
                    log_uv_scale(&self.view);
                }
                Action::Move(direction) => self.camera.process_keyboard(*direction, delta_time),
            }
        }

        for direction in &frame.movements {
            self.camera.process_keyboard(*direction, delta_time);
        }

        for (x_offset, y_offset) in &frame.mouse_offsets {
            self.camera.process_mouse_movement(*x_offset, *y_offset);
        }

        if frame.scroll != 0.0 {
            self.camera.process_mouse_scroll(frame.scroll);
        }

        outcome
    }
}

fn log_uv_scale(view: &ViewState) {
    log::info!("UV scale ({:.1}, {:.1})", view.uv_scale.x, view.uv_scale.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraMovement;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    #[test]
    fn holding_forward_for_one_second() {
        let mut state = ViewerState::default();
        let start = state.camera.position;
        let front = state.camera.front();
        state.input.on_key(KeyCode::KeyW, ElementState::Pressed, false);
        let outcome = state.update(1.0);
        assert!(!outcome.quit_requested);
        let expected = start + front * 2.5;
        assert!(nalgebra_glm::distance(&state.camera.position, &expected) < 1e-5);
    }

    #[test]
    fn first_mouse_report_leaves_orientation_alone() {
        let mut state = ViewerState::default();
        let (yaw, pitch) = (state.camera.yaw, state.camera.pitch);

        state.input.on_mouse_motion(640.0, 360.0);
        state.update(0.016);
        assert_eq!((state.camera.yaw, state.camera.pitch), (yaw, pitch));

        state.input.on_mouse_motion(20.0, -10.0);
        state.update(0.016);
        assert!((state.camera.yaw - (yaw + 20.0 * 0.1)).abs() < 1e-5);
        assert!((state.camera.pitch - (pitch + 10.0 * 0.1)).abs() < 1e-5);
    }

    #[test]
    fn sustained_rightward_motion_keeps_turning() {
        let mut state = ViewerState::default();
        let start_yaw = state.camera.yaw;
        state.input.on_mouse_motion(1.0, 0.0);
        state.update(0.016);

        let mut last_yaw = state.camera.yaw;
        for _ in 0..100 {
            state.input.on_mouse_motion(400.0, 0.0);
            state.update(0.016);
            assert!(state.camera.yaw > last_yaw);
            last_yaw = state.camera.yaw;
        }
        // 100 * 400 px * 0.1 deg/px: the camera has turned all the way round, many times.
        assert!((state.camera.yaw - (start_yaw + 4000.0)).abs() < 1e-2);
        assert!(state.camera.front().norm() > 0.999);
    }

    #[test]
    fn uv_keys_step_scale() {
        let mut state = ViewerState::default();
        state.input.on_key(KeyCode::BracketRight, ElementState::Pressed, false);
        state.update(0.016);
        assert!((state.view.uv_scale.x - 1.1).abs() < 1e-6);
        assert!((state.view.uv_scale.y - 1.1).abs() < 1e-6);

        state.input.on_key(KeyCode::BracketRight, ElementState::Released, false);
        state.input.on_key(KeyCode::BracketLeft, ElementState::Pressed, false);
        state.update(0.016);
        assert!((state.view.uv_scale.x - 1.0).abs() < 1e-6);
        assert!((state.view.uv_scale.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn projection_toggle_and_quit() {
        let mut state = ViewerState::default();
        state.input.on_key(KeyCode::KeyP, ElementState::Pressed, false);
        assert!(!state.update(0.016).quit_requested);
        assert!(state.view.orthographic);

        state.input.on_key(KeyCode::KeyP, ElementState::Released, false);
        state.input.on_key(KeyCode::KeyP, ElementState::Pressed, false);
        state.input.on_key(KeyCode::Escape, ElementState::Pressed, false);
        assert!(state.update(0.016).quit_requested);
        assert!(!state.view.orthographic);
    }

    #[test]
    fn scroll_changes_zoom() {
        let mut state = ViewerState::default();
        let frame = FrameInput {
            scroll: 5.0,
            movements: vec![CameraMovement::Down],
            ..FrameInput::default()
        };
        state.apply(&frame, 0.0);
        assert_eq!(state.camera.zoom, 40.0);
        assert_eq!(state.camera.position, Camera::default().position);
    }
}
