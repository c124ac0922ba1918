//! # Input
//!
//! Collects winit window events between frames and hands them to the viewer state as a
//! single [`FrameInput`] snapshot once per frame.
//!
//! Movement keys act for as long as they are held. Toggles (projection, UV scale) and
//! quit act once per key press; OS auto-repeat is ignored for them.
//!
//! | Key    | Action                          |
//! |--------|---------------------------------|
//! | W / S  | forward / backward              |
//! | A / D  | left / right                    |
//! | Q / E  | up / down along the world axis  |
//! | P      | toggle orthographic projection  |
//! | ] / [  | increase / decrease UV scale    |
//! | Escape | quit                            |

use std::collections::HashSet;

use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use crate::camera::CameraMovement;

/// Pixels of a high-resolution wheel delta that count as one line of scrolling.
pub const PIXELS_PER_SCROLL_LINE: f32 = 20.0;

/// What a key does when it is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(CameraMovement),
    ToggleProjection,
    IncreaseUvScale,
    DecreaseUvScale,
    Quit,
}

/// Maps a physical key to its viewer action.
pub fn action_for_key(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::KeyW => Action::Move(CameraMovement::Forward),
        KeyCode::KeyS => Action::Move(CameraMovement::Backward),
        KeyCode::KeyA => Action::Move(CameraMovement::Left),
        KeyCode::KeyD => Action::Move(CameraMovement::Right),
        KeyCode::KeyQ => Action::Move(CameraMovement::Up),
        KeyCode::KeyE => Action::Move(CameraMovement::Down),
        KeyCode::KeyP => Action::ToggleProjection,
        KeyCode::BracketRight => Action::IncreaseUvScale,
        KeyCode::BracketLeft => Action::DecreaseUvScale,
        KeyCode::Escape => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Converts raw mouse motion into look offsets.
///
/// Motion comes from the device, not the cursor, so it keeps arriving while the cursor
/// is grabbed and never stops at the window edge. The first delta after creation only
/// seeds the tracker: platforms often report one large jump when the cursor is grabbed.
#[derive(Debug, Default, Clone, Copy)]
pub struct MouseTracker {
    seeded: bool,
}

impl MouseTracker {
    /// Returns the `(x, y)` look offset for a motion delta, with `y` growing upwards.
    pub fn on_motion(&mut self, dx: f32, dy: f32) -> Option<(f32, f32)> {
        if !std::mem::replace(&mut self.seeded, true) {
            return None;
        }
        Some((dx, -dy))
    }
}

/// Everything the user did since the previous frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameInput {
    /// Movement directions held down during this frame.
    pub movements: Vec<CameraMovement>,
    /// Press-triggered actions in the order they happened.
    pub actions: Vec<Action>,
    /// Look offsets in the order they were reported.
    pub mouse_offsets: Vec<(f32, f32)>,
    /// Accumulated wheel movement in lines.
    pub scroll: f32,
}

/// Accumulates window events between frames.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<CameraMovement>,
    pending_actions: Vec<Action>,
    mouse: MouseTracker,
    mouse_offsets: Vec<(f32, f32)>,
    scroll: f32,
}

impl InputState {
    pub fn on_key(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        let Some(action) = action_for_key(key) else {
            return;
        };
        match (action, state) {
            (Action::Move(direction), ElementState::Pressed) => {
                self.held.insert(direction);
            }
            (Action::Move(direction), ElementState::Released) => {
                self.held.remove(&direction);
            }
            (action, ElementState::Pressed) if !repeat => self.pending_actions.push(action),
            _ => {}
        }
    }

    pub fn on_mouse_motion(&mut self, dx: f64, dy: f64) {
        if let Some(offset) = self.mouse.on_motion(dx as f32, dy as f32) {
            self.mouse_offsets.push(offset);
        }
    }

    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_SCROLL_LINE,
        };
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let verb = match state {
            ElementState::Pressed => "pressed",
            ElementState::Released => "released",
        };
        log::debug!("{button:?} mouse button {verb}");
    }

    /// Forgets held keys, e.g. when the window loses focus and release events will not
    /// be delivered.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Drains the events gathered since the last call. Held movement keys stay held.
    pub fn take_frame(&mut self) -> FrameInput {
        let mut movements: Vec<CameraMovement> = self.held.iter().copied().collect();
        movements.sort_by_key(|direction| *direction as u8);
        FrameInput {
            movements,
            actions: std::mem::take(&mut self.pending_actions),
            mouse_offsets: std::mem::take(&mut self.mouse_offsets),
            scroll: std::mem::take(&mut self.scroll),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(
            action_for_key(KeyCode::KeyW),
            Some(Action::Move(CameraMovement::Forward))
        );
        assert_eq!(
            action_for_key(KeyCode::KeyE),
            Some(Action::Move(CameraMovement::Down))
        );
        assert_eq!(action_for_key(KeyCode::KeyP), Some(Action::ToggleProjection));
        assert_eq!(action_for_key(KeyCode::BracketRight), Some(Action::IncreaseUvScale));
        assert_eq!(action_for_key(KeyCode::BracketLeft), Some(Action::DecreaseUvScale));
        assert_eq!(action_for_key(KeyCode::Escape), Some(Action::Quit));
        assert_eq!(action_for_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn first_motion_only_seeds() {
        let mut tracker = MouseTracker::default();
        assert_eq!(tracker.on_motion(250.0, -80.0), None);
        assert_eq!(tracker.on_motion(10.0, -5.0), Some((10.0, 5.0)));
        assert_eq!(tracker.on_motion(0.0, 10.0), Some((0.0, -10.0)));
    }

    #[test]
    fn held_movement_persists_across_frames() {
        let mut input = InputState::default();
        input.on_key(KeyCode::KeyW, ElementState::Pressed, false);
        input.on_key(KeyCode::KeyQ, ElementState::Pressed, false);
        let frame = input.take_frame();
        assert_eq!(
            frame.movements,
            vec![CameraMovement::Forward, CameraMovement::Up]
        );
        assert!(frame.actions.is_empty());

        let frame = input.take_frame();
        assert_eq!(frame.movements.len(), 2);

        input.on_key(KeyCode::KeyW, ElementState::Released, false);
        assert_eq!(input.take_frame().movements, vec![CameraMovement::Up]);

        input.release_all();
        assert!(input.take_frame().movements.is_empty());
    }

    #[test]
    fn toggles_fire_once_per_press() {
        let mut input = InputState::default();
        input.on_key(KeyCode::KeyP, ElementState::Pressed, false);
        input.on_key(KeyCode::KeyP, ElementState::Pressed, true);
        input.on_key(KeyCode::KeyP, ElementState::Released, false);
        input.on_key(KeyCode::BracketRight, ElementState::Pressed, false);
        let frame = input.take_frame();
        assert_eq!(
            frame.actions,
            vec![Action::ToggleProjection, Action::IncreaseUvScale]
        );
        assert!(input.take_frame().actions.is_empty());
    }

    #[test]
    fn mouse_and_scroll_drain_each_frame() {
        let mut input = InputState::default();
        input.on_mouse_motion(100.0, 100.0);
        input.on_mouse_motion(3.0, -2.0);
        input.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        input.on_scroll(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(0.0, 10.0),
        ));
        let frame = input.take_frame();
        assert_eq!(frame.mouse_offsets, vec![(3.0, 2.0)]);
        assert!((frame.scroll - 2.5).abs() < 1e-6);

        let frame = input.take_frame();
        assert!(frame.mouse_offsets.is_empty());
        assert_eq!(frame.scroll, 0.0);
    }
}
