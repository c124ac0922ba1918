//! # Application
//!
//! [`App`] is the `winit` [`ApplicationHandler`] that ties the viewer together. It
//! creates the window, GUI state and [`Renderer`] when the event loop resumes. It
//! forwards window events to the [`InputState`](crate::input::InputState), and once per
//! redraw it advances the camera and renders the scene with the HUD on top.
//!
//! ## Lifecycle
//!
//! The [`Lifecycle`] tracks where the application is:
//!
//! - a failed setup (window, device, shader or texture) is stored, the lifecycle moves
//!   to `Terminated`, and the loop exits. [`App::take_error`] hands the error back to
//!   `main`;
//! - closing the window or pressing `Escape` moves to `ShuttingDown`, GPU resources are
//!   released, and the lifecycle ends in `Terminated`.
//!
//! ## Cursor
//!
//! The cursor is hidden and grabbed. Camera look is driven by raw device motion
//! ([`DeviceEvent::MouseMotion`]), which is unbounded and keeps arriving while the cursor
//! is locked. Platforms that cannot lock the cursor fall back to confining it. If neither
//! works the viewer keeps running with a free cursor.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Theme, Window, WindowId},
};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::frame_clock::FrameClock;
use crate::lifecycle::{Lifecycle, Phase};
use crate::renderer::Renderer;
use crate::state::ViewerState;

/// Text shown in the HUD window, one entry per line.
pub fn hud_lines(state: &ViewerState, frames_per_second: f32) -> Vec<String> {
    let camera = &state.camera;
    vec![
        format!("Projection: {}", state.view.projection_name()),
        format!(
            "UV scale: ({:.1}, {:.1})",
            state.view.uv_scale.x, state.view.uv_scale.y
        ),
        format!(
            "Camera: ({:.2}, {:.2}, {:.2})",
            camera.position.x, camera.position.y, camera.position.z
        ),
        format!("Zoom: {:.1}", camera.zoom),
        format!("FPS: {frames_per_second:.0}"),
    ]
}

const CONTROLS_HINT: &str = "WASD/QE move, mouse look, wheel zoom, P projection, [ ] UV scale, Esc quit";

pub struct App {
    config: ViewerConfig,
    lifecycle: Lifecycle,
    state: ViewerState,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    gui_state: Option<egui_winit::State>,
    error: Option<ViewerError>,
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::default(),
            state: ViewerState::default(),
            clock: FrameClock::default(),
            window: None,
            renderer: None,
            gui_state: None,
            error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// The setup error that ended the event loop, if any.
    pub fn take_error(&mut self) -> Option<ViewerError> {
        self.error.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(event_loop.create_window(attributes)?);
        grab_cursor(&window);

        let gui_context = egui::Context::default();
        let viewport_id = gui_context.viewport_id();
        let gui_state = egui_winit::State::new(
            gui_context,
            viewport_id,
            &window,
            Some(window.scale_factor() as _),
            Some(Theme::Dark),
            None,
        );

        let PhysicalSize { width, height } = window.inner_size();
        log::info!("Window created ({width} x {height})");

        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            width,
            height,
            &self.config.asset_dir,
        ))?;

        self.window = Some(window);
        self.gui_state = Some(gui_state);
        self.renderer = Some(renderer);
        self.clock = FrameClock::new();
        Ok(())
    }

    /// Advances the camera and draws one frame. Returns `false` when the frame's input
    /// asked to quit.
    fn redraw(&mut self, window: &Window) -> bool {
        let delta_time = self.clock.tick();
        let outcome = self.state.update(delta_time.as_secs_f32());
        if outcome.quit_requested {
            return false;
        }

        let (Some(gui_state), Some(renderer)) = (self.gui_state.as_mut(), self.renderer.as_mut())
        else {
            return true;
        };

        let gui_input = gui_state.take_egui_input(window);
        gui_state.egui_ctx().begin_pass(gui_input);

        egui::Window::new(self.config.title.as_str())
            .resizable(false)
            .collapsible(false)
            .interactable(false)
            .show(gui_state.egui_ctx(), |ui| {
                for line in hud_lines(&self.state, self.clock.frames_per_second()) {
                    ui.label(line);
                }
                ui.separator();
                ui.small(CONTROLS_HINT);
            });

        let egui::FullOutput {
            textures_delta,
            shapes,
            pixels_per_point,
            platform_output,
            ..
        } = gui_state.egui_ctx().end_pass();

        gui_state.handle_platform_output(window, platform_output);

        let paint_jobs = gui_state.egui_ctx().tessellate(shapes, pixels_per_point);

        let (width, height) = renderer.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: window.scale_factor() as f32,
        };

        renderer.render_frame(screen_descriptor, paint_jobs, textures_delta, &self.state);
        true
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.quit_requested() {
            log::info!("Shutting down");
            self.release_resources();
        }
        event_loop.exit();
    }

    fn release_resources(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.release();
        }
        self.gui_state = None;
        self.lifecycle.resources_released();
    }
}

fn grab_cursor(window: &Window) {
    window.set_cursor_visible(false);
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(error) = grabbed {
        log::warn!("Could not grab the cursor: {error}");
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.phase() != Phase::Init {
            return;
        }

        match self.initialize(event_loop) {
            Ok(()) => {
                self.lifecycle.initialized();
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
            Err(error) => {
                log::error!("Initialization failed: {error}");
                self.error = Some(error);
                self.lifecycle.initialization_failed();
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.lifecycle.is_running() {
            return;
        }
        let Some(window) = self.window.clone() else {
            return;
        };

        if let Some(gui_state) = self.gui_state.as_mut() {
            if gui_state.on_window_event(&window, &event).consumed {
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => self.state.input.on_key(key_code, state, repeat),

            WindowEvent::MouseWheel { delta, .. } => self.state.input.on_scroll(delta),

            WindowEvent::MouseInput { state, button, .. } => {
                self.state.input.on_mouse_button(button, state)
            }

            WindowEvent::Focused(false) => self.state.input.release_all(),

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                log::info!("Resizing renderer surface to: ({width}, {height})");
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(width, height);
                }
            }

            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting...");
                self.shutdown(event_loop);
                return;
            }

            WindowEvent::RedrawRequested => {
                if !self.redraw(&window) {
                    log::info!("Quit requested. Exiting...");
                    self.shutdown(event_loop);
                    return;
                }
            }

            _ => (),
        }

        window.request_redraw();
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.lifecycle.is_running() {
                self.state.input.on_mouse_motion(dx, dy);
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.lifecycle.is_running() && self.lifecycle.quit_requested() {
            self.release_resources();
        }
        log::debug!("Event loop exiting in phase {:?}", self.lifecycle.phase());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_reports_view_and_camera() {
        let mut state = ViewerState::default();
        state.view.toggle_projection();
        state.view.increase_uv_scale();

        let lines = hud_lines(&state, 59.6);
        assert_eq!(lines[0], "Projection: Orthographic");
        assert_eq!(lines[1], "UV scale: (1.1, 1.1)");
        assert_eq!(lines[2], "Camera: (-1.50, 2.00, 8.00)");
        assert_eq!(lines[3], "Zoom: 45.0");
        assert_eq!(lines[4], "FPS: 60");
    }

    #[test]
    fn new_app_waits_for_resume() {
        let mut app = App::new(ViewerConfig::default());
        assert_eq!(app.phase(), Phase::Init);
        assert!(app.take_error().is_none());
    }
}
