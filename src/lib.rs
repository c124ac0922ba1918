//! # Desk Scene Viewer Library
//!
//! This library renders a small, fixed 3D desk scene with `wgpu` and lets the user fly a
//! first-person camera through it. The scene holds a pyramid-topped container, a
//! tabletop, a lamp block, a sphere and a book, lit by a single point light with the
//! Phong model and textured from image files on disk.
//!
//! ## Modules
//!
//! - [`app`]: The `winit` application handler that owns the window, event loop
//!   integration and lifecycle.
//! - [`config`]: Command-line arguments and startup settings.
//! - [`error`]: The error type for everything that can fail during setup.
//! - [`lifecycle`]: The `Init -> Running -> ShuttingDown -> Terminated` state machine.
//! - [`camera`]: The fly camera (position, yaw, pitch, zoom) and its view matrix.
//! - [`view_state`]: Projection mode toggle, projection matrix and texture-coordinate scale.
//! - [`input`]: Key bindings and per-frame input collection.
//! - [`state`]: Applies collected input to the camera and view state.
//! - [`frame_clock`]: Frame delta time.
//! - [`gpu`]: Device, queue and surface management.
//! - [`renderer`]: Per-frame rendering of the scene and the HUD.
//! - [`scene`]: The scene object table, placements and draw order.
//! - [`mesh`]: GPU vertex and index buffers, and the procedural sphere.
//! - [`vertex`]: The vertex layout and the static meshes.
//! - [`shader`]: Phong and lamp shader programs.
//! - [`texture`]: Image decoding and texture upload.
//! - [`uniform_buffer`]: The per-object uniform block.
//! - [`uniform_binding`]: GPU buffer and bind group for the uniform block.
//!
//! ## Controls
//!
//! | Input          | Effect                                      |
//! |----------------|---------------------------------------------|
//! | `W` `S`        | Move forward / backward                     |
//! | `A` `D`        | Strafe left / right                         |
//! | `Q` `E`        | Move up / down along the world up axis      |
//! | Mouse          | Look around                                 |
//! | Wheel          | Zoom (field of view 1 to 45 degrees)        |
//! | `P`            | Toggle perspective / orthographic           |
//! | `]` `[`        | Increase / decrease texture repetition      |
//! | `Escape`       | Quit                                        |
//!
//! ## Example
//!
//! ```rust,no_run
//! use desk_scene::{App, ViewerConfig};
//! use winit::event_loop::EventLoop;
//!
//! let event_loop = EventLoop::new().unwrap();
//! let mut app = App::new(ViewerConfig::default());
//! event_loop.run_app(&mut app).unwrap();
//! if let Some(error) = app.take_error() {
//!     eprintln!("{error}");
//! }
//! ```
//!
//! ## Dependencies
//!
//! - `wgpu`: rendering pipelines and GPU resource management.
//! - `winit`: window and event management.
//! - `egui`, `egui-wgpu` and `egui-winit`: the HUD overlay.
//! - `nalgebra-glm`: matrix and vector math.
//! - `image`: texture decoding.
//! - `clap`: command-line parsing.
//! - `thiserror`: error types.
//! - `log` and `env_logger`: logging.

pub mod app;
pub mod camera;
pub mod config;
pub mod error;
pub mod frame_clock;
pub mod gpu;
pub mod input;
pub mod lifecycle;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod state;
pub mod texture;
pub mod uniform_binding;
pub mod uniform_buffer;
pub mod vertex;
pub mod view_state;

pub use crate::app::App;
pub use crate::camera::{Camera, CameraMovement};
pub use crate::config::{Args, ViewerConfig};
pub use crate::error::ViewerError;
pub use crate::gpu::Gpu;
pub use crate::lifecycle::{Lifecycle, Phase};
pub use crate::renderer::Renderer;
pub use crate::scene::Scene;
pub use crate::state::ViewerState;
pub use crate::uniform_binding::UniformBinding;
pub use crate::uniform_buffer::UniformBuffer;
pub use crate::vertex::Vertex;
pub use crate::view_state::ViewState;
