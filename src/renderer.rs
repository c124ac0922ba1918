//! # `renderer.rs` - Renderer Module
//!
//! The `renderer.rs` module contains the [`Renderer`], which draws the desk scene and the
//! `egui` overlay into the window every frame.
//!
//! ## Key Features
//!
//! - **GPU Management**: The `Renderer` owns the [`Gpu`] wrapper (device, queue and
//!   surface) and keeps the surface configuration in sync with the window size.
//!
//! - **Depth Buffering**: A `Depth32Float` depth texture is recreated on every resize so
//!   nearer objects correctly occlude farther ones.
//!
//! - **Camera-driven Frames**: Each frame the view and projection matrices are derived
//!   from the [`ViewerState`] (camera pose, zoom, projection mode and UV scale) and
//!   written into every scene object's uniform buffer before the render pass starts.
//!
//! - **GUI Rendering**: An `egui_wgpu::Renderer` draws the HUD on top of the scene in the
//!   same render pass.
//!
//! ## Frame Flow
//!
//! 1. Build [`FrameUniforms`] from the viewer state and the current surface size.
//! 2. Upload them through [`Scene::update`].
//! 3. Upload `egui` textures and buffers.
//! 4. Acquire the surface texture. If the surface was lost or outdated it is
//!    reconfigured and the frame is skipped.
//! 5. Clear to black, draw the scene, draw the GUI, submit and present.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut renderer = Renderer::new(window, 800, 600, Path::new("resources")).await?;
//!
//! renderer.resize(1024, 768);
//! renderer.render_frame(screen_descriptor, paint_jobs, textures_delta, &viewer_state);
//!
//! renderer.release();
//! ```

use std::path::Path;

use crate::error::ViewerError;
use crate::gpu::Gpu;
use crate::scene::Scene;
use crate::state::ViewerState;
use crate::uniform_buffer::FrameUniforms;

/// Builds the per-frame uniform values for a surface of `width` x `height` pixels.
pub fn frame_uniforms(state: &ViewerState, width: u32, height: u32) -> FrameUniforms {
    FrameUniforms {
        view: state.camera.view_matrix(),
        projection: state
            .view
            .projection_matrix(state.camera.zoom, width, height),
        camera_position: state.camera.position,
        uv_scale: state.view.uv_scale,
    }
}

/// The `Renderer` draws the scene and the GUI.
///
/// # Fields
///
/// - `gpu`: device, queue and surface configuration.
/// - `depth_texture_view`: depth attachment matching the surface size.
/// - `egui_renderer`: turns `egui` paint jobs into draw calls.
/// - `scene`: the desk scene objects and lighting.
pub struct Renderer {
    gpu: Gpu,

    /// Recreated by [`Renderer::resize`] so it always matches the surface.
    depth_texture_view: wgpu::TextureView,

    egui_renderer: egui_wgpu::Renderer,

    scene: Scene,
}

impl Renderer {
    /// The texture format used for the depth buffer. Shader programs build their
    /// depth-stencil state with the same format.
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Creates the GPU context, the depth buffer, the GUI renderer and the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if no adapter or device is available, if a shader program fails
    /// validation, or if a texture in `asset_dir` cannot be loaded.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        asset_dir: &Path,
    ) -> Result<Self, ViewerError> {
        let gpu = Gpu::new_async(window, width, height).await?;

        let depth_texture_view = gpu.create_depth_texture(width, height);

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            Some(Self::DEPTH_FORMAT),
            1,
            false,
        );

        let scene = Scene::new(&gpu.device, &gpu.queue, gpu.surface_format, asset_dir).await?;

        Ok(Self {
            gpu,
            depth_texture_view,
            egui_renderer,
            scene,
        })
    }

    /// Resizes the surface and the depth texture. A zero-sized window is ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.gpu.resize(width, height);
        self.depth_texture_view = self.gpu.create_depth_texture(width, height);
    }

    /// Current surface width and height.
    pub fn size(&self) -> (u32, u32) {
        (self.gpu.width(), self.gpu.height())
    }

    /// Renders a single frame: the scene as seen from `state`'s camera, then the GUI.
    ///
    /// Frames where the surface texture cannot be acquired are skipped. A lost or
    /// outdated surface is reconfigured so the next frame can succeed.
    pub fn render_frame(
        &mut self,
        screen_descriptor: egui_wgpu::ScreenDescriptor,
        paint_jobs: Vec<egui::epaint::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
        state: &ViewerState,
    ) {
        let frame = frame_uniforms(state, self.gpu.width(), self.gpu.height());
        self.scene.update(&self.gpu.queue, &frame);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        self.upload_gui(&mut encoder, &paint_jobs, &textures_delta, &screen_descriptor);

        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
                return;
            }
            Err(error) => {
                log::error!("Failed to acquire surface texture: {error}");
                return;
            }
        };
        let target = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                format: Some(self.gpu.surface_format),
                ..Default::default()
            });

        self.encode_pass(&mut encoder, &target, &paint_jobs, &screen_descriptor);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Uploads new and changed GUI textures, frees dropped ones, and fills the GUI
    /// vertex and index buffers.
    fn upload_gui(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        paint_jobs: &[egui::epaint::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        let (device, queue) = (&self.gpu.device, &self.gpu.queue);
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        self.egui_renderer
            .update_buffers(device, queue, encoder, paint_jobs, screen_descriptor);
    }

    /// Clears to black, draws every scene object, then the GUI on top.
    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        paint_jobs: &[egui::epaint::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        encoder.insert_debug_marker("desk scene");

        let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });

        // egui_wgpu wants a 'static pass.
        let mut render_pass = render_pass.forget_lifetime();
        self.scene.render(&mut render_pass);
        self.egui_renderer
            .render(&mut render_pass, paint_jobs, screen_descriptor);
    }

    /// Releases the scene's GPU resources. The device and surface are dropped with `self`.
    pub fn release(self) {
        self.scene.release();
        log::info!("Renderer resources released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_glm::{Vec2, Vec3};

    #[test]
    fn frame_uniforms_follow_the_camera() {
        let mut state = ViewerState::default();
        state.camera.position = Vec3::new(1.0, 2.0, 3.0);
        state.view.increase_uv_scale();

        let frame = frame_uniforms(&state, 800, 600);
        assert_eq!(frame.camera_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(frame.view, state.camera.view_matrix());
        assert!((frame.uv_scale - Vec2::new(1.1, 1.1)).norm() < 1e-6);
        assert_eq!(
            frame.projection,
            state.view.projection_matrix(state.camera.zoom, 800, 600)
        );
    }

    #[test]
    fn frame_uniforms_switch_projection_mode() {
        let mut state = ViewerState::default();
        let perspective = frame_uniforms(&state, 800, 600).projection;
        state.view.toggle_projection();
        let orthographic = frame_uniforms(&state, 800, 600).projection;
        assert_ne!(perspective, orthographic);
        // Orthographic projections keep w = 1.
        assert_eq!(orthographic[(3, 3)], 1.0);
        assert_eq!(perspective[(3, 3)], 0.0);
    }
}
