//! # GPU Management Module
//!
//! The `gpu` module sets up and manages the wgpu objects the viewer renders with.
//!
//! [`Gpu`] wraps the surface, device and queue, and provides utility methods for resizing
//! the surface and creating the depth texture.
//!
//! ## Features
//!
//! - **Fallible Initialization**: every step of acquiring a device is reported as a
//!   [`ViewerError`] instead of panicking, since startup failures end the program with a
//!   diagnostic.
//! - **Dynamic Surface Resizing**: update the rendering surface dimensions and configuration.
//! - **Depth Texture Creation**: create the depth attachment needed for 3D rendering.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let gpu = Gpu::new_async(window, 800, 600).await?;
//! let depth = gpu.create_depth_texture(800, 600);
//! ```

use crate::error::ViewerError;
use crate::renderer::Renderer;

/// The `Gpu` struct holds the core GPU resources required for rendering.
///
/// # Fields
///
/// - `surface`: the window surface frames are presented to.
/// - `device`: the logical device used to create all resources.
/// - `queue`: the queue used to upload data and submit command buffers.
/// - `surface_config`: current size, format and present mode of the surface.
/// - `surface_format`: the color format of the surface texture.
pub struct Gpu {
    pub surface: wgpu::Surface<'static>,

    pub device: wgpu::Device,

    pub queue: wgpu::Queue,

    pub surface_config: wgpu::SurfaceConfiguration,

    pub surface_format: wgpu::TextureFormat,
}

impl Gpu {
    pub fn width(&self) -> u32 {
        self.surface_config.width
    }

    pub fn height(&self) -> u32 {
        self.surface_config.height
    }

    /// Reconfigures the surface for a new window size. Zero-sized requests (a minimized
    /// window) are ignored because a surface cannot be configured with a zero extent.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.reconfigure();
    }

    /// Applies the current configuration again, e.g. after the surface was lost.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Creates a depth texture of `width` x `height` pixels in
    /// [`Renderer::DEPTH_FORMAT`] and returns its view.
    pub fn create_depth_texture(&self, width: u32, height: u32) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        self.device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("depth_buffer"),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Renderer::DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Creates the surface for `window`, picks an adapter and requests a device.
    pub async fn new_async(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self, ViewerError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .ok_or(ViewerError::NoAdapter)?;
        log::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = request_device(&adapter).await?;

        let surface_config = surface_configuration(&surface.get_capabilities(&adapter), width, height);
        surface.configure(&device, &surface_config);
        log::debug!(
            "Surface configured as {:?}, {:?}",
            surface_config.format,
            surface_config.present_mode
        );

        Ok(Self {
            surface_format: surface_config.format,
            surface,
            device,
            queue,
            surface_config,
        })
    }
}

async fn request_device(
    adapter: &wgpu::Adapter,
) -> Result<(wgpu::Device, wgpu::Queue), ViewerError> {
    let descriptor = wgpu::DeviceDescriptor {
        label: Some("desk_scene_device"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
        memory_hints: wgpu::MemoryHints::Performance,
    };
    Ok(adapter.request_device(&descriptor, None).await?)
}

/// The first non-sRGB format is preferred: egui expects to write gamma-encoded colors.
fn surface_configuration(
    capabilities: &wgpu::SurfaceCapabilities,
    width: u32,
    height: u32,
) -> wgpu::SurfaceConfiguration {
    let format = capabilities
        .formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| capabilities.formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8Unorm);

    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: capabilities
            .present_modes
            .first()
            .copied()
            .unwrap_or(wgpu::PresentMode::Fifo),
        alpha_mode: capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: Vec::new(),
        desired_maximum_frame_latency: 2,
    }
}
