//! # Errors
//!
//! Every failure the viewer can report happens while the scene is being set up: creating
//! the window, acquiring a GPU device, compiling shader programs, or decoding textures.
//! Scene setup is all-or-nothing, so each variant of [`ViewerError`] is fatal and ends
//! the process with a diagnostic message and a non-zero exit status.

use std::path::PathBuf;

/// Fatal initialization failures.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to request a device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// Shader module compilation or pipeline linking failed. `message` carries the
    /// diagnostic text produced by the shader compiler.
    #[error("shader program `{program}` failed to build:\n{message}")]
    Shader { program: String, message: String },

    #[error("failed to read texture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(
        "texture {} is {width}x{height}, larger than the device limit of {max_dimension}",
        path.display()
    )]
    TextureTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dimension: u32,
    },

    /// Texture creation or upload failed device validation.
    #[error("failed to upload texture {}:\n{message}", path.display())]
    TextureUpload { path: PathBuf, message: String },

    #[error("texture {} has {channels} channels, only RGB and RGBA images are supported", path.display())]
    UnsupportedChannels { path: PathBuf, channels: u8 },
}
