//! # Texture
//!
//! Loads images from disk and turns them into sampled GPU textures.
//!
//! ## Row order
//!
//! Image codecs hand rows back top to bottom, but the scene's texture coordinates treat
//! `v = 0` as the bottom edge of the picture. Decoded pixels are therefore flipped
//! vertically before upload, so row `0` in texture memory is the bottom row of the image.
//!
//! ## Formats
//!
//! Only RGB and RGBA sources are accepted. wgpu has no three-channel 8-bit format, so RGB
//! images are widened to RGBA with an opaque alpha channel.

use std::path::Path;

use crate::error::ViewerError;

/// Decoded, flipped, RGBA8 pixels ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Channel count of the source image, before widening to RGBA.
    pub channels: u8,
}

/// Reads and decodes the image at `path`.
pub fn load_image(path: &Path) -> Result<TextureImage, ViewerError> {
    let bytes = std::fs::read(path).map_err(|source| ViewerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(path, &bytes)
}

/// Decodes an in-memory image. `path` is only used in error messages.
pub fn decode_image(path: &Path, bytes: &[u8]) -> Result<TextureImage, ViewerError> {
    let image = image::load_from_memory(bytes).map_err(|source| ViewerError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let channels = image.color().channel_count();
    if !matches!(channels, 3 | 4) {
        return Err(ViewerError::UnsupportedChannels {
            path: path.to_path_buf(),
            channels,
        });
    }

    let rgba = image.flipv().into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(TextureImage {
        pixels: rgba.into_raw(),
        width,
        height,
        channels,
    })
}

/// Rejects images that do not fit in a `max_dimension` x `max_dimension` texture.
pub fn check_dimensions(
    path: &Path,
    image: &TextureImage,
    max_dimension: u32,
) -> Result<(), ViewerError> {
    if image.width > max_dimension || image.height > max_dimension {
        return Err(ViewerError::TextureTooLarge {
            path: path.to_path_buf(),
            width: image.width,
            height: image.height,
            max_dimension,
        });
    }
    Ok(())
}

/// A sampled 2D texture bound at group `1`: texture view at binding `0`, sampler at `1`.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
}

impl Texture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Layout shared by every textured shader program.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    /// Loads `path` from disk and uploads it.
    ///
    /// Creation and upload run inside a validation error scope, so anything the device
    /// rejects comes back as [`ViewerError::TextureUpload`].
    pub async fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: &Path,
    ) -> Result<Self, ViewerError> {
        let image = load_image(path)?;
        check_dimensions(path, &image, device.limits().max_texture_dimension_2d)?;
        log::info!(
            "Loaded texture {} ({}x{}, {} channels)",
            path.display(),
            image.width,
            image.height,
            image.channels
        );
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "texture".to_owned());

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let texture = Self::from_image(device, queue, layout, &image, &label);
        if let Some(error) = device.pop_error_scope().await {
            texture.release();
            return Err(ViewerError::TextureUpload {
                path: path.to_path_buf(),
                message: error.to_string(),
            });
        }
        Ok(texture)
    }

    /// Uploads decoded pixels and creates a repeating, linearly filtered sampler.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &TextureImage,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            texture.as_image_copy(),
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            view,
            sampler,
            bind_group,
        }
    }

    pub fn release(&self) {
        self.texture.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn rows_are_flipped_and_rgb_is_widened() {
        let mut source = RgbImage::new(2, 2);
        source.put_pixel(0, 0, Rgb([255, 0, 0]));
        source.put_pixel(1, 0, Rgb([255, 0, 0]));
        source.put_pixel(0, 1, Rgb([0, 0, 255]));
        source.put_pixel(1, 1, Rgb([0, 0, 255]));

        let decoded = decode_image(Path::new("rgb.png"), &encode_png(source.into())).unwrap();
        assert_eq!((decoded.width, decoded.height, decoded.channels), (2, 2, 3));
        assert_eq!(decoded.pixels.len(), 2 * 2 * 4);
        // The bottom (blue) row now comes first.
        assert_eq!(&decoded.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&decoded.pixels[8..12], &[255, 0, 0, 255]);
    }

    #[test]
    fn rgba_keeps_alpha() {
        let mut source = RgbaImage::new(1, 2);
        source.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        source.put_pixel(0, 1, Rgba([5, 6, 7, 8]));

        let decoded = decode_image(Path::new("rgba.png"), &encode_png(source.into())).unwrap();
        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.pixels, vec![5, 6, 7, 8, 1, 2, 3, 4]);
    }

    #[test]
    fn grayscale_is_rejected() {
        let source = image::GrayImage::from_pixel(2, 2, Luma([128]));
        let err = decode_image(Path::new("gray.png"), &encode_png(source.into())).unwrap_err();
        assert!(matches!(
            err,
            ViewerError::UnsupportedChannels { channels: 1, .. }
        ));
    }

    #[test]
    fn oversized_images_are_rejected() {
        let image = TextureImage {
            pixels: vec![0; 4 * 9 * 2],
            width: 9,
            height: 2,
            channels: 4,
        };
        assert!(check_dimensions(Path::new("wide.png"), &image, 9).is_ok());

        let err = check_dimensions(Path::new("wide.png"), &image, 8).unwrap_err();
        assert!(matches!(
            err,
            ViewerError::TextureTooLarge {
                width: 9,
                height: 2,
                max_dimension: 8,
                ..
            }
        ));
        assert!(err.to_string().contains("wide.png"));
    }

    #[test]
    fn garbage_and_missing_files_fail() {
        let err = decode_image(Path::new("junk.jpg"), b"not an image").unwrap_err();
        assert!(matches!(err, ViewerError::Image { .. }));
        assert!(err.to_string().contains("junk.jpg"));

        let err = load_image(Path::new("does/not/exist.jpg")).unwrap_err();
        assert!(matches!(err, ViewerError::Io { .. }));
    }
}
