//! # Shader Programs
//!
//! Each scene object gets its own shader program: a WGSL module compiled into a
//! `wgpu::RenderPipeline` together with the object's bind group layouts.
//!
//! wgpu reports shader compilation and pipeline validation problems asynchronously
//! through the device's error handler. Program creation is wrapped in a validation
//! error scope so a broken shader comes back as [`ViewerError::Shader`] carrying the
//! compiler's message, instead of reaching the default handler (which panics).

use crate::error::ViewerError;
use crate::renderer::Renderer;
use crate::vertex::Vertex;

/// WGSL source of the textured Phong program.
pub const PHONG_SHADER_SOURCE: &str = include_str!("shaders/phong.wgsl");

/// WGSL source of the unlit lamp program.
pub const LAMP_SHADER_SOURCE: &str = include_str!("shaders/lamp.wgsl");

/// Which lighting model an object is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    /// Ambient + diffuse + specular lighting, modulated by a texture.
    Phong,
    /// Solid white, ignores lighting. No texture.
    Lamp,
}

impl ShaderKind {
    pub fn source(self) -> &'static str {
        match self {
            Self::Phong => PHONG_SHADER_SOURCE,
            Self::Lamp => LAMP_SHADER_SOURCE,
        }
    }

    /// Whether the program samples a texture bound at group `1`.
    pub fn uses_texture(self) -> bool {
        matches!(self, Self::Phong)
    }
}

/// A compiled and linked shader program.
pub struct ShaderProgram {
    pub kind: ShaderKind,
    pub pipeline: wgpu::RenderPipeline,
}

impl ShaderProgram {
    /// Compiles `kind`'s source and links it into a render pipeline.
    ///
    /// `texture_layout` is only used by programs that sample a texture.
    pub async fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        label: &str,
        kind: ShaderKind,
        uniform_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, ViewerError> {
        Self::from_source(
            device,
            surface_format,
            label,
            kind,
            kind.source(),
            uniform_layout,
            texture_layout,
        )
        .await
    }

    /// Like [`ShaderProgram::new`] but with caller-provided WGSL.
    pub async fn from_source(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        label: &str,
        kind: ShaderKind,
        source: &str,
        uniform_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, ViewerError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = Self::create_pipeline(
            device,
            surface_format,
            label,
            kind,
            source,
            uniform_layout,
            texture_layout,
        );
        if let Some(error) = device.pop_error_scope().await {
            return Err(ViewerError::Shader {
                program: label.to_owned(),
                message: error.to_string(),
            });
        }

        log::debug!("Built {kind:?} shader program for {label}");
        Ok(Self { kind, pipeline })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        label: &str,
        kind: ShaderKind,
        source: &str,
        uniform_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(source)),
        });

        let mut bind_group_layouts = vec![uniform_layout];
        if kind.uses_texture() {
            bind_group_layouts.push(texture_layout);
        }

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &bind_group_layouts,
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: Some("vertex_main"),
                buffers: &[Vertex::description(&Vertex::vertex_attributes())],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Several meshes are single-sided and mixed winding; draw both faces.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Renderer::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: Some("fragment_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        })
    }
}
