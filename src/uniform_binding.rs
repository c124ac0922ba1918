//! # Uniform Binding
//!
//! Wraps an object's [`UniformBuffer`] in a GPU buffer and exposes it to shaders as bind
//! group `0`, binding `0`. Both shader stages read it: the vertex stage for the
//! matrices, the fragment stage for lighting and UV scale.
//!
//! Every scene object owns its own binding, so all objects can be updated before the
//! render pass starts and drawn in a single pass.

// The CPU-side layout written into the buffer.
use crate::uniform_buffer::UniformBuffer;

/// A uniform buffer together with its bind group and layout.
///
/// # Fields
///
/// - `buffer`: GPU buffer holding one [`UniformBuffer`], rewritten every frame.
/// - `bind_group`: binds `buffer` at group `0` during rendering.
/// - `bind_group_layout`: used when building the pipeline layout for the object's shader.
pub struct UniformBinding {
    pub buffer: wgpu::Buffer,

    pub bind_group: wgpu::BindGroup,

    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl UniformBinding {
    /// Creates the buffer, initialized with zeros, and its bind group.
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Uniform Buffer")),
                contents: bytemuck::cast_slice(&[UniformBuffer::default()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<UniformBuffer>() as u64,
                    ),
                },
                count: None,
            }],
            label: Some(&format!("{label} uniform_bind_group_layout")),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(&format!("{label} uniform_bind_group")),
        });

        Self {
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Writes `uniform_buffer` into the GPU buffer; takes effect at the next submit.
    pub fn update_buffer(&self, queue: &wgpu::Queue, uniform_buffer: UniformBuffer) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform_buffer]))
    }

    pub fn release(&self) {
        self.buffer.destroy();
    }
}
