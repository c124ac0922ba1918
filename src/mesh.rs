//! # Mesh
//!
//! GPU-side geometry for scene objects, plus the procedural sphere generator.
//!
//! A [`Mesh`] owns a vertex buffer and, for indexed geometry such as the sphere, an
//! index buffer. Static meshes from [`crate::vertex`] are drawn as plain triangle lists.

use std::f32::consts::PI;

use crate::vertex::Vertex;

/// Latitude bands of the scene's sphere.
pub const SPHERE_STACKS: u32 = 20;

/// Longitude bands of the scene's sphere.
pub const SPHERE_SLICES: u32 = 20;

/// CPU-side indexed geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Generates a unit UV sphere centered on the origin.
///
/// Rings run from the north pole (`v = 1`) to the south pole (`v = 0`); the seam column
/// is duplicated so texture coordinates wrap cleanly. Normals equal positions.
pub fn sphere(stacks: u32, slices: u32) -> IndexedGeometry {
    let (stacks, slices) = (stacks.max(2), slices.max(3));

    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let phi = v * PI;
        let (ring_radius, y) = (phi.sin(), phi.cos());
        for slice in 0..=slices {
            let u = slice as f32 / slices as f32;
            let theta = u * 2.0 * PI;
            let position = [ring_radius * theta.cos(), y, ring_radius * theta.sin()];
            vertices.push(Vertex {
                position,
                normal: position,
                uv: [u, 1.0 - v],
            });
        }
    }

    let ring = slices + 1;
    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
    for stack in 0..stacks {
        for slice in 0..slices {
            let top = stack * ring + slice;
            let bottom = top + ring;
            indices.extend_from_slice(&[top, bottom, top + 1, top + 1, bottom, bottom + 1]);
        }
    }

    IndexedGeometry { vertices, indices }
}

/// Vertex (and optional index) buffers for one object.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub index_buffer: Option<wgpu::Buffer>,
    pub index_count: u32,
}

impl Mesh {
    /// Uploads a triangle list without indices.
    pub fn from_vertices(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> Self {
        Self {
            vertex_buffer: Self::create_vertex_buffer(device, label, vertices),
            vertex_count: vertices.len() as u32,
            index_buffer: None,
            index_count: 0,
        }
    }

    /// Uploads indexed geometry.
    pub fn from_indexed(device: &wgpu::Device, label: &str, geometry: &IndexedGeometry) -> Self {
        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        Self {
            vertex_buffer: Self::create_vertex_buffer(device, label, &geometry.vertices),
            vertex_count: geometry.vertices.len() as u32,
            index_buffer: Some(index_buffer),
            index_count: geometry.indices.len() as u32,
        }
    }

    fn create_vertex_buffer(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> wgpu::Buffer {
        wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        )
    }

    /// Binds the buffers and issues the draw call.
    pub fn draw(&self, renderpass: &mut wgpu::RenderPass<'_>) {
        renderpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some(index_buffer) => {
                renderpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                renderpass.draw_indexed(0..self.index_count, 0, 0..1);
            }
            None => renderpass.draw(0..self.vertex_count, 0..1),
        }
    }

    /// Frees the GPU memory behind the buffers.
    pub fn release(&self) {
        self.vertex_buffer.destroy();
        if let Some(index_buffer) = &self.index_buffer {
            index_buffer.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_has_expected_counts() {
        let geometry = sphere(SPHERE_STACKS, SPHERE_SLICES);
        assert_eq!(geometry.vertices.len(), 21 * 21);
        assert_eq!(geometry.indices.len(), 20 * 20 * 6);
        let vertex_count = geometry.vertices.len() as u32;
        assert!(geometry.indices.iter().all(|&index| index < vertex_count));
    }

    #[test]
    fn sphere_vertices_lie_on_unit_sphere() {
        let geometry = sphere(8, 12);
        for vertex in &geometry.vertices {
            let [x, y, z] = vertex.position;
            let length = (x * x + y * y + z * z).sqrt();
            assert!((length - 1.0).abs() < 1e-5, "{vertex:?}");
            assert_eq!(vertex.normal, vertex.position);
            let [u, v] = vertex.uv;
            assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn sphere_poles_and_seam() {
        let geometry = sphere(4, 6);
        let north = geometry.vertices.first().unwrap();
        let south = geometry.vertices.last().unwrap();
        assert!((north.position[1] - 1.0).abs() < 1e-6);
        assert_eq!(north.uv[1], 1.0);
        assert!((south.position[1] + 1.0).abs() < 1e-6);
        assert_eq!(south.uv[1], 0.0);

        // First and last column of a ring share a position but not a texture coordinate.
        let ring = &geometry.vertices[7..14];
        let (first, last) = (ring[0], ring[6]);
        for axis in 0..3 {
            assert!((first.position[axis] - last.position[axis]).abs() < 1e-5);
        }
        assert_eq!((first.uv[0], last.uv[0]), (0.0, 1.0));
    }

    #[test]
    fn degenerate_tessellation_is_raised_to_minimum() {
        let geometry = sphere(0, 1);
        assert_eq!(geometry.vertices.len(), 3 * 4);
        assert_eq!(geometry.indices.len(), 2 * 3 * 6);
    }
}
