//! # Vertex
//!
//! The interleaved vertex format shared by every mesh in the scene, and the hard-coded
//! geometry for the container, tabletop, lamp and book.
//!
//! Each vertex carries a position, a normal, and a texture coordinate. Texture
//! coordinates put `v = 0` at the bottom of the image; textures are flipped on upload
//! to match (see [`crate::texture`]).
//!
//! The static meshes are drawn as plain triangle lists without an index buffer.

/// A single vertex: position, normal, texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],

    /// Object-space surface normal.
    pub normal: [f32; 3],

    /// Texture coordinate, before UV scaling.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Shader locations: `0` position, `1` normal, `2` texture coordinate.
    pub fn vertex_attributes() -> Vec<wgpu::VertexAttribute> {
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2].to_vec()
    }

    /// Describes how vertices are laid out in a vertex buffer.
    pub fn description(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

const fn vertex(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        uv,
    }
}

/// Container: a pyramid lid (18 vertices) sitting on a cube body (36 vertices).
pub const CONTAINER_VERTICES: [Vertex; 54] = [
    // Lid
    vertex([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    vertex([0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    vertex([0.0, 0.15, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0]),
    vertex([-0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    vertex([0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    vertex([0.0, 0.15, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
    vertex([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    vertex([-0.5, -0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    vertex([0.0, 0.15, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 0.0]),
    vertex([0.5, -0.5, 0.5], [1.0, 0.0, 0.0], [1.0, 1.0]),
    vertex([0.0, 0.15, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 0.0]),
    vertex([0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [1.0, 1.0]),
    vertex([0.0, -0.5, 0.0], [0.0, -1.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, -0.5, 0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
    vertex([-0.5, -0.5, -0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
    vertex([0.0, -0.5, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
    // Body
    vertex([-0.5, -1.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    vertex([0.5, -1.5, -0.5], [0.0, 0.0, -1.0], [1.0, 0.0]),
    vertex([0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    vertex([0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    vertex([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 1.0]),
    vertex([-0.5, -1.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    vertex([-0.5, -1.5, 0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    vertex([0.5, -1.5, 0.5], [0.0, 0.0, 1.0], [1.0, 0.0]),
    vertex([0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    vertex([0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    vertex([-0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
    vertex([-0.5, -1.5, 0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    vertex([-0.5, -0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    vertex([-0.5, -1.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, -1.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, -1.5, 0.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    vertex([-0.5, -0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([0.5, -0.5, 0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [1.0, 1.0]),
    vertex([0.5, -1.5, -0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([0.5, -1.5, -0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([0.5, -1.5, 0.5], [1.0, 0.0, 0.0], [0.0, 0.0]),
    vertex([0.5, -0.5, 0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, -1.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    vertex([0.5, -1.5, -0.5], [0.0, -1.0, 0.0], [1.0, 1.0]),
    vertex([0.5, -1.5, 0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    vertex([0.5, -1.5, 0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, -1.5, 0.5], [0.0, -1.0, 0.0], [0.0, 0.0]),
    vertex([-0.5, -1.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, -0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
    vertex([0.5, -0.5, -0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
    vertex([0.5, -0.5, 0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    vertex([0.5, -0.5, 0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, -0.5, 0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
    vertex([-0.5, -0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
];

/// Tabletop: one upward-facing and one downward-facing triangle at `y = -1.5`.
pub const PLANE_VERTICES: [Vertex; 6] = [
    vertex([-4.0, -1.5, -2.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
    vertex([4.0, -1.5, -2.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
    vertex([4.0, -1.5, 2.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
    vertex([4.0, -1.5, 2.0], [0.0, -1.0, 0.0], [1.0, 0.0]),
    vertex([-4.0, -1.5, 2.0], [0.0, -1.0, 0.0], [0.0, 0.0]),
    vertex([-4.0, -1.5, -2.0], [0.0, -1.0, 0.0], [0.0, 1.0]),
];

/// Lamp block, a unit cube around `(-1.0, 5.0, -3.0)`.
pub const LAMP_VERTICES: [Vertex; 36] = [
    vertex([-1.5, 5.5, -3.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    vertex([-0.5, 5.5, -3.5], [0.0, 0.0, -1.0], [1.0, 0.0]),
    vertex([-0.5, 4.5, -3.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    vertex([-0.5, 4.5, -3.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    vertex([-1.5, 4.5, -3.5], [0.0, 0.0, -1.0], [0.0, 1.0]),
    vertex([-1.5, 5.5, -3.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    vertex([-1.5, 5.5, -2.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    vertex([-0.5, 5.5, -2.5], [0.0, 0.0, 1.0], [1.0, 0.0]),
    vertex([-0.5, 4.5, -2.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    vertex([-0.5, 4.5, -2.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    vertex([-1.5, 5.5, -2.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
    vertex([-1.5, 4.5, -2.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    vertex([-1.5, 4.5, -2.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([-1.5, 4.5, -3.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    vertex([-1.5, 5.5, -3.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([-1.5, 5.5, -3.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([-1.5, 5.5, -2.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    vertex([-1.5, 4.5, -2.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, 4.5, -2.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, 4.5, -3.5], [1.0, 0.0, 0.0], [1.0, 1.0]),
    vertex([-0.5, 5.5, -3.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, 5.5, -3.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, 5.5, -2.5], [1.0, 0.0, 0.0], [0.0, 0.0]),
    vertex([-0.5, 4.5, -2.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([-1.5, 5.5, -3.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, 5.5, -3.5], [0.0, -1.0, 0.0], [1.0, 1.0]),
    vertex([-0.5, 5.5, -2.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, 5.5, -2.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    vertex([-1.5, 5.5, -2.5], [0.0, -1.0, 0.0], [0.0, 0.0]),
    vertex([-1.5, 5.5, -3.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    vertex([-1.5, 4.5, -3.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, 4.5, -3.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
    vertex([-0.5, 4.5, -2.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, 4.5, -2.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    vertex([-1.5, 4.5, -2.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
    vertex([-1.5, 4.5, -3.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
];

/// Book block, a thin slab `0.15` units tall.
pub const BOOK_VERTICES: [Vertex; 36] = [
    vertex([-1.5, 0.15, -3.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    vertex([-0.5, 0.15, -3.5], [0.0, 0.0, -1.0], [1.0, 0.0]),
    vertex([-0.5, 0.0, -3.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    vertex([-0.5, 0.0, -3.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    vertex([-1.5, 0.0, -3.5], [0.0, 0.0, -1.0], [0.0, 1.0]),
    vertex([-1.5, 0.15, -3.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    vertex([-1.5, 0.15, -2.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    vertex([-0.5, 0.15, -2.5], [0.0, 0.0, 1.0], [1.0, 0.0]),
    vertex([-0.5, 0.0, -2.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    vertex([-0.5, 0.0, -2.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    vertex([-1.5, 0.15, -2.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
    vertex([-1.5, 0.0, -2.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    vertex([-1.5, 0.0, -2.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([-1.5, 0.0, -3.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    vertex([-1.5, 0.15, -3.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([-1.5, 0.15, -3.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([-1.5, 0.15, -2.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    vertex([-1.5, 0.0, -2.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, 0.0, -2.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, 0.0, -3.5], [1.0, 0.0, 0.0], [1.0, 1.0]),
    vertex([-0.5, 0.15, -3.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, 0.15, -3.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, 0.15, -2.5], [1.0, 0.0, 0.0], [0.0, 0.0]),
    vertex([-0.5, 0.0, -2.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
    vertex([-1.5, 0.15, -3.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, 0.15, -3.5], [0.0, -1.0, 0.0], [1.0, 1.0]),
    vertex([-0.5, 0.15, -2.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, 0.15, -2.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    vertex([-1.5, 0.15, -2.5], [0.0, -1.0, 0.0], [0.0, 0.0]),
    vertex([-1.5, 0.15, -3.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    vertex([-1.5, 0.0, -3.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
    vertex([-0.5, 0.0, -3.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
    vertex([-0.5, 0.0, -2.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    vertex([-0.5, 0.0, -2.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    vertex([-1.5, 0.0, -2.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
    vertex([-1.5, 0.0, -3.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_eight_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 8 * 4);
        let attributes = Vertex::vertex_attributes();
        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes[1].offset, 12);
        assert_eq!(attributes[2].offset, 24);
    }

    #[test]
    fn meshes_are_whole_triangles() {
        for mesh in [
            &CONTAINER_VERTICES[..],
            &PLANE_VERTICES[..],
            &LAMP_VERTICES[..],
            &BOOK_VERTICES[..],
        ] {
            assert_eq!(mesh.len() % 3, 0);
        }
        assert_eq!(CONTAINER_VERTICES.len(), 54);
        assert_eq!(PLANE_VERTICES.len(), 6);
        assert_eq!(LAMP_VERTICES.len(), 36);
        assert_eq!(BOOK_VERTICES.len(), 36);
    }

    #[test]
    fn normals_are_axis_aligned_unit_vectors() {
        for mesh in [
            &CONTAINER_VERTICES[..],
            &PLANE_VERTICES[..],
            &LAMP_VERTICES[..],
            &BOOK_VERTICES[..],
        ] {
            for vertex in mesh {
                let [x, y, z] = vertex.normal;
                assert_eq!(x.abs() + y.abs() + z.abs(), 1.0, "{vertex:?}");
            }
        }
    }
}
