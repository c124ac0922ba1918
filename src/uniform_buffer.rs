//! # Uniform Buffer
//!
//! The per-object uniform block shared by the Phong and lamp shaders.
//!
//! The layout mirrors the WGSL `Uniforms` struct in `shaders/phong.wgsl` and
//! `shaders/lamp.wgsl`. WGSL aligns `vec3<f32>` to 16 bytes, so every vector is stored as
//! four floats with the last one unused (or, for `uv_scale`, the last two).

use nalgebra_glm::{Mat4, Vec2, Vec3};

/// Values that are the same for every object in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub uv_scale: Vec2,
}

/// The single point light and the base object color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub object_color: Vec3,
    pub light_color: Vec3,
    pub light_position: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            object_color: nalgebra_glm::vec3(1.0, 0.2, 0.0),
            light_color: nalgebra_glm::vec3(1.0, 1.0, 1.0),
            light_position: nalgebra_glm::vec3(1.5, 5.5, -3.0),
        }
    }
}

/// GPU representation of the uniform block.
#[repr(C)]
#[derive(Default, Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UniformBuffer {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    /// Inverse-transpose of `model`, moves normals into world space.
    pub normal_matrix: Mat4,
    pub object_color: [f32; 4],
    pub light_color: [f32; 4],
    pub light_position: [f32; 4],
    pub view_position: [f32; 4],
    pub uv_scale: [f32; 4],
}

impl UniformBuffer {
    pub fn new(model: Mat4, frame: &FrameUniforms, lighting: &Lighting) -> Self {
        Self {
            model,
            view: frame.view,
            projection: frame.projection,
            normal_matrix: nalgebra_glm::inverse_transpose(model),
            object_color: extend(&lighting.object_color),
            light_color: extend(&lighting.light_color),
            light_position: extend(&lighting.light_position),
            view_position: extend(&frame.camera_position),
            uv_scale: [frame.uv_scale.x, frame.uv_scale.y, 0.0, 0.0],
        }
    }
}

fn extend(v: &Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_wgsl_alignment() {
        assert_eq!(std::mem::size_of::<UniformBuffer>(), 4 * 64 + 5 * 16);
        assert_eq!(std::mem::size_of::<UniformBuffer>() % 16, 0);
    }

    #[test]
    fn packs_frame_and_lighting_values() {
        let frame = FrameUniforms {
            view: Mat4::identity(),
            projection: Mat4::identity() * 2.0,
            camera_position: nalgebra_glm::vec3(-1.5, 2.0, 8.0),
            uv_scale: nalgebra_glm::vec2(1.1, 0.9),
        };
        let model = nalgebra_glm::scaling(&nalgebra_glm::vec3(2.0, 4.0, 8.0));
        let uniforms = UniformBuffer::new(model, &frame, &Lighting::default());

        assert_eq!(uniforms.model, model);
        assert_eq!(uniforms.projection, frame.projection);
        assert_eq!(uniforms.view_position, [-1.5, 2.0, 8.0, 0.0]);
        assert_eq!(uniforms.uv_scale, [1.1, 0.9, 0.0, 0.0]);
        assert_eq!(uniforms.object_color, [1.0, 0.2, 0.0, 0.0]);
        assert_eq!(uniforms.light_position, [1.5, 5.5, -3.0, 0.0]);

        // Non-uniform scale: normals are scaled by the reciprocal.
        let expected = nalgebra_glm::scaling(&nalgebra_glm::vec3(0.5, 0.25, 0.125));
        for (a, b) in uniforms.normal_matrix.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}
