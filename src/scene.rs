//! # Scene
//!
//! The `scene` module describes the desk scene and owns everything the GPU needs to draw
//! it.
//!
//! ## Overview
//!
//! The scene is a fixed list of five objects: a pyramid-topped container, a tabletop, a
//! lamp block, a sphere and a book. Each object is described once in
//! [`object_definitions`] and turned into a [`SceneObject`] when the renderer starts.
//! A `SceneObject` carries everything needed to draw it on its own:
//!
//! - its geometry ([`Mesh`]),
//! - its shader program ([`ShaderProgram`]),
//! - its texture, if the shader samples one ([`Texture`]),
//! - a uniform buffer ([`UniformBinding`]),
//! - and a fixed world placement ([`Placement`]).
//!
//! Rendering is data-driven: [`Scene::update`] writes every object's uniforms for the
//! frame, and [`Scene::render`] walks the same list and issues one draw call per object.
//!
//! ## Placement
//!
//! Model matrices are built as `translation * rotation * scale`. Applied to a vertex,
//! this scales first, then rotates about the object's local origin, then moves the
//! object into the world. The matrix is recomputed every frame, never cached.
//!
//! ## Example Usage
//! ```rust,ignore
//! let scene = Scene::new(&device, &queue, surface_format, Path::new("resources")).await?;
//!
//! scene.update(&queue, &frame_uniforms);
//!
//! let mut render_pass = encoder.begin_render_pass(&render_pass_descriptor);
//! scene.render(&mut render_pass);
//! ```

use std::path::Path;

use nalgebra_glm::{Mat4, Vec3};

use crate::error::ViewerError;
use crate::mesh::{self, Mesh, SPHERE_SLICES, SPHERE_STACKS};
use crate::shader::{ShaderKind, ShaderProgram};
use crate::texture::Texture;
use crate::uniform_binding::UniformBinding;
use crate::uniform_buffer::{FrameUniforms, Lighting, UniformBuffer};
use crate::vertex::{Vertex, BOOK_VERTICES, CONTAINER_VERTICES, LAMP_VERTICES, PLANE_VERTICES};

/// Texture file names, relative to the asset directory.
pub const CONTAINER_TEXTURE: &str = "ContainerTexture.jpg";
pub const TABLE_TEXTURE: &str = "TableTexture.jpg";
pub const PLANNER_TEXTURE: &str = "PlannerTexture.jpg";

/// Where an object sits in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub translation: Vec3,
    /// Rotation angle in radians.
    pub rotation_angle: f32,
    /// Rotation axis; does not need to be normalized.
    pub rotation_axis: Vec3,
    pub scale: Vec3,
}

impl Placement {
    /// Builds the local-to-world transform.
    pub fn model_matrix(&self) -> Mat4 {
        let scale = nalgebra_glm::scaling(&self.scale);
        let rotation = if self.rotation_angle == 0.0 {
            Mat4::identity()
        } else {
            nalgebra_glm::rotation(self.rotation_angle, &self.rotation_axis)
        };
        let translation = nalgebra_glm::translation(&self.translation);
        translation * rotation * scale
    }
}

/// Where an object's vertices come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// A hard-coded, non-indexed triangle list.
    Static(&'static [Vertex]),
    /// A generated, indexed unit sphere.
    Sphere { stacks: u32, slices: u32 },
}

/// Compile-time description of one scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectDefinition {
    pub name: &'static str,
    pub geometry: Geometry,
    pub shader: ShaderKind,
    /// Texture file inside the asset directory. `None` for untextured programs.
    pub texture: Option<&'static str>,
    pub placement: Placement,
}

/// The desk scene, in draw order.
pub fn object_definitions() -> [ObjectDefinition; 5] {
    let tilt_axis = nalgebra_glm::vec3(1.0, 1.0, 1.0);
    [
        ObjectDefinition {
            name: "container",
            geometry: Geometry::Static(&CONTAINER_VERTICES),
            shader: ShaderKind::Phong,
            texture: Some(CONTAINER_TEXTURE),
            placement: Placement {
                translation: nalgebra_glm::vec3(3.0, 2.0, 0.0),
                rotation_angle: 45.0,
                rotation_axis: tilt_axis,
                scale: nalgebra_glm::vec3(2.0, 2.0, 2.0),
            },
        },
        ObjectDefinition {
            name: "plane",
            geometry: Geometry::Static(&PLANE_VERTICES),
            shader: ShaderKind::Phong,
            texture: Some(TABLE_TEXTURE),
            placement: Placement {
                translation: nalgebra_glm::vec3(0.0, 7.5, 0.0),
                rotation_angle: 45.0,
                rotation_axis: tilt_axis,
                scale: nalgebra_glm::vec3(5.0, 5.0, 5.0),
            },
        },
        ObjectDefinition {
            name: "lamp",
            geometry: Geometry::Static(&LAMP_VERTICES),
            shader: ShaderKind::Lamp,
            texture: None,
            placement: Placement {
                translation: nalgebra_glm::vec3(-1.0, -7.0, 5.0),
                rotation_angle: 45.0,
                rotation_axis: tilt_axis,
                scale: nalgebra_glm::vec3(1.25, 1.25, 1.25),
            },
        },
        ObjectDefinition {
            name: "sphere",
            geometry: Geometry::Sphere {
                stacks: SPHERE_STACKS,
                slices: SPHERE_SLICES,
            },
            shader: ShaderKind::Phong,
            texture: Some(TABLE_TEXTURE),
            placement: Placement {
                translation: nalgebra_glm::vec3(0.0, 7.1, -2.0),
                rotation_angle: 0.0,
                rotation_axis: Vec3::y(),
                scale: nalgebra_glm::vec3(5.5, 5.5, 5.5),
            },
        },
        ObjectDefinition {
            name: "book",
            geometry: Geometry::Static(&BOOK_VERTICES),
            shader: ShaderKind::Phong,
            texture: Some(PLANNER_TEXTURE),
            placement: Placement {
                translation: nalgebra_glm::vec3(12.0, -6.0, 9.0),
                rotation_angle: 45.0,
                rotation_axis: tilt_axis,
                scale: nalgebra_glm::vec3(7.0, 5.0, 5.0),
            },
        },
    ]
}

/// A drawable object with all of its GPU resources.
///
/// # Fields
///
/// - `name`: used for labels and log messages.
/// - `placement`: fixed world placement; the model matrix is derived from it each frame.
/// - `mesh`: vertex (and optional index) buffers.
/// - `program`: the object's compiled shader program.
/// - `texture`: sampled by the program when present.
/// - `uniform`: the object's uniform buffer and bind group.
pub struct SceneObject {
    pub name: &'static str,
    pub placement: Placement,
    pub mesh: Mesh,
    pub program: ShaderProgram,
    pub texture: Option<Texture>,
    pub uniform: UniformBinding,
}

impl SceneObject {
    /// Creates the GPU resources for `definition`, loading its texture from `asset_dir`.
    pub async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
        asset_dir: &Path,
        definition: &ObjectDefinition,
    ) -> Result<Self, ViewerError> {
        let name = definition.name;
        let uniform = UniformBinding::new(device, name);

        let program = ShaderProgram::new(
            device,
            surface_format,
            name,
            definition.shader,
            &uniform.bind_group_layout,
            texture_layout,
        )
        .await?;

        let texture = match definition.texture {
            Some(file) => {
                Some(Texture::load(device, queue, texture_layout, &asset_dir.join(file)).await?)
            }
            None => None,
        };

        let mesh = match definition.geometry {
            Geometry::Static(vertices) => Mesh::from_vertices(device, name, vertices),
            Geometry::Sphere { stacks, slices } => {
                Mesh::from_indexed(device, name, &mesh::sphere(stacks, slices))
            }
        };

        Ok(Self {
            name,
            placement: definition.placement,
            mesh,
            program,
            texture,
            uniform,
        })
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.placement.model_matrix()
    }

    fn release(&self) {
        self.mesh.release();
        self.uniform.release();
        if let Some(texture) = &self.texture {
            texture.release();
        }
    }
}

/// Every object in the scene plus the shared lighting setup.
pub struct Scene {
    pub objects: Vec<SceneObject>,

    pub lighting: Lighting,
}

impl Scene {
    /// Builds every object in [`object_definitions`]. Fails on the first shader or
    /// texture that cannot be created.
    pub async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        asset_dir: &Path,
    ) -> Result<Self, ViewerError> {
        let texture_layout = Texture::bind_group_layout(device);

        let mut objects = Vec::new();
        for definition in &object_definitions() {
            let object = SceneObject::new(
                device,
                queue,
                surface_format,
                &texture_layout,
                asset_dir,
                definition,
            )
            .await?;
            objects.push(object);
        }
        log::info!("Scene ready with {} objects", objects.len());

        Ok(Self {
            objects,
            lighting: Lighting::default(),
        })
    }

    /// Writes every object's uniforms for the coming frame.
    pub fn update(&self, queue: &wgpu::Queue, frame: &FrameUniforms) {
        for object in &self.objects {
            let uniforms = UniformBuffer::new(object.model_matrix(), frame, &self.lighting);
            object.uniform.update_buffer(queue, uniforms);
        }
    }

    /// Issues one draw call per object.
    pub fn render(&self, renderpass: &mut wgpu::RenderPass<'_>) {
        for object in &self.objects {
            renderpass.set_pipeline(&object.program.pipeline);
            renderpass.set_bind_group(0, &object.uniform.bind_group, &[]);
            if let Some(texture) = &object.texture {
                renderpass.set_bind_group(1, &texture.bind_group, &[]);
            }
            object.mesh.draw(renderpass);
        }
    }

    /// Destroys buffers and textures, then drops the pipelines.
    pub fn release(self) {
        for object in &self.objects {
            object.release();
            log::debug!("Released GPU resources of {}", object.name);
        }
    }
}
