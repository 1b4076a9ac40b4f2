//! # Rendering
//!
//! The forward renderer and the GPU vertex layout.
//!
//! [`Renderer`] drives a frame: skybox first, then a pre-order traversal of
//! the scene graph, uploading lighting, material and transform uniforms
//! through the [`RenderDevice`](crate::gfx::device::RenderDevice) trait.
//! [`Vertex`] is the interleaved layout meshes are flattened into before
//! upload.

pub mod renderer;
pub mod vertex;

pub use renderer::{
    DirectionalLight, Lighting, PointLight, Renderer, ShaderSources, SpotLight, POINT_LIGHT_COUNT,
};
pub use vertex::Vertex;
