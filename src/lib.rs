// src/lib.rs
//! Lagoon Renderer
//!
//! A scene-graph forward renderer with procedural geometry, Phong lighting
//! and water shading, built on cgmath and an abstract render device.

pub mod gfx;

// Re-export the main types for convenience
pub use gfx::camera::Camera;
pub use gfx::device::{DeviceError, MeshId, ProgramId, RenderDevice, TextureId, UniformValue};
pub use gfx::geometry::MeshTemplate;
pub use gfx::rendering::{Lighting, Renderer, ShaderSources};
pub use gfx::resources::{load_obj, Material, Model};
pub use gfx::scene::{Node, NodeId, NodeKind, SceneGraph};
