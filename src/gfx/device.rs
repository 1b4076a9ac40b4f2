//! # Render Device Abstraction
//!
//! The renderer core never talks to a graphics API directly. Everything it
//! needs from the GPU — program compilation, named uniforms, texture
//! binding, mesh upload, draw submission and a handful of pipeline toggles —
//! goes through the [`RenderDevice`] trait. Window/context creation, shader
//! source management and image decoding live behind the implementations of
//! this trait.
//!
//! Handles are opaque newtypes. A texture slot that is empty is an
//! `Option<TextureId>`, never a magic zero handle; binding `None` unbinds
//! the unit.

use cgmath::{Matrix4, Vector3, Vector4};
use thiserror::Error;

use crate::gfx::geometry::MeshTemplate;

/// Compiled shader program handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// GPU texture handle (2D or cube map).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Uploaded mesh handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// Renderbuffer handle. Distinct from [`TextureId`] because a renderbuffer
/// can be attached to a framebuffer but never bound to a texture unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderbufferId(pub u32);

/// Front-face winding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
}

/// Offscreen render target: a color texture plus a depth renderbuffer.
///
/// Used by the caller to render a reflection/refraction pass before the main
/// pass. Feeding the color texture back into a water material is wired up by
/// the application, not by the renderer core.
#[derive(Debug, Clone, Copy)]
pub struct OffscreenTarget {
    pub color: TextureId,
    pub depth: RenderbufferId,
}

/// A value that can be uploaded to a named shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat4(Matrix4<f32>),
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        Self::Int(v as i32)
    }
}

impl From<Vector3<f32>> for UniformValue {
    fn from(v: Vector3<f32>) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vector4<f32>> for UniformValue {
    fn from(v: Vector4<f32>) -> Self {
        Self::Vec4(v)
    }
}

impl From<Matrix4<f32>> for UniformValue {
    fn from(v: Matrix4<f32>) -> Self {
        Self::Mat4(v)
    }
}

/// Errors surfaced by a render device.
///
/// A missing uniform means the renderer and the active shader disagree about
/// the interface. That is a configuration bug, so it aborts the render pass
/// instead of silently skipping the upload.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("uniform not found in active program: {name}")]
    UniformNotFound { name: String },

    #[error("shader compile/link failed: {0}")]
    ShaderCompile(String),

    #[error("failed to load texture {path}: {reason}")]
    TextureLoad { path: String, reason: String },
}

/// Contract between the renderer core and the graphics backend.
pub trait RenderDevice {
    /// Compiles and links a program from vertex/fragment sources.
    fn compile_program(
        &mut self,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<ProgramId, DeviceError>;

    /// Makes `program` the active program; `None` unbinds.
    fn use_program(&mut self, program: Option<ProgramId>);

    /// Uploads `value` to the named uniform of the active program.
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), DeviceError>;

    fn load_texture_2d(&mut self, path: &str) -> Result<TextureId, DeviceError>;

    /// Loads the six faces of a cube map from `base_path` plus the usual
    /// per-face suffixes.
    fn load_cubemap(&mut self, base_path: &str) -> Result<TextureId, DeviceError>;

    fn bind_texture_2d(&mut self, unit: u32, texture: Option<TextureId>);

    fn bind_cubemap(&mut self, unit: u32, texture: Option<TextureId>);

    /// Uploads a CPU-side mesh template and returns a drawable handle.
    fn upload_mesh(&mut self, template: &MeshTemplate) -> MeshId;

    fn draw_mesh(&mut self, mesh: MeshId);

    fn create_offscreen_target(&mut self, width: u32, height: u32) -> OffscreenTarget;

    /// Redirects rendering into an offscreen target; `None` restores the
    /// default framebuffer.
    fn bind_offscreen_target(&mut self, target: Option<&OffscreenTarget>);

    /// Toggles the hardware clip plane used by reflection/refraction passes.
    fn set_clip_distance(&mut self, enabled: bool);

    /// Clears color and depth buffers.
    fn clear(&mut self, color: [f32; 4]);

    fn set_front_face(&mut self, winding: Winding);

    fn set_depth_write(&mut self, enabled: bool);

    fn set_polygon_offset_fill(&mut self, enabled: bool);

    fn set_polygon_offset(&mut self, factor: f32, units: f32);
}
