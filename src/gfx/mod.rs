//! # Graphics Module
//!
//! Everything graphics-related: the device abstraction, procedural geometry,
//! the forward renderer, resource types and the scene graph.
//!
//! ## Architecture Overview
//!
//! - **Device Abstraction** ([`device`]) - The [`RenderDevice`](device::RenderDevice)
//!   trait the renderer core draws through; backends implement it
//! - **Procedural Geometry** ([`geometry`]) - Sphere, torus, cube, plane,
//!   circle and cylinder generators plus normal computation
//! - **Rendering Pipeline** ([`rendering`]) - Phong forward renderer with a
//!   sun, a spotlight, five point lights, a skybox pass and water shading
//! - **Resource Management** ([`resources`]) - Materials, models and the OBJ
//!   loader
//! - **Scene Management** ([`scene`]) - Arena scene graph with per-node
//!   transforms and subtree builders
//! - **Camera System** ([`camera`]) - Position plus yaw/pitch free camera

pub mod camera;
pub mod device;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

#[cfg(test)]
pub mod test_device;
