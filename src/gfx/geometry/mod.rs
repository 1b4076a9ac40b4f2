//! # Procedural Geometry
//!
//! CPU-side mesh descriptions and the passes that operate on them before GPU
//! upload. A [`MeshTemplate`] is a plain bag of parallel attribute arrays:
//! positions, plus optional colors, texture coordinates and normals, and an
//! optional triangle-list index buffer.
//!
//! Two mutually exclusive normal passes are provided:
//!
//! - [`MeshTemplate::compute_vertex_normals`] averages face normals into the
//!   shared vertices of an *indexed* template (smooth shading).
//! - [`MeshTemplate::compute_face_normals`] assigns one flat normal per
//!   triangle of an *unindexed* template (faceted shading).
//!
//! [`MeshTemplate::expand_indices`] converts between the two worlds by
//! duplicating shared vertices, which is required before flat-shading an
//! indexed template such as the cube.

pub mod primitives;

pub use primitives::*;

use cgmath::{InnerSpace, Vector2, Vector3, Vector4};
use thiserror::Error;

/// Precondition violations in the mesh generator.
///
/// These are programmer errors: deterministic, reported at the call site and
/// fatal to the calling operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("{operation} requires the mesh template to have indices")]
    MissingIndices { operation: &'static str },

    #[error("{operation} requires the mesh template to not use indices")]
    HasIndices { operation: &'static str },
}

/// Mesh data ready for GPU upload.
///
/// Invariants: any non-empty optional attribute array has exactly
/// `positions.len()` entries, and every index is `< positions.len()`.
/// Normals are absent until a normal pass runs.
#[derive(Debug, Clone, Default)]
pub struct MeshTemplate {
    pub positions: Vec<Vector3<f32>>,
    pub colors: Vec<Vector4<f32>>,
    pub tex_coords: Vec<Vector2<f32>>,
    pub normals: Vec<Vector3<f32>>,
    /// Triangle list, three indices per face.
    pub indices: Vec<u32>,
}

impl MeshTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        if self.indices.is_empty() {
            self.positions.len() / 3
        } else {
            self.indices.len() / 3
        }
    }

    /// Computes smooth per-vertex normals by averaging the face normals of
    /// every triangle sharing a vertex.
    ///
    /// Requires the template to be indexed; vertices shared between faces
    /// are what makes the averaging meaningful.
    pub fn compute_vertex_normals(&mut self) -> Result<(), GeometryError> {
        if self.indices.is_empty() {
            return Err(GeometryError::MissingIndices {
                operation: "compute_vertex_normals",
            });
        }
        self.normals = vec![Vector3::new(0.0, 0.0, 0.0); self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (i1, i2, i3) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let a = self.positions[i2] - self.positions[i1];
            let b = self.positions[i3] - self.positions[i1];
            let face_normal = a.cross(b).normalize();
            self.normals[i1] += face_normal;
            self.normals[i2] += face_normal;
            self.normals[i3] += face_normal;
        }
        for normal in &mut self.normals {
            *normal = normal.normalize();
        }
        Ok(())
    }

    /// Computes flat per-face normals, assigning the same normal to all
    /// three vertices of each consecutive triple.
    ///
    /// Requires the template to be unindexed; run [`expand_indices`] first
    /// on indexed data. Any trailing vertices past the last full triangle
    /// keep a placeholder normal.
    ///
    /// [`expand_indices`]: MeshTemplate::expand_indices
    pub fn compute_face_normals(&mut self) -> Result<(), GeometryError> {
        if !self.indices.is_empty() {
            return Err(GeometryError::HasIndices {
                operation: "compute_face_normals",
            });
        }
        self.normals = vec![Vector3::new(1.0, 0.0, 0.0); self.positions.len()];
        for i in (0..self.positions.len().saturating_sub(2)).step_by(3) {
            let a = self.positions[i + 1] - self.positions[i];
            let b = self.positions[i + 2] - self.positions[i];
            let face_normal = a.cross(b).normalize();
            for j in 0..3 {
                self.normals[i + j] = face_normal;
            }
        }
        Ok(())
    }

    /// Rebuilds every attribute array by index lookup, producing an
    /// index-free template where no vertex is shared between triangles.
    pub fn expand_indices(&self) -> Result<MeshTemplate, GeometryError> {
        if self.indices.is_empty() {
            return Err(GeometryError::MissingIndices {
                operation: "expand_indices",
            });
        }
        let mut expanded = MeshTemplate::new();
        for &i in &self.indices {
            let i = i as usize;
            expanded.positions.push(self.positions[i]);
            if !self.colors.is_empty() {
                expanded.colors.push(self.colors[i]);
            }
            if !self.tex_coords.is_empty() {
                expanded.tex_coords.push(self.tex_coords[i]);
            }
            if !self.normals.is_empty() {
                expanded.normals.push(self.normals[i]);
            }
        }
        Ok(expanded)
    }
}
