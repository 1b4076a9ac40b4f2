//! Interleaved vertex format handed to device implementations.

use bytemuck::{Pod, Zeroable};

use crate::gfx::geometry::MeshTemplate;

/// One interleaved vertex as uploaded to the GPU.
///
/// Attributes a template does not carry are filled with defaults: white
/// color, zeroed texture coordinates, +Y normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn layout_size() -> usize {
        std::mem::size_of::<Self>()
    }
}

impl MeshTemplate {
    /// Interleaves the attribute arrays into the upload format.
    pub fn to_vertices(&self) -> Vec<Vertex> {
        (0..self.positions.len())
            .map(|i| Vertex {
                position: self.positions[i].into(),
                color: self
                    .colors
                    .get(i)
                    .copied()
                    .map(Into::into)
                    .unwrap_or([1.0, 1.0, 1.0, 1.0]),
                tex_coord: self
                    .tex_coords
                    .get(i)
                    .copied()
                    .map(Into::into)
                    .unwrap_or([0.0, 0.0]),
                normal: self
                    .normals
                    .get(i)
                    .copied()
                    .map(Into::into)
                    .unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_plane;

    #[test]
    fn interleaving_matches_vertex_count() {
        let mut plane = generate_plane(2, 2);
        plane.compute_vertex_normals().unwrap();
        let vertices = plane.to_vertices();
        assert_eq!(vertices.len(), plane.vertex_count());

        // Pod cast must produce one tightly packed record per vertex.
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertices.len() * Vertex::layout_size());
    }

    #[test]
    fn missing_attributes_get_defaults() {
        let plane = generate_plane(1, 1);
        let vertices = plane.to_vertices();
        assert_eq!(vertices[0].color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(vertices[0].normal, [0.0, 1.0, 0.0]);
    }
}
