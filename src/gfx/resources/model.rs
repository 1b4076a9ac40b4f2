//! Drawable model: uploaded meshes paired with their materials.

use crate::gfx::device::MeshId;
use crate::gfx::resources::material::Material;

/// An ordered list of uploaded meshes and a parallel list of materials.
///
/// Mesh `i` is always drawn with material `i`; the two lists stay equal in
/// length because they only grow through [`Model::push`].
#[derive(Debug, Clone, Default)]
pub struct Model {
    meshes: Vec<MeshId>,
    materials: Vec<Material>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mesh: MeshId, material: Material) {
        self.meshes.push(mesh);
        self.materials.push(material);
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Iterates mesh/material pairs in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &Material)> {
        self.meshes.iter().copied().zip(self.materials.iter())
    }

    pub fn materials_mut(&mut self) -> &mut [Material] {
        &mut self.materials
    }
}
