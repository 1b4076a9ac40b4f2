//! OBJ/MTL model loading.
//!
//! Parses an OBJ file into mesh templates, computes smooth normals when the
//! file carries none, uploads each mesh through the device and translates
//! MTL entries into [`Material`]s. Texture paths in the MTL are resolved
//! relative to the OBJ file and loaded through the device as well.

use std::path::Path;

use anyhow::Context;
use cgmath::{Vector2, Vector3, Vector4};
use log::{debug, warn};

use crate::gfx::device::RenderDevice;
use crate::gfx::geometry::MeshTemplate;
use crate::gfx::resources::material::Material;
use crate::gfx::resources::model::Model;

/// Loads an OBJ file into a drawable [`Model`].
///
/// Missing MTL data falls back to the default material; a mesh without
/// normals gets smooth vertex normals computed from its indices.
pub fn load_obj(device: &mut dyn RenderDevice, path: &str) -> anyhow::Result<Model> {
    let (meshes, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("failed to load OBJ file {path}"))?;

    let mtl = materials.unwrap_or_else(|err| {
        warn!("no usable MTL for {path}: {err}; using default materials");
        Vec::new()
    });
    let base_dir = Path::new(path).parent().unwrap_or_else(|| Path::new("."));

    let mut model = Model::new();
    for loaded in &meshes {
        let mesh = &loaded.mesh;
        let mut template = MeshTemplate {
            positions: mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vector3::new(p[0], p[1], p[2]))
                .collect(),
            tex_coords: mesh
                .texcoords
                .chunks_exact(2)
                .map(|t| Vector2::new(t[0], t[1]))
                .collect(),
            normals: mesh
                .normals
                .chunks_exact(3)
                .map(|n| Vector3::new(n[0], n[1], n[2]))
                .collect(),
            indices: mesh.indices.clone(),
            ..Default::default()
        };
        if template.normals.len() != template.positions.len() {
            template.normals.clear();
            template
                .compute_vertex_normals()
                .with_context(|| format!("mesh {:?} in {path} has no triangles", loaded.name))?;
        }

        let material = match mesh.material_id.and_then(|id| mtl.get(id)) {
            Some(entry) => convert_material(device, entry, base_dir)?,
            None => Material::default(),
        };

        debug!(
            "loaded mesh {:?} from {path}: {} vertices, {} triangles",
            loaded.name,
            template.vertex_count(),
            template.triangle_count()
        );
        let mesh_id = device.upload_mesh(&template);
        model.push(mesh_id, material);
    }

    Ok(model)
}

fn convert_material(
    device: &mut dyn RenderDevice,
    entry: &tobj::Material,
    base_dir: &Path,
) -> anyhow::Result<Material> {
    let mut material = Material::default();
    if let Some(ambient) = entry.ambient {
        material.ambient = Vector3::from(ambient);
    }
    if let Some(diffuse) = entry.diffuse {
        let alpha = entry.dissolve.unwrap_or(1.0);
        material.diffuse = Vector4::new(diffuse[0], diffuse[1], diffuse[2], alpha);
    }
    if let Some(specular) = entry.specular {
        material.specular = Vector3::from(specular);
    }
    if let Some(shininess) = entry.shininess {
        material.phong_exp = shininess;
    }
    if let Some(texture) = &entry.diffuse_texture {
        let resolved = base_dir.join(texture);
        let texture_path = resolved.to_string_lossy();
        material.diffuse_map = Some(
            device
                .load_texture_2d(&texture_path)
                .with_context(|| format!("diffuse map for material {:?}", entry.name))?,
        );
    }
    Ok(material)
}
