//! Phong material description.
//!
//! A material is flat shading parameters plus optional texture maps. Absent
//! maps are `None`, and the renderer forces the matching `*_Factor` uniform
//! to zero for them, so a material never accidentally samples an unbound
//! texture unit.

use cgmath::{Vector3, Vector4};

use crate::gfx::device::TextureId;

/// Surface appearance for one mesh.
#[derive(Debug, Clone)]
pub struct Material {
    pub ambient: Vector3<f32>,
    /// Diffuse color; the alpha channel carries transparency.
    pub diffuse: Vector4<f32>,
    pub specular: Vector3<f32>,
    pub phong_exp: f32,

    pub diffuse_map: Option<TextureId>,
    pub specular_map: Option<TextureId>,
    pub normal_map: Option<TextureId>,
    pub height_map: Option<TextureId>,
    pub cube_map: Option<TextureId>,
    pub reflection_map: Option<TextureId>,

    /// Blend weight of the cube map against the flat color, applied only
    /// when `cube_map` is present.
    pub cube_map_factor: f32,
    /// Blend weight of the reflection map, applied only when
    /// `reflection_map` is present.
    pub reflection_map_factor: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vector3::new(1.0, 1.0, 1.0),
            diffuse: Vector4::new(1.0, 1.0, 1.0, 1.0),
            specular: Vector3::new(0.0, 0.0, 0.0),
            phong_exp: 5.0,
            diffuse_map: None,
            specular_map: None,
            normal_map: None,
            height_map: None,
            cube_map: None,
            reflection_map: None,
            cube_map_factor: 1.0,
            reflection_map_factor: 1.0,
        }
    }
}
