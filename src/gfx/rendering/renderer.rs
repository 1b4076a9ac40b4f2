//! # Renderer
//!
//! Owns the projection matrix, the two compiled programs (main and skybox)
//! and the lighting configuration, and turns a scene graph into an ordered
//! stream of device calls each frame.
//!
//! The per-frame binding sequence is load-bearing and must stay in this
//! order: clear, skybox (inverted winding, depth writes off), main program,
//! global uniforms, then a depth-first pre-order walk of the graph emitting
//! one draw per mesh/material pair. Per-frame values are gathered into an
//! immutable [`FrameParams`] and passed down the call chain instead of being
//! read from mutable shared state.

use cgmath::{InnerSpace, Matrix3, Matrix4, SquareMatrix, Vector3, Vector4};
use log::info;

use crate::gfx::camera::Camera;
use crate::gfx::device::{
    DeviceError, ProgramId, RenderDevice, TextureId, UniformValue, Winding,
};
use crate::gfx::resources::{Material, Model};
use crate::gfx::scene::{NodeId, NodeKind, SceneGraph};

/// Fixed texture unit assignments shared with the main fragment shader.
pub const DIFFUSE_MAP_UNIT: u32 = 0;
pub const SPECULAR_MAP_UNIT: u32 = 1;
pub const CUBE_MAP_UNIT: u32 = 2;
pub const NORMAL_MAP_UNIT: u32 = 3;
pub const HEIGHT_MAP_UNIT: u32 = 4;

/// The shader declares exactly this many point lights.
pub const POINT_LIGHT_COUNT: usize = 5;

#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub specular: Vector3<f32>,
}

#[derive(Debug, Clone)]
pub struct SpotLight {
    pub position: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub specular: Vector3<f32>,
}

#[derive(Debug, Clone)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub specular: Vector3<f32>,
}

/// Full lighting rig: one sun, one spotlight, five point lights.
#[derive(Debug, Clone)]
pub struct Lighting {
    pub sun: DirectionalLight,
    pub spot: SpotLight,
    pub points: [PointLight; POINT_LIGHT_COUNT],
}

impl Default for Lighting {
    fn default() -> Self {
        let point = |position: Vector3<f32>, diffuse: Vector3<f32>| PointLight {
            position,
            diffuse,
            ambient: Vector3::new(0.25, 0.25, 0.25),
            specular: Vector3::new(0.12, 0.12, 0.12),
        };
        Self {
            sun: DirectionalLight {
                // From the light's position toward the origin.
                direction: (Vector3::new(0.0, 0.0, 0.0) - Vector3::new(-25.0, 20.0, -25.0))
                    .normalize(),
                diffuse: Vector3::new(0.5, 0.45, 0.5),
                ambient: Vector3::new(0.25, 0.25, 0.25),
                specular: Vector3::new(0.12, 0.12, 0.12),
            },
            spot: SpotLight {
                position: Vector3::new(25.0, 1.0, -25.0),
                diffuse: Vector3::new(0.6, 0.45, 0.35),
                ambient: Vector3::new(0.2, 0.2, 0.2),
                specular: Vector3::new(0.12, 0.12, 0.12),
            },
            points: [
                point(Vector3::new(0.0, 5.0, -14.0), Vector3::new(20.0, 18.0, 15.0)),
                point(Vector3::new(25.0, 5.0, -25.0), Vector3::new(0.0, 15.0, 0.0)),
                point(Vector3::new(30.0, 5.0, 54.0), Vector3::new(15.0, 0.0, 0.0)),
                point(Vector3::new(24.0, 5.0, -39.0), Vector3::new(0.0, 0.0, 15.0)),
                point(Vector3::new(46.0, 5.0, -44.0), Vector3::new(15.0, 15.0, 0.0)),
            ],
        }
    }
}

/// Vertex/fragment source pair handed to the device for compilation.
pub struct ShaderSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

/// Immutable per-frame values, built once in [`Renderer::render`] and
/// passed down instead of read from shared state.
struct FrameParams<'a> {
    view: Matrix4<f32>,
    camera_pos: Vector3<f32>,
    time: f32,
    clip_plane: Vector4<f32>,
    lighting: &'a Lighting,
}

pub struct Renderer {
    projection: Matrix4<f32>,
    program: ProgramId,
    skybox_program: ProgramId,
    pub lighting: Lighting,
    /// Implicit plane `(a, b, c, d)` meaning `a·x + b·y + c·z + d = 0`;
    /// fragments on the negative side are discarded when the device's clip
    /// distance is enabled.
    pub clip_plane: Vector4<f32>,
}

fn set(
    device: &mut dyn RenderDevice,
    name: &str,
    value: impl Into<UniformValue>,
) -> Result<(), DeviceError> {
    device.set_uniform(name, value.into())
}

fn presence(map: Option<TextureId>) -> f32 {
    if map.is_some() {
        1.0
    } else {
        0.0
    }
}

impl Renderer {
    /// Compiles both pipelines. Shader compile errors are fatal at startup
    /// and propagate to the caller.
    pub fn new(
        device: &mut dyn RenderDevice,
        projection: Matrix4<f32>,
        main: &ShaderSources,
        skybox: &ShaderSources,
    ) -> Result<Self, DeviceError> {
        let program = device.compile_program(main.vertex, main.fragment)?;
        let skybox_program = device.compile_program(skybox.vertex, skybox.fragment)?;
        info!("renderer initialized (main and skybox programs compiled)");
        Ok(Self {
            projection,
            program,
            skybox_program,
            lighting: Lighting::default(),
            clip_plane: Vector4::new(0.0, 1.0, 0.0, -0.8),
        })
    }

    /// Renders one frame: skybox first, then the scene graph rooted at
    /// `root`. Any missing uniform aborts the pass with an error.
    pub fn render(
        &self,
        device: &mut dyn RenderDevice,
        camera: &Camera,
        scene: &SceneGraph,
        root: NodeId,
        skybox: &Model,
        time: f32,
    ) -> Result<(), DeviceError> {
        device.clear([0.0, 0.0, 0.0, 1.0]);
        device.set_polygon_offset_fill(true);

        let view = camera.view_matrix();
        self.draw_skybox(device, skybox, view)?;

        device.use_program(Some(self.program));
        let frame = FrameParams {
            view,
            camera_pos: camera.pos,
            time,
            clip_plane: self.clip_plane,
            lighting: &self.lighting,
        };
        self.upload_frame_uniforms(device, &frame)?;
        self.draw_node(device, scene, root, Matrix4::identity())?;

        device.set_polygon_offset_fill(false);
        Ok(())
    }

    /// Draws the skybox with the translation stripped from the view matrix,
    /// front-face winding inverted and depth writes disabled, restoring both
    /// afterward. This keeps the box infinitely distant: it can neither
    /// occlude nor be occluded incorrectly.
    fn draw_skybox(
        &self,
        device: &mut dyn RenderDevice,
        skybox: &Model,
        view: Matrix4<f32>,
    ) -> Result<(), DeviceError> {
        device.use_program(Some(self.skybox_program));
        device.set_front_face(Winding::Clockwise);
        device.set_depth_write(false);

        set(device, "uCubeMap", 0i32)?;
        let rotation_only = Matrix4::from(Matrix3::from_cols(
            view.x.truncate(),
            view.y.truncate(),
            view.z.truncate(),
        ));
        set(device, "uViewProj", self.projection * rotation_only)?;
        for (mesh, material) in skybox.iter() {
            device.bind_cubemap(0, material.cube_map);
            device.draw_mesh(mesh);
        }

        device.set_front_face(Winding::CounterClockwise);
        device.set_depth_write(true);
        device.use_program(None);
        Ok(())
    }

    fn upload_frame_uniforms(
        &self,
        device: &mut dyn RenderDevice,
        frame: &FrameParams,
    ) -> Result<(), DeviceError> {
        set(device, "uCameraPos", frame.camera_pos)?;

        let sun = &frame.lighting.sun;
        set(device, "uSun.direction", sun.direction)?;
        set(device, "uSun.diffuse", sun.diffuse)?;
        set(device, "uSun.ambient", sun.ambient)?;
        set(device, "uSun.specular", sun.specular)?;

        let spot = &frame.lighting.spot;
        set(device, "uSpot.position", spot.position)?;
        set(device, "uSpot.diffuse", spot.diffuse)?;
        set(device, "uSpot.ambient", spot.ambient)?;
        set(device, "uSpot.specular", spot.specular)?;

        for (i, point) in frame.lighting.points.iter().enumerate() {
            set(device, &format!("uPoint[{i}].position"), point.position)?;
            set(device, &format!("uPoint[{i}].diffuse"), point.diffuse)?;
            set(device, &format!("uPoint[{i}].ambient"), point.ambient)?;
            set(device, &format!("uPoint[{i}].specular"), point.specular)?;
        }

        set(device, "uDiffuseMap", DIFFUSE_MAP_UNIT as i32)?;
        set(device, "uSpecularMap", SPECULAR_MAP_UNIT as i32)?;
        set(device, "uCubeMap", CUBE_MAP_UNIT as i32)?;
        set(device, "uNormalMap", NORMAL_MAP_UNIT as i32)?;
        set(device, "uHeightMap", HEIGHT_MAP_UNIT as i32)?;
        set(device, "uNow", frame.time)?;
        set(device, "uClipPlane", frame.clip_plane)?;
        set(device, "uViewProj", self.projection * frame.view)?;
        Ok(())
    }

    /// Depth-first pre-order walk. The world matrix accumulates through
    /// invisible nodes; only their own draw calls are skipped.
    fn draw_node(
        &self,
        device: &mut dyn RenderDevice,
        scene: &SceneGraph,
        id: NodeId,
        parent_world: Matrix4<f32>,
    ) -> Result<(), DeviceError> {
        let node = scene.node(id);
        let world = parent_world * node.local_transform();
        set(device, "uModel", world)?;

        if !node.invisible {
            for (mesh, material) in node.model.iter() {
                self.upload_material(device, material, node.kind)?;
                bind_material_textures(device, material);
                device.draw_mesh(mesh);
            }
        }
        for &child in node.children() {
            self.draw_node(device, scene, child, world)?;
        }
        Ok(())
    }

    /// Uploads one material's uniforms. Map factors collapse to zero for
    /// absent textures; cube and reflection maps use the material's blend
    /// weight when present.
    fn upload_material(
        &self,
        device: &mut dyn RenderDevice,
        material: &Material,
        kind: NodeKind,
    ) -> Result<(), DeviceError> {
        set(device, "uDiffuseMapFactor", presence(material.diffuse_map))?;
        set(device, "uSpecularMapFactor", presence(material.specular_map))?;
        set(
            device,
            "uCubeMapFactor",
            if material.cube_map.is_some() {
                material.cube_map_factor
            } else {
                0.0
            },
        )?;
        set(device, "uNormalMapFactor", presence(material.normal_map))?;
        set(device, "uHeightMapFactor", presence(material.height_map))?;
        set(
            device,
            "uReflectionMapFactor",
            if material.reflection_map.is_some() {
                material.reflection_map_factor
            } else {
                0.0
            },
        )?;

        set(device, "uMat.ambient", material.ambient)?;
        set(device, "uMat.diffuse", material.diffuse)?;
        set(device, "uMat.specular", material.specular)?;
        set(device, "uMat.phongExp", material.phong_exp)?;

        let (is_water, is_water_surface) = match kind {
            NodeKind::Empty | NodeKind::StaticMesh | NodeKind::Reflective => (false, false),
            NodeKind::WaterSurface => (true, true),
            NodeKind::Water => (true, false),
        };
        set(device, "uIsWater", is_water)?;
        set(device, "uIsWaterSurface", is_water_surface)?;
        Ok(())
    }
}

fn bind_material_textures(device: &mut dyn RenderDevice, material: &Material) {
    device.bind_texture_2d(DIFFUSE_MAP_UNIT, material.diffuse_map);
    device.bind_texture_2d(SPECULAR_MAP_UNIT, material.specular_map);
    device.bind_cubemap(CUBE_MAP_UNIT, material.cube_map);
    device.bind_texture_2d(NORMAL_MAP_UNIT, material.normal_map);
    device.bind_texture_2d(HEIGHT_MAP_UNIT, material.height_map);
}
