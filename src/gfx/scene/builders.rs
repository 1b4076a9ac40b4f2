//! Scene-assembly recipes.
//!
//! Declarative builders that assemble composite subtrees from primitive
//! templates: a coin (two circular faces plus a cylindrical edge), open
//! rectangular volumes for sand and water, and the skybox cube. Each builder
//! fixes which geometry gets which material and which [`NodeKind`], uploads
//! its meshes through the device, and returns the subtree root for the
//! caller to place and attach.

use cgmath::{Deg, Rad, Vector3, Vector4};
use log::debug;

use crate::gfx::device::{RenderDevice, TextureId};
use crate::gfx::geometry::{generate_circle, generate_cube, generate_cylinder, generate_plane};
use crate::gfx::resources::{Material, Model};
use crate::gfx::scene::{Node, NodeId, NodeKind, SceneGraph};

const COIN_THICKNESS: f32 = 0.1;

/// Builds a coin: two unit-circle faces at `z = ±thickness/2` (the back
/// face rotated half a turn about Y) and a cylinder edge. Both faces share
/// one uploaded mesh and the face material; the edge gets its own.
///
/// The returned root is left at identity for the caller to place.
pub fn coin(
    scene: &mut SceneGraph,
    device: &mut dyn RenderDevice,
    face_material: Material,
    edge_material: Material,
) -> NodeId {
    let mut face_template = generate_circle(1.0, 64);
    face_template
        .compute_vertex_normals()
        .expect("circle template is indexed");
    let face_mesh = device.upload_mesh(&face_template);

    let mut edge_template = generate_cylinder(1.0, COIN_THICKNESS, 64);
    edge_template
        .compute_vertex_normals()
        .expect("cylinder template is indexed");
    let edge_mesh = device.upload_mesh(&edge_template);

    let root = scene.add(Node::default());

    let mut front_model = Model::new();
    front_model.push(face_mesh, face_material.clone());
    let mut front = Node::with_model(NodeKind::StaticMesh, front_model);
    front.translation.z = COIN_THICKNESS / 2.0;
    scene.add_child(root, front);

    let mut back_model = Model::new();
    back_model.push(face_mesh, face_material);
    let mut back = Node::with_model(NodeKind::StaticMesh, back_model);
    back.translation.z = -COIN_THICKNESS / 2.0;
    back.rotation.y = Rad::from(Deg(180.0)).0;
    scene.add_child(root, back);

    let mut edge_model = Model::new();
    edge_model.push(edge_mesh, edge_material);
    scene.add_child(root, Node::with_model(NodeKind::StaticMesh, edge_model));

    debug!("built coin subtree");
    root
}

/// Builds an open box of `width x height x depth`: four side planes plus a
/// top plane at `z = depth`. The public wrappers rotate the root -90° about
/// X so the top faces +Y.
fn volume(
    scene: &mut SceneGraph,
    device: &mut dyn RenderDevice,
    width: u32,
    height: u32,
    depth: u32,
    top_material: Material,
    side_material: Material,
    top_kind: NodeKind,
    side_kind: NodeKind,
) -> NodeId {
    let (w, h, d) = (width as f32, height as f32, depth as f32);

    let dims = [
        (depth, height),
        (depth, height),
        (width, depth),
        (width, depth),
    ];
    let rotations = [
        Vector3::new(0.0, Rad::from(Deg(-90.0)).0, 0.0),
        Vector3::new(0.0, Rad::from(Deg(90.0)).0, 0.0),
        Vector3::new(Rad::from(Deg(90.0)).0, 0.0, 0.0),
        Vector3::new(Rad::from(Deg(-90.0)).0, 0.0, 0.0),
    ];
    let translations = [
        Vector3::new(-w / 2.0, 0.0, d / 2.0),
        Vector3::new(w / 2.0, 0.0, d / 2.0),
        Vector3::new(0.0, -h / 2.0, d / 2.0),
        Vector3::new(0.0, h / 2.0, d / 2.0),
    ];

    let root = scene.add(Node::default());
    for i in 0..4 {
        let mut side_template = generate_plane(dims[i].0, dims[i].1);
        side_template
            .compute_vertex_normals()
            .expect("plane template is indexed");
        let mut side_model = Model::new();
        side_model.push(device.upload_mesh(&side_template), side_material.clone());

        let mut side = Node::with_model(side_kind, side_model);
        side.translation = translations[i];
        side.rotation = rotations[i];
        scene.add_child(root, side);
    }

    let mut top_template = generate_plane(width, height);
    top_template
        .compute_vertex_normals()
        .expect("plane template is indexed");
    let mut top_model = Model::new();
    top_model.push(device.upload_mesh(&top_template), top_material);

    let mut top = Node::with_model(top_kind, top_model);
    top.translation = Vector3::new(0.0, 0.0, d);
    scene.add_child(root, top);

    root
}

/// Builds a sand volume: a static open box with the caller's sand materials
/// on top and sides.
pub fn sand_volume(
    scene: &mut SceneGraph,
    device: &mut dyn RenderDevice,
    width: u32,
    height: u32,
    depth: u32,
    top_material: Material,
    side_material: Material,
) -> NodeId {
    let root = volume(
        scene,
        device,
        width,
        height,
        depth,
        top_material,
        side_material,
        NodeKind::StaticMesh,
        NodeKind::StaticMesh,
    );
    scene.node_mut(root).rotation.x = Rad::from(Deg(-90.0)).0;
    debug!("built sand volume {width}x{height}x{depth}");
    root
}

/// Builds a water volume: translucent water-blue sides tagged `Water` and a
/// `WaterSurface` top. The optional refraction map becomes the surface's
/// diffuse map and the optional reflection map its reflection map; the
/// offscreen pass that would fill them is wired by the application.
pub fn water_volume(
    scene: &mut SceneGraph,
    device: &mut dyn RenderDevice,
    width: u32,
    height: u32,
    depth: u32,
    refraction_map: Option<TextureId>,
    reflection_map: Option<TextureId>,
) -> NodeId {
    let water_blue = Vector4::new(0.306, 0.69, 0.76, 0.3);
    let surface_material = Material {
        diffuse_map: refraction_map,
        reflection_map,
        diffuse: water_blue,
        specular: Vector3::new(0.5, 0.5, 0.5),
        phong_exp: 50.0,
        cube_map_factor: 0.3,
        reflection_map_factor: 0.4,
        ..Default::default()
    };
    let side_material = Material {
        diffuse: water_blue,
        ..Default::default()
    };

    let root = volume(
        scene,
        device,
        width,
        height,
        depth,
        surface_material,
        side_material,
        NodeKind::WaterSurface,
        NodeKind::Water,
    );
    scene.node_mut(root).rotation.x = Rad::from(Deg(-90.0)).0;
    debug!("built water volume {width}x{height}x{depth}");
    root
}

/// Builds the skybox model: a unit cube with a cube-map-only material.
pub fn skybox(device: &mut dyn RenderDevice, cube_map: TextureId) -> Model {
    let template = generate_cube(1.0);
    let mut model = Model::new();
    model.push(
        device.upload_mesh(&template),
        Material {
            cube_map: Some(cube_map),
            ..Default::default()
        },
    );
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::test_device::RecordingDevice;

    #[test]
    fn coin_has_two_faces_and_an_edge() {
        let mut scene = SceneGraph::new();
        let mut device = RecordingDevice::new();
        let root = coin(
            &mut scene,
            &mut device,
            Material::default(),
            Material::default(),
        );

        let children = scene.node(root).children().to_vec();
        assert_eq!(children.len(), 3);
        for &child in &children {
            assert_eq!(scene.node(child).model.len(), 1);
            assert_eq!(scene.node(child).kind, NodeKind::StaticMesh);
        }

        // The faces share one uploaded mesh, offset to either side.
        let front = scene.node(children[0]);
        let back = scene.node(children[1]);
        assert_eq!(front.translation.z, COIN_THICKNESS / 2.0);
        assert_eq!(back.translation.z, -COIN_THICKNESS / 2.0);
        let front_mesh = front.model.iter().next().unwrap().0;
        let back_mesh = back.model.iter().next().unwrap().0;
        assert_eq!(front_mesh, back_mesh);

        // Two uploads total: the shared face and the edge.
        assert_eq!(device.uploaded_meshes.len(), 2);
    }

    #[test]
    fn water_volume_kinds() {
        let mut scene = SceneGraph::new();
        let mut device = RecordingDevice::new();
        let root = water_volume(&mut scene, &mut device, 10, 10, 2, None, None);

        let children = scene.node(root).children().to_vec();
        assert_eq!(children.len(), 5);
        for &side in &children[..4] {
            assert_eq!(scene.node(side).kind, NodeKind::Water);
        }
        assert_eq!(scene.node(children[4]).kind, NodeKind::WaterSurface);
    }

    #[test]
    fn water_surface_material_wires_the_pass_textures() {
        let mut scene = SceneGraph::new();
        let mut device = RecordingDevice::new();
        let refraction = device.load_texture_2d("refraction").unwrap();
        let reflection = device.load_texture_2d("reflection").unwrap();
        let root = water_volume(
            &mut scene,
            &mut device,
            10,
            10,
            2,
            Some(refraction),
            Some(reflection),
        );

        let children = scene.node(root).children().to_vec();
        let (_, surface) = scene.node(children[4]).model.iter().next().unwrap();
        assert_eq!(surface.diffuse_map, Some(refraction));
        assert_eq!(surface.reflection_map, Some(reflection));
        assert_eq!(surface.diffuse, Vector4::new(0.306, 0.69, 0.76, 0.3));
        assert_eq!(surface.cube_map_factor, 0.3);
        assert_eq!(surface.reflection_map_factor, 0.4);

        // The sides only share the water color, not the pass textures.
        let (_, side) = scene.node(children[0]).model.iter().next().unwrap();
        assert_eq!(side.diffuse, surface.diffuse);
        assert_eq!(side.diffuse_map, None);
        assert_eq!(side.reflection_map, None);
    }

    #[test]
    fn sand_volume_is_static_and_rotated_upright() {
        let mut scene = SceneGraph::new();
        let mut device = RecordingDevice::new();
        let root = sand_volume(
            &mut scene,
            &mut device,
            8,
            8,
            1,
            Material::default(),
            Material::default(),
        );

        assert_eq!(scene.node(root).rotation.x, Rad::from(Deg(-90.0f32)).0);
        for &child in scene.node(root).children() {
            assert_eq!(scene.node(child).kind, NodeKind::StaticMesh);
        }
    }

    #[test]
    fn skybox_is_one_cube_with_a_cube_map() {
        let mut device = RecordingDevice::new();
        let model = skybox(&mut device, TextureId(7));
        assert_eq!(model.len(), 1);
        let (_, material) = model.iter().next().unwrap();
        assert_eq!(material.cube_map, Some(TextureId(7)));
        assert_eq!(device.uploaded_meshes[0].vertex_count(), 8);
    }
}
