//! # Primitive Shape Generation
//!
//! Parametric generators for the primitive solids the scene builders are
//! assembled from. All generators are pure: numeric parameters in, a
//! [`MeshTemplate`] out, no side effects.
//!
//! Except for the sphere, whose normals are analytic, the templates come
//! back without normals; run one of the normal passes before upload.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Matrix3, Rad, Vector2, Vector3};

use super::MeshTemplate;

/// Generates a UV sphere centered at the origin.
///
/// Builds `tessellation / 2 + 1` latitude rings of `tessellation + 1`
/// vertices each, starting at the bottom pole (the ring at three quarters of
/// a turn) and sweeping through the top pole. Each normal is the normalized
/// position vector, so no separate normal pass is needed.
pub fn generate_sphere(radius: f32, tessellation: u32) -> MeshTemplate {
    let mut sphere = MeshTemplate::new();

    let angle_inc = 2.0 * PI / tessellation as f32;
    let stacks = tessellation / 2;
    let start = 3 * tessellation / 4;
    for i in start..=start + stacks {
        let alpha = angle_inc * i as f32;
        let y = radius * alpha.sin();
        let slice_radius = radius * alpha.cos();
        for j in 0..=tessellation {
            let beta = angle_inc * j as f32;
            let position = Vector3::new(slice_radius * beta.sin(), y, slice_radius * beta.cos());
            sphere.positions.push(position);
            sphere.tex_coords.push(Vector2::new(
                j as f32 / tessellation as f32,
                (i - start) as f32 * 2.0 / tessellation as f32,
            ));
            sphere.normals.push(position.normalize());
        }
    }
    let ring = tessellation + 1;
    for i in 1..=stacks {
        let prev = ring * (i - 1);
        let curr = ring * i;
        for j in 0..tessellation {
            sphere.indices.extend_from_slice(&[
                curr + j,
                prev + j,
                prev + j + 1,
                prev + j + 1,
                curr + j + 1,
                curr + j,
            ]);
        }
    }

    sphere
}

/// Generates a torus around the Y axis.
///
/// One tube cross-section circle of `tessellation + 1` points is built in
/// the XY plane, offset by `radius` along X, then swept around Y in
/// `ceil(radius / thickness) * tessellation` stacks rotating by `-alpha`
/// per stack. The cross-section ring carries a duplicated wrap vertex
/// (angle 0 coincides with angle 2π), so connecting `circle.len() - 1`
/// segments per stack closes the tube.
pub fn generate_torus(radius: f32, thickness: f32, tessellation: u32) -> MeshTemplate {
    let mut torus = MeshTemplate::new();

    let stacks = (radius / thickness).ceil() as u32 * tessellation;
    let mut circle = Vec::with_capacity(tessellation as usize + 1);
    let mut angle_inc = 2.0 * PI / tessellation as f32;
    for i in 0..=tessellation {
        let alpha = angle_inc * i as f32;
        circle.push(Vector3::new(
            radius + thickness * alpha.cos(),
            thickness * alpha.sin(),
            0.0,
        ));
    }

    angle_inc = 2.0 * PI / stacks as f32;
    for i in 0..=stacks {
        let alpha = angle_inc * i as f32;
        let rot = Matrix3::from_angle_y(Rad(-alpha));
        for (j, point) in circle.iter().enumerate() {
            torus.positions.push(rot * point);
            torus.tex_coords.push(Vector2::new(
                4.0 * i as f32 / tessellation as f32 - 0.5,
                12.0 * j as f32 / stacks as f32 - 0.5,
            ));
        }
    }

    let ring = circle.len() as u32;
    for i in 1..=stacks {
        let prev = ring * (i - 1);
        let curr = ring * i;
        for j in 0..ring - 1 {
            torus.indices.extend_from_slice(&[
                curr + j,
                prev + j,
                prev + j + 1,
                prev + j + 1,
                curr + j + 1,
                curr + j,
            ]);
        }
    }

    torus
}

/// Generates a cube of the given edge length centered at the origin.
///
/// Eight shared corner vertices and twelve triangles, with no texture
/// coordinates and no normals. Shared corners cannot carry face-correct
/// normals, so flat shading needs [`expand_indices`] followed by
/// [`compute_face_normals`].
///
/// [`expand_indices`]: MeshTemplate::expand_indices
/// [`compute_face_normals`]: MeshTemplate::compute_face_normals
pub fn generate_cube(width: f32) -> MeshTemplate {
    let hw = width / 2.0;
    let positions = vec![
        // front square
        Vector3::new(-hw, hw, hw),
        Vector3::new(-hw, -hw, hw),
        Vector3::new(hw, -hw, hw),
        Vector3::new(hw, hw, hw),
        // back square
        Vector3::new(-hw, hw, -hw),
        Vector3::new(-hw, -hw, -hw),
        Vector3::new(hw, -hw, -hw),
        Vector3::new(hw, hw, -hw),
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2, 2, 3, 0, // front
        4, 7, 6, 6, 5, 4, // back
        4, 0, 3, 3, 7, 4, // top
        5, 6, 2, 2, 1, 5, // bottom
        0, 4, 5, 5, 1, 0, // left
        3, 2, 6, 6, 7, 3, // right
    ];
    MeshTemplate {
        positions,
        indices,
        ..Default::default()
    }
}

/// Generates a subdivided plane in the XY plane, centered at the origin.
///
/// A `(width + 1) x (height + 1)` grid of vertices with texture coordinates
/// linear in `[0, 1]` along each axis, triangulated in row-major quads.
pub fn generate_plane(width: u32, height: u32) -> MeshTemplate {
    let mut plane = MeshTemplate::new();

    let hw = width as f32 / 2.0;
    let hh = height as f32 / 2.0;
    for i in 0..=width {
        for j in 0..=height {
            plane
                .positions
                .push(Vector3::new(-hw + i as f32, -hh + j as f32, 0.0));
            plane
                .tex_coords
                .push(Vector2::new(i as f32 / width as f32, j as f32 / height as f32));
        }
    }
    for i in 0..width {
        let curr = i * (height + 1);
        let next = (i + 1) * (height + 1);
        for j in 0..height {
            plane.indices.extend_from_slice(&[
                curr + j,
                next + j,
                next + j + 1,
                next + j + 1,
                curr + j + 1,
                curr + j,
            ]);
        }
    }

    plane
}

/// Generates a circle in the XY plane as a triangle fan.
///
/// `tessellation + 1` boundary vertices (the wrap vertex is duplicated) plus
/// one center vertex, with `tessellation` fan triangles `(center, i, i + 1)`.
pub fn generate_circle(radius: f32, tessellation: u32) -> MeshTemplate {
    let mut circle = MeshTemplate::new();

    let angle_inc = 2.0 * PI / tessellation as f32;
    for i in 0..=tessellation {
        let angle = angle_inc * i as f32;
        circle
            .positions
            .push(Vector3::new(radius * angle.cos(), radius * angle.sin(), 0.0));
        circle
            .tex_coords
            .push(Vector2::new(angle.cos() / 2.0 + 0.5, angle.sin() / 2.0 + 0.5));
    }
    circle.positions.push(Vector3::new(0.0, 0.0, 0.0));
    circle.tex_coords.push(Vector2::new(0.5, 0.5));

    let center = circle.positions.len() as u32 - 1;
    for i in 0..tessellation {
        circle.indices.extend_from_slice(&[center, i, i + 1]);
    }

    circle
}

/// Generates an open cylinder along the Z axis.
///
/// Two rings of `tessellation + 1` vertices at `z = ±length / 2` connected
/// by side-wall quads; no end caps.
pub fn generate_cylinder(radius: f32, length: f32, tessellation: u32) -> MeshTemplate {
    let mut cylinder = MeshTemplate::new();

    let angle_inc = 2.0 * PI / tessellation as f32;
    for z in [-length / 2.0, length / 2.0] {
        for i in 0..=tessellation {
            let angle = angle_inc * i as f32;
            cylinder
                .positions
                .push(Vector3::new(radius * angle.cos(), radius * angle.sin(), z));
            cylinder
                .tex_coords
                .push(Vector2::new(angle.cos() / 2.0 + 0.5, angle.sin() / 2.0 + 0.5));
        }
    }

    let curr = tessellation + 1;
    let prev = 0;
    for i in 0..tessellation {
        cylinder.indices.extend_from_slice(&[
            curr + i,
            prev + i,
            prev + i + 1,
            prev + i + 1,
            curr + i + 1,
            curr + i,
        ]);
    }

    cylinder
}
