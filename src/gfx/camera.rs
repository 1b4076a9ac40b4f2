//! Euler-angle camera.

use cgmath::{Matrix4, Rad, Vector3};

/// A free camera described by position plus yaw/pitch, supplied by the
/// caller each frame. Input handling lives outside the renderer core.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pos: Vector3<f32>,
    /// Rotation about +Y, radians.
    pub yaw: f32,
    /// Rotation about +X, radians.
    pub pitch: f32,
}

impl Camera {
    pub fn new(pos: Vector3<f32>) -> Self {
        Self {
            pos,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// World-to-view matrix: the inverse of the camera's own transform.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(Rad(-self.pitch))
            * Matrix4::from_angle_y(Rad(-self.yaw))
            * Matrix4::from_translation(-self.pos)
    }
}
