//! Call-recording [`RenderDevice`] used by renderer, builder and loader
//! tests. Records every call in order, hands out sequential handles, and
//! can be told to reject specific uniform names to exercise the
//! shader-mismatch path.

use std::collections::HashSet;

use crate::gfx::device::{
    DeviceError, MeshId, OffscreenTarget, ProgramId, RenderDevice, RenderbufferId, TextureId,
    UniformValue, Winding,
};
use crate::gfx::geometry::MeshTemplate;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CompileProgram,
    UseProgram(Option<ProgramId>),
    LoadTexture2d(String),
    LoadCubemap(String),
    Uniform {
        name: String,
        value: UniformValue,
    },
    BindTexture2d {
        unit: u32,
        texture: Option<TextureId>,
    },
    BindCubemap {
        unit: u32,
        texture: Option<TextureId>,
    },
    Draw(MeshId),
    Clear,
    FrontFace(Winding),
    DepthWrite(bool),
    PolygonOffsetFill(bool),
    PolygonOffset(f32, f32),
    BindOffscreenTarget(bool),
    ClipDistance(bool),
}

#[derive(Default)]
pub struct RecordingDevice {
    pub calls: Vec<Call>,
    /// Every uploaded template, indexed by `MeshId`.
    pub uploaded_meshes: Vec<MeshTemplate>,
    /// Uniform names the fake program pretends not to have.
    pub missing_uniforms: HashSet<String>,
    next_program: u32,
    next_texture: u32,
    next_renderbuffer: u32,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// All values uploaded to `name`, in order.
    pub fn uniform_values(&self, name: &str) -> Vec<UniformValue> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Uniform { name: n, value } if n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniform_values(name).pop()
    }

    /// Draw calls in submission order.
    pub fn draws(&self) -> Vec<MeshId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw(mesh) => Some(*mesh),
                _ => None,
            })
            .collect()
    }
}

impl RenderDevice for RecordingDevice {
    fn compile_program(&mut self, _: &str, _: &str) -> Result<ProgramId, DeviceError> {
        self.calls.push(Call::CompileProgram);
        let id = ProgramId(self.next_program);
        self.next_program += 1;
        Ok(id)
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.calls.push(Call::UseProgram(program));
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), DeviceError> {
        if self.missing_uniforms.contains(name) {
            return Err(DeviceError::UniformNotFound {
                name: name.to_string(),
            });
        }
        self.calls.push(Call::Uniform {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    fn load_texture_2d(&mut self, path: &str) -> Result<TextureId, DeviceError> {
        self.calls.push(Call::LoadTexture2d(path.to_string()));
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        Ok(id)
    }

    fn load_cubemap(&mut self, base_path: &str) -> Result<TextureId, DeviceError> {
        self.calls.push(Call::LoadCubemap(base_path.to_string()));
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        Ok(id)
    }

    fn bind_texture_2d(&mut self, unit: u32, texture: Option<TextureId>) {
        self.calls.push(Call::BindTexture2d { unit, texture });
    }

    fn bind_cubemap(&mut self, unit: u32, texture: Option<TextureId>) {
        self.calls.push(Call::BindCubemap { unit, texture });
    }

    fn upload_mesh(&mut self, template: &MeshTemplate) -> MeshId {
        self.uploaded_meshes.push(template.clone());
        MeshId(self.uploaded_meshes.len() as u32 - 1)
    }

    fn draw_mesh(&mut self, mesh: MeshId) {
        self.calls.push(Call::Draw(mesh));
    }

    fn create_offscreen_target(&mut self, _width: u32, _height: u32) -> OffscreenTarget {
        let color = TextureId(self.next_texture);
        self.next_texture += 1;
        let depth = RenderbufferId(self.next_renderbuffer);
        self.next_renderbuffer += 1;
        OffscreenTarget { color, depth }
    }

    fn bind_offscreen_target(&mut self, target: Option<&OffscreenTarget>) {
        self.calls.push(Call::BindOffscreenTarget(target.is_some()));
    }

    fn set_clip_distance(&mut self, enabled: bool) {
        self.calls.push(Call::ClipDistance(enabled));
    }

    fn clear(&mut self, _color: [f32; 4]) {
        self.calls.push(Call::Clear);
    }

    fn set_front_face(&mut self, winding: Winding) {
        self.calls.push(Call::FrontFace(winding));
    }

    fn set_depth_write(&mut self, enabled: bool) {
        self.calls.push(Call::DepthWrite(enabled));
    }

    fn set_polygon_offset_fill(&mut self, enabled: bool) {
        self.calls.push(Call::PolygonOffsetFill(enabled));
    }

    fn set_polygon_offset(&mut self, factor: f32, units: f32) {
        self.calls.push(Call::PolygonOffset(factor, units));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_loads_are_recorded_in_order() {
        let mut device = RecordingDevice::new();
        let first = device.load_texture_2d("sand.png").unwrap();
        let second = device.load_cubemap("sky").unwrap();

        assert_ne!(first, second);
        assert_eq!(
            device.calls,
            vec![
                Call::LoadTexture2d("sand.png".to_string()),
                Call::LoadCubemap("sky".to_string()),
            ]
        );
    }

    #[test]
    fn offscreen_targets_use_separate_handle_spaces() {
        let mut device = RecordingDevice::new();
        let texture = device.load_texture_2d("sand.png").unwrap();
        let target = device.create_offscreen_target(640, 480);

        // The color attachment is a texture, the depth attachment a
        // renderbuffer; the two counters advance independently.
        assert_ne!(target.color, texture);
        assert_eq!(target.depth, RenderbufferId(0));
    }
}
