use crate::orchestrator::FrameTransforms;
use glam::{DQuat, DVec3};

/// Per-instance GPU record for layout planes and trail copies.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub position: [f32; 3],
    pub scale: f32,
    pub rotation: [f32; 4],
}

impl InstanceData {
    pub fn new(position: DVec3, rotation: DQuat, scale: f32) -> Self {
        Self {
            position: position.as_vec3().to_array(),
            scale,
            rotation: [
                rotation.x as f32,
                rotation.y as f32,
                rotation.z as f32,
                rotation.w as f32,
            ],
        }
    }
}

impl FrameTransforms {
    pub fn layout_instances(&self, scale: f32, out: &mut Vec<InstanceData>) {
        out.extend(
            self.layout
                .iter()
                .map(|e| InstanceData::new(e.position, e.rotation, scale)),
        );
    }

    pub fn trail_instances(&self, out: &mut Vec<InstanceData>) {
        out.extend(
            self.trail_offsets
                .iter()
                .map(|o| InstanceData::new(*o, DQuat::IDENTITY, 1.0)),
        );
    }
}
