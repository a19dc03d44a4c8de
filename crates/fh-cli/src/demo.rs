//! Demo part for offline planning
//!
//! A rectangular block of a given height: the reference point lives in a
//! sketch on the top face and the terminating face is the bottom.

use fh_cad::{DraftingHost, FaceId, HostResult, MemoryHost, SketchPlane, SketchPointRef};
use glam::{Vec2, Vec3};
use uuid::Uuid;

pub struct DemoPart {
    pub host: MemoryHost,
    pub point: SketchPointRef,
    pub face: FaceId,
}

impl DemoPart {
    pub fn block(height: f32, position: Vec2) -> HostResult<Self> {
        let mut host = MemoryHost::new();
        let root = host.root_component();
        let top = host.create_sketch(root, SketchPlane::xy_at(height), "top")?;
        let point = host.add_point(top, position)?;
        let face = host.add_face(
            Uuid::new_v4(),
            Vec3::new(position.x, position.y, 0.0),
            Vec3::NEG_Z,
            400.0,
        );
        Ok(Self {
            host,
            point: SketchPointRef::new(top, point),
            face,
        })
    }
}
