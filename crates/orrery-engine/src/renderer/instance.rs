use bytemuck::{Pod, Zeroable};
use crate::components::body::CelestialBody;

/// Per-body transform written to the shared buffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Spin around the vertical axis, radians.
    pub rotation_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
    /// 1.0 = drawn, 0.0 = hidden.
    pub visible: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_body(body: &CelestialBody) -> Self {
        let t = &body.transform;
        Self {
            x: t.position.x,
            y: t.position.y,
            z: t.position.z,
            rotation_y: t.rotation_y,
            scale_x: t.scale.x,
            scale_y: t.scale.y,
            scale_z: t.scale.z,
            visible: if body.visible { 1.0 } else { 0.0 },
        }
    }
}

/// Transform buffer, one instance per body in registry order.
/// Slot `i` always belongs to registry index `i`, so the renderer can bind
/// meshes to slots once at load.
pub struct TransformBuffer {
    pub instances: Vec<BodyInstance>,
    capacity: usize,
}

impl TransformBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Rewrite the buffer from the registry. Bodies beyond capacity are dropped
    /// with a warning.
    pub fn rebuild<'a>(&mut self, bodies: impl Iterator<Item = &'a CelestialBody>) {
        self.instances.clear();
        for body in bodies {
            if self.instances.len() >= self.capacity {
                log::warn!("transform buffer full ({}), dropping {}", self.capacity, body.name);
                break;
            }
            self.instances.push(BodyInstance::from_body(body));
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for TransformBuffer {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::api::types::BodyId;
    use crate::components::body::OrbitalRole;

    #[test]
    fn body_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 32);
        assert_eq!(BodyInstance::STRIDE_BYTES, 32);
    }

    #[test]
    fn rebuild_copies_transforms() {
        let mut body = CelestialBody::new(BodyId(1), "mars", OrbitalRole::Planet)
            .with_position(Vec3::new(1.0, 0.0, -2.0))
            .with_scale(Vec3::splat(12.0));
        body.transform.rotation_y = 0.5;
        let mut hidden = CelestialBody::new(BodyId(2), "ghost", OrbitalRole::Planet);
        hidden.visible = false;

        let bodies = [body, hidden];
        let mut buf = TransformBuffer::with_capacity(8);
        buf.rebuild(bodies.iter());

        assert_eq!(buf.instance_count(), 2);
        let first = buf.instances[0];
        assert_eq!((first.x, first.z, first.rotation_y, first.scale_y), (1.0, -2.0, 0.5, 12.0));
        assert_eq!(first.visible, 1.0);
        assert_eq!(buf.instances[1].visible, 0.0);
    }

    #[test]
    fn rebuild_respects_capacity() {
        let bodies: Vec<_> = (0..5)
            .map(|i| CelestialBody::new(BodyId(i), format!("b{i}"), OrbitalRole::Planet))
            .collect();
        let mut buf = TransformBuffer::with_capacity(3);
        buf.rebuild(bodies.iter());
        assert_eq!(buf.instance_count(), 3);
    }
}
