//! Pointer picking: nearest body whose bounding sphere the ray hits.

use crate::api::types::BodyId;
use crate::core::registry::BodyRegistry;
use crate::renderer::camera::Ray;

/// Return the nearest visible body hit by `ray`.
pub fn pick_body(registry: &BodyRegistry, ray: &Ray) -> Option<BodyId> {
    let mut best: Option<(BodyId, f32)> = None;
    for body in registry.iter().filter(|b| b.visible) {
        let Some(dist) = ray.intersect_sphere(body.position(), body.bounding_radius) else {
            continue;
        };
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((body.id, dist));
        }
    }
    best.map(|(id, _)| id)
}
