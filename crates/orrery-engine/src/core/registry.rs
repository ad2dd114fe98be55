use glam::Vec3;
use crate::api::types::BodyId;
use crate::components::body::{CelestialBody, OrbitalRole};

/// Flat list of celestial bodies in load order.
/// Iteration order is stable: phase offsets and fallback radii depend on it.
pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(32),
        }
    }

    /// Create a registry with a specific body capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
        }
    }

    /// Append a body. Returns its registry index.
    pub fn spawn(&mut self, body: CelestialBody) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Get a reference to a body by ID.
    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Get a mutable reference to a body by ID.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Body at a registry index.
    pub fn at(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(index)
    }

    /// Registry index of a body.
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    /// Find a body by its stable name.
    pub fn find_by_name(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Find a body by the mesh name it was loaded from.
    pub fn find_by_mesh(&self, mesh: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.mesh.as_deref() == Some(mesh))
    }

    /// The single body with role `Star`, if loaded.
    pub fn star(&self) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.role == OrbitalRole::Star)
    }

    /// Current position of a body.
    pub fn position_of(&self, id: BodyId) -> Option<Vec3> {
        self.get(id).map(|b| b.transform.position)
    }

    /// All bodies in load order.
    pub fn all_bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CelestialBody> {
        self.bodies.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Drop every body. Only used when a new scene asset replaces the old one.
    pub fn clear(&mut self) {
        self.bodies.clear();
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BodyRegistry {
        let mut reg = BodyRegistry::new();
        reg.spawn(CelestialBody::new(BodyId(1), "sun", OrbitalRole::Star).with_mesh("Object_20"));
        reg.spawn(CelestialBody::new(BodyId(2), "earth", OrbitalRole::Planet));
        reg.spawn(
            CelestialBody::new(BodyId(3), "moon", OrbitalRole::Moon)
                .with_parent(BodyId(2))
                .with_position(Vec3::new(1.0, 2.0, 3.0)),
        );
        reg
    }

    #[test]
    fn spawn_returns_load_order_index() {
        let mut reg = BodyRegistry::new();
        assert_eq!(reg.spawn(CelestialBody::new(BodyId(7), "a", OrbitalRole::Planet)), 0);
        assert_eq!(reg.spawn(CelestialBody::new(BodyId(8), "b", OrbitalRole::Planet)), 1);
        assert_eq!(reg.index_of(BodyId(8)), Some(1));
    }

    #[test]
    fn lookups() {
        let reg = registry();
        assert_eq!(reg.find_by_name("earth").map(|b| b.id), Some(BodyId(2)));
        assert_eq!(reg.find_by_mesh("Object_20").map(|b| b.id), Some(BodyId(1)));
        assert_eq!(reg.star().map(|b| b.name.as_str()), Some("sun"));
        assert_eq!(reg.position_of(BodyId(3)), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert!(reg.get(BodyId(99)).is_none());
    }

    #[test]
    fn iteration_follows_load_order() {
        let reg = registry();
        let names: Vec<&str> = reg.all_bodies().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["sun", "earth", "moon"]);
    }
}
