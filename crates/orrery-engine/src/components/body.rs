use glam::Vec3;
use crate::api::types::BodyId;

/// Which branch of the orbital update applies to a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitalRole {
    /// The system's star. Pinned to the origin.
    Star,
    /// A planet on a circular orbit around the star.
    Planet,
    /// A planet whose ring is a separate body (`RingOnly` with this planet as parent).
    PlanetWithRing,
    /// A ring mesh that shares its parent's position.
    RingOnly,
    /// A moon orbiting its parent body.
    Moon,
    DwarfPlanet,
}

impl OrbitalRole {
    /// Roles that must reference a parent body.
    pub fn needs_parent(self) -> bool {
        matches!(self, OrbitalRole::Moon | OrbitalRole::RingOnly)
    }

    /// Roles positioned directly around the star by the primary pass.
    pub fn is_primary(self) -> bool {
        matches!(
            self,
            OrbitalRole::Planet | OrbitalRole::PlanetWithRing | OrbitalRole::DwarfPlanet
        )
    }
}

/// Persistent 3D transform written by the orbital system and read by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Spin angle around the vertical (Y) axis, in radians.
    pub rotation_y: f32,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_y: 0.0,
            scale: Vec3::ONE,
        }
    }
}

/// Per-body orbital pace, replacing the system-wide speed and phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPacing {
    /// Angular speed of a 365.25-day orbit (rad/ms).
    pub base_angular_speed: f64,
    /// Whether the registry-index phase offset applies.
    pub phased: bool,
}

/// A celestial body in the registry.
/// Fat struct. The set of bodies is tiny and fixed at load time.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    /// Numeric handle, assigned at spawn.
    pub id: BodyId,
    /// Stable string identity and ephemeris key (e.g. "earth").
    pub name: String,
    pub role: OrbitalRole,
    /// Parent body for `Moon` and `RingOnly` roles.
    pub parent: Option<BodyId>,
    /// Excluded from the per-body orbital loop when set.
    pub skip: bool,
    /// Whether the renderer should draw this body.
    pub visible: bool,
    pub transform: Transform,
    /// Opaque mesh name from the scene asset, if the body came from one.
    pub mesh: Option<String>,
    /// Radius used for pointer picking, in scene units.
    pub bounding_radius: f32,
    /// Overrides the orbital system's pace for this body.
    pub pacing: Option<OrbitPacing>,
}

impl CelestialBody {
    pub fn new(id: BodyId, name: impl Into<String>, role: OrbitalRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            parent: None,
            skip: false,
            visible: true,
            transform: Transform::default(),
            mesh: None,
            bounding_radius: 1.0,
            pacing: None,
        }
    }

    // -- Builder pattern --

    pub fn with_parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: impl Into<String>) -> Self {
        self.mesh = Some(mesh.into());
        self
    }

    pub fn with_bounding_radius(mut self, radius: f32) -> Self {
        self.bounding_radius = radius;
        self
    }

    pub fn with_pacing(mut self, pacing: OrbitPacing) -> Self {
        self.pacing = Some(pacing);
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Largest scale component, the uniform size of the body.
    pub fn max_scale(&self) -> f32 {
        self.transform.scale.max_element()
    }
}
