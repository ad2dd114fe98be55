/// Planet info modal and the startup instructions overlay.
///
/// The modal owns the camera while open: it flies to the picked body,
/// follows it every frame, and flies back to where the user was on close.

use orrery_engine::*;
use glam::Vec3;

use crate::info::InfoCard;

/// Focus distance in multiples of the body's largest scale component.
pub const FOCUS_DISTANCE_FACTOR: f32 = 8.0;
/// Instructions appear this long after load (ms).
pub const INSTRUCTIONS_DELAY_MS: f64 = 1000.0;

/// Camera offset from a focused body of the given scale.
pub fn focus_offset(max_scale: f32) -> Vec3 {
    let d = max_scale * FOCUS_DISTANCE_FACTOR;
    Vec3::new(d * 0.6, d * 0.3, d)
}

/// Directional light riding on the camera, aimed at the focused body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusLight {
    pub position: Vec3,
    pub target: Vec3,
}

#[derive(Debug, Default)]
pub struct PlanetModal {
    followed: Option<BodyId>,
    offset: Vec3,
    saved: Option<CameraPose>,
    card: Option<InfoCard>,
}

impl PlanetModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.followed.is_some()
    }

    pub fn followed(&self) -> Option<BodyId> {
        self.followed
    }

    pub fn card(&self) -> Option<&InfoCard> {
        self.card.as_ref()
    }

    /// Open on `body`: remember the user's camera goal and start the
    /// transition toward the body.
    pub fn open(&mut self, camera: &mut OrbitCamera, body: &CelestialBody, card: InfoCard) {
        if self.is_open() {
            return;
        }
        self.saved = Some(camera.goal());
        self.offset = focus_offset(body.max_scale());
        self.followed = Some(body.id);
        self.card = Some(card);

        let target = body.position();
        camera.set_look_at(target + self.offset, target, true);
        log::info!("focus on {}", body.name);
    }

    /// Keep the camera locked on the followed body. Returns false when the
    /// body is no longer in the registry.
    pub fn follow(&self, camera: &mut OrbitCamera, registry: &BodyRegistry) -> bool {
        let Some(id) = self.followed else { return true };
        match registry.position_of(id) {
            Some(target) => {
                camera.set_look_at(target + self.offset, target, false);
                true
            }
            None => false,
        }
    }

    /// Focus light for this frame, while a body is followed.
    pub fn focus_light(&self, camera: &OrbitCamera, registry: &BodyRegistry) -> Option<FocusLight> {
        let target = registry.position_of(self.followed?)?;
        Some(FocusLight { position: camera.position, target })
    }

    /// Close and fly back to the saved pose. Returns true if it was open.
    pub fn close(&mut self, camera: &mut OrbitCamera) -> bool {
        if self.followed.take().is_none() {
            return false;
        }
        self.card = None;
        if let Some(pose) = self.saved.take() {
            camera.set_pose(pose, true);
        }
        true
    }
}

/// Overlay explaining the controls, shown once shortly after load.
#[derive(Debug, Default)]
pub struct InstructionsModal {
    visible: bool,
    dismissed: bool,
}

impl InstructionsModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the overlay once the delay has passed. Returns true when it
    /// just became visible.
    pub fn update(&mut self, elapsed_ms: f64) -> bool {
        if self.visible || self.dismissed || elapsed_ms < INSTRUCTIONS_DELAY_MS {
            return false;
        }
        self.visible = true;
        true
    }

    /// Returns true if it was visible.
    pub fn hide(&mut self) -> bool {
        self.dismissed = true;
        std::mem::replace(&mut self.visible, false)
    }
}
