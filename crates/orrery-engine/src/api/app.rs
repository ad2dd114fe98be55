use glam::Vec3;
use crate::api::types::{BodyId, SceneEvent};
use crate::core::clock::SimulationClock;
use crate::core::registry::BodyRegistry;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{CameraPose, OrbitCamera};
use crate::systems::orbit::OrbitSettings;

/// Configuration for the engine, provided by the app.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Maximum number of bodies in the transform buffer (default: 64).
    pub max_bodies: usize,
    /// Maximum number of scene events per frame (default: 32).
    pub max_events: usize,
    /// Longest frame delta fed to the clock, in ms (default: 250).
    pub max_frame_ms: f64,
    /// Vertical field of view in degrees (default: 45).
    pub fov_y_degrees: f32,
    /// Camera pose at startup.
    pub initial_camera: CameraPose,
    /// Camera distance limits (default: 100..50000).
    pub min_distance: f32,
    pub max_distance: f32,
    /// Camera damping per 60 Hz frame (default: 0.05).
    pub camera_damping: f32,
    /// Orbital tuning constants.
    pub orbit: OrbitSettings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_bodies: 64,
            max_events: 32,
            max_frame_ms: 250.0,
            fov_y_degrees: 45.0,
            initial_camera: CameraPose::new(Vec3::new(0.0, 0.0, -2000.0), Vec3::ZERO),
            min_distance: 100.0,
            max_distance: 50_000.0,
            camera_damping: 0.05,
            orbit: OrbitSettings::default(),
        }
    }
}

/// The core contract every scene app must fulfill.
pub trait App {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    /// Setup initial state. Bodies usually arrive later with the scene asset.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Static data asset (ephemeris, facts). Called once the browser has fetched it.
    fn load_data(&mut self, _ctx: &mut EngineContext, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }

    /// Scene asset manifest (mesh list). Called once the model is decoded.
    fn load_scene(&mut self, _ctx: &mut EngineContext, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }

    /// The per-frame tick. The clock has already been advanced.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to App::init and App::update.
pub struct EngineContext {
    pub registry: BodyRegistry,
    pub camera: OrbitCamera,
    pub clock: SimulationClock,
    pub events: Vec<SceneEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&SceneConfig::default())
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        let mut camera = OrbitCamera::new(config.fov_y_degrees.to_radians(), 16.0 / 9.0)
            .with_distance_limits(config.min_distance, config.max_distance)
            .with_damping(config.camera_damping);
        camera.set_pose(config.initial_camera, false);

        Self {
            registry: BodyRegistry::with_capacity(config.max_bodies),
            camera,
            clock: SimulationClock::new(config.max_frame_ms),
            events: Vec::with_capacity(config.max_events),
            next_id: 1,
        }
    }

    /// Generate the next unique body ID.
    pub fn next_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a scene event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
