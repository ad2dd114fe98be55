pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::app::{App, SceneConfig, EngineContext};
pub use api::types::{BodyId, SceneEvent};
pub use components::body::{CelestialBody, OrbitPacing, OrbitalRole, Transform};
pub use crate::core::registry::BodyRegistry;
pub use crate::core::clock::SimulationClock;
pub use renderer::instance::{BodyInstance, TransformBuffer};
pub use renderer::camera::{CameraPose, CameraUniform, OrbitCamera, Ray};
pub use input::queue::{InputEvent, InputQueue, KeyState};
pub use assets::ephemeris::{EphemerisDefaults, EphemerisEntry, EphemerisTable, OrbitParams};
pub use assets::scene_manifest::{MeshDescriptor, SceneManifest};
pub use bridge::protocol::{FrameBuffer, FrameData, ProtocolLayout};
pub use systems::orbit::{OrbitSettings, OrbitSystem, circular_offset};
pub use systems::picking::pick_body;
