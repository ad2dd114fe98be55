/// Keyboard flight on top of the orbit camera.

use orrery_engine::*;

/// DOM `keyCode` values.
pub mod keys {
    pub const SHIFT: u32 = 16;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const E: u32 = 69;
    pub const Q: u32 = 81;
    pub const S: u32 = 83;
    pub const W: u32 = 87;
}

/// World units per second.
pub const MOVE_SPEED: f32 = 100.0;

const FORWARD: [u32; 2] = [keys::UP, keys::W];
const BACK: [u32; 2] = [keys::DOWN, keys::S];
const LEFT: [u32; 2] = [keys::LEFT, keys::A];
const RIGHT: [u32; 2] = [keys::RIGHT, keys::D];
const RISE: [u32; 2] = [keys::Q, keys::SPACE];
const SINK: [u32; 2] = [keys::E, keys::SHIFT];

/// Move the camera for held keys over a frame of `delta_ms`.
/// Returns true if any movement key was held.
pub fn fly(camera: &mut OrbitCamera, held: &KeyState, delta_ms: f64) -> bool {
    let step = MOVE_SPEED * (delta_ms / 1000.0) as f32;
    let mut moved = false;

    if held.any_down(&FORWARD) {
        camera.forward(step);
        moved = true;
    }
    if held.any_down(&BACK) {
        camera.forward(-step);
        moved = true;
    }
    if held.any_down(&LEFT) {
        camera.truck(-step, 0.0);
        moved = true;
    }
    if held.any_down(&RIGHT) {
        camera.truck(step, 0.0);
        moved = true;
    }
    if held.any_down(&RISE) {
        camera.truck(0.0, step);
        moved = true;
    }
    if held.any_down(&SINK) {
        camera.truck(0.0, -step);
        moved = true;
    }
    moved
}
