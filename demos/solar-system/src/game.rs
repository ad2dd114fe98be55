/// Solar System: the sun, eight planets, the moon, Saturn's ring and four
/// dwarf planets on circular orbits.
///
/// Bodies come from the decoded scene model (`load_scene`), orbital and
/// descriptive data from the JSON data asset (`load_data`). The browser
/// renders; this side moves bodies, drives the camera and reports UI state.

use orrery_engine::*;
use glam::{Vec2, Vec3};

use crate::bodies;
use crate::controls::{self, keys};
use crate::gui::DebugPanel;
use crate::info::FactSheet;
use crate::modal::{InstructionsModal, PlanetModal};
use crate::sun::SunMaterial;

// ── Custom event kinds from the page ─────────────────────────────────

const CUSTOM_SET_ORBITAL_SPEED: u32 = 1;
const CUSTOM_RESET_ORBITAL_SPEED: u32 = 2;
const CUSTOM_SET_NOISE_SPEED: u32 = 3;
const CUSTOM_SET_NOISE_AMPLITUDE: u32 = 4;
const CUSTOM_RESET_SUN: u32 = 5;
const CUSTOM_CLOSE_PLANET_MODAL: u32 = 6;
const CUSTOM_CLOSE_INSTRUCTIONS: u32 = 7;
/// Viewport resize (sent by the page as kind=99).
const CUSTOM_RESIZE: u32 = 99;

// ── Scene event kinds to the page ────────────────────────────────────

/// a = time (s), b = noise amplitude, c = noise speed.
const EVENT_SUN_UNIFORMS: f32 = 1.0;
/// a = selected body index or -1, b = modal open.
const EVENT_SELECTION: f32 = 2.0;
/// a = orbital speed multiplier.
const EVENT_ORBITAL_SPEED: f32 = 3.0;
/// a = instructions visible.
const EVENT_INSTRUCTIONS: f32 = 4.0;
/// a, b, c = focus light position. Only while the planet modal is open.
const EVENT_FOCUS_LIGHT_POSITION: f32 = 5.0;
/// a, b, c = point the focus light aims at.
const EVENT_FOCUS_LIGHT_TARGET: f32 = 6.0;

/// Camera pose at startup.
const START_CAMERA: Vec3 = Vec3::new(3000.0, 3000.0, 3000.0);

fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

pub struct SolarSystem {
    orbits: OrbitSystem,
    ephemeris: EphemerisTable,
    facts: FactSheet,
    keys: KeyState,
    planet_modal: PlanetModal,
    instructions: InstructionsModal,
    panel: DebugPanel,
    sun: SunMaterial,
}

impl SolarSystem {
    pub fn new() -> Self {
        let sun = SunMaterial::default();
        Self {
            orbits: OrbitSystem::default(),
            ephemeris: EphemerisTable::new(),
            facts: FactSheet::new(),
            keys: KeyState::new(),
            planet_modal: PlanetModal::new(),
            instructions: InstructionsModal::new(),
            panel: DebugPanel::new(sun.noise_speed as f64, sun.noise_amplitude as f64),
            sun,
        }
    }

    /// Title of the open info card, empty when closed.
    pub fn info_title(&self) -> String {
        self.planet_modal.card().map(|c| c.title.clone()).unwrap_or_default()
    }

    /// Body markup of the open info card, empty when closed.
    pub fn info_html(&self) -> String {
        self.planet_modal.card().map(|c| c.to_html()).unwrap_or_default()
    }

    /// Pick the body under a click and open its card.
    fn select_at(&mut self, ctx: &mut EngineContext, ndc: Vec2) {
        let ray = ctx.camera.ray_from_ndc(ndc);
        let Some(id) = pick_body(&ctx.registry, &ray) else { return };
        let Some(body) = ctx.registry.get(id) else { return };

        let mesh = body.mesh.as_deref().unwrap_or_default();
        let Some(key) = bodies::info_key(mesh) else {
            log::warn!("no planet data found for mesh: {}", mesh);
            return;
        };
        if let Some(card) = self.facts.card_for(key) {
            self.planet_modal.open(&mut ctx.camera, body, card);
        }
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            self.keys.apply(event);
            match event {
                InputEvent::KeyDown { key_code: keys::ESCAPE } => {
                    self.planet_modal.close(&mut ctx.camera);
                    self.instructions.hide();
                }
                InputEvent::PointerUp { x, y } => {
                    if !self.planet_modal.is_open() && !self.instructions.is_visible() {
                        self.select_at(ctx, Vec2::new(*x, *y));
                    }
                }
                InputEvent::Custom { kind, a, b, .. } => match *kind {
                    CUSTOM_SET_ORBITAL_SPEED => {
                        let speed = self.panel.set_orbital_speed(*a as f64);
                        self.orbits.set_speed_multiplier(speed);
                    }
                    CUSTOM_RESET_ORBITAL_SPEED => {
                        let speed = self.panel.reset_orbital_speed();
                        self.orbits.set_speed_multiplier(speed);
                    }
                    CUSTOM_SET_NOISE_SPEED => {
                        self.sun.noise_speed = self.panel.set_noise_speed(*a as f64) as f32;
                    }
                    CUSTOM_SET_NOISE_AMPLITUDE => {
                        self.sun.noise_amplitude = self.panel.set_noise_amplitude(*a as f64) as f32;
                    }
                    CUSTOM_RESET_SUN => {
                        self.panel.reset_sun();
                        self.sun.noise_speed = self.panel.noise_speed as f32;
                        self.sun.noise_amplitude = self.panel.noise_amplitude as f32;
                    }
                    CUSTOM_CLOSE_PLANET_MODAL => {
                        self.planet_modal.close(&mut ctx.camera);
                    }
                    CUSTOM_CLOSE_INSTRUCTIONS => {
                        self.instructions.hide();
                    }
                    CUSTOM_RESIZE => {
                        ctx.camera.resize(*a, *b);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    fn emit_events(&self, ctx: &mut EngineContext) {
        ctx.emit_event(SceneEvent::new(
            EVENT_SUN_UNIFORMS,
            self.sun.time,
            self.sun.noise_amplitude,
            self.sun.noise_speed,
        ));

        let selected = self
            .planet_modal
            .followed()
            .and_then(|id| ctx.registry.index_of(id))
            .map_or(-1.0, |i| i as f32);
        ctx.emit_event(SceneEvent::new(
            EVENT_SELECTION,
            selected,
            flag(self.planet_modal.is_open()),
            0.0,
        ));

        ctx.emit_event(SceneEvent::new(
            EVENT_ORBITAL_SPEED,
            self.orbits.speed_multiplier() as f32,
            0.0,
            0.0,
        ));
        ctx.emit_event(SceneEvent::new(
            EVENT_INSTRUCTIONS,
            flag(self.instructions.is_visible()),
            0.0,
            0.0,
        ));

        if let Some(light) = self.planet_modal.focus_light(&ctx.camera, &ctx.registry) {
            let [x, y, z] = light.position.to_array();
            ctx.emit_event(SceneEvent::new(EVENT_FOCUS_LIGHT_POSITION, x, y, z));
            let [x, y, z] = light.target.to_array();
            ctx.emit_event(SceneEvent::new(EVENT_FOCUS_LIGHT_TARGET, x, y, z));
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl App for SolarSystem {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            max_bodies: 32,
            max_events: 16,
            initial_camera: CameraPose::new(START_CAMERA, Vec3::ZERO),
            ..SceneConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let config = self.config();
        self.orbits = OrbitSystem::new(config.orbit);
        ctx.camera.set_pose(config.initial_camera, false);
    }

    fn load_data(&mut self, _ctx: &mut EngineContext, json: &str) -> Result<(), serde_json::Error> {
        self.ephemeris = EphemerisTable::from_json(json)?;
        match FactSheet::from_json(json) {
            Ok(facts) => self.facts = facts,
            // Orbits do not depend on the cards.
            Err(err) => log::warn!("planet facts rejected, keeping previous cards: {err}"),
        }
        log::info!(
            "data asset: {} ephemeris entries, {} fact sheets",
            self.ephemeris.len(),
            self.facts.len()
        );
        Ok(())
    }

    fn load_scene(&mut self, ctx: &mut EngineContext, json: &str) -> Result<(), serde_json::Error> {
        let manifest = SceneManifest::from_json(json)?;
        self.planet_modal.close(&mut ctx.camera);
        let count = bodies::populate(ctx, &manifest);
        log::info!("scene: {} bodies", count);
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.handle_input(ctx, input);

        controls::fly(&mut ctx.camera, &self.keys, ctx.clock.delta());

        self.orbits.update(&mut ctx.registry, &self.ephemeris, &ctx.clock);

        if !self.planet_modal.follow(&mut ctx.camera, &ctx.registry) {
            log::warn!("focused body left the scene, closing");
            self.planet_modal.close(&mut ctx.camera);
        }
        ctx.camera.update((ctx.clock.delta() / 1000.0) as f32);

        self.instructions.update(ctx.clock.elapsed());
        self.sun.update(ctx.clock.elapsed());

        self.emit_events(ctx);
    }
}
