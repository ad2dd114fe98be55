//! Orbital system: derives every body's spin and position from the clock.
//!
//! Positions are a pure function of absolute elapsed time (circular, coplanar
//! orbits in the XZ plane). Spin is integrated from the frame delta, once per
//! distinct `elapsed` value, so re-running a frame is a no-op.

use std::f64::consts::TAU;
use glam::Vec3;
use crate::assets::ephemeris::EphemerisTable;
use crate::components::body::{CelestialBody, OrbitalRole};
use crate::core::clock::SimulationClock;
use crate::core::registry::BodyRegistry;

/// Days in the reference year all orbital speeds are expressed against.
pub const REFERENCE_YEAR_DAYS: f64 = 365.25;

/// Tuning constants for the visual speed of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// Orbital angular speed of a body with a 365.25-day period (rad/ms).
    pub base_angular_speed: f64,
    /// Multiplier applied to real spin rates so rotation is visible.
    pub rotation_speed_scale: f64,
    /// Phase offset per registry index, in radians.
    pub phase_step: f64,
    /// Moon orbit radius when the table has none.
    pub moon_fallback_radius: f64,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            base_angular_speed: 0.0002,
            rotation_speed_scale: 10.0,
            phase_step: 0.5,
            moon_fallback_radius: 15.0,
        }
    }
}

/// Point on a circular orbit of `radius` at `angle`, in the XZ plane.
pub fn circular_offset(radius: f64, angle: f64) -> Vec3 {
    Vec3::new((radius * angle.cos()) as f32, 0.0, (radius * angle.sin()) as f32)
}

/// Owns the global speed multiplier and evaluates the per-frame update.
#[derive(Debug, Clone)]
pub struct OrbitSystem {
    settings: OrbitSettings,
    speed_multiplier: f64,
    /// Elapsed value of the last frame whose spin has been applied.
    last_spin_elapsed: Option<f64>,
}

impl OrbitSystem {
    pub fn new(settings: OrbitSettings) -> Self {
        Self {
            settings,
            speed_multiplier: 1.0,
            last_spin_elapsed: None,
        }
    }

    pub fn settings(&self) -> &OrbitSettings {
        &self.settings
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Set the global orbital speed multiplier. Negative values clamp to 0;
    /// non-finite values are ignored.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        if multiplier.is_finite() {
            self.speed_multiplier = multiplier.max(0.0);
        } else {
            log::warn!("ignoring non-finite orbital speed multiplier");
        }
    }

    /// Orbital angle at `elapsed` ms for a body with the given period and phase.
    /// Uses the period's magnitude, so the angle never runs backwards.
    pub fn orbital_angle(&self, elapsed: f64, period_days: f64, phase: f64) -> f64 {
        self.paced_angle(self.settings.base_angular_speed, elapsed, period_days, phase)
    }

    fn paced_angle(&self, base_speed: f64, elapsed: f64, period_days: f64, phase: f64) -> f64 {
        let speed = base_speed * (REFERENCE_YEAR_DAYS / period_days.abs()) * self.speed_multiplier;
        elapsed * speed + phase
    }

    /// Spin rate in rad/ms for a rotation period in hours (sign ignored).
    pub fn spin_rate(&self, rotation_hours: f64) -> f64 {
        TAU / (rotation_hours.abs() * 3600.0) * self.settings.rotation_speed_scale
    }

    fn spin(&self, body: &mut CelestialBody, rotation_hours: f64, delta: f64) {
        if delta == 0.0 {
            return;
        }
        let step = self.spin_rate(rotation_hours) * delta;
        let current = body.transform.rotation_y as f64;
        // Sign of the period picks the direction; magnitude only sets the rate.
        let next = if rotation_hours > 0.0 { current + step } else { current - step };
        body.transform.rotation_y = next.rem_euclid(TAU) as f32;
    }

    /// Compute this frame's transform for every body in the registry.
    ///
    /// Star → pinned at origin. Planets and dwarf planets → circular orbit with
    /// an index phase offset. Rings copy their parent's fresh position; moons
    /// orbit their parent's fresh position. Missing parents skip the dependent
    /// body for this frame.
    pub fn update(
        &mut self,
        registry: &mut BodyRegistry,
        ephemeris: &EphemerisTable,
        clock: &SimulationClock,
    ) {
        let elapsed = clock.elapsed();
        let delta = if self.last_spin_elapsed == Some(elapsed) {
            0.0
        } else {
            clock.delta()
        };
        self.last_spin_elapsed = Some(elapsed);

        // Primary pass: everything positioned around the star.
        for index in 0..registry.len() {
            let Some(body) = registry.at_mut(index) else { continue };
            if body.role == OrbitalRole::Star {
                body.transform.position = Vec3::ZERO;
                continue;
            }
            if body.skip || !body.role.is_primary() {
                continue;
            }

            let params = ephemeris.orbit_params(&body.name, index);
            self.spin(body, params.rotation_hours, delta);

            let (base_speed, phased) = match body.pacing {
                Some(pacing) => (pacing.base_angular_speed, pacing.phased),
                None => (self.settings.base_angular_speed, true),
            };
            let phase = if phased { index as f64 * self.settings.phase_step } else { 0.0 };
            let angle = self.paced_angle(base_speed, elapsed, params.period_days, phase);
            body.transform.position = circular_offset(params.radius, angle);
        }

        // Dependent pass: rings and moons read their parent's position from this frame.
        for index in 0..registry.len() {
            let Some(body) = registry.at(index) else { continue };
            if body.skip || !body.role.needs_parent() {
                continue;
            }
            let role = body.role;
            let parent_pos = body.parent.and_then(|p| registry.position_of(p));
            let Some(parent_pos) = parent_pos else {
                log::debug!("{}: parent missing, skipped this frame", body.name);
                continue;
            };

            match role {
                OrbitalRole::RingOnly => {
                    if let Some(ring) = registry.at_mut(index) {
                        ring.transform.position = parent_pos;
                    }
                }
                OrbitalRole::Moon => {
                    let Some(moon) = registry.at_mut(index) else { continue };
                    let params = ephemeris.orbit_params(&moon.name, index);
                    let radius = ephemeris
                        .lookup(&moon.name)
                        .and_then(|e| e.orbital_radius)
                        .unwrap_or(self.settings.moon_fallback_radius);

                    self.spin(moon, params.rotation_hours, delta);

                    let angle = self.orbital_angle(elapsed, params.period_days, 0.0);
                    moon.transform.position = parent_pos + circular_offset(radius, angle);
                }
                _ => {}
            }
        }
    }
}

impl Default for OrbitSystem {
    fn default() -> Self {
        Self::new(OrbitSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;
    use crate::api::types::BodyId;
    use crate::assets::ephemeris::EphemerisEntry;
    use crate::components::body::OrbitPacing;

    const EPS: f32 = 1e-2;

    fn entry(radius: f64, period: f64, hours: f64) -> EphemerisEntry {
        EphemerisEntry {
            orbital_radius: Some(radius),
            orbital_period_days: Some(period),
            rotation_period_hours: Some(hours),
        }
    }

    fn table() -> EphemerisTable {
        let mut t = EphemerisTable::new();
        t.insert("earth", entry(1000.0, 365.25, 24.0));
        t.insert("venus", entry(700.0, 224.7, -5832.5));
        t.insert("saturne", entry(5000.0, 10759.0, 10.7));
        t.insert(
            "moon",
            EphemerisEntry { orbital_period_days: Some(27.3), ..Default::default() },
        );
        t
    }

    /// earth at index 0 (zero phase), then star, venus, saturn + ring, moon.
    fn system() -> BodyRegistry {
        let mut reg = BodyRegistry::new();
        reg.spawn(CelestialBody::new(BodyId(1), "earth", OrbitalRole::Planet));
        reg.spawn(
            CelestialBody::new(BodyId(2), "sun", OrbitalRole::Star)
                .with_position(Vec3::new(5.0, 5.0, 5.0)),
        );
        reg.spawn(CelestialBody::new(BodyId(3), "venus", OrbitalRole::Planet));
        reg.spawn(CelestialBody::new(BodyId(4), "saturne", OrbitalRole::PlanetWithRing));
        reg.spawn(CelestialBody::new(BodyId(5), "moon", OrbitalRole::Moon).with_parent(BodyId(1)));
        reg.spawn(
            CelestialBody::new(BodyId(6), "saturne-ring", OrbitalRole::RingOnly)
                .with_parent(BodyId(4)),
        );
        reg
    }

    fn pos(reg: &BodyRegistry, id: u32) -> Vec3 {
        reg.position_of(BodyId(id)).unwrap()
    }

    #[test]
    fn zero_elapsed_sits_on_x_axis() {
        let mut reg = system();
        let mut orbits = OrbitSystem::default();
        orbits.update(&mut reg, &table(), &SimulationClock::at(0.0, 0.0));
        assert!((pos(&reg, 1) - Vec3::new(1000.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn star_is_pinned_to_origin() {
        let mut reg = system();
        let mut orbits = OrbitSystem::default();
        orbits.update(&mut reg, &table(), &SimulationClock::at(1234.0, 16.0));
        assert_eq!(pos(&reg, 2), Vec3::ZERO);
        assert_eq!(reg.get(BodyId(2)).unwrap().transform.rotation_y, 0.0);
    }

    #[test]
    fn quarter_period_reaches_positive_z() {
        let mut reg = system();
        let mut orbits = OrbitSystem::default();
        let quarter = FRAC_PI_2 / orbits.settings().base_angular_speed;
        orbits.update(&mut reg, &table(), &SimulationClock::at(quarter, 0.0));
        assert!((pos(&reg, 1) - Vec3::new(0.0, 0.0, 1000.0)).length() < EPS);
    }

    #[test]
    fn phase_offset_staggers_by_index() {
        let mut reg = system();
        let mut orbits = OrbitSystem::default();
        orbits.update(&mut reg, &table(), &SimulationClock::at(0.0, 0.0));
        // venus at index 2 → phase 1.0 rad
        let expected = circular_offset(700.0, 1.0);
        assert!((pos(&reg, 3) - expected).length() < EPS);
    }

    #[test]
    fn missing_entry_uses_index_fallback_radius() {
        let mut reg = BodyRegistry::new();
        for (i, name) in ["a", "b", "c", "ceres"].iter().enumerate() {
            reg.spawn(CelestialBody::new(BodyId(i as u32), *name, OrbitalRole::DwarfPlanet));
        }
        let mut orbits = OrbitSystem::default();
        orbits.update(&mut reg, &EphemerisTable::new(), &SimulationClock::at(500.0, 0.0));
        let ceres = reg.find_by_name("ceres").unwrap().position();
        assert!((ceres.length() - 250.0).abs() < EPS);
    }

    #[test]
    fn angle_never_decreases() {
        let mut orbits = OrbitSystem::default();
        for multiplier in [0.0, 0.25, 1.0, 3.0] {
            orbits.set_speed_multiplier(multiplier);
            let mut last = f64::NEG_INFINITY;
            for step in 0..200 {
                let angle = orbits.orbital_angle(step as f64 * 37.0, -5.9, 0.5);
                assert!(angle >= last);
                last = angle;
            }
        }
    }

    #[test]
    fn same_clock_twice_is_identical() {
        let mut reg = system();
        let mut orbits = OrbitSystem::default();
        let clock = SimulationClock::at(4321.0, 16.0);
        orbits.update(&mut reg, &table(), &clock);
        let first: Vec<_> = reg.iter().map(|b| b.transform).collect();
        orbits.update(&mut reg, &table(), &clock);
        let second: Vec<_> = reg.iter().map(|b| b.transform).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn moon_stays_on_its_circle() {
        let mut reg = system();
        let mut orbits = OrbitSystem::default();
        let mut clock = SimulationClock::new(100.0);
        for _ in 0..120 {
            clock.tick(16.7);
            orbits.update(&mut reg, &table(), &clock);
            let offset = pos(&reg, 5) - pos(&reg, 1);
            assert!((offset.length() - 15.0).abs() < EPS);
            assert_eq!(offset.y, 0.0);
        }
    }

    #[test]
    fn moon_uses_table_radius_when_present() {
        let mut reg = system();
        let mut t = table();
        t.insert("moon", entry(40.0, 27.3, 655.7));
        let mut orbits = OrbitSystem::default();
        orbits.update(&mut reg, &t, &SimulationClock::at(900.0, 16.0));
        assert!(((pos(&reg, 5) - pos(&reg, 1)).length() - 40.0).abs() < EPS);
    }

    #[test]
    fn ring_follows_its_planet() {
        let mut reg = system();
        let mut orbits = OrbitSystem::default();
        orbits.update(&mut reg, &table(), &SimulationClock::at(98765.0, 16.0));
        assert_eq!(pos(&reg, 6), pos(&reg, 4));
        assert_eq!(reg.get(BodyId(6)).unwrap().transform.rotation_y, 0.0);
    }

    #[test]
    fn pacing_override_replaces_speed_and_phase() {
        let mut reg = system();
        let slow = OrbitPacing { base_angular_speed: 0.00002, phased: false };
        if let Some(saturn) = reg.get_mut(BodyId(4)) {
            saturn.pacing = Some(slow);
        }
        let mut orbits = OrbitSystem::default();

        orbits.update(&mut reg, &table(), &SimulationClock::at(0.0, 0.0));
        assert!((pos(&reg, 4) - Vec3::new(5000.0, 0.0, 0.0)).length() < EPS);

        let elapsed = 1.0e6;
        orbits.update(&mut reg, &table(), &SimulationClock::at(elapsed, 16.0));
        let angle = 0.00002 * (REFERENCE_YEAR_DAYS / 10759.0) * elapsed;
        assert!((pos(&reg, 4) - circular_offset(5000.0, angle)).length() < EPS);
        assert_eq!(pos(&reg, 6), pos(&reg, 4));
    }

    #[test]
    fn zero_multiplier_freezes_orbits_but_not_spin() {
        let mut reg = system();
        let mut orbits = OrbitSystem::default();
        orbits.set_speed_multiplier(0.0);
        let mut clock = SimulationClock::new(100.0);
        clock.tick(16.0);
        orbits.update(&mut reg, &table(), &clock);
        let before = pos(&reg, 1);
        let spin_before = reg.get(BodyId(1)).unwrap().transform.rotation_y;
        for _ in 0..10 {
            clock.tick(16.0);
            orbits.update(&mut reg, &table(), &clock);
        }
        assert_eq!(pos(&reg, 1).x, before.x);
        assert_eq!(pos(&reg, 1).z, before.z);
        assert_ne!(reg.get(BodyId(1)).unwrap().transform.rotation_y, spin_before);
    }

    #[test]
    fn retrograde_spins_the_other_way() {
        let mut reg = system();
        let mut orbits = OrbitSystem::default();
        orbits.update(&mut reg, &table(), &SimulationClock::at(1000.0, 100.0));
        let earth = reg.get(BodyId(1)).unwrap().transform.rotation_y as f64;
        let venus = reg.get(BodyId(3)).unwrap().transform.rotation_y as f64;
        let expected_earth = orbits.spin_rate(24.0) * 100.0;
        let expected_venus = TAU - orbits.spin_rate(5832.5) * 100.0;
        assert!((earth - expected_earth).abs() < 1e-5);
        assert!((venus - expected_venus).abs() < 1e-5);
    }

    #[test]
    fn missing_parent_leaves_moon_untouched() {
        let mut reg = BodyRegistry::new();
        let start = Vec3::new(7.0, 8.0, 9.0);
        reg.spawn(
            CelestialBody::new(BodyId(1), "moon", OrbitalRole::Moon)
                .with_parent(BodyId(42))
                .with_position(start),
        );
        reg.spawn(CelestialBody::new(BodyId(2), "ring", OrbitalRole::RingOnly).with_position(start));
        let mut orbits = OrbitSystem::default();
        orbits.update(&mut reg, &table(), &SimulationClock::at(50.0, 16.0));
        assert_eq!(pos(&reg, 1), start);
        assert_eq!(pos(&reg, 2), start);
    }

    #[test]
    fn skipped_bodies_are_left_alone() {
        let mut reg = BodyRegistry::new();
        let start = Vec3::new(1.0, 2.0, 3.0);
        reg.spawn(
            CelestialBody::new(BodyId(1), "earth", OrbitalRole::Planet)
                .with_position(start)
                .skipped(),
        );
        let mut orbits = OrbitSystem::default();
        orbits.update(&mut reg, &table(), &SimulationClock::at(50.0, 16.0));
        assert_eq!(pos(&reg, 1), start);
    }

    #[test]
    fn multiplier_rejects_bad_values() {
        let mut orbits = OrbitSystem::default();
        orbits.set_speed_multiplier(-2.0);
        assert_eq!(orbits.speed_multiplier(), 0.0);
        orbits.set_speed_multiplier(0.5);
        orbits.set_speed_multiplier(f64::NAN);
        assert_eq!(orbits.speed_multiplier(), 0.5);
    }
}
