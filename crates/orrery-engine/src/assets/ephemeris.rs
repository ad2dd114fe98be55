use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Orbital and rotational parameters for one body, as found in the data asset.
/// Any field may be missing; `EphemerisTable::orbit_params` resolves fallbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EphemerisEntry {
    /// Distance from the orbital axis, in scene units.
    pub orbital_radius: Option<f64>,
    /// Days per revolution.
    pub orbital_period_days: Option<f64>,
    /// Hours per spin. Negative means retrograde.
    pub rotation_period_hours: Option<f64>,
}

/// Fully resolved parameters the orbital system works with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub radius: f64,
    pub period_days: f64,
    pub rotation_hours: f64,
}

/// Fallback values for bodies missing from the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisDefaults {
    pub period_days: f64,
    pub rotation_hours: f64,
    /// Fallback radius is `radius_base + radius_step × index`.
    pub radius_base: f64,
    pub radius_step: f64,
}

impl Default for EphemerisDefaults {
    fn default() -> Self {
        Self {
            period_days: 365.25,
            rotation_hours: 24.0,
            radius_base: 100.0,
            radius_step: 50.0,
        }
    }
}

impl EphemerisDefaults {
    pub fn radius_for_index(&self, index: usize) -> f64 {
        self.radius_base + self.radius_step * index as f64
    }
}

/// Wire shape of the `solarSystem` section of the data asset.
/// Other sections (planet facts, ...) are ignored here. Values are kept raw
/// so a `null` or a stray string only drops that one field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EphemerisSection {
    #[serde(default)]
    orbital_periods: HashMap<String, serde_json::Value>,
    #[serde(default)]
    orbital_radii: HashMap<String, serde_json::Value>,
    #[serde(default)]
    rotation_periods_hours: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataAsset {
    #[serde(default)]
    solar_system: EphemerisSection,
}

/// Static lookup of ephemeris entries keyed by body name.
/// Loaded once at startup, immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct EphemerisTable {
    entries: HashMap<String, EphemerisEntry>,
    defaults: EphemerisDefaults,
}

/// Zero, negative-zero, non-numeric and non-finite values count as absent.
fn usable(value: &serde_json::Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite() && *v != 0.0)
}

impl EphemerisTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the data asset (`{ "solarSystem": { "orbitalPeriods": .., "orbitalRadii": ..,
    /// "rotationPeriodsHours": .. } }`).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let asset: DataAsset = serde_json::from_str(json)?;
        let section = asset.solar_system;

        let mut table = Self::new();
        for (name, period) in section.orbital_periods {
            table.entry_mut(&name).orbital_period_days = usable(&period);
        }
        for (name, radius) in section.orbital_radii {
            table.entry_mut(&name).orbital_radius = usable(&radius);
        }
        for (name, hours) in section.rotation_periods_hours {
            table.entry_mut(&name).rotation_period_hours = usable(&hours);
        }
        Ok(table)
    }

    pub fn with_defaults(mut self, defaults: EphemerisDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &EphemerisDefaults {
        &self.defaults
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, entry: EphemerisEntry) {
        self.entries.insert(name.into(), entry);
    }

    fn entry_mut(&mut self, name: &str) -> &mut EphemerisEntry {
        self.entries.entry(name.to_string()).or_default()
    }

    /// Raw entry for a body, if the table mentions it at all.
    pub fn lookup(&self, name: &str) -> Option<&EphemerisEntry> {
        self.entries.get(name)
    }

    /// Resolve concrete parameters for a body, degrading to defaults field by field.
    /// `index` is the body's registry index (drives the fallback radius).
    pub fn orbit_params(&self, name: &str, index: usize) -> OrbitParams {
        let entry = self.lookup(name).copied().unwrap_or_default();
        OrbitParams {
            radius: entry
                .orbital_radius
                .unwrap_or_else(|| self.defaults.radius_for_index(index)),
            period_days: entry.orbital_period_days.unwrap_or(self.defaults.period_days),
            rotation_hours: entry
                .rotation_period_hours
                .unwrap_or(self.defaults.rotation_hours),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
