/// Planet fact sheets from the data asset and their modal card.
///
/// The asset's `solarSystem.planets.<key>` objects are loosely typed: a
/// value may be a number, a numeric string, free text or an `{a, b}` pair.
/// Everything is displayed the way a French-locale page would show it.

use std::collections::HashMap;
use std::fmt::Write;

use serde::{Deserialize, Deserializer};

/// Narrow no-break space, the French thousands separator.
const GROUP_SEPARATOR: char = '\u{202F}';
/// Fraction digits kept when formatting.
const MAX_FRACTION_DIGITS: i32 = 3;

// ── Values ───────────────────────────────────────────────────────────

/// A loosely typed quantity from the data asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
    /// Two-part value such as an ellipsoid's axes.
    Pair { a: serde_json::Value, b: serde_json::Value },
}

impl Quantity {
    /// Whether the value would show up at all (0 and "" are treated as absent).
    pub fn is_present(&self) -> bool {
        match self {
            Quantity::Number(n) => *n != 0.0 && !n.is_nan(),
            Quantity::Text(s) => !s.is_empty(),
            Quantity::Pair { .. } => true,
        }
    }

    /// Display text for this value.
    pub fn display(&self) -> String {
        match self {
            Quantity::Number(n) => format_fr(*n),
            Quantity::Text(s) => match leading_number(s) {
                Some(n) => format_fr(n),
                None => s.clone(),
            },
            Quantity::Pair { a, b } => format!("{} x {}", plain(a), plain(b)),
        }
    }
}

fn plain(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    (1..=end)
        .rev()
        .filter(|&i| text.is_char_boundary(i))
        .find_map(|i| text[..i].parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Format a number for French readers: grouped thousands, decimal comma,
/// at most three fraction digits.
pub fn format_fr(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let factor = 10f64.powi(MAX_FRACTION_DIGITS);
    let mut rounded = if value.abs() < 1e15 {
        (value * factor).round() / factor
    } else {
        value
    };
    if rounded == 0.0 {
        rounded = 0.0; // drop the sign of -0
    }

    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + 8);
    if rounded < 0.0 {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

// ── Data asset ───────────────────────────────────────────────────────

/// Read a `null` text field as empty.
fn text_or_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(de).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SatelliteFacts {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub diameter_km: Option<Quantity>,
    pub mass_kg: Option<Quantity>,
    pub gravity_m_s2: Option<Quantity>,
    pub distance_from_planet_km: Option<Quantity>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanetFacts {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "text_or_empty")]
    pub kind: String,
    pub diameter_km: Option<Quantity>,
    pub mass_kg: Option<Quantity>,
    pub gravity_m_s2: Option<Quantity>,
    pub distance_from_sun_au: Option<Quantity>,
    pub distance_from_sun_km: Option<Quantity>,
    pub average_temperature_c: Option<Quantity>,
    pub temperature_surface_c: Option<Quantity>,
    pub temperature_core_c: Option<Quantity>,
    pub rotation_period_days_sidereal: Option<Quantity>,
    pub rotation_period_hours_sidereal: Option<Quantity>,
    pub rotation_direction: Option<String>,
    pub orbital_period_days: Option<Quantity>,
    pub orbital_period_years: Option<Quantity>,
    #[serde(default)]
    pub satellites: Vec<SatelliteFacts>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
struct DataAsset {
    #[serde(rename = "solarSystem", default)]
    solar_system: SolarSystemSection,
}

#[derive(Default, Deserialize)]
struct SolarSystemSection {
    #[serde(default)]
    planets: HashMap<String, PlanetFacts>,
}

/// Fact sheets keyed like the rest of the data asset ("earth", "saturne", …).
#[derive(Debug, Clone, Default)]
pub struct FactSheet {
    planets: HashMap<String, PlanetFacts>,
}

impl FactSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let asset: DataAsset = serde_json::from_str(json)?;
        Ok(Self { planets: asset.solar_system.planets })
    }

    pub fn get(&self, key: &str) -> Option<&PlanetFacts> {
        self.planets.get(key)
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// Card for a data-asset key. The moon has no entry of its own and is
    /// described by Earth's first satellite.
    pub fn card_for(&self, key: &str) -> Option<InfoCard> {
        if key == "moon" {
            let moon = self.get("earth").and_then(|earth| earth.satellites.first());
            if moon.is_none() {
                log::warn!("moon data not found in Earth satellites");
            }
            return moon.map(InfoCard::for_moon);
        }
        match self.get(key) {
            Some(facts) => Some(InfoCard::for_planet(facts)),
            None => {
                log::warn!("no planet data found for key: {}", key);
                None
            }
        }
    }
}

// ── Card ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteLine {
    pub name: String,
    pub lines: Vec<String>,
    pub notes: Option<String>,
}

/// What the planet modal shows.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoCard {
    pub title: String,
    pub kind: String,
    pub rows: Vec<InfoRow>,
    pub satellites: Vec<SatelliteLine>,
    pub notes: Option<String>,
}

fn push_row(rows: &mut Vec<InfoRow>, label: &'static str, value: &Option<Quantity>, unit: &str) {
    if let Some(q) = value.as_ref().filter(|q| q.is_present()) {
        rows.push(InfoRow { label, value: format!("{}{}", q.display(), unit) });
    }
}

fn non_empty(text: &Option<String>) -> Option<String> {
    text.clone().filter(|s| !s.is_empty())
}

impl InfoCard {
    pub fn for_planet(facts: &PlanetFacts) -> Self {
        let mut rows = Vec::new();
        push_row(&mut rows, "Diamètre", &facts.diameter_km, " km");
        push_row(&mut rows, "Masse", &facts.mass_kg, " kg");
        push_row(&mut rows, "Gravité", &facts.gravity_m_s2, " m/s²");
        push_row(&mut rows, "Distance du Soleil", &facts.distance_from_sun_au, " UA");
        push_row(&mut rows, "Distance du Soleil", &facts.distance_from_sun_km, " km");
        push_row(&mut rows, "Température moyenne", &facts.average_temperature_c, "°C");
        push_row(&mut rows, "Température de surface", &facts.temperature_surface_c, "°C");
        push_row(&mut rows, "Température du noyau", &facts.temperature_core_c, "°C");
        push_row(&mut rows, "Période de rotation", &facts.rotation_period_days_sidereal, " jours");
        push_row(&mut rows, "Période de rotation", &facts.rotation_period_hours_sidereal, " heures");
        if let Some(direction) = non_empty(&facts.rotation_direction) {
            rows.push(InfoRow { label: "Direction de rotation", value: direction });
        }
        push_row(&mut rows, "Période orbitale", &facts.orbital_period_days, " jours");
        push_row(&mut rows, "Période orbitale", &facts.orbital_period_years, " années");

        let satellites = facts
            .satellites
            .iter()
            .map(|s| {
                let mut lines = Vec::new();
                let mut line = |label: &str, q: &Option<Quantity>, unit: &str| {
                    if let Some(q) = q.as_ref().filter(|q| q.is_present()) {
                        lines.push(format!("{}: {}{}", label, q.display(), unit));
                    }
                };
                line("Diamètre", &s.diameter_km, " km");
                line("Masse", &s.mass_kg, " kg");
                line("Distance", &s.distance_from_planet_km, " km");
                SatelliteLine { name: s.name.clone(), lines, notes: non_empty(&s.notes) }
            })
            .collect();

        Self {
            title: facts.name.clone(),
            kind: facts.kind.clone(),
            rows,
            satellites,
            notes: non_empty(&facts.notes),
        }
    }

    pub fn for_moon(moon: &SatelliteFacts) -> Self {
        let mut rows = Vec::new();
        push_row(&mut rows, "Diamètre", &moon.diameter_km, " km");
        push_row(&mut rows, "Masse", &moon.mass_kg, " kg");
        push_row(&mut rows, "Gravité", &moon.gravity_m_s2, " m/s²");
        push_row(&mut rows, "Distance de la Terre", &moon.distance_from_planet_km, " km");

        Self {
            title: moon.name.clone(),
            kind: moon.kind.clone().unwrap_or_default(),
            rows,
            satellites: Vec::new(),
            notes: non_empty(&moon.notes),
        }
    }

    /// Modal body markup. The title goes in its own element, see `title`.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = write!(html, r#"<div class="planet-info"><div class="planet-type">{}</div>"#, escape(&self.kind));

        html.push_str(r#"<div class="info-section">"#);
        for row in &self.rows {
            let _ = write!(
                html,
                r#"<div class="info-row"><span class="info-label">{}</span><span class="info-value">{}</span></div>"#,
                row.label,
                escape(&row.value),
            );
        }
        html.push_str("</div>");

        if !self.satellites.is_empty() {
            html.push_str(r#"<div class="satellites-section"><div class="satellites-title">Satellites</div>"#);
            for sat in &self.satellites {
                let _ = write!(html, r#"<div class="satellite-item"><div class="satellite-name">{}</div>"#, escape(&sat.name));
                for line in &sat.lines {
                    let _ = write!(html, "<div>{}</div>", escape(line));
                }
                if let Some(notes) = &sat.notes {
                    let _ = write!(html, r#"<div class="satellite-notes">{}</div>"#, escape(notes));
                }
                html.push_str("</div>");
            }
            html.push_str("</div>");
        }

        if let Some(notes) = &self.notes {
            let _ = write!(
                html,
                r#"<div class="notes"><div class="notes-title">Informations</div><div class="notes-text">{}</div></div>"#,
                escape(notes),
            );
        }

        html.push_str("</div>");
        html
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
