/// Debug panel state. The browser draws the sliders; values arrive as
/// custom input events and are snapped to each slider's step here.

/// A numeric slider binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Slider {
    /// Clamp to range and snap to the nearest step above `min`.
    pub fn quantize(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // keep the decimal representation tidy (0.07, not 0.07000000000000001)
        let digits = (-self.step.log10()).ceil().max(0.0) as i32;
        let factor = 10f64.powi(digits);
        ((snapped * factor).round() / factor).clamp(self.min, self.max)
    }
}

pub const ORBITAL_SPEED: Slider = Slider { label: "🪐 Vitesse orbitale", min: 0.0, max: 1.0, step: 0.01 };
pub const NOISE_SPEED: Slider = Slider { label: "🌀 Vitesse du bruit", min: 0.0, max: 0.1, step: 0.001 };
pub const NOISE_AMPLITUDE: Slider = Slider { label: "📈 Amplitude du bruit", min: 0.0, max: 1.0, step: 0.01 };

pub const DEFAULT_ORBITAL_SPEED: f64 = 1.0;
/// Values restored by the "Reset Soleil" button.
pub const SUN_RESET_NOISE_SPEED: f64 = 0.025;
pub const SUN_RESET_NOISE_AMPLITUDE: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct DebugPanel {
    pub orbital_speed: f64,
    pub noise_speed: f64,
    pub noise_amplitude: f64,
}

impl DebugPanel {
    /// Start from the sun material's current uniforms.
    pub fn new(noise_speed: f64, noise_amplitude: f64) -> Self {
        Self {
            orbital_speed: DEFAULT_ORBITAL_SPEED,
            noise_speed,
            noise_amplitude,
        }
    }

    pub fn set_orbital_speed(&mut self, value: f64) -> f64 {
        self.orbital_speed = ORBITAL_SPEED.quantize(value);
        self.orbital_speed
    }

    pub fn reset_orbital_speed(&mut self) -> f64 {
        self.orbital_speed = DEFAULT_ORBITAL_SPEED;
        self.orbital_speed
    }

    pub fn set_noise_speed(&mut self, value: f64) -> f64 {
        self.noise_speed = NOISE_SPEED.quantize(value);
        self.noise_speed
    }

    pub fn set_noise_amplitude(&mut self, value: f64) -> f64 {
        self.noise_amplitude = NOISE_AMPLITUDE.quantize(value);
        self.noise_amplitude
    }

    pub fn reset_sun(&mut self) {
        self.noise_speed = SUN_RESET_NOISE_SPEED;
        self.noise_amplitude = SUN_RESET_NOISE_AMPLITUDE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sliders_snap_to_step() {
        assert_eq!(ORBITAL_SPEED.quantize(0.456), 0.46);
        assert_eq!(ORBITAL_SPEED.quantize(0.07), 0.07);
        assert_eq!(NOISE_SPEED.quantize(0.0234), 0.023);
        assert_eq!(NOISE_AMPLITUDE.quantize(0.333), 0.33);
    }

    #[test]
    fn sliders_clamp_to_range() {
        assert_eq!(ORBITAL_SPEED.quantize(3.0), 1.0);
        assert_eq!(ORBITAL_SPEED.quantize(-1.0), 0.0);
        assert_eq!(NOISE_SPEED.quantize(0.5), 0.1);
        assert_eq!(NOISE_AMPLITUDE.quantize(f64::NAN), 0.0);
    }

    #[test]
    fn resets() {
        let mut panel = DebugPanel::new(0.002, 0.5);
        panel.set_orbital_speed(0.25);
        panel.set_noise_speed(0.05);
        panel.set_noise_amplitude(0.9);

        assert_eq!(panel.reset_orbital_speed(), 1.0);
        panel.reset_sun();
        assert_eq!(panel, DebugPanel { orbital_speed: 1.0, noise_speed: 0.025, noise_amplitude: 0.2 });
    }
}
