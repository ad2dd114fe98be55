/// Uniforms of the sun's noise shader. The shader itself lives in the
/// browser; Rust owns the values and ships them as a frame event.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunMaterial {
    /// Seconds since start.
    pub time: f32,
    pub noise_amplitude: f32,
    pub noise_speed: f32,
}

impl Default for SunMaterial {
    fn default() -> Self {
        Self {
            time: 0.0,
            noise_amplitude: 0.5,
            noise_speed: 0.002,
        }
    }
}

impl SunMaterial {
    pub fn update(&mut self, elapsed_ms: f64) {
        self.time = (elapsed_ms / 1000.0) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_in_seconds() {
        let mut sun = SunMaterial::default();
        sun.update(2500.0);
        assert_eq!(sun.time, 2.5);
        assert_eq!(sun.noise_amplitude, 0.5);
        assert_eq!(sun.noise_speed, 0.002);
    }
}
