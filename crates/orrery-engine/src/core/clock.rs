/// Simulation clock driven by the browser's render loop.
///
/// `elapsed` is absolute simulation time in milliseconds; orbital positions
/// are evaluated from it directly so they cannot drift. `delta` is the time
/// since the previous frame and only feeds rotation integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    elapsed: f64,
    delta: f64,
    /// Upper bound for a single frame delta (ms).
    max_delta: f64,
    frame: u64,
}

impl SimulationClock {
    pub fn new(max_delta: f64) -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            max_delta,
            frame: 0,
        }
    }

    /// Clock at an explicit point in time, mostly for tests and replays.
    pub fn at(elapsed: f64, delta: f64) -> Self {
        Self {
            elapsed,
            delta,
            max_delta: f64::INFINITY,
            frame: 0,
        }
    }

    /// Advance by one rendered frame. Negative or non-finite frame times count as zero;
    /// long stalls (backgrounded tab) are capped at `max_delta`.
    pub fn tick(&mut self, frame_ms: f64) {
        let dt = if frame_ms.is_finite() { frame_ms.max(0.0) } else { 0.0 };
        self.delta = dt.min(self.max_delta);
        self.elapsed += self.delta;
        self.frame += 1;
    }

    /// Milliseconds since the simulation started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Milliseconds since the previous frame.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Elapsed time in seconds (shader time).
    pub fn seconds(&self) -> f64 {
        self.elapsed / 1000.0
    }

    /// Number of ticks since start.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(250.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_accumulates() {
        let mut clock = SimulationClock::new(100.0);
        clock.tick(16.0);
        clock.tick(17.0);
        assert_eq!(clock.elapsed(), 33.0);
        assert_eq!(clock.delta(), 17.0);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn caps_long_frames() {
        let mut clock = SimulationClock::new(100.0);
        clock.tick(5000.0);
        assert_eq!(clock.delta(), 100.0);
        assert_eq!(clock.elapsed(), 100.0);
    }

    #[test]
    fn ignores_bogus_frame_times() {
        let mut clock = SimulationClock::new(100.0);
        clock.tick(-3.0);
        clock.tick(f64::NAN);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn seconds_for_shaders() {
        let clock = SimulationClock::at(2500.0, 16.0);
        assert!((clock.seconds() - 2.5).abs() < 1e-12);
    }
}
