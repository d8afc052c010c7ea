//! Per-frame sun movement.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

/// Advances inclination by `sun_speed` per elapsed millisecond while running.
///
/// Inclination is never wrapped or clamped; the sun formula is periodic so
/// the sky keeps cycling.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDriver {
    state: DriverState,
    sun_speed: f64,
}

impl AnimationDriver {
    pub const DEFAULT_SUN_SPEED: f64 = 0.00003;

    /// A new driver starts idle.
    pub fn new(sun_speed: f64) -> Self {
        Self {
            state: DriverState::Idle,
            sun_speed,
        }
    }

    pub fn start(&mut self) {
        self.state = DriverState::Running;
    }

    pub fn pause(&mut self) {
        self.state = DriverState::Idle;
    }

    pub fn toggle(&mut self) -> DriverState {
        self.state = match self.state {
            DriverState::Idle => DriverState::Running,
            DriverState::Running => DriverState::Idle,
        };
        self.state
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn sun_speed(&self) -> f64 {
        self.sun_speed
    }

    /// Advance `inclination` by `dt_ms` worth of motion.
    ///
    /// Returns `false` and leaves `inclination` alone when idle.
    pub fn tick(&self, dt_ms: f64, inclination: &mut f64) -> bool {
        if !self.is_running() {
            return false;
        }
        *inclination += self.sun_speed * dt_ms;
        true
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SUN_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let driver = AnimationDriver::default();
        assert_eq!(driver.state(), DriverState::Idle);
        let mut inclination = 0.49;
        assert!(!driver.tick(16.0, &mut inclination));
        assert_eq!(inclination, 0.49);
    }

    #[test]
    fn test_tick_advances_by_speed_times_dt() {
        let mut driver = AnimationDriver::default();
        driver.start();
        let mut inclination = 0.49;
        assert!(driver.tick(1000.0, &mut inclination));
        assert!((inclination - 0.52).abs() < 1e-12);
    }

    #[test]
    fn test_ticks_accumulate() {
        let mut driver = AnimationDriver::new(0.001);
        driver.start();
        let mut split = 0.0;
        for _ in 0..10 {
            driver.tick(10.0, &mut split);
        }
        let mut whole = 0.0;
        driver.tick(100.0, &mut whole);
        assert!((split - whole).abs() < 1e-12);
    }

    #[test]
    fn test_inclination_is_unbounded() {
        let mut driver = AnimationDriver::new(0.01);
        driver.start();
        let mut inclination = 0.99;
        driver.tick(100.0, &mut inclination);
        assert!(inclination > 1.0);
    }

    #[test]
    fn test_toggle_and_pause() {
        let mut driver = AnimationDriver::default();
        assert_eq!(driver.toggle(), DriverState::Running);
        assert_eq!(driver.toggle(), DriverState::Idle);
        driver.start();
        driver.pause();
        let mut inclination = 0.1;
        assert!(!driver.tick(500.0, &mut inclination));
        assert_eq!(inclination, 0.1);
    }
}
