use std::time::{Duration, Instant};

/// Timing for one redraw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, capped by the clock's `max_dt`.
    pub dt: f32,
    /// Seconds since the clock started. Never capped, so anything animated
    /// from it tracks the wall clock. Kept in `f64` so long sessions do not
    /// lose sub-frame resolution.
    pub elapsed: f64,
    /// 0 for the first tick.
    pub frame: u64,
}

/// Monotonic clock ticked once per redraw.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    previous: Instant,
    frame: u64,
    max_dt: Duration,
}

impl FrameClock {
    /// Default cap on `dt` after a stall (debugger, minimized window).
    pub const MAX_DT: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            previous: now,
            frame: 0,
            max_dt: Self::MAX_DT,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let step = now.saturating_duration_since(self.previous).min(self.max_dt);
        self.previous = now;

        let time = FrameTime {
            dt: step.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.origin).as_secs_f64(),
            frame: self.frame,
        };
        self.frame += 1;
        time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_numbered_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame, 0);
        assert_eq!(clock.tick().frame, 1);
    }

    #[test]
    fn stall_caps_dt_but_not_elapsed() {
        let mut clock = FrameClock::new();
        let origin = clock.origin;

        let t = clock.tick_at(origin + Duration::from_secs(3));
        assert!((t.dt - 0.25).abs() < 1e-6);
        assert!((t.elapsed - 3.0).abs() < 1e-4);
    }

    #[test]
    fn repeated_instant_gives_zero_dt() {
        let mut clock = FrameClock::new();
        let at = clock.origin + Duration::from_millis(16);

        clock.tick_at(at);
        let t = clock.tick_at(at);
        assert_eq!(t.dt, 0.0);
        assert!((t.elapsed - 0.016).abs() < 1e-4);
    }

    #[test]
    fn elapsed_keeps_frame_resolution_after_hours() {
        let mut clock = FrameClock::new();
        let ten_hours = clock.origin + Duration::from_secs(36_000);

        let a = clock.tick_at(ten_hours);
        let b = clock.tick_at(ten_hours + Duration::from_millis(16));
        assert!((b.elapsed - a.elapsed - 0.016).abs() < 1e-9);
    }

    #[test]
    fn clock_in_the_past_saturates() {
        let mut clock = FrameClock::new();
        let t = clock.tick_at(clock.origin);
        assert_eq!(t.dt, 0.0);
        assert_eq!(t.elapsed, 0.0);
    }
}
