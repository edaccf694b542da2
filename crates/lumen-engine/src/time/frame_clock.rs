use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Animation time in seconds: the sum of all clamped deltas.
    ///
    /// This is the `time` uniform handed to the minimap, portal and
    /// compositor programs.
    pub elapsed: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// A frozen frame at `elapsed` seconds.
    pub const fn at(elapsed: f32) -> Self {
        Self {
            dt: 0.0,
            elapsed,
            frame_index: 0,
        }
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per window so multi-window applications do not share animation
/// state. Delta time is clamped so a debugger pause or a minimized window does
/// not make the animations jump.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: Duration,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (100µs to 250ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: Duration::ZERO,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline without touching animation time.
    ///
    /// Call after resuming from suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Animation time so far, in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        self.advance(dt)
    }

    fn advance(&mut self, raw_dt: Duration) -> FrameTime {
        let dt = raw_dt.clamp(self.dt_min, self.dt_max);
        self.elapsed += dt;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed.as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
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
    fn stalls_are_clamped_out_of_animation_time() {
        let mut clock = FrameClock::new();
        let a = clock.advance(Duration::from_millis(16));
        let b = clock.advance(Duration::from_secs(30));
        let c = clock.advance(Duration::ZERO);

        assert_eq!(a.frame_index, 0);
        assert_eq!(c.frame_index, 2);
        assert_eq!(b.dt, 0.25);
        assert_eq!(c.dt, Duration::from_micros(100).as_secs_f32());
        let expected = Duration::from_millis(16 + 250) + Duration::from_micros(100);
        assert_eq!(c.elapsed, expected.as_secs_f32());
        assert_eq!(clock.elapsed(), c.elapsed);
    }

    #[test]
    fn frozen_frame_has_no_delta() {
        let t = FrameTime::at(1.5);
        assert_eq!(t.elapsed, 1.5);
        assert_eq!(t.dt, 0.0);
    }
}
