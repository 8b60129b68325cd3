use std::time::{Duration, Instant};

/// Frame timing snapshot handed to actor hooks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GameTime {
    /// Time since the previous frame.
    pub elapsed: Duration,

    /// Time since the clock started.
    pub total: Duration,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl GameTime {
    #[inline]
    pub const fn new(elapsed: Duration, total: Duration, frame_index: u64) -> Self {
        Self { elapsed, total, frame_index }
    }

    /// A snapshot with zero elapsed and total time.
    #[inline]
    pub const fn zero() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, 0)
    }

    /// Elapsed time in seconds.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

impl Default for GameTime {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Debug, Clone)]
enum Source {
    Wall { last: Instant, dt_min: Duration, dt_max: Duration },
    Fixed { step: Duration },
}

/// Frame clock producing `GameTime` snapshots.
///
/// Wall-clock mode clamps delta time so a debugger pause or a stalled frame
/// does not make actors jump. Fixed mode advances by a constant step and is
/// what headless runs and tests use.
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: Source,
    total: Duration,
    frame_index: u64,
}

impl FrameClock {
    /// Wall-clock mode with default clamps (0.1 ms to 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Wall-clock mode with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            source: Source::Wall { last: Instant::now(), dt_min, dt_max },
            total: Duration::ZERO,
            frame_index: 0,
        }
    }

    /// Deterministic mode: every tick advances by exactly `step`.
    pub fn fixed(step: Duration) -> Self {
        Self {
            source: Source::Fixed { step },
            total: Duration::ZERO,
            frame_index: 0,
        }
    }

    /// Fixed mode stepping at `fps` frames per second.
    pub fn fixed_fps(fps: u32) -> Self {
        Self::fixed(Duration::from_secs_f64(1.0 / f64::from(fps.max(1))))
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.source, Source::Fixed { .. })
    }

    /// Resets the wall-clock baseline, e.g. after a reload pause.
    pub fn reset(&mut self) {
        if let Source::Wall { last, .. } = &mut self.source {
            *last = Instant::now();
        }
    }

    /// Advances the clock and returns a new `GameTime`.
    pub fn tick(&mut self) -> GameTime {
        let elapsed = match &mut self.source {
            Source::Wall { last, dt_min, dt_max } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(*last).clamp(*dt_min, *dt_max);
                *last = now;
                dt
            }
            Source::Fixed { step } => *step,
        };

        self.total += elapsed;

        let time = GameTime::new(elapsed, self.total, self.frame_index);
        self.frame_index = self.frame_index.wrapping_add(1);
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
    fn fixed_clock_accumulates_total() {
        let mut clock = FrameClock::fixed(Duration::from_millis(20));
        let first = clock.tick();
        let second = clock.tick();
        assert_eq!(first.elapsed, Duration::from_millis(20));
        assert_eq!(second.total, Duration::from_millis(40));
        assert_eq!(second.frame_index, 1);
    }

    #[test]
    fn wall_clock_respects_minimum_clamp() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(50));
        let t = clock.tick();
        assert!(t.elapsed >= Duration::from_millis(5));
        assert!(t.elapsed <= Duration::from_millis(50));
    }

    #[test]
    fn fixed_fps_never_divides_by_zero() {
        let mut clock = FrameClock::fixed_fps(0);
        assert_eq!(clock.tick().elapsed, Duration::from_secs(1));
    }

    #[test]
    fn dt_is_in_seconds() {
        let t = GameTime::new(Duration::from_millis(250), Duration::ZERO, 0);
        assert!((t.dt() - 0.25).abs() < 1e-6);
    }
}
