/// Slack applied when comparing accumulated f32 time against a deadline,
/// so a 4 s wait at 1/60 s steps finishes on tick 240 rather than 241.
const TIME_EPSILON: f32 = 1e-4;

/// Shortest period an `Interval` runs at. Kept well above `TIME_EPSILON`,
/// which would otherwise let one step fire without bound.
pub const MIN_PERIOD: f32 = 1e-3;

/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = ((self.accumulator + TIME_EPSILON * self.dt) / self.dt) as u32;
        self.accumulator = (self.accumulator - steps as f32 * self.dt).max(0.0);
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// One-shot countdown: the tick-driven form of "pause N seconds, then continue".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f32,
    running: bool,
}

impl Countdown {
    pub fn start(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt`. Returns true exactly once, on the tick the countdown expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= TIME_EPSILON {
            self.remaining = 0.0;
            self.running = false;
            return true;
        }
        false
    }
}

/// Repeating timer: the tick-driven form of `setInterval`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    period: f32,
    accumulated: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            accumulated: 0.0,
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Advance by `dt`. Returns how many periods elapsed during this step.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.accumulated += dt;
        let mut fired = 0;
        while self.accumulated + TIME_EPSILON >= self.period {
            self.accumulated -= self.period;
            fired += 1;
        }
        self.accumulated = self.accumulated.max(0.0);
        fired
    }

    /// Discard any partially elapsed period.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
