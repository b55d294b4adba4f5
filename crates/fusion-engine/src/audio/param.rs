/// How a breakpoint is approached from the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ramp {
    /// Jump at the breakpoint time.
    Step,
    Linear,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Breakpoint {
    time: f32,
    value: f32,
    ramp: Ramp,
}

/// Automated parameter (frequency, gain): a starting value plus a timeline of
/// set / linear-ramp / exponential-ramp breakpoints, evaluated at any time.
/// Breakpoints must be added in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    initial: f32,
    points: Vec<Breakpoint>,
}

impl Param {
    pub fn new(initial: f32) -> Self {
        Self {
            initial,
            points: Vec::new(),
        }
    }

    /// Hold `value` from `time` on.
    pub fn set(mut self, value: f32, time: f32) -> Self {
        self.points.push(Breakpoint { time, value, ramp: Ramp::Step });
        self
    }

    /// Ramp linearly from the previous breakpoint to reach `value` at `time`.
    pub fn linear_to(mut self, value: f32, time: f32) -> Self {
        self.points.push(Breakpoint { time, value, ramp: Ramp::Linear });
        self
    }

    /// Ramp exponentially from the previous breakpoint to reach `value` at `time`.
    /// Both ends must be non-zero and share a sign; otherwise the value steps.
    pub fn exponential_to(mut self, value: f32, time: f32) -> Self {
        self.points.push(Breakpoint { time, value, ramp: Ramp::Exponential });
        self
    }

    pub fn value_at(&self, t: f32) -> f32 {
        let (mut prev_time, mut prev_value) = (0.0f32, self.initial);
        for p in &self.points {
            if t < p.time {
                let span = p.time - prev_time;
                if span <= 0.0 {
                    return prev_value;
                }
                let frac = ((t - prev_time) / span).clamp(0.0, 1.0);
                return match p.ramp {
                    Ramp::Step => prev_value,
                    Ramp::Linear => prev_value + (p.value - prev_value) * frac,
                    Ramp::Exponential => {
                        if prev_value == 0.0 || p.value == 0.0 || (prev_value > 0.0) != (p.value > 0.0) {
                            prev_value
                        } else {
                            prev_value * (p.value / prev_value).powf(frac)
                        }
                    }
                };
            }
            prev_time = p.time;
            prev_value = p.value;
        }
        prev_value
    }
}
