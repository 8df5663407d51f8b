/// Step size with a fixed adjustment increment, saturated to `[increment, 1]`.
///
/// The grid and the particle system each own one, so their steps evolve
/// independently.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStepController {
    step: f64,
    increment: f64,
}

impl TimeStepController {
    /// Start at `step == increment`. The increment itself is saturated into (0, 1].
    pub fn new(increment: f64) -> Self {
        let increment = if increment.is_finite() && increment > 0.0 { increment.min(1.0) } else { 1.0 };
        Self { step: increment, increment }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn increase(&mut self) {
        self.step = (self.step + self.increment).min(1.0);
    }

    pub fn decrease(&mut self) {
        self.step = (self.step - self.increment).max(self.increment);
    }

    pub fn set(&mut self, step: f64) {
        self.step = if step.is_nan() { self.increment } else { step.clamp(self.increment, 1.0) };
    }
}
