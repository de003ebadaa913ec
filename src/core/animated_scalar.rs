use serde::{Deserialize, Serialize};

/// Accumulated progress this close to 1 counts as finished, so fractions
/// that sum to 1 only in real arithmetic (ten steps of 0.1) still land.
const PROGRESS_SNAP: f64 = 1e-9;

/// Numeric value eased linearly toward a target.
///
/// `distance` is captured when the target is set and is not recomputed while
/// stepping, so a sequence of steps whose fractions add up to `1.0` lands on
/// the target exactly. A step that would carry the value past the target snaps
/// to it instead of overshooting (large frame deltas produce fractions > 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatedScalar {
    value: f64,
    target: f64,
    distance: f64,
    progress: f64,
}

impl AnimatedScalar {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            target: value,
            distance: 0.0,
            progress: 1.0,
        }
    }

    #[must_use]
    pub fn get(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        self.distance = target - self.value;
        self.progress = 0.0;
    }

    /// Advances by `fraction` of the distance recorded at `set_target`.
    pub fn step(&mut self, fraction: f64) {
        if !fraction.is_finite() || fraction <= 0.0 {
            return;
        }

        self.progress += fraction;
        let next = self.value + fraction * self.distance;
        let crossed = (self.distance >= 0.0 && next > self.target)
            || (self.distance < 0.0 && next < self.target);

        self.value = if crossed || self.progress >= 1.0 - PROGRESS_SNAP {
            self.target
        } else {
            next
        };
    }

    /// Jumps straight to `value` with no pending animation.
    pub fn reset(&mut self, value: f64) {
        *self = Self::new(value);
    }
}

impl Default for AnimatedScalar {
    fn default() -> Self {
        Self::new(0.0)
    }
}
