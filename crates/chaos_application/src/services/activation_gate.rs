//! Per-invocation activation decision

use rand::Rng;

/// Decides whether an enabled fault fires on a given invocation
///
/// Each call draws from the calling thread's own generator, so concurrent
/// invocations never share random state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivationGate;

impl ActivationGate {
    /// Create a new gate
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns true iff a uniform draw in `[0, 1)` is below `rate`
    pub fn should_fire(&self, rate: f64) -> bool {
        Self::draw(&mut rand::rng(), rate)
    }

    /// Same decision as [`should_fire`](Self::should_fire) using the given generator
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> bool {
        if rate.is_nan() || rate <= 0.0 {
            return false;
        }

        if rate >= 1.0 {
            return true;
        }

        rng.random::<f64>() < rate
    }
}
