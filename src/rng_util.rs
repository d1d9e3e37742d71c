//! Continuous draws shared by the numeric hyperparameters.

/// Uniform `f64` in `[low, high)`.
#[inline]
pub(crate) fn uniform(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Log-uniform `f64` in `[low, high]`; both bounds must be positive.
///
/// The result is clamped because `exp(ln(x))` may land one ulp outside.
pub(crate) fn log_uniform(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    uniform(rng, low.ln(), high.ln()).exp().clamp(low, high)
}
