//! Float and integer ranges.

use crate::error::{Error, Result};
use crate::rng_util;
use crate::value::is_close;

/// A real-valued hyperparameter on `[lower, upper]`.
///
/// Without an explicit default the midpoint is used, or the geometric mean
/// when the range is on a log scale.
#[derive(Clone, Debug)]
pub struct FloatHyperparameter {
    name: String,
    lower: f64,
    upper: f64,
    default_value: f64,
    log: bool,
}

/// Builder for [`FloatHyperparameter`].
#[derive(Clone, Debug)]
#[must_use]
pub struct FloatBuilder {
    name: String,
    lower: f64,
    upper: f64,
    default_value: Option<f64>,
    log: bool,
}

impl FloatBuilder {
    /// Samples and normalizes in log space.
    pub fn log_scale(mut self) -> Self {
        self.log = true;
        self
    }

    /// Sets the default value.
    pub fn default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Validates the bounds and builds the hyperparameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] unless `lower < upper` with both
    /// finite, [`Error::InvalidLogBounds`] for a log range with
    /// `lower <= 0`, and [`Error::IllegalDefault`] for a default outside the
    /// bounds.
    pub fn build(self) -> Result<FloatHyperparameter> {
        let Self {
            name,
            lower,
            upper,
            default_value,
            log,
        } = self;

        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(Error::InvalidBounds { name, lower, upper });
        }
        if log && lower <= 0.0 {
            return Err(Error::InvalidLogBounds { name });
        }

        let default_value = match default_value {
            Some(value) if (lower..=upper).contains(&value) => value,
            Some(value) => {
                return Err(Error::IllegalDefault {
                    name,
                    value: value.to_string(),
                });
            }
            None if log => (lower * upper).sqrt(),
            None => (lower + upper) / 2.0,
        };

        Ok(FloatHyperparameter {
            name,
            lower,
            upper,
            default_value,
            log,
        })
    }
}

impl FloatHyperparameter {
    /// Starts building a float hyperparameter on `[lower, upper]`.
    pub fn builder(name: impl Into<String>, lower: f64, upper: f64) -> FloatBuilder {
        FloatBuilder {
            name: name.into(),
            lower,
            upper,
            default_value: None,
            log: false,
        }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns the default value.
    #[must_use]
    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    /// Whether the range is on a log scale.
    #[must_use]
    pub fn is_log(&self) -> bool {
        self.log
    }

    /// Whether `value` lies within the bounds.
    #[must_use]
    pub fn is_legal(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Maps a value onto `[0, 1]`, in log space for log ranges.
    #[must_use]
    pub fn to_vector(&self, value: f64) -> f64 {
        if self.log {
            (value.ln() - self.lower.ln()) / (self.upper.ln() - self.lower.ln())
        } else {
            (value - self.lower) / (self.upper - self.lower)
        }
    }

    /// Maps a point of `[0, 1]` back into the range.
    #[must_use]
    pub fn to_value(&self, vector: f64) -> f64 {
        let value = if self.log {
            (self.lower.ln() + vector * (self.upper.ln() - self.lower.ln())).exp()
        } else {
            self.lower + vector * (self.upper - self.lower)
        };
        value.clamp(self.lower, self.upper)
    }

    /// Draws a value, uniformly in log space for log ranges.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> f64 {
        if self.log {
            rng_util::log_uniform(rng, self.lower, self.upper)
        } else {
            rng_util::uniform(rng, self.lower, self.upper)
        }
    }
}

impl PartialEq for FloatHyperparameter {
    /// Bounds and default are compared with a relative tolerance so that
    /// values surviving a text round trip still compare equal.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.log == other.log
            && is_close(self.lower, other.lower)
            && is_close(self.upper, other.upper)
            && is_close(self.default_value, other.default_value)
    }
}

/// An integer hyperparameter on `[lower, upper]`, both inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerHyperparameter {
    name: String,
    lower: i64,
    upper: i64,
    default_value: i64,
    log: bool,
}

/// Builder for [`IntegerHyperparameter`].
#[derive(Clone, Debug)]
#[must_use]
pub struct IntegerBuilder {
    name: String,
    lower: i64,
    upper: i64,
    default_value: Option<i64>,
    log: bool,
}

impl IntegerBuilder {
    /// Samples in log space.
    pub fn log_scale(mut self) -> Self {
        self.log = true;
        self
    }

    /// Sets the default value.
    pub fn default_value(mut self, value: i64) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Validates the bounds and builds the hyperparameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] unless `lower < upper`,
    /// [`Error::InvalidLogBounds`] for a log range with `lower < 1`, and
    /// [`Error::IllegalDefault`] for a default outside the bounds.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn build(self) -> Result<IntegerHyperparameter> {
        let Self {
            name,
            lower,
            upper,
            default_value,
            log,
        } = self;

        if lower >= upper {
            return Err(Error::InvalidBounds {
                name,
                lower: lower as f64,
                upper: upper as f64,
            });
        }
        if log && lower < 1 {
            return Err(Error::InvalidLogBounds { name });
        }

        let default_value = match default_value {
            Some(value) if (lower..=upper).contains(&value) => value,
            Some(value) => {
                return Err(Error::IllegalDefault {
                    name,
                    value: value.to_string(),
                });
            }
            None => {
                let (lo, hi) = (lower as f64, upper as f64);
                let center = if log {
                    (lo * hi).sqrt()
                } else {
                    (lo + hi) / 2.0
                };
                (center.round_ties_even() as i64).clamp(lower, upper)
            }
        };

        Ok(IntegerHyperparameter {
            name,
            lower,
            upper,
            default_value,
            log,
        })
    }
}

impl IntegerHyperparameter {
    /// Starts building an integer hyperparameter on `[lower, upper]`.
    pub fn builder(name: impl Into<String>, lower: i64, upper: i64) -> IntegerBuilder {
        IntegerBuilder {
            name: name.into(),
            lower,
            upper,
            default_value: None,
            log: false,
        }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Returns the default value.
    #[must_use]
    pub fn default_value(&self) -> i64 {
        self.default_value
    }

    /// Whether the range is on a log scale.
    #[must_use]
    pub fn is_log(&self) -> bool {
        self.log
    }

    /// Whether `value` lies within the bounds.
    #[must_use]
    pub fn is_legal(&self, value: i64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Maps a value onto `[0, 1]`, in log space for log ranges.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_vector(&self, value: i64) -> f64 {
        let (lo, hi, v) = (self.lower as f64, self.upper as f64, value as f64);
        if self.log {
            (v.ln() - lo.ln()) / (hi.ln() - lo.ln())
        } else {
            (v - lo) / (hi - lo)
        }
    }

    /// Maps a point of `[0, 1]` back to the nearest integer in the range.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn to_value(&self, vector: f64) -> i64 {
        let (lo, hi) = (self.lower as f64, self.upper as f64);
        let value = if self.log {
            (lo.ln() + vector * (hi.ln() - lo.ln())).exp()
        } else {
            lo + vector * (hi - lo)
        };
        (value.round() as i64).clamp(self.lower, self.upper)
    }

    /// Draws a value; log ranges are sampled in log space and rounded.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn sample(&self, rng: &mut fastrand::Rng) -> i64 {
        if self.log {
            let value = rng_util::log_uniform(rng, self.lower as f64, self.upper as f64);
            // rounding can step past either bound
            (value.round() as i64).clamp(self.lower, self.upper)
        } else {
            rng.i64(self.lower..=self.upper)
        }
    }
}
