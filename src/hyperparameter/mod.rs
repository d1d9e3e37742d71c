//! Hyperparameter kinds.
//!
//! [`CategoricalHyperparameter`] is the full-featured discrete domain with
//! weights, vector encoding and neighbor generation. The numeric and
//! ordinal kinds carry what a configuration space and the PCS codec need:
//! name, bounds or sequence, default, log flag, legality checks and
//! sampling.
//!
//! Every kind is built through a fluent builder whose `build` validates the
//! domain:
//!
//! ```
//! use configspace::hyperparameter::{
//!     CategoricalHyperparameter, FloatHyperparameter, Hyperparameter,
//! };
//!
//! let kernel = CategoricalHyperparameter::builder("kernel", vec!["rbf", "poly"])
//!     .default_value("poly")
//!     .build()
//!     .unwrap();
//! let c = FloatHyperparameter::builder("C", 0.03125, 32768.0)
//!     .log_scale()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(c.default_value(), 32.0);
//! let hp: Hyperparameter = kernel.into();
//! assert_eq!(hp.name(), "kernel");
//! ```

mod categorical;
mod numeric;
mod ordinal;

use core::fmt;

pub use categorical::{CategoricalBuilder, CategoricalHyperparameter};
pub use numeric::{FloatBuilder, FloatHyperparameter, IntegerBuilder, IntegerHyperparameter};
pub use ordinal::{OrdinalBuilder, OrdinalHyperparameter};

use crate::error::{Error, Result};
use crate::value::{Value, ValueKind};

/// Any hyperparameter that can live in a configuration space.
#[derive(Clone, Debug, PartialEq)]
pub enum Hyperparameter {
    /// A real-valued range.
    Float(FloatHyperparameter),
    /// An integer range.
    Integer(IntegerHyperparameter),
    /// An unordered finite set of values.
    Categorical(CategoricalHyperparameter),
    /// An ordered finite sequence of values.
    Ordinal(OrdinalHyperparameter),
}

impl Hyperparameter {
    /// Returns the name of the hyperparameter.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Float(hp) => hp.name(),
            Self::Integer(hp) => hp.name(),
            Self::Categorical(hp) => hp.name(),
            Self::Ordinal(hp) => hp.name(),
        }
    }

    /// Returns the default value.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self {
            Self::Float(hp) => Value::Float(hp.default_value()),
            Self::Integer(hp) => Value::Int(hp.default_value()),
            Self::Categorical(hp) => hp.default_value().clone(),
            Self::Ordinal(hp) => hp.default_value().clone(),
        }
    }

    /// Number of distinct values, `None` for real ranges and for integer
    /// ranges whose count does not fit a `usize`.
    #[must_use]
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Float(_) => None,
            Self::Integer(hp) => hp
                .upper()
                .checked_sub(hp.lower())
                .and_then(|span| span.checked_add(1))
                .and_then(|count| usize::try_from(count).ok()),
            Self::Categorical(hp) => Some(hp.size()),
            Self::Ordinal(hp) => Some(hp.size()),
        }
    }

    /// Whether sampling happens in log space.
    #[must_use]
    pub fn is_log(&self) -> bool {
        match self {
            Self::Float(hp) => hp.is_log(),
            Self::Integer(hp) => hp.is_log(),
            Self::Categorical(_) | Self::Ordinal(_) => false,
        }
    }

    /// Whether `<` and `>` are meaningful on this hyperparameter's values.
    #[must_use]
    pub fn is_orderable(&self) -> bool {
        !matches!(self, Self::Categorical(_))
    }

    /// Whether `value` belongs to the domain.
    #[must_use]
    pub fn is_legal(&self, value: &Value) -> bool {
        match self {
            Self::Float(hp) => match value {
                Value::Int(_) | Value::Float(_) => {
                    value.as_f64().is_some_and(|v| hp.is_legal(v))
                }
                _ => false,
            },
            Self::Integer(hp) => match value {
                Value::Int(_) | Value::Float(_) => {
                    value.as_i64().is_some_and(|v| hp.is_legal(v))
                }
                _ => false,
            },
            Self::Categorical(hp) => hp.is_legal(value),
            Self::Ordinal(hp) => hp.is_legal(value),
        }
    }

    /// Draws one value.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Value {
        match self {
            Self::Float(hp) => Value::Float(hp.sample(rng)),
            Self::Integer(hp) => Value::Int(hp.sample(rng)),
            Self::Categorical(hp) => hp.sample(rng),
            Self::Ordinal(hp) => hp.sample(rng),
        }
    }

    /// Returns the categorical domain, if this is one.
    #[must_use]
    pub fn as_categorical(&self) -> Option<&CategoricalHyperparameter> {
        match self {
            Self::Categorical(hp) => Some(hp),
            _ => None,
        }
    }
}

impl fmt::Display for Hyperparameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(hp) => write!(
                f,
                "{}, Type: UniformFloat, Range: [{}, {}], Default: {}{}",
                hp.name(),
                Value::Float(hp.lower()),
                Value::Float(hp.upper()),
                Value::Float(hp.default_value()),
                if hp.is_log() { ", on log-scale" } else { "" }
            ),
            Self::Integer(hp) => write!(
                f,
                "{}, Type: UniformInteger, Range: [{}, {}], Default: {}{}",
                hp.name(),
                hp.lower(),
                hp.upper(),
                hp.default_value(),
                if hp.is_log() { ", on log-scale" } else { "" }
            ),
            Self::Categorical(hp) => write!(f, "{hp}"),
            Self::Ordinal(hp) => write!(f, "{hp}"),
        }
    }
}

impl From<FloatHyperparameter> for Hyperparameter {
    fn from(hp: FloatHyperparameter) -> Self {
        Self::Float(hp)
    }
}

impl From<IntegerHyperparameter> for Hyperparameter {
    fn from(hp: IntegerHyperparameter) -> Self {
        Self::Integer(hp)
    }
}

impl From<CategoricalHyperparameter> for Hyperparameter {
    fn from(hp: CategoricalHyperparameter) -> Self {
        Self::Categorical(hp)
    }
}

impl From<OrdinalHyperparameter> for Hyperparameter {
    fn from(hp: OrdinalHyperparameter) -> Self {
        Self::Ordinal(hp)
    }
}

/// Rejects an empty list or a value that occurs more than once.
///
/// Values are compared after casting into `kind`, so `true` and `1`
/// collide in an integer domain.
fn check_choices(name: &str, values: &[Value], kind: ValueKind) -> Result<()> {
    if values.is_empty() {
        return Err(Error::EmptyChoices {
            name: name.to_owned(),
        });
    }
    let cast: Vec<Value> = values.iter().map(|v| kind.cast(v)).collect();
    for (i, value) in cast.iter().enumerate() {
        if cast[..i].contains(value) {
            continue;
        }
        let count = cast[i..].iter().filter(|other| *other == value).count();
        if count > 1 {
            return Err(Error::DuplicateChoice {
                name: name.to_owned(),
                choice: values[i].to_string(),
                count,
            });
        }
    }
    Ok(())
}

/// Position of `value` in `values` under cast-equality.
fn position_of(values: &[Value], kind: ValueKind, value: &Value) -> Option<usize> {
    let needle = kind.cast(value);
    values.iter().position(|v| kind.cast(v) == needle)
}
