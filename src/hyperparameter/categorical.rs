//! The categorical hyperparameter.

use core::fmt;
use std::sync::Arc;

use super::{check_choices, position_of};
use crate::distribution::VectorDistribution;
use crate::error::{Error, Result};
use crate::neighborhood::{Neighborhood, neighborhood_for};
use crate::value::{Value, ValueKind};

/// A hyperparameter taking one of a fixed list of values.
///
/// There is no order between the choices; use
/// [`OrdinalHyperparameter`](super::OrdinalHyperparameter) when one exists.
/// Values are drawn uniformly unless weights are given, in which case they
/// are normalized into [`probabilities`](Self::probabilities).
///
/// Internally each choice is encoded by its index, which is what the
/// [`VectorDistribution`] samples and the [`Neighborhood`] permutes.
///
/// # Examples
///
/// ```
/// use configspace::Value;
/// use configspace::hyperparameter::CategoricalHyperparameter;
///
/// let optimizer = CategoricalHyperparameter::builder("optimizer", vec!["sgd", "adam", "rmsprop"])
///     .weights(vec![1.0, 3.0, 1.0])
///     .build()
///     .unwrap();
///
/// // Without an explicit default, the most probable choice wins.
/// assert_eq!(optimizer.default_value(), &Value::from("adam"));
/// assert_eq!(optimizer.probabilities(), &[0.2, 0.6, 0.2]);
///
/// let mut rng = fastrand::Rng::with_seed(42);
/// let neighbors = optimizer.neighbors(&Value::from("adam"), 2, &mut rng).unwrap();
/// assert_eq!(neighbors.len(), 2);
/// assert!(!neighbors.contains(&Value::from("adam")));
/// ```
#[derive(Clone, Debug)]
pub struct CategoricalHyperparameter {
    name: String,
    choices: Vec<Value>,
    weights: Option<Vec<f64>>,
    probabilities: Vec<f64>,
    default_value: Value,
    value_kind: ValueKind,
    distribution: VectorDistribution,
    neighborhood: Arc<dyn Neighborhood>,
}

/// Builder for [`CategoricalHyperparameter`].
///
/// Choices are taken as a `Vec`: the order of the choices is part of the
/// domain (it fixes the vector encoding), so unordered collections are not
/// accepted.
#[derive(Clone, Debug)]
#[must_use]
pub struct CategoricalBuilder {
    name: String,
    choices: Vec<Value>,
    default_value: Option<Value>,
    weights: Option<Vec<f64>>,
}

impl CategoricalBuilder {
    /// Sets the default value. It has to be one of the choices.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets one non-negative weight per choice.
    pub fn weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Validates the domain and builds the hyperparameter.
    ///
    /// # Errors
    ///
    /// Returns a [`Domain`](crate::ErrorKind::Domain) error if the choices
    /// are empty or repeat a value, if the weights do not match the choices
    /// in length, contain a negative or non-finite weight, or are all zero,
    /// or if the default is not one of the choices.
    pub fn build(self) -> Result<CategoricalHyperparameter> {
        let Self {
            name,
            choices,
            default_value,
            weights,
        } = self;

        let value_kind = ValueKind::infer(&choices);
        check_choices(&name, &choices, value_kind)?;
        let size = choices.len();

        if let Some(weights) = &weights {
            if weights.len() != size {
                return Err(Error::WeightsLengthMismatch {
                    name,
                    weights: weights.len(),
                    choices: size,
                });
            }
            if let Some(&weight) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
                return Err(Error::InvalidWeight { name, weight });
            }
            if weights.iter().all(|w| *w == 0.0) {
                return Err(Error::AllWeightsZero { name });
            }
        }

        let default_index = match &default_value {
            Some(value) => Some(position_of(&choices, value_kind, value).ok_or_else(|| {
                Error::IllegalDefault {
                    name: name.clone(),
                    value: value.to_string(),
                }
            })?),
            None => None,
        };

        let probabilities = match &weights {
            Some(weights) => {
                let total: f64 = weights.iter().sum();
                weights.iter().map(|w| w / total).collect()
            }
            None => uniform_probabilities(size),
        };

        let default_index = default_index.unwrap_or_else(|| {
            if weights.is_some() {
                argmax(&probabilities)
            } else {
                0
            }
        });
        let default_value = choices[default_index].clone();

        let distribution = if weights.is_some() {
            VectorDistribution::weighted(probabilities.clone())
        } else {
            VectorDistribution::uniform(size)
        };

        Ok(CategoricalHyperparameter {
            name,
            choices,
            weights,
            probabilities,
            default_value,
            value_kind,
            distribution,
            neighborhood: neighborhood_for(size),
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn uniform_probabilities(size: usize) -> Vec<f64> {
    vec![1.0 / size as f64; size]
}

/// Index of the first maximum.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

impl CategoricalHyperparameter {
    /// Starts building a categorical hyperparameter.
    pub fn builder<V: Into<Value>>(name: impl Into<String>, choices: Vec<V>) -> CategoricalBuilder {
        CategoricalBuilder {
            name: name.into(),
            choices: choices.into_iter().map(Into::into).collect(),
            default_value: None,
            weights: None,
        }
    }

    /// Builds a uniform categorical whose default is the first choice.
    ///
    /// # Errors
    ///
    /// Returns an error if the choices are empty or contain duplicates.
    pub fn new<V: Into<Value>>(name: impl Into<String>, choices: Vec<V>) -> Result<Self> {
        Self::builder(name, choices).build()
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the choices in their encoding order.
    #[must_use]
    pub fn choices(&self) -> &[Value] {
        &self.choices
    }

    /// Returns the weights as given, `None` when sampling is uniform.
    #[must_use]
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Whether weights were given.
    #[must_use]
    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Returns one probability per choice; they sum to one.
    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Returns the default value.
    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    /// Returns the number of choices.
    #[must_use]
    pub fn size(&self) -> usize {
        self.choices.len()
    }

    /// Returns the number of choices.
    #[deprecated(note = "use `size()` or `choices().len()` instead")]
    #[must_use]
    pub fn num_choices(&self) -> usize {
        self.size()
    }

    /// Returns the common type of the choices.
    #[must_use]
    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Returns the distribution over the vector encoding.
    #[must_use]
    pub fn distribution(&self) -> &VectorDistribution {
        &self.distribution
    }

    /// Returns a copy with the same choices and default but uniform sampling.
    #[must_use]
    pub fn to_uniform(&self) -> Self {
        let size = self.size();
        Self {
            weights: None,
            probabilities: uniform_probabilities(size),
            distribution: VectorDistribution::uniform(size),
            ..self.clone()
        }
    }

    /// Position of `value` in the choices, if it is one.
    #[must_use]
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        position_of(&self.choices, self.value_kind, value)
    }

    /// Whether `value` is one of the choices.
    #[must_use]
    pub fn is_legal(&self, value: &Value) -> bool {
        self.index_of(value).is_some()
    }

    /// Encodes a value as its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalValue`] if `value` is not a choice.
    pub fn to_vector(&self, value: &Value) -> Result<usize> {
        self.index_of(value).ok_or_else(|| Error::IllegalValue {
            name: self.name.clone(),
            value: value.to_string(),
        })
    }

    /// Decodes an index into its value, cast to the domain's [`ValueKind`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= size`.
    pub fn to_value(&self, index: usize) -> Result<Value> {
        self.choices
            .get(index)
            .map(|choice| self.value_kind.cast(choice))
            .ok_or_else(|| Error::IndexOutOfRange {
                name: self.name.clone(),
                index,
                size: self.size(),
            })
    }

    /// Probability of drawing `value`, zero if it is not a choice.
    #[must_use]
    pub fn pdf(&self, value: &Value) -> f64 {
        self.index_of(value)
            .map_or(0.0, |index| self.distribution.pdf(index))
    }

    /// Draws an index from the vector distribution.
    pub fn sample_index(&self, rng: &mut fastrand::Rng) -> usize {
        self.distribution.sample(rng)
    }

    /// Draws a value.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Value {
        let index = self.sample_index(rng);
        self.value_kind.cast(&self.choices[index])
    }

    /// Returns up to `n` shuffled indices other than `index`.
    pub fn neighbors_vector(&self, index: usize, n: usize, rng: &mut fastrand::Rng) -> Vec<usize> {
        self.neighborhood.neighbors(index, n, rng)
    }

    /// Returns up to `n` shuffled choices other than `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalValue`] if `value` is not a choice.
    pub fn neighbors(&self, value: &Value, n: usize, rng: &mut fastrand::Rng) -> Result<Vec<Value>> {
        let index = self.to_vector(value)?;
        Ok(self
            .neighbors_vector(index, n, rng)
            .into_iter()
            .map(|i| self.value_kind.cast(&self.choices[i]))
            .collect())
    }

    /// Number of neighbors of `value`: every other choice, or all choices
    /// when the value is absent or unknown.
    #[must_use]
    pub fn neighborhood_size(&self, value: Option<&Value>) -> usize {
        match value {
            Some(value) if self.is_legal(value) => self.size() - 1,
            _ => self.size(),
        }
    }
}

impl PartialEq for CategoricalHyperparameter {
    /// Same name, default and choice count, and every choice of `self` is a
    /// choice of `other` with exactly the same probability.
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name
            || self.default_value != other.default_value
            || self.size() != other.size()
        {
            return false;
        }
        self.choices
            .iter()
            .zip(&self.probabilities)
            .all(|(choice, probability)| {
                other
                    .index_of(choice)
                    .is_some_and(|index| other.probabilities[index] == *probability)
            })
    }
}

impl fmt::Display for CategoricalHyperparameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let choices: Vec<String> = self.choices.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{}, Type: Categorical, Choices: {{{}}}, Default: {}",
            self.name,
            choices.join(", "),
            self.default_value
        )?;
        #[allow(clippy::float_cmp)]
        let uniform = self
            .probabilities
            .iter()
            .all(|p| *p == self.probabilities[0]);
        if !uniform {
            write!(f, ", Probabilities: {:?}", self.probabilities)?;
        }
        Ok(())
    }
}
