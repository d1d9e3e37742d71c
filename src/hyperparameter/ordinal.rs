use core::fmt;

use super::{check_choices, position_of};
use crate::error::{Error, Result};
use crate::value::{Value, ValueKind};

/// A hyperparameter over an ordered sequence of values.
///
/// Unlike a categorical, position matters: `<` and `>` compare positions,
/// and the neighbors of a value are the values right before and after it.
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalHyperparameter {
    name: String,
    sequence: Vec<Value>,
    default_value: Value,
    value_kind: ValueKind,
}

/// Builder for [`OrdinalHyperparameter`].
#[derive(Clone, Debug)]
#[must_use]
pub struct OrdinalBuilder {
    name: String,
    sequence: Vec<Value>,
    default_value: Option<Value>,
}

impl OrdinalBuilder {
    /// Sets the default value. It has to be part of the sequence.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Validates the sequence and builds the hyperparameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is empty, repeats a value, or does
    /// not contain the default.
    pub fn build(self) -> Result<OrdinalHyperparameter> {
        let Self {
            name,
            sequence,
            default_value,
        } = self;

        let value_kind = ValueKind::infer(&sequence);
        check_choices(&name, &sequence, value_kind)?;

        let default_index = match &default_value {
            Some(value) => position_of(&sequence, value_kind, value).ok_or_else(|| {
                Error::IllegalDefault {
                    name: name.clone(),
                    value: value.to_string(),
                }
            })?,
            None => 0,
        };
        let default_value = sequence[default_index].clone();

        Ok(OrdinalHyperparameter {
            name,
            sequence,
            default_value,
            value_kind,
        })
    }
}

impl OrdinalHyperparameter {
    /// Starts building an ordinal hyperparameter.
    pub fn builder<V: Into<Value>>(name: impl Into<String>, sequence: Vec<V>) -> OrdinalBuilder {
        OrdinalBuilder {
            name: name.into(),
            sequence: sequence.into_iter().map(Into::into).collect(),
            default_value: None,
        }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values in order.
    #[must_use]
    pub fn sequence(&self) -> &[Value] {
        &self.sequence
    }

    /// Returns the default value.
    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    /// Returns the number of values.
    #[must_use]
    pub fn size(&self) -> usize {
        self.sequence.len()
    }

    /// Position of `value` in the sequence.
    #[must_use]
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        position_of(&self.sequence, self.value_kind, value)
    }

    /// Whether `value` is part of the sequence.
    #[must_use]
    pub fn is_legal(&self, value: &Value) -> bool {
        self.index_of(value).is_some()
    }

    /// Encodes a value as its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalValue`] if `value` is not in the sequence.
    pub fn to_vector(&self, value: &Value) -> Result<usize> {
        self.index_of(value).ok_or_else(|| Error::IllegalValue {
            name: self.name.clone(),
            value: value.to_string(),
        })
    }

    /// Decodes a position into its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= size`.
    pub fn to_value(&self, index: usize) -> Result<Value> {
        self.sequence
            .get(index)
            .map(|v| self.value_kind.cast(v))
            .ok_or_else(|| Error::IndexOutOfRange {
                name: self.name.clone(),
                index,
                size: self.size(),
            })
    }

    /// Draws a value uniformly.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Value {
        self.value_kind
            .cast(&self.sequence[rng.usize(0..self.sequence.len())])
    }

    /// The values directly before and after `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalValue`] if `value` is not in the sequence.
    pub fn neighbors(&self, value: &Value) -> Result<Vec<Value>> {
        let index = self.to_vector(value)?;
        let below = index.checked_sub(1);
        let above = Some(index + 1).filter(|&i| i < self.size());
        Ok(below
            .into_iter()
            .chain(above)
            .map(|i| self.value_kind.cast(&self.sequence[i]))
            .collect())
    }
}

impl fmt::Display for OrdinalHyperparameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sequence: Vec<String> = self.sequence.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{}, Type: Ordinal, Sequence: {{{}}}, Default: {}",
            self.name,
            sequence.join(", "),
            self.default_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temperature() -> OrdinalHyperparameter {
        OrdinalHyperparameter::builder("temp", vec!["cold", "cool", "warm", "hot"])
            .build()
            .unwrap()
    }

    #[test]
    fn default_is_first_element() {
        assert_eq!(temperature().default_value(), &Value::from("cold"));
        let hp = OrdinalHyperparameter::builder("temp", vec![1, 2, 3])
            .default_value(2)
            .build()
            .unwrap();
        assert_eq!(hp.default_value(), &Value::Int(2));
    }

    #[test]
    fn neighbors_are_adjacent() {
        let hp = temperature();
        assert_eq!(hp.neighbors(&Value::from("cold")).unwrap(), vec![Value::from("cool")]);
        assert_eq!(
            hp.neighbors(&Value::from("warm")).unwrap(),
            vec![Value::from("cool"), Value::from("hot")]
        );
        assert_eq!(hp.neighbors(&Value::from("hot")).unwrap(), vec![Value::from("warm")]);
        assert!(hp.neighbors(&Value::from("lava")).is_err());
    }

    #[test]
    fn rejects_duplicates_and_unknown_default() {
        assert!(OrdinalHyperparameter::builder("o", vec!["a", "a"]).build().is_err());
        assert!(
            OrdinalHyperparameter::builder("o", vec!["a", "b"])
                .default_value("c")
                .build()
                .is_err()
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            temperature().to_string(),
            "temp, Type: Ordinal, Sequence: {cold, cool, warm, hot}, Default: cold"
        );
    }
}
