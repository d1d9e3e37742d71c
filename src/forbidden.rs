//! Forbidden clauses: value combinations a configuration must never take.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Comparison used by [`Forbidden::Relation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Relation {
    /// `left < right` is forbidden.
    LessThan,
    /// `left > right` is forbidden.
    GreaterThan,
    /// `left == right` is forbidden.
    Equals,
}

impl Relation {
    fn symbol(self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::Equals => "==",
        }
    }
}

/// A forbidden combination of hyperparameter values.
///
/// ```
/// use configspace::forbidden::Forbidden;
///
/// let clause = Forbidden::and(vec![
///     Forbidden::equals("solver", "lbfgs"),
///     Forbidden::is_in("penalty", vec!["l1", "elasticnet"]),
/// ]);
/// assert_eq!(clause.names(), vec!["solver", "penalty"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Forbidden {
    /// `name` must not take `value`.
    Equals {
        /// Hyperparameter name.
        name: String,
        /// Forbidden value.
        value: Value,
    },
    /// `name` must not take any of `values`.
    In {
        /// Hyperparameter name.
        name: String,
        /// Forbidden values.
        values: Vec<Value>,
    },
    /// The combination of all components is forbidden.
    And(Vec<Forbidden>),
    /// A relation between two hyperparameters is forbidden.
    Relation {
        /// Left-hand hyperparameter.
        left: String,
        /// Right-hand hyperparameter.
        right: String,
        /// Forbidden relation.
        relation: Relation,
    },
}

impl Forbidden {
    /// Forbids `name == value`.
    #[must_use]
    pub fn equals(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Forbids `name` taking any of `values`.
    #[must_use]
    pub fn is_in<T: Into<Value>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::In {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Forbids the conjunction of `components`.
    #[must_use]
    pub fn and(components: Vec<Self>) -> Self {
        Self::And(components)
    }

    /// Forbids `relation` between `left` and `right`.
    #[must_use]
    pub fn relation(left: impl Into<String>, right: impl Into<String>, relation: Relation) -> Self {
        Self::Relation {
            left: left.into(),
            right: right.into(),
            relation,
        }
    }

    /// Names referenced by the clause, in first-appearance order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_names(&mut out);
        out
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Equals { name, .. } | Self::In { name, .. } => push_unique(out, name),
            Self::Relation { left, right, .. } => {
                push_unique(out, left);
                push_unique(out, right);
            }
            Self::And(components) => {
                for component in components {
                    component.collect_names(out);
                }
            }
        }
    }

    /// Rank in the canonical order: single clauses, then conjunctions, then
    /// relations.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Self::Equals { .. } | Self::In { .. } => 0,
            Self::And(_) => 1,
            Self::Relation { .. } => 2,
        }
    }

    /// The `(name, values)` literals of a clause made only of equalities and
    /// `in` clauses, `None` if it holds a relation or a nested conjunction.
    pub(crate) fn literals(&self) -> Option<Vec<(&str, &[Value])>> {
        match self {
            Self::Equals { name, value } => {
                Some(vec![(name.as_str(), core::slice::from_ref(value))])
            }
            Self::In { name, values } => Some(vec![(name.as_str(), values.as_slice())]),
            Self::And(components) => components
                .iter()
                .map(|c| match c {
                    Self::Equals { name, value } => {
                        Some((name.as_str(), core::slice::from_ref(value)))
                    }
                    Self::In { name, values } => Some((name.as_str(), values.as_slice())),
                    _ => None,
                })
                .collect(),
            Self::Relation { .. } => None,
        }
    }
}

fn push_unique<'a>(out: &mut Vec<&'a str>, name: &'a str) {
    if !out.contains(&name) {
        out.push(name);
    }
}

impl fmt::Display for Forbidden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { name, value } => write!(f, "Forbidden: {name} == {value}"),
            Self::In { name, values } => {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "Forbidden: {name} in {{{}}}", values.join(", "))
            }
            Self::And(components) => {
                f.write_str("(")?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" && ")?;
                    }
                    write!(f, "{component}")?;
                }
                f.write_str(")")
            }
            Self::Relation {
                left,
                right,
                relation,
            } => write!(f, "Forbidden: {left} {} {right}", relation.symbol()),
        }
    }
}
