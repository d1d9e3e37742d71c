//! Conditions that activate a hyperparameter depending on its parents.
//!
//! A [`Condition`] attaches a boolean [`Expression`] over parent values to a
//! child hyperparameter. The child is only active when the expression holds.
//!
//! ```
//! use configspace::Value;
//! use configspace::condition::{Condition, Expression};
//!
//! let cond = Condition::new(
//!     "degree",
//!     Expression::and(vec![
//!         Expression::equals("kernel", "poly"),
//!         Expression::greater_than("C", 1.0),
//!     ]),
//! );
//! assert_eq!(cond.expression.parents(), vec!["kernel", "C"]);
//! assert_eq!(cond.to_string(), "degree | kernel == poly && C > 1.0");
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A boolean expression over parent hyperparameter values.
///
/// `V` is the value type of the leaves: the PCS parser produces
/// `Expression<String>` holding raw tokens, which are resolved into
/// `Expression<Value>` once the parent's type is known.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expression<V = Value> {
    /// `parent == value`.
    Equals {
        /// Parent hyperparameter name.
        parent: String,
        /// Compared value.
        value: V,
    },
    /// `parent != value`.
    NotEquals {
        /// Parent hyperparameter name.
        parent: String,
        /// Compared value.
        value: V,
    },
    /// `parent < value`, only for orderable parents.
    LessThan {
        /// Parent hyperparameter name.
        parent: String,
        /// Compared value.
        value: V,
    },
    /// `parent > value`, only for orderable parents.
    GreaterThan {
        /// Parent hyperparameter name.
        parent: String,
        /// Compared value.
        value: V,
    },
    /// `parent in {values}`.
    In {
        /// Parent hyperparameter name.
        parent: String,
        /// Accepted values.
        values: Vec<V>,
    },
    /// Every component holds.
    And(Vec<Expression<V>>),
    /// At least one component holds.
    Or(Vec<Expression<V>>),
}

impl<V> Expression<V> {
    /// `parent == value`.
    #[must_use]
    pub fn equals(parent: impl Into<String>, value: impl Into<V>) -> Self {
        Self::Equals {
            parent: parent.into(),
            value: value.into(),
        }
    }

    /// `parent != value`.
    #[must_use]
    pub fn not_equals(parent: impl Into<String>, value: impl Into<V>) -> Self {
        Self::NotEquals {
            parent: parent.into(),
            value: value.into(),
        }
    }

    /// `parent < value`.
    #[must_use]
    pub fn less_than(parent: impl Into<String>, value: impl Into<V>) -> Self {
        Self::LessThan {
            parent: parent.into(),
            value: value.into(),
        }
    }

    /// `parent > value`.
    #[must_use]
    pub fn greater_than(parent: impl Into<String>, value: impl Into<V>) -> Self {
        Self::GreaterThan {
            parent: parent.into(),
            value: value.into(),
        }
    }

    /// `parent in {values}`.
    #[must_use]
    pub fn is_in<T: Into<V>>(parent: impl Into<String>, values: Vec<T>) -> Self {
        Self::In {
            parent: parent.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Conjunction of `components`.
    #[must_use]
    pub fn and(components: Vec<Self>) -> Self {
        Self::And(components)
    }

    /// Disjunction of `components`.
    #[must_use]
    pub fn or(components: Vec<Self>) -> Self {
        Self::Or(components)
    }

    /// Whether this is a single predicate rather than a conjunction or
    /// disjunction.
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        !matches!(self, Self::And(_) | Self::Or(_))
    }

    /// Merges a conjunction nested directly in a conjunction into its
    /// parent, and the same for disjunctions, at every level.
    ///
    /// `a && (b && c)` becomes `a && b && c`. The meaning is unchanged.
    #[must_use]
    pub fn flattened(self) -> Self {
        match self {
            Self::And(components) => Self::And(flatten_into(components, |e| match e {
                Self::And(inner) => Ok(inner),
                other => Err(other),
            })),
            Self::Or(components) => Self::Or(flatten_into(components, |e| match e {
                Self::Or(inner) => Ok(inner),
                other => Err(other),
            })),
            leaf => leaf,
        }
    }

    /// Names of the parents referenced, in first-appearance order.
    #[must_use]
    pub fn parents(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_parents(&mut out);
        out
    }

    fn collect_parents<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Equals { parent, .. }
            | Self::NotEquals { parent, .. }
            | Self::LessThan { parent, .. }
            | Self::GreaterThan { parent, .. }
            | Self::In { parent, .. } => {
                if !out.contains(&parent.as_str()) {
                    out.push(parent);
                }
            }
            Self::And(components) | Self::Or(components) => {
                for component in components {
                    component.collect_parents(out);
                }
            }
        }
    }

    /// Rewrites every leaf value, keeping the tree shape.
    ///
    /// `f` receives the parent name with each value, so the conversion can
    /// depend on the parent's domain.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<W, E>(
        self,
        f: &mut impl FnMut(&str, V) -> Result<W, E>,
    ) -> Result<Expression<W>, E> {
        Ok(match self {
            Self::Equals { value, parent } => Expression::Equals {
                value: f(&parent, value)?,
                parent,
            },
            Self::NotEquals { value, parent } => Expression::NotEquals {
                value: f(&parent, value)?,
                parent,
            },
            Self::LessThan { value, parent } => Expression::LessThan {
                value: f(&parent, value)?,
                parent,
            },
            Self::GreaterThan { value, parent } => Expression::GreaterThan {
                value: f(&parent, value)?,
                parent,
            },
            Self::In { values, parent } => Expression::In {
                values: values
                    .into_iter()
                    .map(|v| f(&parent, v))
                    .collect::<Result<_, E>>()?,
                parent,
            },
            Self::And(components) => Expression::And(
                components
                    .into_iter()
                    .map(|c| c.try_map(f))
                    .collect::<Result<_, E>>()?,
            ),
            Self::Or(components) => Expression::Or(
                components
                    .into_iter()
                    .map(|c| c.try_map(f))
                    .collect::<Result<_, E>>()?,
            ),
        })
    }
}

/// Flattens each component, then splices in those `same_kind` unwraps.
fn flatten_into<V>(
    components: Vec<Expression<V>>,
    same_kind: fn(Expression<V>) -> Result<Vec<Expression<V>>, Expression<V>>,
) -> Vec<Expression<V>> {
    let mut out = Vec::with_capacity(components.len());
    for component in components {
        match same_kind(component.flattened()) {
            Ok(inner) => out.extend(inner),
            Err(other) => out.push(other),
        }
    }
    out
}

impl<V: fmt::Display> fmt::Display for Expression<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { parent, value } => write!(f, "{parent} == {value}"),
            Self::NotEquals { parent, value } => write!(f, "{parent} != {value}"),
            Self::LessThan { parent, value } => write!(f, "{parent} < {value}"),
            Self::GreaterThan { parent, value } => write!(f, "{parent} > {value}"),
            Self::In { parent, values } => {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "{parent} in {{{}}}", values.join(", "))
            }
            Self::And(components) => join(f, components, " && "),
            Self::Or(components) => join(f, components, " || "),
        }
    }
}

fn join<V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    components: &[Expression<V>],
    separator: &str,
) -> fmt::Result {
    for (i, component) in components.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{component}")?;
    }
    Ok(())
}

/// Activates `child` only when `expression` holds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Condition {
    /// The conditioned hyperparameter.
    pub child: String,
    /// The activation rule over parent values.
    pub expression: Expression,
}

impl Condition {
    /// Creates a condition on `child`.
    #[must_use]
    pub fn new(child: impl Into<String>, expression: Expression) -> Self {
        Self {
            child: child.into(),
            expression,
        }
    }

    /// Names of the parents the child depends on.
    #[must_use]
    pub fn parents(&self) -> Vec<&str> {
        self.expression.parents()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.child, self.expression)
    }
}
