//! The configuration space container.
//!
//! A [`ConfigurationSpace`] owns hyperparameters, the conditions between
//! them and the forbidden clauses. Every addition is validated against what
//! is already in the space, so a space is always internally consistent:
//! names are unique, references resolve, compared values are legal and the
//! condition graph has no cycles.
//!
//! # Ordering
//!
//! Hyperparameters are listed by condition depth (unconditioned first), ties
//! broken by insertion order. Conditions follow the order of their child.
//! Forbidden clauses list single clauses, then conjunctions, then relations.
//! Equality between spaces does not depend on insertion order.

use core::fmt;
use std::collections::HashMap;

use crate::condition::{Condition, Expression};
use crate::error::{Error, Result};
use crate::forbidden::Forbidden;
use crate::hyperparameter::Hyperparameter;
use crate::value::Value;

/// Hyperparameters, conditions and forbidden clauses of a search space.
///
/// # Examples
///
/// ```
/// use configspace::condition::{Condition, Expression};
/// use configspace::hyperparameter::{CategoricalHyperparameter, IntegerHyperparameter};
/// use configspace::ConfigurationSpace;
///
/// let mut space = ConfigurationSpace::new();
/// space
///     .add_hyperparameter(IntegerHyperparameter::builder("degree", 1, 5).build()?)?
///     .add_hyperparameter(CategoricalHyperparameter::new("kernel", vec!["rbf", "poly"])?)?;
/// space.add_condition(Condition::new("degree", Expression::equals("kernel", "poly")))?;
///
/// let names: Vec<&str> = space.hyperparameters().iter().map(|hp| hp.name()).collect();
/// assert_eq!(names, vec!["kernel", "degree"]);
/// # Ok::<(), configspace::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigurationSpace {
    hyperparameters: Vec<Hyperparameter>,
    index: HashMap<String, usize>,
    conditions: Vec<Condition>,
    forbiddens: Vec<Forbidden>,
}

impl ConfigurationSpace {
    /// Creates an empty space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of hyperparameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hyperparameters.len()
    }

    /// Whether the space holds no hyperparameter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hyperparameters.is_empty()
    }

    /// Whether a hyperparameter called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Looks up a hyperparameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Hyperparameter> {
        self.index.get(name).map(|&i| &self.hyperparameters[i])
    }

    fn require(&self, name: &str) -> Result<&Hyperparameter> {
        self.get(name)
            .ok_or_else(|| Error::UnknownHyperparameter(name.to_owned()))
    }

    /// Adds a hyperparameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateHyperparameter`] if the name is taken.
    pub fn add_hyperparameter(&mut self, hp: impl Into<Hyperparameter>) -> Result<&mut Self> {
        let hp = hp.into();
        if self.contains(hp.name()) {
            return Err(Error::DuplicateHyperparameter(hp.name().to_owned()));
        }
        trace_debug!(name = hp.name(), "hyperparameter added");
        self.index
            .insert(hp.name().to_owned(), self.hyperparameters.len());
        self.hyperparameters.push(hp);
        Ok(self)
    }

    /// Adds a condition on `condition.child`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHyperparameter`] if the child or a parent is
    /// missing and [`Error::InvalidCondition`] if the child already has a
    /// condition, depends on itself or would close a cycle, if `<`/`>` is
    /// used on a categorical parent, if a conjunction or disjunction is
    /// empty, or if a compared value is illegal for its parent.
    ///
    /// Nested conjunctions and disjunctions are stored flattened.
    pub fn add_condition(&mut self, mut condition: Condition) -> Result<&mut Self> {
        condition.expression = condition.expression.flattened();
        let child = condition.child.as_str();
        self.require(child)?;
        let invalid = |reason: String| Error::InvalidCondition {
            child: child.to_owned(),
            reason,
        };

        if self.condition_for(child).is_some() {
            return Err(invalid(
                "the hyperparameter already has a condition, combine both with a conjunction"
                    .to_owned(),
            ));
        }
        self.check_expression(child, &condition.expression)?;

        for parent in condition.parents() {
            if parent == child {
                return Err(invalid("a hyperparameter cannot be its own parent".to_owned()));
            }
            if self.ancestors(parent).contains(&child) {
                return Err(invalid(format!(
                    "`{parent}` already depends on `{child}`, the condition would close a cycle"
                )));
            }
        }

        trace_debug!(child, parents = condition.parents().len(), "condition added");
        self.conditions.push(condition);
        Ok(self)
    }

    fn check_expression(&self, child: &str, expression: &Expression) -> Result<()> {
        let invalid = |reason: String| Error::InvalidCondition {
            child: child.to_owned(),
            reason,
        };
        let check_value = |parent: &str, value: &Value| -> Result<()> {
            if self.require(parent)?.is_legal(value) {
                Ok(())
            } else {
                Err(invalid(format!(
                    "value `{value}` is not legal for parent `{parent}`"
                )))
            }
        };
        match expression {
            Expression::Equals { parent, value } | Expression::NotEquals { parent, value } => {
                check_value(parent, value)
            }
            Expression::LessThan { parent, value } | Expression::GreaterThan { parent, value } => {
                if !self.require(parent)?.is_orderable() {
                    return Err(invalid(format!(
                        "`{parent}` is categorical and cannot be compared with `<` or `>`"
                    )));
                }
                check_value(parent, value)
            }
            Expression::In { parent, values } => {
                if values.is_empty() {
                    return Err(invalid(format!("`{parent} in {{}}` has no values")));
                }
                values.iter().try_for_each(|v| check_value(parent, v))
            }
            Expression::And(components) | Expression::Or(components) => {
                if components.is_empty() {
                    return Err(invalid("empty conjunction or disjunction".to_owned()));
                }
                components
                    .iter()
                    .try_for_each(|c| self.check_expression(child, c))
            }
        }
    }

    /// Adds a forbidden clause.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHyperparameter`] for a missing name and
    /// [`Error::InvalidForbidden`] for an illegal value, an empty clause or
    /// a relation of a hyperparameter with itself.
    pub fn add_forbidden(&mut self, forbidden: Forbidden) -> Result<&mut Self> {
        self.check_forbidden(&forbidden)?;
        trace_debug!(names = forbidden.names().len(), "forbidden clause added");
        self.forbiddens.push(forbidden);
        Ok(self)
    }

    fn check_forbidden(&self, forbidden: &Forbidden) -> Result<()> {
        let check_value = |name: &str, value: &Value| -> Result<()> {
            if self.require(name)?.is_legal(value) {
                Ok(())
            } else {
                Err(Error::InvalidForbidden(format!(
                    "value `{value}` is not legal for `{name}`"
                )))
            }
        };
        match forbidden {
            Forbidden::Equals { name, value } => check_value(name, value),
            Forbidden::In { name, values } => {
                if values.is_empty() {
                    return Err(Error::InvalidForbidden(format!(
                        "`{name} in {{}}` has no values"
                    )));
                }
                values.iter().try_for_each(|v| check_value(name, v))
            }
            Forbidden::And(components) => {
                if components.is_empty() {
                    return Err(Error::InvalidForbidden("empty conjunction".to_owned()));
                }
                components.iter().try_for_each(|c| self.check_forbidden(c))
            }
            Forbidden::Relation { left, right, .. } => {
                self.require(left)?;
                self.require(right)?;
                if left == right {
                    return Err(Error::InvalidForbidden(format!(
                        "`{left}` cannot be related to itself"
                    )));
                }
                Ok(())
            }
        }
    }

    /// The condition on `child`, if any.
    #[must_use]
    pub fn condition_for(&self, child: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.child == child)
    }

    /// Names of the hyperparameters `child` directly depends on.
    #[must_use]
    pub fn parents_of(&self, child: &str) -> Vec<&str> {
        self.condition_for(child)
            .map(Condition::parents)
            .unwrap_or_default()
    }

    /// Every hyperparameter `name` depends on, directly or transitively.
    fn ancestors(&self, name: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        let mut stack = self.parents_of(name);
        while let Some(next) = stack.pop() {
            if !out.contains(&next) {
                out.push(next);
                stack.extend(self.parents_of(next));
            }
        }
        out
    }

    /// Number of conditions between `name` and an unconditioned root.
    fn depth(&self, name: &str, memo: &mut HashMap<String, usize>) -> usize {
        if let Some(&depth) = memo.get(name) {
            return depth;
        }
        let depth = self
            .parents_of(name)
            .into_iter()
            .map(|parent| self.depth(parent, memo) + 1)
            .max()
            .unwrap_or(0);
        memo.insert(name.to_owned(), depth);
        depth
    }

    fn canonical_indices(&self) -> Vec<usize> {
        let mut memo = HashMap::new();
        let depths: Vec<usize> = self
            .hyperparameters
            .iter()
            .map(|hp| self.depth(hp.name(), &mut memo))
            .collect();
        let mut order: Vec<usize> = (0..self.hyperparameters.len()).collect();
        order.sort_by_key(|&i| depths[i]);
        order
    }

    /// Hyperparameters by condition depth, then insertion order.
    #[must_use]
    pub fn hyperparameters(&self) -> Vec<&Hyperparameter> {
        self.canonical_indices()
            .into_iter()
            .map(|i| &self.hyperparameters[i])
            .collect()
    }

    /// Conditions in the canonical order of their child.
    #[must_use]
    pub fn conditions(&self) -> Vec<&Condition> {
        self.canonical_indices()
            .into_iter()
            .filter_map(|i| self.condition_for(self.hyperparameters[i].name()))
            .collect()
    }

    /// Forbidden clauses: single clauses, conjunctions, then relations.
    #[must_use]
    pub fn forbidden_clauses(&self) -> Vec<&Forbidden> {
        let mut out: Vec<&Forbidden> = self.forbiddens.iter().collect();
        out.sort_by_key(|f| f.rank());
        out
    }
}

impl PartialEq for ConfigurationSpace {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.conditions.len() == other.conditions.len()
            && self.forbiddens.len() == other.forbiddens.len()
            && self
                .hyperparameters
                .iter()
                .all(|hp| other.get(hp.name()) == Some(hp))
            && self
                .conditions
                .iter()
                .all(|c| other.condition_for(&c.child) == Some(c))
            && self.forbiddens.iter().all(|f| other.forbiddens.contains(f))
    }
}

impl fmt::Display for ConfigurationSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration space object:")?;
        writeln!(f, "  Hyperparameters:")?;
        for hp in self.hyperparameters() {
            writeln!(f, "    {hp}")?;
        }
        let conditions = self.conditions();
        if !conditions.is_empty() {
            writeln!(f, "  Conditions:")?;
            for condition in conditions {
                writeln!(f, "    {condition}")?;
            }
        }
        let forbiddens = self.forbidden_clauses();
        if !forbiddens.is_empty() {
            writeln!(f, "  Forbidden Clauses:")?;
            for forbidden in forbiddens {
                writeln!(f, "    {forbidden}")?;
            }
        }
        Ok(())
    }
}
