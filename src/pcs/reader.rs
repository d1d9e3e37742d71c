use std::collections::HashMap;

use super::Dialect;
use super::declaration::{
    ConditionDecl, DeclKind, Declaration, Domain, ForbiddenDecl, HyperparameterDecl,
};
use crate::condition::{Condition, Expression};
use crate::error::{Error, Result};
use crate::forbidden::Forbidden;
use crate::hyperparameter::{
    CategoricalHyperparameter, FloatHyperparameter, Hyperparameter, IntegerHyperparameter,
    OrdinalHyperparameter,
};
use crate::space::ConfigurationSpace;
use crate::value::Value;

/// A non-blank line with its 1-based position.
struct Located<'a, T> {
    line_number: usize,
    line: &'a str,
    item: T,
}

impl<T> Located<'_, T> {
    fn error(&self, reason: impl Into<String>) -> Error {
        Error::Parse {
            line_number: self.line_number,
            line: self.line.to_owned(),
            reason: reason.into(),
        }
    }
}

pub(crate) fn read_lines<S: AsRef<str>>(lines: &[S], dialect: Dialect) -> Result<ConfigurationSpace> {
    let mut hyperparameters = Vec::new();
    let mut conditions = Vec::new();
    let mut forbiddens = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim_end_matches(['\r', '\n']);
        let line_number = index + 1;
        let declaration = Declaration::parse(line, dialect).map_err(|reason| Error::Parse {
            line_number,
            line: line.to_owned(),
            reason,
        })?;
        trace_debug!(line_number, ?declaration, "pcs line classified");
        match declaration {
            Declaration::Hyperparameter(item) => hyperparameters.push(Located {
                line_number,
                line,
                item,
            }),
            Declaration::Condition(item) => conditions.push(Located {
                line_number,
                line,
                item,
            }),
            Declaration::Forbidden(item) => forbiddens.push(Located {
                line_number,
                line,
                item,
            }),
            Declaration::Comment | Declaration::Blank => {}
        }
    }

    let mut space = ConfigurationSpace::new();
    let mut declared_at: HashMap<&str, usize> = HashMap::new();
    for decl in &hyperparameters {
        let hp = build_hyperparameter(&decl.item).map_err(|e| decl.error(e))?;
        space
            .add_hyperparameter(hp)
            .map_err(|e| decl.error(e.to_string()))?;
        declared_at.insert(&decl.item.name, decl.line_number);
    }

    let resolver = Resolver {
        space: &space,
        declared_at: &declared_at,
    };

    // several lines for one child form a conjunction
    let mut grouped: Vec<(&str, &Located<'_, ConditionDecl>, Vec<Expression>)> = Vec::new();
    for decl in &conditions {
        let ConditionDecl { child, expression } = &decl.item;
        resolver
            .check_declared(child, decl.line_number)
            .map_err(|e| decl.error(e))?;
        let expression = resolver
            .resolve_expression(expression.clone(), decl.line_number)
            .map_err(|e| decl.error(e))?;
        match grouped.iter_mut().find(|(c, ..)| *c == child.as_str()) {
            Some((.., parts)) => parts.push(expression),
            None => grouped.push((child.as_str(), decl, vec![expression])),
        }
    }

    let forbidden_clauses = forbiddens
        .iter()
        .map(|decl| {
            resolver
                .resolve_forbidden(&decl.item, decl.line_number)
                .map_err(|e| decl.error(e))
        })
        .collect::<Result<Vec<_>>>()?;

    for (child, decl, parts) in grouped {
        let condition = Condition::new(child, conjunction(parts));
        space
            .add_condition(condition)
            .map_err(|e| decl.error(e.to_string()))?;
    }
    for (decl, clause) in forbiddens.iter().zip(forbidden_clauses) {
        space
            .add_forbidden(clause)
            .map_err(|e| decl.error(e.to_string()))?;
    }

    trace_info!(
        hyperparameters = space.len(),
        conditions = space.conditions().len(),
        forbiddens = forbiddens.len(),
        "pcs space read"
    );
    Ok(space)
}

fn conjunction(parts: Vec<Expression>) -> Expression {
    let mut components = Vec::new();
    for part in parts {
        match part {
            Expression::And(inner) => components.extend(inner),
            other => components.push(other),
        }
    }
    if components.len() == 1 {
        components.remove(0)
    } else {
        Expression::And(components)
    }
}

fn parse_float(token: &str) -> core::result::Result<f64, String> {
    token
        .parse::<f64>()
        .map_err(|_| format!("`{token}` is not a number"))
}

#[allow(clippy::cast_possible_truncation)]
fn parse_int(token: &str) -> core::result::Result<i64, String> {
    if let Ok(value) = token.parse::<i64>() {
        return Ok(value);
    }
    match token.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.is_finite() => Ok(value as i64),
        _ => Err(format!("`{token}` is not an integer")),
    }
}

fn build_hyperparameter(decl: &HyperparameterDecl) -> core::result::Result<Hyperparameter, String> {
    let HyperparameterDecl {
        name,
        kind,
        domain,
        default,
        log,
    } = decl;
    let hp: Hyperparameter = match (kind, domain) {
        (DeclKind::Real, Domain::Range { lower, upper }) => {
            let mut builder =
                FloatHyperparameter::builder(name.as_str(), parse_float(lower)?, parse_float(upper)?)
                    .default_value(parse_float(default)?);
            if *log {
                builder = builder.log_scale();
            }
            builder.build().map_err(|e| e.to_string())?.into()
        }
        (DeclKind::Integer, Domain::Range { lower, upper }) => {
            let mut builder =
                IntegerHyperparameter::builder(name.as_str(), parse_int(lower)?, parse_int(upper)?)
                    .default_value(parse_int(default)?);
            if *log {
                builder = builder.log_scale();
            }
            builder.build().map_err(|e| e.to_string())?.into()
        }
        (DeclKind::Categorical, Domain::Choices(choices)) => {
            CategoricalHyperparameter::builder(name.as_str(), choices.clone())
                .default_value(default.as_str())
                .build()
                .map_err(|e| e.to_string())?
                .into()
        }
        (DeclKind::Ordinal, Domain::Choices(sequence)) => {
            OrdinalHyperparameter::builder(name.as_str(), sequence.clone())
                .default_value(default.as_str())
                .build()
                .map_err(|e| e.to_string())?
                .into()
        }
        _ => return Err("the domain does not match the declared type".to_owned()),
    };
    Ok(hp)
}

/// Resolves names and raw value tokens against the declared hyperparameters.
struct Resolver<'a> {
    space: &'a ConfigurationSpace,
    declared_at: &'a HashMap<&'a str, usize>,
}

impl Resolver<'_> {
    /// A name may only refer to a hyperparameter declared on an earlier line.
    fn check_declared(&self, name: &str, line_number: usize) -> core::result::Result<(), String> {
        match self.declared_at.get(name) {
            Some(&at) if at < line_number => Ok(()),
            Some(&at) => Err(format!(
                "`{name}` is used before its declaration on line {at}"
            )),
            None => Err(format!("hyperparameter `{name}` is not declared")),
        }
    }

    fn resolve_value(
        &self,
        name: &str,
        token: &str,
        line_number: usize,
    ) -> core::result::Result<Value, String> {
        self.check_declared(name, line_number)?;
        let Some(hp) = self.space.get(name) else {
            return Err(format!("hyperparameter `{name}` is not declared"));
        };
        let value = match hp {
            Hyperparameter::Float(_) => Value::Float(parse_float(token)?),
            Hyperparameter::Integer(_) => Value::Int(parse_int(token)?),
            Hyperparameter::Categorical(hp) => by_text(hp.choices(), token)?,
            Hyperparameter::Ordinal(hp) => by_text(hp.sequence(), token)?,
        };
        if !hp.is_legal(&value) {
            return Err(format!("`{token}` is not a legal value of `{name}`"));
        }
        Ok(value)
    }

    fn resolve_expression(
        &self,
        expression: Expression<String>,
        line_number: usize,
    ) -> core::result::Result<Expression, String> {
        let resolved = expression.try_map(&mut |parent: &str, token: String| {
            self.resolve_value(parent, &token, line_number)
        })?;
        Ok(single_in_as_equals(resolved))
    }

    fn resolve_forbidden(
        &self,
        decl: &ForbiddenDecl,
        line_number: usize,
    ) -> core::result::Result<Forbidden, String> {
        let clauses = decl
            .clauses
            .iter()
            .map(|(name, token)| {
                let value = self.resolve_value(name, token, line_number)?;
                Ok(Forbidden::Equals {
                    name: name.clone(),
                    value,
                })
            })
            .collect::<core::result::Result<Vec<_>, String>>()?;
        Ok(Forbidden::And(clauses))
    }
}

fn by_text(values: &[Value], token: &str) -> core::result::Result<Value, String> {
    values
        .iter()
        .find(|v| v.to_string() == token)
        .cloned()
        .ok_or_else(|| format!("`{token}` is not one of the declared values"))
}

fn single_in_as_equals(expression: Expression) -> Expression {
    match expression {
        Expression::In { parent, mut values } if values.len() == 1 => Expression::Equals {
            parent,
            value: values.remove(0),
        },
        Expression::And(components) => {
            Expression::And(components.into_iter().map(single_in_as_equals).collect())
        }
        Expression::Or(components) => {
            Expression::Or(components.into_iter().map(single_in_as_equals).collect())
        }
        other => other,
    }
}
