use core::fmt::Write as _;

use super::Dialect;
use crate::condition::{Condition, Expression};
use crate::error::{Error, Result};
use crate::forbidden::Forbidden;
use crate::hyperparameter::Hyperparameter;
use crate::space::ConfigurationSpace;
use crate::value::{Value, format_float};

pub(crate) fn write_space(space: &ConfigurationSpace, dialect: Dialect) -> Result<String> {
    let hyperparameters = space
        .hyperparameters()
        .into_iter()
        .map(|hp| hyperparameter_line(hp, dialect))
        .collect::<Result<Vec<_>>>()?;

    let mut conditions = Vec::new();
    for condition in space.conditions() {
        conditions.extend(condition_lines(condition, dialect)?);
    }

    let mut forbiddens = Vec::new();
    for forbidden in space.forbidden_clauses() {
        forbiddens.extend(forbidden_lines(forbidden)?);
    }

    let mut out = hyperparameters.join("\n");
    if !conditions.is_empty() {
        out.push_str("\n\n");
        out.push_str(&conditions.join("\n"));
    }
    if !forbiddens.is_empty() {
        out.push_str("\n\n");
        for line in &forbiddens {
            out.push_str(line);
            out.push('\n');
        }
    }

    trace_info!(
        hyperparameters = hyperparameters.len(),
        conditions = conditions.len(),
        forbiddens = forbiddens.len(),
        "pcs space written"
    );
    Ok(out)
}

/// Renders a name or value, quoting it when it would not survive the lexer.
fn token(text: &str) -> Result<String> {
    if text.contains('"') {
        return Err(Error::UnsupportedWrite(format!(
            "`{text}` contains a double quote, which cannot be escaped"
        )));
    }
    let needs_quotes = text.is_empty()
        || text.chars().any(|c| {
            c.is_whitespace() || matches!(c, '{' | '}' | '[' | ']' | ',' | '#' | '|' | '=')
        });
    Ok(if needs_quotes {
        format!("\"{text}\"")
    } else {
        text.to_owned()
    })
}

fn value_token(value: &Value) -> Result<String> {
    token(&value.to_string())
}

fn value_set(values: &[Value]) -> Result<String> {
    let items = values.iter().map(value_token).collect::<Result<Vec<_>>>()?;
    Ok(format!("{{{}}}", items.join(", ")))
}

fn hyperparameter_line(hp: &Hyperparameter, dialect: Dialect) -> Result<String> {
    let name = token(hp.name())?;
    let line = match (hp, dialect) {
        (Hyperparameter::Float(hp), Dialect::New) => format!(
            "{name} real [{}, {}] [{}]{}",
            format_float(hp.lower()),
            format_float(hp.upper()),
            format_float(hp.default_value()),
            if hp.is_log() { "log" } else { "" }
        ),
        (Hyperparameter::Float(hp), Dialect::Old) => format!(
            "{name} [{}, {}] [{}]{}",
            format_float(hp.lower()),
            format_float(hp.upper()),
            format_float(hp.default_value()),
            if hp.is_log() { "l" } else { "" }
        ),
        (Hyperparameter::Integer(hp), Dialect::New) => format!(
            "{name} integer [{}, {}] [{}]{}",
            hp.lower(),
            hp.upper(),
            hp.default_value(),
            if hp.is_log() { "log" } else { "" }
        ),
        (Hyperparameter::Integer(hp), Dialect::Old) => format!(
            "{name} [{}, {}] [{}]i{}",
            hp.lower(),
            hp.upper(),
            hp.default_value(),
            if hp.is_log() { "l" } else { "" }
        ),
        (Hyperparameter::Categorical(hp), _) => {
            if hp.is_weighted() {
                return Err(Error::UnsupportedWrite(format!(
                    "The pcs format does not support categorical hyperparameters with \
                     assigned weights (for hyperparameter {})",
                    hp.name()
                )));
            }
            let keyword = match dialect {
                Dialect::New => " categorical",
                Dialect::Old => "",
            };
            format!(
                "{name}{keyword} {} [{}]",
                value_set(hp.choices())?,
                value_token(hp.default_value())?
            )
        }
        (Hyperparameter::Ordinal(hp), Dialect::New) => format!(
            "{name} ordinal {} [{}]",
            value_set(hp.sequence())?,
            value_token(hp.default_value())?
        ),
        (Hyperparameter::Ordinal(hp), Dialect::Old) => {
            return Err(Error::UnsupportedWrite(format!(
                "ordinal hyperparameter `{}` cannot be expressed in the old pcs dialect",
                hp.name()
            )));
        }
    };
    Ok(line)
}

fn atom(expression: &Expression) -> Result<String> {
    let text = match expression {
        Expression::Equals { parent, value } => {
            format!("{} == {}", token(parent)?, value_token(value)?)
        }
        Expression::NotEquals { parent, value } => {
            format!("{} != {}", token(parent)?, value_token(value)?)
        }
        Expression::LessThan { parent, value } => {
            format!("{} < {}", token(parent)?, value_token(value)?)
        }
        Expression::GreaterThan { parent, value } => {
            format!("{} > {}", token(parent)?, value_token(value)?)
        }
        Expression::In { parent, values } => {
            format!("{} in {}", token(parent)?, value_set(values)?)
        }
        Expression::And(_) | Expression::Or(_) => {
            return Err(Error::UnsupportedWrite(
                "conditions nested deeper than `||` over `&&` groups".to_owned(),
            ));
        }
    };
    Ok(text)
}

fn and_group(components: &[Expression]) -> Result<String> {
    let atoms = components.iter().map(atom).collect::<Result<Vec<_>>>()?;
    Ok(atoms.join(" && "))
}

/// Right-hand sides of the lines for one condition.
fn new_dialect_bodies(expression: &Expression) -> Result<Vec<String>> {
    match expression {
        Expression::And(components) if components.iter().all(Expression::is_atomic) => {
            Ok(vec![and_group(components)?])
        }
        // lines of one child are read back as a conjunction
        Expression::And(components) => {
            let mut bodies = Vec::new();
            for component in components {
                bodies.extend(new_dialect_bodies(component)?);
            }
            Ok(bodies)
        }
        Expression::Or(components) => {
            let groups = components
                .iter()
                .map(|component| match component {
                    Expression::And(inner) => and_group(inner),
                    other => atom(other),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(vec![groups.join(" || ")])
        }
        other => Ok(vec![atom(other)?]),
    }
}

fn old_dialect_bodies(expression: &Expression) -> Result<Vec<String>> {
    match expression {
        Expression::Equals { parent, value } => Ok(vec![format!(
            "{} in {}",
            token(parent)?,
            value_set(core::slice::from_ref(value))?
        )]),
        Expression::In { parent, values } => {
            Ok(vec![format!("{} in {}", token(parent)?, value_set(values)?)])
        }
        Expression::And(components) => {
            let mut bodies = Vec::new();
            for component in components {
                bodies.extend(old_dialect_bodies(component)?);
            }
            Ok(bodies)
        }
        Expression::NotEquals { .. }
        | Expression::LessThan { .. }
        | Expression::GreaterThan { .. }
        | Expression::Or(_) => Err(Error::UnsupportedWrite(format!(
            "the old pcs dialect cannot express `{expression}`"
        ))),
    }
}

fn condition_lines(condition: &Condition, dialect: Dialect) -> Result<Vec<String>> {
    let child = token(&condition.child)?;
    let bodies = match dialect {
        Dialect::New => new_dialect_bodies(&condition.expression)?,
        Dialect::Old => old_dialect_bodies(&condition.expression)?,
    };
    Ok(bodies
        .into_iter()
        .map(|body| format!("{child} | {body}"))
        .collect())
}

/// One `{a=x, b=y}` line per combination; `in` clauses are expanded first,
/// then the plain equalities follow on every line.
fn forbidden_lines(forbidden: &Forbidden) -> Result<Vec<String>> {
    let literals = forbidden.literals().ok_or_else(|| {
        Error::UnsupportedWrite(format!("the pcs format cannot express `{forbidden}`"))
    })?;

    let mut expanded: Vec<(&str, &[Value])> = Vec::new();
    let mut fixed: Vec<(&str, &Value)> = Vec::new();
    for (name, values) in literals {
        match (forbidden, values) {
            (Forbidden::In { .. }, _) | (Forbidden::And(_), [_, _, ..]) => {
                expanded.push((name, values));
            }
            (_, [value]) => fixed.push((name, value)),
            (_, _) => expanded.push((name, values)),
        }
    }

    let mut combinations: Vec<Vec<(&str, &Value)>> = vec![Vec::new()];
    for (name, values) in expanded {
        combinations = combinations
            .into_iter()
            .flat_map(|prefix| {
                values.iter().map(move |value| {
                    let mut line = prefix.clone();
                    line.push((name, value));
                    line
                })
            })
            .collect();
    }

    combinations
        .into_iter()
        .map(|mut line| -> Result<String> {
            line.extend(fixed.iter().copied());
            let mut out = String::from("{");
            for (i, (name, value)) in line.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{}={}", token(name)?, value_token(value)?);
            }
            out.push('}');
            Ok(out)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forbidden::Relation;

    #[test]
    fn quoting() {
        assert_eq!(token("plain-name").unwrap(), "plain-name");
        assert_eq!(token("two words").unwrap(), "\"two words\"");
        assert_eq!(token("").unwrap(), "\"\"");
        assert_eq!(token("a=b").unwrap(), "\"a=b\"");
        assert_eq!(token("x#1").unwrap(), "\"x#1\"");
        assert!(matches!(token("say \"hi\""), Err(Error::UnsupportedWrite(_))));
    }

    #[test]
    fn in_clauses_expand_before_equalities() {
        let clause = Forbidden::and(vec![
            Forbidden::equals("a", "x"),
            Forbidden::is_in("b", vec![1, 2]),
        ]);
        assert_eq!(
            forbidden_lines(&clause).unwrap(),
            vec!["{b=1, a=x}", "{b=2, a=x}"]
        );
        let single = Forbidden::is_in("a", vec!["x", "y"]);
        assert_eq!(forbidden_lines(&single).unwrap(), vec!["{a=x}", "{a=y}"]);
    }

    #[test]
    fn relations_are_rejected() {
        let clause = Forbidden::relation("a", "b", Relation::GreaterThan);
        assert!(matches!(
            forbidden_lines(&clause),
            Err(Error::UnsupportedWrite(_))
        ));
    }

    #[test]
    fn and_over_or_splits_into_lines() {
        let expression: Expression = Expression::and(vec![
            Expression::or(vec![Expression::equals("a", 1), Expression::equals("b", 2)]),
            Expression::equals("c", 3),
        ]);
        assert_eq!(
            new_dialect_bodies(&expression).unwrap(),
            vec!["a == 1 || b == 2", "c == 3"]
        );
    }

    #[test]
    fn old_dialect_writes_in_lines() {
        let expression: Expression = Expression::and(vec![
            Expression::equals("a", "x"),
            Expression::is_in("b", vec!["y", "z"]),
        ]);
        assert_eq!(
            old_dialect_bodies(&expression).unwrap(),
            vec!["a in {x}", "b in {y, z}"]
        );
        let or: Expression = Expression::or(vec![Expression::equals("a", "x")]);
        assert!(old_dialect_bodies(&or).is_err());
    }
}
