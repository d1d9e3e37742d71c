//! One parsed line of a PCS file.
//!
//! Lines are classified by shape: a leading `{` is a forbidden clause, a
//! `|` anywhere makes a condition, anything else declares a hyperparameter.
//! Names and values are kept as text; the reader resolves them against the
//! declared domains.

use super::Dialect;
use super::expr::parse_expression;
use super::lexer::{Cursor, LineResult, Token, tokenize};
use crate::condition::Expression;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Declaration {
    Hyperparameter(HyperparameterDecl),
    Condition(ConditionDecl),
    Forbidden(ForbiddenDecl),
    Comment,
    Blank,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DeclKind {
    Real,
    Integer,
    Categorical,
    Ordinal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Domain {
    Range { lower: String, upper: String },
    Choices(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HyperparameterDecl {
    pub(crate) name: String,
    pub(crate) kind: DeclKind,
    pub(crate) domain: Domain,
    pub(crate) default: String,
    pub(crate) log: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ConditionDecl {
    pub(crate) child: String,
    pub(crate) expression: Expression<String>,
}

/// `{name=value, ...}`: the conjunction of the listed equalities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ForbiddenDecl {
    pub(crate) clauses: Vec<(String, String)>,
}

impl Declaration {
    pub(crate) fn parse(line: &str, dialect: Dialect) -> LineResult<Self> {
        let lexed = tokenize(line)?;
        let tokens = lexed.tokens.as_slice();
        match tokens.first() {
            None if lexed.has_comment => Ok(Self::Comment),
            None => Ok(Self::Blank),
            Some(Token::LBrace) => parse_forbidden(tokens).map(Self::Forbidden),
            Some(_) if tokens.contains(&Token::Pipe) => {
                parse_condition(tokens, dialect).map(Self::Condition)
            }
            Some(_) => parse_hyperparameter(tokens, dialect).map(Self::Hyperparameter),
        }
    }
}

fn parse_hyperparameter(tokens: &[Token], dialect: Dialect) -> LineResult<HyperparameterDecl> {
    let mut cursor = Cursor::new(tokens);
    let name = cursor.expect_text("a hyperparameter name")?;

    let declared = match dialect {
        Dialect::Old => None,
        Dialect::New => {
            let kind = match cursor.advance() {
                Some(t) if t.is_word("real") => DeclKind::Real,
                Some(t) if t.is_word("integer") => DeclKind::Integer,
                Some(t) if t.is_word("categorical") => DeclKind::Categorical,
                Some(t) if t.is_word("ordinal") => DeclKind::Ordinal,
                Some(other) => {
                    return Err(format!(
                        "unknown hyperparameter type `{other}`, expected one of \
                         `real`, `integer`, `categorical`, `ordinal`"
                    ));
                }
                None => return Err(format!("missing type after `{name}`")),
            };
            Some(kind)
        }
    };

    let domain = if cursor.check(&Token::LBracket) {
        cursor.advance();
        let lower = cursor.expect_text("a lower bound")?;
        cursor.expect(&Token::Comma)?;
        let upper = cursor.expect_text("an upper bound")?;
        cursor.expect(&Token::RBracket)?;
        Domain::Range { lower, upper }
    } else if cursor.check(&Token::LBrace) {
        Domain::Choices(cursor.expect_set("a choice")?)
    } else {
        return Err(cursor.error("expected `[` or `{`"));
    };

    cursor.expect(&Token::LBracket)?;
    let default = cursor.expect_text("a default value")?;
    cursor.expect(&Token::RBracket)?;

    let flags = match cursor.advance() {
        None => String::new(),
        Some(Token::Word(flags)) => flags.clone(),
        Some(other) => return Err(format!("unexpected `{other}` after the default value")),
    };
    if !cursor.is_at_end() {
        return Err(cursor.error("expected end of line"));
    }

    let (kind, log) = match (declared, &domain) {
        (Some(kind @ (DeclKind::Real | DeclKind::Integer)), Domain::Range { .. }) => {
            match flags.as_str() {
                "" => (kind, false),
                "log" => (kind, true),
                other => return Err(format!("unknown flag `{other}`, expected `log`")),
            }
        }
        (Some(kind @ (DeclKind::Categorical | DeclKind::Ordinal)), Domain::Choices(_)) => {
            if !flags.is_empty() {
                return Err(format!("unexpected `{flags}` after the default value"));
            }
            (kind, false)
        }
        (Some(_), _) => {
            return Err("the domain does not match the declared type".to_owned());
        }
        (None, Domain::Range { .. }) => {
            if !flags.chars().all(|c| matches!(c, 'i' | 'l')) {
                return Err(format!("unknown flags `{flags}`, expected any of `i`, `l`"));
            }
            let kind = if flags.contains('i') {
                DeclKind::Integer
            } else {
                DeclKind::Real
            };
            (kind, flags.contains('l'))
        }
        (None, Domain::Choices(_)) => {
            if !flags.is_empty() {
                return Err(format!("unexpected `{flags}` after the default value"));
            }
            (DeclKind::Categorical, false)
        }
    };

    Ok(HyperparameterDecl {
        name,
        kind,
        domain,
        default,
        log,
    })
}

fn parse_condition(tokens: &[Token], dialect: Dialect) -> LineResult<ConditionDecl> {
    let mut cursor = Cursor::new(tokens);
    let child = cursor.expect_text("a child name")?;
    cursor.expect(&Token::Pipe)?;
    let rest = tokens.get(2..).unwrap_or(&[]);
    let expression = parse_expression(rest)?;
    if dialect == Dialect::Old && !matches!(expression, Expression::In { .. }) {
        return Err("the old pcs dialect only supports `parent in {...}` conditions".to_owned());
    }
    Ok(ConditionDecl { child, expression })
}

fn parse_forbidden(tokens: &[Token]) -> LineResult<ForbiddenDecl> {
    let mut cursor = Cursor::new(tokens);
    cursor.expect(&Token::LBrace)?;
    let mut clauses = Vec::new();
    loop {
        let name = cursor.expect_text("a hyperparameter name")?;
        cursor.expect(&Token::Assign)?;
        let value = cursor.expect_text("a value")?;
        clauses.push((name, value));
        if !cursor.eat(&Token::Comma) {
            break;
        }
    }
    cursor.expect(&Token::RBrace)?;
    if !cursor.is_at_end() {
        return Err(cursor.error("expected end of line"));
    }
    Ok(ForbiddenDecl { clauses })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hp(line: &str, dialect: Dialect) -> HyperparameterDecl {
        match Declaration::parse(line, dialect).unwrap() {
            Declaration::Hyperparameter(decl) => decl,
            other => panic!("expected a hyperparameter, got {other:?}"),
        }
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(Declaration::parse("", Dialect::New).unwrap(), Declaration::Blank);
        assert_eq!(Declaration::parse("   ", Dialect::Old).unwrap(), Declaration::Blank);
        assert_eq!(
            Declaration::parse("# Forbiddens:", Dialect::New).unwrap(),
            Declaration::Comment
        );
        assert!(matches!(
            Declaration::parse("{a=b}", Dialect::New).unwrap(),
            Declaration::Forbidden(_)
        ));
        assert!(matches!(
            Declaration::parse("a | b in {c}", Dialect::Old).unwrap(),
            Declaration::Condition(_)
        ));
    }

    #[test]
    fn old_dialect_flags() {
        let decl = hp("int_log_a [1, 6] [2]il", Dialect::Old);
        assert_eq!(decl.kind, DeclKind::Integer);
        assert!(decl.log);
        assert_eq!(decl.default, "2");

        let decl = hp("log_a [4e-1, 6.45] [1.6062378404]l", Dialect::Old);
        assert_eq!(decl.kind, DeclKind::Real);
        assert!(decl.log);
        assert_eq!(
            decl.domain,
            Domain::Range {
                lower: "4e-1".to_owned(),
                upper: "6.45".to_owned()
            }
        );

        let decl = hp(r#"cat_a {a,"b",c,d} [a]"#, Dialect::Old);
        assert_eq!(decl.kind, DeclKind::Categorical);
        assert_eq!(
            decl.domain,
            Domain::Choices(vec!["a".into(), "b".into(), "c".into(), "d".into()])
        );

        assert!(Declaration::parse("x [1, 2] [1]q", Dialect::Old).is_err());
        assert!(Declaration::parse("x {a, b} [a]i", Dialect::Old).is_err());
    }

    #[test]
    fn new_dialect_types() {
        let decl = hp("int_log_a integer [1, 6] [2]log", Dialect::New);
        assert_eq!(decl.kind, DeclKind::Integer);
        assert!(decl.log);

        let decl = hp("gloves ordinal { none, yarn, leather, gortex } [none]", Dialect::New);
        assert_eq!(decl.kind, DeclKind::Ordinal);

        assert!(Declaration::parse("x float [0, 1] [0]", Dialect::New).is_err());
        assert!(Declaration::parse("x categorical [0, 1] [0]", Dialect::New).is_err());
        assert!(Declaration::parse("x real [0, 1]", Dialect::New).is_err());
        assert!(Declaration::parse("x real [0, 1] [0] log extra", Dialect::New).is_err());
    }

    #[test]
    fn old_dialect_rejects_new_operators() {
        assert!(Declaration::parse("a | b == c", Dialect::Old).is_err());
        assert!(Declaration::parse("a | b == c", Dialect::New).is_ok());
    }

    #[test]
    fn forbidden_clauses() {
        let decl = Declaration::parse("{float_hp=1.0, float_hp=2.0}", Dialect::New).unwrap();
        assert_eq!(
            decl,
            Declaration::Forbidden(ForbiddenDecl {
                clauses: vec![
                    ("float_hp".to_owned(), "1.0".to_owned()),
                    ("float_hp".to_owned(), "2.0".to_owned()),
                ]
            })
        );
        assert!(Declaration::parse("{a=}", Dialect::New).is_err());
        assert!(Declaration::parse("{a=b", Dialect::New).is_err());
    }
}
