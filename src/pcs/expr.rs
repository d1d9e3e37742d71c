//! Recursive-descent parser for condition expressions.
//!
//! ```text
//! or   := and ('||' and)*
//! and  := atom ('&&' atom)*
//! atom := name ('==' | '!=' | '<' | '>') value
//!       | name 'in' '{' value (',' value)* '}'
//! ```
//!
//! `&&` binds tighter than `||` and there are no parentheses. Values stay
//! raw text until the reader knows the parent's type.

use super::lexer::{Cursor, LineResult, Token};
use crate::condition::Expression;

/// Parses the tokens after the `|` of a condition line.
pub(crate) fn parse_expression(tokens: &[Token]) -> LineResult<Expression<String>> {
    let mut cursor = Cursor::new(tokens);
    let expression = parse_or(&mut cursor)?;
    if !cursor.is_at_end() {
        return Err(cursor.error("expected `&&`, `||` or end of line"));
    }
    Ok(expression)
}

fn parse_or(cursor: &mut Cursor<'_>) -> LineResult<Expression<String>> {
    let mut components = vec![parse_and(cursor)?];
    while cursor.eat(&Token::OrOr) {
        components.push(parse_and(cursor)?);
    }
    Ok(collapse(components, Expression::Or))
}

fn parse_and(cursor: &mut Cursor<'_>) -> LineResult<Expression<String>> {
    let mut components = vec![parse_atom(cursor)?];
    while cursor.current().is_some_and(|t| t.is_word("&&")) {
        cursor.advance();
        components.push(parse_atom(cursor)?);
    }
    Ok(collapse(components, Expression::And))
}

fn parse_atom(cursor: &mut Cursor<'_>) -> LineResult<Expression<String>> {
    let parent = cursor.expect_text("a parent name")?;
    let Some(op) = cursor.advance() else {
        return Err(format!("missing operator after `{parent}`"));
    };
    let expression = match op {
        Token::EqEq => Expression::Equals {
            parent,
            value: cursor.expect_text("a value")?,
        },
        Token::NotEq => Expression::NotEquals {
            parent,
            value: cursor.expect_text("a value")?,
        },
        Token::Word(w) if w == "<" => Expression::LessThan {
            parent,
            value: cursor.expect_text("a value")?,
        },
        Token::Word(w) if w == ">" => Expression::GreaterThan {
            parent,
            value: cursor.expect_text("a value")?,
        },
        Token::Word(w) if w == "in" => Expression::In {
            parent,
            values: cursor.expect_set("a value")?,
        },
        other => {
            return Err(format!(
                "expected one of `==`, `!=`, `<`, `>`, `in` after `{parent}`, found `{other}`"
            ));
        }
    };
    Ok(expression)
}

fn collapse(
    mut components: Vec<Expression<String>>,
    wrap: fn(Vec<Expression<String>>) -> Expression<String>,
) -> Expression<String> {
    if components.len() == 1 {
        components.remove(0)
    } else {
        wrap(components)
    }
}
