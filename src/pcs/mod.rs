//! Reading and writing configuration spaces in the PCS text format.
//!
//! Two dialects exist. The [`Old`](Dialect::Old) one infers the type from
//! the domain and marks integers and log scales with trailing flags:
//!
//! ```text
//! C [0.03125, 32768] [32]l
//! degree [1, 5] [3]i
//! kernel {rbf, poly} [rbf]
//! degree | kernel in {poly}
//! {kernel=rbf, degree=2}
//! ```
//!
//! The [`New`](Dialect::New) one names the type explicitly, supports ordinal
//! domains and allows `==`, `!=`, `<`, `>`, `in`, `&&` and `||` in
//! conditions:
//!
//! ```text
//! C real [0.03125, 32768.0] [32.0]log
//! degree integer [1, 5] [3]
//! kernel categorical {rbf, poly} [rbf]
//! degree | kernel == poly && C > 1.0
//! ```
//!
//! Everything after a `#` outside double quotes is a comment. Names and
//! values containing whitespace or PCS punctuation are written between
//! double quotes.
//!
//! # Round trip
//!
//! ```
//! use configspace::pcs::{self, Dialect};
//!
//! let text = "a real [0.0, 1.0] [0.5]\nb categorical {x, y} [x]\n\nb | a > 0.5";
//! let space = pcs::read_str(text, Dialect::New)?;
//! assert_eq!(space.len(), 2);
//! assert_eq!(pcs::write(&space, Dialect::New)?, text);
//! # Ok::<(), configspace::Error>(())
//! ```

mod declaration;
mod expr;
mod lexer;
mod reader;
mod writer;

use std::io::{BufRead, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::space::ConfigurationSpace;

/// Syntax variant of a PCS file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dialect {
    /// Type inferred from the domain, `i`/`l` flags, `in` conditions only.
    Old,
    /// Explicit `real`/`integer`/`categorical`/`ordinal` types and the full
    /// condition grammar.
    New,
}

/// Parses a space from lines of PCS text.
///
/// Blank lines and comments are skipped. Hyperparameters must be declared
/// before a condition or forbidden clause refers to them. Several condition
/// lines for the same child are combined with AND.
///
/// # Errors
///
/// Returns [`Error::Parse`](crate::Error::Parse) with the 1-based line number
/// of the first line that is malformed, refers to an unknown or later
/// declared hyperparameter, or would make the space invalid.
pub fn read<I, S>(lines: I, dialect: Dialect) -> Result<ConfigurationSpace>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<S> = lines.into_iter().collect();
    reader::read_lines(&lines, dialect)
}

/// Parses a space from a whole PCS document.
///
/// # Errors
///
/// See [`read`].
pub fn read_str(text: &str, dialect: Dialect) -> Result<ConfigurationSpace> {
    read(text.lines(), dialect)
}

/// Parses a space from a buffered reader.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if reading fails, otherwise see
/// [`read`].
pub fn read_from<R: BufRead>(input: R, dialect: Dialect) -> Result<ConfigurationSpace> {
    let lines = input.lines().collect::<core::result::Result<Vec<_>, _>>()?;
    read(lines, dialect)
}

/// Renders a space as PCS text.
///
/// Hyperparameters come first in canonical order, then a blank line and the
/// conditions, then a blank line and the forbidden clauses, each clause
/// terminated by a newline. An empty space renders as the empty string.
///
/// # Errors
///
/// Returns [`Error::UnsupportedWrite`](crate::Error::UnsupportedWrite) when
/// the space holds something the dialect cannot express: weighted
/// categoricals, ordinals or non-`in` conditions in the old dialect,
/// forbidden relations, or names containing a double quote.
pub fn write(space: &ConfigurationSpace, dialect: Dialect) -> Result<String> {
    writer::write_space(space, dialect)
}

/// Renders a space as PCS text into `out`.
///
/// # Errors
///
/// See [`write`]; I/O failures surface as
/// [`Error::Io`](crate::Error::Io).
pub fn write_to<W: Write>(space: &ConfigurationSpace, dialect: Dialect, mut out: W) -> Result<()> {
    let text = write(space, dialect)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}
