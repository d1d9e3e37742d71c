/// Errors raised while building domains, assembling a configuration space,
/// or reading and writing the PCS format.
///
/// Use [`Error::kind`] to tell the families apart, e.g. to skip a malformed
/// line in a batch read while still aborting on a broken domain.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a categorical or ordinal domain has no values.
    #[error("hyperparameter `{name}` needs at least one choice")]
    EmptyChoices {
        /// The name of the hyperparameter.
        name: String,
    },

    /// Returned when a choice occurs more than once.
    #[error(
        "choices for hyperparameter `{name}` contain `{choice}` {count} times, \
         while only a single occurrence is allowed"
    )]
    DuplicateChoice {
        /// The name of the hyperparameter.
        name: String,
        /// The repeated choice, rendered as text.
        choice: String,
        /// How often the choice occurs.
        count: usize,
    },

    /// Returned when the number of weights differs from the number of choices.
    #[error(
        "the weights and choices of hyperparameter `{name}` must have the same length, \
         got {weights} weights and {choices} choices"
    )]
    WeightsLengthMismatch {
        /// The name of the hyperparameter.
        name: String,
        /// Number of weights supplied.
        weights: usize,
        /// Number of choices supplied.
        choices: usize,
    },

    /// Returned when a weight is negative or not finite.
    #[error("invalid weight {weight} for hyperparameter `{name}`: weights must be finite and non-negative")]
    InvalidWeight {
        /// The name of the hyperparameter.
        name: String,
        /// The offending weight.
        weight: f64,
    },

    /// Returned when every weight is zero.
    #[error(
        "all weights of hyperparameter `{name}` are zero, at least one weight has to be strictly positive"
    )]
    AllWeightsZero {
        /// The name of the hyperparameter.
        name: String,
    },

    /// Returned when the requested default is not a legal value.
    #[error("default value `{value}` is not a legal value of hyperparameter `{name}`")]
    IllegalDefault {
        /// The name of the hyperparameter.
        name: String,
        /// The rejected default, rendered as text.
        value: String,
    },

    /// Returned when the lower bound is not below the upper bound.
    #[error("invalid bounds for `{name}`: lower ({lower}) must be less than upper ({upper})")]
    InvalidBounds {
        /// The name of the hyperparameter.
        name: String,
        /// The lower bound value.
        lower: f64,
        /// The upper bound value.
        upper: f64,
    },

    /// Returned when log scale is used with bounds that have no logarithm.
    #[error("invalid log bounds for `{name}`: lower must be positive for log scale")]
    InvalidLogBounds {
        /// The name of the hyperparameter.
        name: String,
    },

    /// Returned when a value does not belong to a hyperparameter's domain.
    #[error("value `{value}` is not legal for hyperparameter `{name}`")]
    IllegalValue {
        /// The name of the hyperparameter.
        name: String,
        /// The rejected value, rendered as text.
        value: String,
    },

    /// Returned when a vector index lies outside `0..size`.
    #[error("index {index} is out of range for hyperparameter `{name}` of size {size}")]
    IndexOutOfRange {
        /// The name of the hyperparameter.
        name: String,
        /// The requested index.
        index: usize,
        /// The domain size.
        size: usize,
    },

    /// Returned when a hyperparameter name is added twice.
    #[error("hyperparameter `{0}` is already part of the configuration space")]
    DuplicateHyperparameter(String),

    /// Returned when a name does not resolve to a hyperparameter of the space.
    #[error("hyperparameter `{0}` is not part of the configuration space")]
    UnknownHyperparameter(String),

    /// Returned when a condition cannot be added to the space.
    #[error("invalid condition on `{child}`: {reason}")]
    InvalidCondition {
        /// The child hyperparameter the condition governs.
        child: String,
        /// Why the condition was rejected.
        reason: String,
    },

    /// Returned when a forbidden clause cannot be added to the space.
    #[error("invalid forbidden clause: {0}")]
    InvalidForbidden(String),

    /// Returned when a PCS line cannot be parsed or resolved.
    #[error("pcs line {line_number}: {reason} (`{line}`)")]
    Parse {
        /// 1-based line number within the input.
        line_number: usize,
        /// The offending line, without its trailing newline.
        line: String,
        /// Human-readable reason.
        reason: String,
    },

    /// Returned when a space uses a feature the PCS grammar cannot express.
    #[error("cannot write pcs: {0}")]
    UnsupportedWrite(String),

    /// Returned when reading from a text stream fails.
    #[error("failed to read pcs input: {0}")]
    Io(#[from] std::io::Error),
}

/// The family an [`Error`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid choices, weights, bounds or defaults, or an illegal value.
    Domain,
    /// A reference or constraint the configuration space rejected.
    Space,
    /// Malformed PCS input.
    Parse,
    /// A space the PCS grammar cannot represent.
    UnsupportedWrite,
    /// The underlying reader failed.
    Io,
}

impl Error {
    /// Returns the family of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyChoices { .. }
            | Self::DuplicateChoice { .. }
            | Self::WeightsLengthMismatch { .. }
            | Self::InvalidWeight { .. }
            | Self::AllWeightsZero { .. }
            | Self::IllegalDefault { .. }
            | Self::InvalidBounds { .. }
            | Self::InvalidLogBounds { .. }
            | Self::IllegalValue { .. }
            | Self::IndexOutOfRange { .. } => ErrorKind::Domain,
            Self::DuplicateHyperparameter(_)
            | Self::UnknownHyperparameter(_)
            | Self::InvalidCondition { .. }
            | Self::InvalidForbidden(_) => ErrorKind::Space,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::UnsupportedWrite(_) => ErrorKind::UnsupportedWrite,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_partition_variants() {
        assert_eq!(
            Error::AllWeightsZero { name: "a".into() }.kind(),
            ErrorKind::Domain
        );
        assert_eq!(
            Error::UnknownHyperparameter("a".into()).kind(),
            ErrorKind::Space
        );
        assert_eq!(
            Error::Parse {
                line_number: 3,
                line: "a | b".into(),
                reason: "missing operator".into(),
            }
            .kind(),
            ErrorKind::Parse
        );
        assert_eq!(
            Error::UnsupportedWrite("weights".into()).kind(),
            ErrorKind::UnsupportedWrite
        );
    }

    #[test]
    fn parse_error_mentions_line() {
        let err = Error::Parse {
            line_number: 7,
            line: "x | y ==".into(),
            reason: "expected a value".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("x | y =="));
        assert!(msg.contains("expected a value"));
    }
}
