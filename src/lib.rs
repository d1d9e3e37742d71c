#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Typed hyperparameter configuration spaces with weighted categorical
//! domains, conditional activation, forbidden combinations, and a reader and
//! writer for the PCS text format.
//!
//! # Getting Started
//!
//! ```
//! use configspace::prelude::*;
//!
//! let mut space = ConfigurationSpace::new();
//! space
//!     .add_hyperparameter(
//!         CategoricalHyperparameter::builder("kernel", vec!["linear", "rbf", "poly"])
//!             .weights(vec![1.0, 2.0, 1.0])
//!             .build()?,
//!     )?
//!     .add_hyperparameter(IntegerHyperparameter::builder("degree", 2, 5).build()?)?;
//! space.add_condition(Condition::new("degree", Expression::equals("kernel", "poly")))?;
//!
//! // weighted categoricals cannot be written as PCS
//! assert!(pcs::write(&space, Dialect::New).is_err());
//!
//! let kernel = space.get("kernel").and_then(Hyperparameter::as_categorical).unwrap();
//! assert_eq!(kernel.default_value(), &Value::from("rbf"));
//! assert_eq!(kernel.probabilities(), &[0.25, 0.5, 0.25]);
//! # Ok::<(), configspace::Error>(())
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`CategoricalHyperparameter`](hyperparameter::CategoricalHyperparameter) | Finite unordered domain with optional weights, vector encoding, sampling and neighbors. |
//! | [`FloatHyperparameter`](hyperparameter::FloatHyperparameter), [`IntegerHyperparameter`](hyperparameter::IntegerHyperparameter) | Bounded numeric ranges, optionally on a log scale. |
//! | [`OrdinalHyperparameter`](hyperparameter::OrdinalHyperparameter) | Finite ordered sequence. |
//! | [`Condition`](condition::Condition) | Activates a child hyperparameter when an expression over its parents holds. |
//! | [`Forbidden`](forbidden::Forbidden) | A combination of values that must never be chosen together. |
//! | [`ConfigurationSpace`] | Validated container with canonical ordering. |
//! | [`pcs`] | Text codec for the old and new PCS dialects. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|-----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on values, expressions, forbidden clauses and [`Dialect`](pcs::Dialect) | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) when spaces are built, read and written | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod condition;
pub mod distribution;
mod error;
pub mod forbidden;
pub mod hyperparameter;
pub mod neighborhood;
pub mod pcs;
mod rng_util;
mod space;
mod value;

pub use error::{Error, ErrorKind, Result};
pub use pcs::Dialect;
pub use space::ConfigurationSpace;
pub use value::{Value, ValueKind};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use configspace::prelude::*;
/// ```
pub mod prelude {
    pub use crate::condition::{Condition, Expression};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::forbidden::{Forbidden, Relation};
    pub use crate::hyperparameter::{
        CategoricalHyperparameter, FloatHyperparameter, Hyperparameter, IntegerHyperparameter,
        OrdinalHyperparameter,
    };
    pub use crate::pcs::{self, Dialect};
    pub use crate::space::ConfigurationSpace;
    pub use crate::value::{Value, ValueKind};
}
