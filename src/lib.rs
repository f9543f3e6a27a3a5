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

//! Drive the [Optuna](https://optuna.org) command-line tool from Rust.
//!
//! This crate does no optimization itself. Samplers, pruners and storage
//! all live in the `optuna` executable; a [`Study`] is a handle that turns
//! each call into one `optuna` invocation and parses the JSON it prints.
//!
//! # Getting Started
//!
//! ```no_run
//! use optuna_bridge::prelude::*;
//!
//! let study = Study::create("sqlite:///example.db", "quadratic", Direction::Minimize, true);
//!
//! let mut space = SearchSpace::new();
//! space.add_categorical("c", ["a", "b"]).add_float("x", -10.0, 10.0);
//!
//! for _ in 0..10 {
//!     let trial = study.ask(&space)?;
//!     let c: String = trial.param("c")?;
//!     let x: f64 = trial.param("x")?;
//!     let offset = if c == "a" { 0.0 } else { 1.0 };
//!     study.tell(trial, x * x + offset);
//! }
//!
//! let best = study.best_trial()?;
//! println!("trial {} reached {}", best.number(), best.value());
//! # Ok::<(), Error>(())
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Study`] | Handle to a stored study: create, ask, tell, list trials. |
//! | [`SearchSpace`] | Named parameter distributions, serialized for `ask --search-space`. |
//! | [`Trial`] | A sampled parameter assignment with its tool-assigned number. |
//! | [`FrozenTrial`] | A trial record with its state and objective value. |
//! | [`CommandRunner`](runner::CommandRunner) | How invocations are executed; swap it out in tests. |
//!
//! # Failure model
//!
//! The runner never reports process failures. A missing executable or a
//! failing subcommand produces empty (or partial) stdout, which then fails
//! to parse and surfaces as [`Error::Json`]. Calls that parse nothing
//! (`create`, `tell`) cannot observe failures at all; the tool's own
//! message still reaches stderr.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) for every invocation, ask and tell | off |

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

pub mod distribution;
mod error;
pub mod runner;
mod search_space;
mod study;
mod trial;
mod types;

pub use distribution::{Choice, Distribution};
pub use error::{Error, Result};
pub use search_space::SearchSpace;
pub use study::{Study, StudyBuilder, StudySummary, studies, studies_with};
pub use trial::{FrozenTrial, Trial};
pub use types::{Direction, TrialState};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use optuna_bridge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::distribution::{Choice, Distribution};
    pub use crate::error::{Error, Result};
    pub use crate::runner::{CommandRunner, Invocation, ProcessRunner, ScriptedRunner};
    pub use crate::search_space::SearchSpace;
    pub use crate::study::{Study, StudyBuilder, StudySummary};
    pub use crate::trial::{FrozenTrial, Trial};
    pub use crate::types::{Direction, TrialState};
}
