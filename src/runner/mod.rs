//! Command invocation and execution.
//!
//! Every study operation is expressed as an [`Invocation`], a program name
//! plus an argument vector, and handed to a [`CommandRunner`]. Arguments
//! are never joined into a shell string, and long options travel as one
//! `--flag=value` word, so study names, storage URIs, objective values and
//! search-space JSON reach the tool exactly as given.
//!
//! # Available runners
//!
//! | Runner | Description |
//! |--------|-------------|
//! | [`ProcessRunner`] | Spawns the program and returns its stdout (the default) |
//! | [`ScriptedRunner`] | Records invocations and replays canned stdout, for tests |
//!
//! # Implementing a custom runner
//!
//! Implement [`CommandRunner`] to route invocations elsewhere, e.g. through
//! a remote shell. Inject it via the builder:
//!
//! ```
//! use optuna_bridge::Study;
//! use optuna_bridge::runner::ScriptedRunner;
//!
//! let study = Study::builder("sqlite:///example.db", "demo")
//!     .runner(ScriptedRunner::new())
//!     .create();
//! assert_eq!(study.study_name(), "demo");
//! ```

use core::fmt;
use std::sync::Arc;

mod process;
mod scripted;

pub use process::ProcessRunner;
pub use scripted::ScriptedRunner;

/// A program and its argument vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Creates an invocation of `program` with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends an option with its value.
    ///
    /// Long flags are joined into a single `--flag=value` word so a value
    /// starting with `-` (`-inf`, `-exp1`) is never mistaken for another
    /// flag. Short flags stay two words (`-f json`).
    #[must_use]
    pub fn option(self, flag: &str, value: impl Into<String>) -> Self {
        if flag.starts_with("--") {
            let value = value.into();
            self.arg(format!("{flag}={value}"))
        } else {
            self.arg(flag).arg(value)
        }
    }

    /// Returns the program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the argument vector.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the first argument, which for the tool is the subcommand.
    #[must_use]
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Returns the value given for `flag`, either as `flag=value` or as the
    /// argument following a bare `flag`.
    #[must_use]
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args.iter().enumerate().find_map(|(i, a)| {
            if a == flag {
                self.args.get(i + 1).map(String::as_str)
            } else {
                a.strip_prefix(flag)?.strip_prefix('=')
            }
        })
    }

    /// Returns `true` if `flag` appears anywhere in the arguments, bare or
    /// with an attached `=value`.
    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args
            .iter()
            .any(|a| a == flag || a.strip_prefix(flag).is_some_and(|r| r.starts_with('=')))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Trait for executing an [`Invocation`] and collecting its stdout.
///
/// Runners do not report failures. A program that cannot be started or
/// exits with an error yields whatever it wrote to stdout, often nothing;
/// the caller finds out when that text fails to parse.
///
/// Implementations must be `Send + Sync` so a [`Study`](crate::Study) can
/// be moved across threads.
pub trait CommandRunner: Send + Sync {
    /// Runs `invocation` to completion and returns its stdout.
    fn run(&self, invocation: &Invocation) -> String;
}

impl<R: CommandRunner + ?Sized> CommandRunner for Arc<R> {
    fn run(&self, invocation: &Invocation) -> String {
        (**self).run(invocation)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, invocation: &Invocation) -> String {
        (**self).run(invocation)
    }
}
