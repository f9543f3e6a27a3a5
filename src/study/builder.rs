use std::sync::Arc;

use crate::runner::{CommandRunner, ProcessRunner};
use crate::types::Direction;

use super::Study;

/// Executable used when none is configured; resolved through `PATH`.
pub(crate) const DEFAULT_EXECUTABLE: &str = "optuna";

/// A builder for constructing [`Study`] handles with a fluent API.
///
/// Created via [`Study::builder()`]. Collects direction, sampler, and
/// execution options, then either creates the study ([`create`](Self::create))
/// or attaches to one that already exists ([`open`](Self::open)).
///
/// # Defaults
///
/// - Direction: [`Minimize`](Direction::Minimize)
/// - Executable: `optuna`
/// - Sampler: the tool's default
/// - Runner: [`ProcessRunner`]
///
/// # Examples
///
/// ```
/// use optuna_bridge::runner::ScriptedRunner;
/// use optuna_bridge::{Direction, Study};
///
/// let study = Study::builder("sqlite:///example.db", "tuning")
///     .maximize()
///     .skip_if_exists(true)
///     .sampler("RandomSampler")
///     .sampler_kwargs(serde_json::json!({"seed": 42}))
///     .runner(ScriptedRunner::new())
///     .create();
///
/// assert_eq!(study.direction(), Direction::Maximize);
/// ```
pub struct StudyBuilder {
    storage: String,
    study_name: String,
    direction: Direction,
    skip_if_exists: bool,
    executable: String,
    sampler: Option<String>,
    sampler_kwargs: Option<serde_json::Value>,
    runner: Option<Arc<dyn CommandRunner>>,
}

impl StudyBuilder {
    pub(super) fn new(storage: String, study_name: String) -> Self {
        Self {
            storage,
            study_name,
            direction: Direction::Minimize,
            skip_if_exists: false,
            executable: DEFAULT_EXECUTABLE.to_owned(),
            sampler: None,
            sampler_kwargs: None,
            runner: None,
        }
    }

    /// Set the optimization direction to minimize (the default).
    #[must_use]
    pub fn minimize(mut self) -> Self {
        self.direction = Direction::Minimize;
        self
    }

    /// Set the optimization direction to maximize.
    #[must_use]
    pub fn maximize(mut self) -> Self {
        self.direction = Direction::Maximize;
        self
    }

    /// Set the optimization direction explicitly.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Reuse an existing study of the same name on [`create`](Self::create)
    /// instead of letting the tool fail.
    #[must_use]
    pub fn skip_if_exists(mut self, skip: bool) -> Self {
        self.skip_if_exists = skip;
        self
    }

    /// Set the executable to invoke, e.g. a path inside a virtualenv.
    #[must_use]
    pub fn executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Set the sampler class name passed to `ask --sampler`.
    #[must_use]
    pub fn sampler(mut self, sampler: impl Into<String>) -> Self {
        self.sampler = Some(sampler.into());
        self
    }

    /// Set the sampler constructor arguments passed to `ask --sampler-kwargs`.
    #[must_use]
    pub fn sampler_kwargs(mut self, kwargs: serde_json::Value) -> Self {
        self.sampler_kwargs = Some(kwargs);
        self
    }

    /// Set a custom runner.
    ///
    /// Defaults to [`ProcessRunner`] if not specified.
    #[must_use]
    pub fn runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Some(Arc::new(runner));
        self
    }

    /// Build the handle without issuing any command.
    ///
    /// Use this for a study that is known to exist already.
    #[must_use]
    pub fn open(self) -> Study {
        Study {
            storage: self.storage,
            study_name: self.study_name,
            direction: self.direction,
            executable: self.executable,
            sampler: self.sampler,
            sampler_kwargs: self.sampler_kwargs,
            runner: self.runner.unwrap_or_else(|| Arc::new(ProcessRunner::new())),
        }
    }

    /// Issue `optuna create-study` and return the handle.
    ///
    /// The tool's output is not inspected, so a failed creation only
    /// surfaces on the next call that parses output.
    #[must_use]
    pub fn create(self) -> Study {
        let skip_if_exists = self.skip_if_exists;
        let study = self.open();

        let mut command = study
            .base_command("create-study")
            .option("--direction", study.direction.as_cli_arg());
        if skip_if_exists {
            command = command.arg("--skip-if-exists");
        }
        study.run(&command);
        trace_info!(study = %study.study_name, direction = %study.direction, "study created");

        study
    }
}
