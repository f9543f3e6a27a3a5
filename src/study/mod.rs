//! Study handle: builds `optuna` invocations and parses their output.

use core::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::runner::{CommandRunner, Invocation};
use crate::search_space::SearchSpace;
use crate::trial::{FrozenTrial, Trial};
use crate::types::Direction;

mod builder;
mod export;
mod optimize;
mod summary;

pub use builder::StudyBuilder;
pub use summary::{StudySummary, studies, studies_with};

/// A handle to a study stored by the external tool.
///
/// The handle holds only what identifies the study (storage locator, study
/// name and direction) plus how to reach the tool. It caches nothing: each
/// method spawns one fresh invocation and reads the answer from the tool's
/// storage, so two handles on the same study always agree.
///
/// All calls block until the tool exits. The handle does not coordinate
/// concurrent callers; that is left to the tool's storage backend.
///
/// # Examples
///
/// ```no_run
/// use optuna_bridge::{Direction, SearchSpace, Study};
///
/// let study = Study::create("sqlite:///example.db", "quadratic", Direction::Minimize, true);
///
/// let mut space = SearchSpace::new();
/// space.add_float("x", -10.0, 10.0);
///
/// let trial = study.ask(&space)?;
/// let x: f64 = trial.param("x")?;
/// study.tell(trial, x * x);
///
/// println!("best value: {}", study.best_value()?);
/// # Ok::<(), optuna_bridge::Error>(())
/// ```
pub struct Study {
    pub(crate) storage: String,
    pub(crate) study_name: String,
    pub(crate) direction: Direction,
    pub(crate) executable: String,
    pub(crate) sampler: Option<String>,
    pub(crate) sampler_kwargs: Option<serde_json::Value>,
    pub(crate) runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for Study {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Study")
            .field("storage", &self.storage)
            .field("study_name", &self.study_name)
            .field("direction", &self.direction)
            .field("executable", &self.executable)
            .field("sampler", &self.sampler)
            .field("sampler_kwargs", &self.sampler_kwargs)
            .finish_non_exhaustive()
    }
}

impl Study {
    /// Return a [`StudyBuilder`] for the study `study_name` in `storage`.
    ///
    /// # Examples
    ///
    /// ```
    /// use optuna_bridge::Study;
    /// use optuna_bridge::runner::ScriptedRunner;
    ///
    /// let study = Study::builder("sqlite:///example.db", "tuning")
    ///     .maximize()
    ///     .sampler("TPESampler")
    ///     .runner(ScriptedRunner::new())
    ///     .open();
    /// assert_eq!(study.direction(), optuna_bridge::Direction::Maximize);
    /// ```
    #[must_use]
    pub fn builder(storage: impl Into<String>, study_name: impl Into<String>) -> StudyBuilder {
        StudyBuilder::new(storage.into(), study_name.into())
    }

    /// Create the study with `optuna create-study` and return a handle to it.
    ///
    /// With `skip_if_exists` the tool reuses an existing study of the same
    /// name instead of failing. Failures are not reported here; they show
    /// up on the first call that parses output.
    #[must_use]
    pub fn create(
        storage: impl Into<String>,
        study_name: impl Into<String>,
        direction: Direction,
        skip_if_exists: bool,
    ) -> Self {
        Self::builder(storage, study_name)
            .direction(direction)
            .skip_if_exists(skip_if_exists)
            .create()
    }

    /// Returns the storage locator passed to `--storage`.
    #[must_use]
    pub fn storage(&self) -> &str {
        &self.storage
    }

    /// Returns the study name.
    #[must_use]
    pub fn study_name(&self) -> &str {
        &self.study_name
    }

    /// Returns the optimization direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the executable used to reach the tool.
    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// `<tool> <subcommand> --storage=<uri> --study-name=<name>`
    pub(crate) fn base_command(&self, subcommand: &str) -> Invocation {
        Self::base_command_for(&self.executable, subcommand, &self.storage)
            .option("--study-name", &self.study_name)
    }

    pub(crate) fn base_command_for(
        executable: &str,
        subcommand: &str,
        storage: &str,
    ) -> Invocation {
        Invocation::new(executable)
            .arg(subcommand)
            .option("--storage", storage)
    }

    pub(crate) fn run(&self, invocation: &Invocation) -> String {
        self.runner.run(invocation)
    }

    /// Ask the tool for a new trial sampled from `search_space`.
    ///
    /// The configured sampler, if any, is passed along with every call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the tool's output is
    /// not a trial object, which includes the empty output of a failed run.
    pub fn ask(&self, search_space: &SearchSpace) -> Result<Trial> {
        let mut command = self
            .base_command("ask")
            .option("--direction", self.direction.as_cli_arg())
            .option("--search-space", search_space.to_json_string()?);
        if let Some(sampler) = &self.sampler {
            command = command.option("--sampler", sampler);
        }
        if let Some(kwargs) = &self.sampler_kwargs {
            command = command.option("--sampler-kwargs", kwargs.to_string());
        }

        let trial: Trial = serde_json::from_str(&self.run(&command))?;
        trace_info!(trial = trial.number(), study = %self.study_name, "trial asked");
        Ok(trial)
    }

    /// Report the objective value of `trial`, completing it.
    ///
    /// Nothing is checked locally: telling a trial number the tool does not
    /// know, or telling the same number twice, is for the tool to reject.
    /// Its complaint goes to stderr and this call returns normally.
    #[allow(clippy::needless_pass_by_value)]
    pub fn tell(&self, trial: Trial, value: f64) {
        let command = self
            .base_command("tell")
            .option("--trial-number", trial.number().to_string())
            .option("--values", value.to_string());
        self.run(&command);
        trace_info!(trial = trial.number(), value, "trial told");
    }

    /// Report the outcome of an objective evaluation.
    ///
    /// `Ok(value)` completes the trial like [`tell`](Self::tell); `Err(_)`
    /// marks it failed.
    #[allow(clippy::needless_pass_by_value)]
    pub fn tell_result(&self, trial: Trial, result: core::result::Result<f64, impl ToString>) {
        match result {
            Ok(value) => self.tell(trial, value),
            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
            Err(err) => {
                trace_debug!(trial = trial.number(), error = %err.to_string(), "objective failed");
                self.fail(trial);
            }
        }
    }

    /// Mark `trial` as failed.
    #[allow(clippy::needless_pass_by_value)]
    pub fn fail(&self, trial: Trial) {
        self.tell_state(&trial, "fail");
    }

    /// Mark `trial` as pruned.
    #[allow(clippy::needless_pass_by_value)]
    pub fn prune(&self, trial: Trial) {
        self.tell_state(&trial, "pruned");
    }

    fn tell_state(&self, trial: &Trial, state: &str) {
        let command = self
            .base_command("tell")
            .option("--trial-number", trial.number().to_string())
            .option("--state", state);
        self.run(&command);
        trace_info!(trial = trial.number(), state, "trial told");
    }

    /// Fetch every trial of the study, in the order the tool reports them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the output is not a
    /// JSON array of trial records.
    pub fn trials(&self) -> Result<Vec<FrozenTrial>> {
        let command = self.base_command("trials").option("-f", "json");
        Ok(serde_json::from_str(&self.run(&command))?)
    }

    /// Fetch the number of trials in the study, whatever their state.
    ///
    /// # Errors
    ///
    /// See [`trials`](Self::trials).
    pub fn n_trials(&self) -> Result<usize> {
        Ok(self.trials()?.len())
    }

    /// Fetch the best completed trial.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the tool reports an
    /// error (e.g. no completed trials yet) instead of a trial record.
    pub fn best_trial(&self) -> Result<FrozenTrial> {
        let command = self.base_command("best-trial").option("-f", "json");
        Ok(serde_json::from_str(&self.run(&command))?)
    }

    /// Fetch the objective value of the best trial.
    ///
    /// # Errors
    ///
    /// See [`best_trial`](Self::best_trial).
    pub fn best_value(&self) -> Result<f64> {
        Ok(self.best_trial()?.value())
    }

    /// Delete the study and all of its trials from storage.
    pub fn delete(self) {
        let command = self.base_command("delete-study");
        self.run(&command);
        trace_info!(study = %self.study_name, "study deleted");
    }
}
