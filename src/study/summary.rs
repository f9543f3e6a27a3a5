use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::runner::{CommandRunner, ProcessRunner};
use crate::types::Direction;

use super::Study;
use super::builder::DEFAULT_EXECUTABLE;

/// One row of `optuna studies`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StudySummary {
    /// The study name.
    pub name: String,
    /// Optimization directions, one per objective.
    #[serde(deserialize_with = "one_or_many")]
    pub direction: Vec<Direction>,
    /// Number of trials in any state.
    pub n_trials: u64,
    /// Start timestamp of the first trial, if any.
    #[serde(default)]
    pub datetime_start: Option<String>,
}

/// List the studies in `storage` using the `optuna` executable on `PATH`.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if the output is not a JSON
/// array of study records.
pub fn studies(storage: &str) -> Result<Vec<StudySummary>> {
    studies_with(&ProcessRunner::new(), DEFAULT_EXECUTABLE, storage)
}

/// List the studies in `storage` through a specific runner and executable.
///
/// # Errors
///
/// See [`studies`].
pub fn studies_with(
    runner: &dyn CommandRunner,
    executable: &str,
    storage: &str,
) -> Result<Vec<StudySummary>> {
    let command = Study::base_command_for(executable, "studies", storage).option("-f", "json");
    Ok(serde_json::from_str(&runner.run(&command))?)
}

/// Older releases report a single direction string, newer ones a list.
fn one_or_many<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> core::result::Result<Vec<Direction>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Direction),
        Many(Vec<Direction>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(d) => vec![d],
        OneOrMany::Many(ds) => ds,
    })
}
