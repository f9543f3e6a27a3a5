//! Core types shared by studies and trials.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The direction of optimization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Minimize the objective value.
    #[default]
    #[serde(alias = "minimize")]
    Minimize,
    /// Maximize the objective value.
    #[serde(alias = "maximize")]
    Maximize,
}

impl Direction {
    /// The value passed to `--direction`.
    #[must_use]
    pub fn as_cli_arg(self) -> &'static str {
        match self {
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cli_arg())
    }
}

/// The state of a trial as reported by the tool.
///
/// Labels the tool introduces later are kept verbatim in [`Other`](Self::Other)
/// rather than rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrialState {
    /// The trial has been asked but not told.
    Running,
    /// The trial is queued and has not started.
    Waiting,
    /// The trial completed with an objective value.
    Complete,
    /// The trial was stopped early.
    Pruned,
    /// The trial failed.
    Fail,
    /// Any other label.
    Other(String),
}

impl TrialState {
    /// Returns the label used on the wire, e.g. `"COMPLETE"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "RUNNING",
            Self::Waiting => "WAITING",
            Self::Complete => "COMPLETE",
            Self::Pruned => "PRUNED",
            Self::Fail => "FAIL",
            Self::Other(label) => label,
        }
    }

    /// Returns `true` for states a trial can never leave.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Complete | Self::Pruned | Self::Fail)
    }
}

impl From<String> for TrialState {
    fn from(label: String) -> Self {
        match label.as_str() {
            "RUNNING" => Self::Running,
            "WAITING" => Self::Waiting,
            "COMPLETE" => Self::Complete,
            "PRUNED" => Self::Pruned,
            "FAIL" => Self::Fail,
            _ => Self::Other(label),
        }
    }
}

impl From<TrialState> for String {
    fn from(state: TrialState) -> Self {
        match state {
            TrialState::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for TrialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
