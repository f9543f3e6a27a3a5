//! Trial records parsed from the tool's JSON output.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::types::TrialState;

/// A trial handed out by `optuna ask`.
///
/// Holds the tool-assigned trial number and the sampled parameter values.
/// Pass it back to [`Study::tell`](crate::Study::tell) once the objective
/// has been evaluated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    number: u64,
    params: Map<String, Value>,
}

impl Trial {
    /// Creates a trial from a number and its sampled parameters.
    #[must_use]
    pub fn new(number: u64, params: Map<String, Value>) -> Self {
        Self { number, params }
    }

    /// Returns the tool-assigned trial number.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Returns all sampled parameters as raw JSON values.
    #[must_use]
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Returns the sampled value of `name` converted to `T`.
    ///
    /// Integer values convert to floats, but not the other way round.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParamNotFound`] if `name` was not sampled, or
    /// [`Error::ParamType`] if the stored value cannot be read as `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use optuna_bridge::Trial;
    ///
    /// let trial: Trial = serde_json::from_str(r#"{"number": 3, "params": {"x": 1.5}}"#).unwrap();
    /// assert_eq!(trial.number(), 3);
    /// assert_eq!(trial.param::<f64>("x").unwrap(), 1.5);
    /// assert!(trial.param::<String>("x").is_err());
    /// ```
    pub fn param<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.params.get(name).ok_or_else(|| Error::ParamNotFound {
            name: name.to_owned(),
        })?;
        T::deserialize(value).map_err(|source| Error::ParamType {
            name: name.to_owned(),
            source,
        })
    }
}

/// A trial record from `optuna trials` or `optuna best-trial`.
///
/// Wraps the [`Trial`] it describes together with its state and objective
/// value. The value is only meaningful for [`TrialState::Complete`]; for
/// every other state it is NaN.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "FrozenTrialRecord", into = "FrozenTrialRecord")]
pub struct FrozenTrial {
    trial: Trial,
    state: TrialState,
    value: f64,
    datetime_start: Option<String>,
    datetime_complete: Option<String>,
    user_attrs: Map<String, Value>,
}

impl FrozenTrial {
    /// Returns the underlying trial.
    #[must_use]
    pub fn trial(&self) -> &Trial {
        &self.trial
    }

    /// Consumes the record and returns the underlying trial.
    #[must_use]
    pub fn into_trial(self) -> Trial {
        self.trial
    }

    /// Returns the tool-assigned trial number.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.trial.number
    }

    /// Returns all sampled parameters as raw JSON values.
    #[must_use]
    pub fn params(&self) -> &Map<String, Value> {
        &self.trial.params
    }

    /// Returns the sampled value of `name` converted to `T`.
    ///
    /// # Errors
    ///
    /// See [`Trial::param`].
    pub fn param<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.trial.param(name)
    }

    /// Returns the trial state.
    #[must_use]
    pub fn state(&self) -> &TrialState {
        &self.state
    }

    /// Returns the objective value, or NaN if the trial is not complete.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns `true` if the trial completed with a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == TrialState::Complete
    }

    /// Returns the start timestamp as reported by the tool.
    #[must_use]
    pub fn datetime_start(&self) -> Option<&str> {
        self.datetime_start.as_deref()
    }

    /// Returns the completion timestamp as reported by the tool.
    #[must_use]
    pub fn datetime_complete(&self) -> Option<&str> {
        self.datetime_complete.as_deref()
    }

    /// Returns user attributes attached to the trial.
    #[must_use]
    pub fn user_attrs(&self) -> &Map<String, Value> {
        &self.user_attrs
    }
}

/// Wire layout of a frozen trial.
#[derive(Serialize, Deserialize)]
struct FrozenTrialRecord {
    number: u64,
    #[serde(default)]
    params: Map<String, Value>,
    state: TrialState,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    datetime_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    datetime_complete: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    user_attrs: Map<String, Value>,
}

impl TryFrom<FrozenTrialRecord> for FrozenTrial {
    type Error = Error;

    fn try_from(record: FrozenTrialRecord) -> Result<Self> {
        let value = if record.state == TrialState::Complete {
            record.value.ok_or(Error::MissingField("value"))?
        } else {
            f64::NAN
        };
        Ok(Self {
            trial: Trial::new(record.number, record.params),
            state: record.state,
            value,
            datetime_start: record.datetime_start,
            datetime_complete: record.datetime_complete,
            user_attrs: record.user_attrs,
        })
    }
}

impl From<FrozenTrial> for FrozenTrialRecord {
    fn from(frozen: FrozenTrial) -> Self {
        let value = (frozen.state == TrialState::Complete).then_some(frozen.value);
        Self {
            number: frozen.trial.number,
            params: frozen.trial.params,
            state: frozen.state,
            value,
            datetime_start: frozen.datetime_start,
            datetime_complete: frozen.datetime_complete,
            user_attrs: frozen.user_attrs,
        }
    }
}
