#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the tool's stdout is not valid JSON or does not have
    /// the expected shape.
    ///
    /// A failed or missing `optuna` executable usually surfaces here, since
    /// the runner hands back empty output in that case.
    #[error("failed to parse optuna output: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when a field that the current state requires is absent.
    #[error("missing field in optuna output: {0}")]
    MissingField(&'static str),

    /// Returned when a trial has no sampled value for the requested parameter.
    #[error("parameter '{name}' was not sampled in this trial")]
    ParamNotFound {
        /// The requested parameter name.
        name: String,
    },

    /// Returned when a sampled value cannot be converted to the requested type.
    #[error("parameter '{name}' has an incompatible type: {source}")]
    ParamType {
        /// The requested parameter name.
        name: String,
        /// The underlying conversion error.
        source: serde_json::Error,
    },

    /// Returned by [`Study::optimize`](crate::Study::optimize) when every
    /// objective evaluation failed.
    #[error("no completed trials available")]
    NoCompletedTrials,

    /// Returned when writing an export fails.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
