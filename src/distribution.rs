//! Parameter distribution descriptors in the tool's JSON layout.
//!
//! Each descriptor serializes as
//! `{"name": "<Kind>Distribution", "attributes": {...}}`, which is what
//! `optuna ask --search-space` decodes.

use serde::{Deserialize, Serialize};

/// A single categorical choice.
///
/// The tool only accepts JSON primitives as choices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    /// JSON `null`.
    Null,
    /// A boolean choice.
    Bool(bool),
    /// An integer choice.
    Int(i64),
    /// A floating-point choice.
    Float(f64),
    /// A string choice.
    Str(String),
}

impl From<bool> for Choice {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Choice {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Choice {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Choice {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Choice {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Choice {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl<T: Into<Choice>> From<Option<T>> for Choice {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Enum wrapping all distribution kinds the tool understands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "attributes")]
pub enum Distribution {
    /// Continuous floats in `[low, high]`.
    #[serde(rename = "UniformDistribution")]
    Uniform {
        /// Lower bound (inclusive).
        low: f64,
        /// Upper bound (inclusive).
        high: f64,
    },
    /// Continuous floats in `[low, high]`, sampled in log space.
    #[serde(rename = "LogUniformDistribution")]
    LogUniform {
        /// Lower bound (inclusive).
        low: f64,
        /// Upper bound (inclusive).
        high: f64,
    },
    /// Floats in `[low, high]` discretized by `q`.
    #[serde(rename = "DiscreteUniformDistribution")]
    DiscreteUniform {
        /// Lower bound (inclusive).
        low: f64,
        /// Upper bound (inclusive).
        high: f64,
        /// Discretization step.
        q: f64,
    },
    /// Integers in `[low, high]` spaced by `step`.
    #[serde(rename = "IntUniformDistribution")]
    IntUniform {
        /// Lower bound (inclusive).
        low: i64,
        /// Upper bound (inclusive).
        high: i64,
        /// Spacing between candidate values.
        step: i64,
    },
    /// Integers in `[low, high]`, sampled in log space.
    #[serde(rename = "IntLogUniformDistribution")]
    IntLogUniform {
        /// Lower bound (inclusive).
        low: i64,
        /// Upper bound (inclusive).
        high: i64,
        /// Spacing between candidate values.
        step: i64,
    },
    /// One of an ordered list of primitive choices.
    #[serde(rename = "CategoricalDistribution")]
    Categorical {
        /// The candidate values, in order.
        choices: Vec<Choice>,
    },
}

impl Distribution {
    /// Returns the kind string the tool uses, e.g. `"UniformDistribution"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "UniformDistribution",
            Self::LogUniform { .. } => "LogUniformDistribution",
            Self::DiscreteUniform { .. } => "DiscreteUniformDistribution",
            Self::IntUniform { .. } => "IntUniformDistribution",
            Self::IntLogUniform { .. } => "IntLogUniformDistribution",
            Self::Categorical { .. } => "CategoricalDistribution",
        }
    }
}
