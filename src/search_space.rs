//! Search space builder.
//!
//! A [`SearchSpace`] maps parameter names to [`Distribution`] descriptors
//! and serializes to the JSON object `optuna ask --search-space` expects.
//!
//! # Example
//!
//! ```
//! use optuna_bridge::SearchSpace;
//!
//! let mut space = SearchSpace::new();
//! space
//!     .add_float("x", -10.0, 10.0)
//!     .add_int("layers", 1, 4)
//!     .add_categorical("activation", ["relu", "tanh"]);
//!
//! assert_eq!(space.len(), 3);
//! assert!(space.to_json_string().unwrap().starts_with(r#"{"x":"#));
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::distribution::{Choice, Distribution};

/// An ordered set of named parameter distributions.
///
/// Entries keep their insertion order. Adding a name that already exists
/// replaces its distribution in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchSpace {
    entries: Vec<(String, Distribution)>,
}

impl SearchSpace {
    /// Creates an empty search space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a uniform float parameter over `[low, high]`.
    pub fn add_float(&mut self, name: impl Into<String>, low: f64, high: f64) -> &mut Self {
        self.add_float_with(name, low, high, 0.0, false)
    }

    /// Adds a float parameter with an explicit step and scale.
    ///
    /// | `step` | `log` | Distribution |
    /// |--------|-------|--------------|
    /// | `0` | `false` | `UniformDistribution` |
    /// | `0` | `true` | `LogUniformDistribution` |
    /// | non-zero | `false` | `DiscreteUniformDistribution` |
    ///
    /// # Panics
    ///
    /// Panics if `step` is non-zero and `log` is `true`; the tool has no
    /// distribution for a stepped log-scale float.
    pub fn add_float_with(
        &mut self,
        name: impl Into<String>,
        low: f64,
        high: f64,
        step: f64,
        log: bool,
    ) -> &mut Self {
        let name = name.into();
        let distribution = match (step == 0.0, log) {
            (true, false) => Distribution::Uniform { low, high },
            (true, true) => Distribution::LogUniform { low, high },
            (false, false) => Distribution::DiscreteUniform { low, high, q: step },
            (false, true) => {
                panic!("float parameter '{name}' cannot combine a step ({step}) with log scale")
            }
        };
        self.insert(name, distribution)
    }

    /// Adds an integer parameter over `[low, high]` with step 1.
    pub fn add_int(&mut self, name: impl Into<String>, low: i64, high: i64) -> &mut Self {
        self.add_int_with(name, low, high, 1, false)
    }

    /// Adds an integer parameter with an explicit step and scale.
    pub fn add_int_with(
        &mut self,
        name: impl Into<String>,
        low: i64,
        high: i64,
        step: i64,
        log: bool,
    ) -> &mut Self {
        let distribution = if log {
            Distribution::IntLogUniform { low, high, step }
        } else {
            Distribution::IntUniform { low, high, step }
        };
        self.insert(name.into(), distribution)
    }

    /// Adds a categorical parameter. Choice order is preserved.
    pub fn add_categorical<I>(&mut self, name: impl Into<String>, choices: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Choice>,
    {
        let choices = choices.into_iter().map(Into::into).collect();
        self.insert(name.into(), Distribution::Categorical { choices })
    }

    /// Adds a prebuilt distribution, replacing any entry with the same name.
    pub fn insert(&mut self, name: String, distribution: Distribution) -> &mut Self {
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = distribution;
        } else {
            self.entries.push((name, distribution));
        }
        self
    }

    /// Returns the distribution registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Distribution> {
        self.entries
            .iter()
            .find_map(|(n, d)| (n == name).then_some(d))
    }

    /// Iterates over `(name, distribution)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Distribution)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the search space as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    /// Non-finite float bounds do not fail; they encode as `null`.
    pub fn to_json(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Returns the compact JSON text passed to `--search-space`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    /// Non-finite float bounds do not fail; they encode as `null`.
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for SearchSpace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, distribution) in &self.entries {
            map.serialize_entry(name, distribution)?;
        }
        map.end()
    }
}
