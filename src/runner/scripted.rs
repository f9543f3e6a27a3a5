use std::collections::VecDeque;

use parking_lot::Mutex;

use super::{CommandRunner, Invocation};

/// A runner that replays canned stdout instead of spawning anything.
///
/// Responses are handed out in FIFO order, one per invocation; once the
/// queue is empty every further invocation returns an empty string, the
/// same thing a failed process produces. Every invocation is recorded and
/// can be inspected with [`invocations`](Self::invocations).
///
/// Share it with a study through an `Arc` to keep access to the log:
///
/// ```
/// use std::sync::Arc;
///
/// use optuna_bridge::runner::ScriptedRunner;
/// use optuna_bridge::{SearchSpace, Study};
///
/// let runner = Arc::new(ScriptedRunner::new());
/// let study = Study::builder("sqlite:///db", "s")
///     .runner(Arc::clone(&runner))
///     .create();
///
/// runner.push_response(r#"{"number": 0, "params": {"x": 0.5}}"#);
/// let trial = study.ask(&SearchSpace::new()).unwrap();
/// assert_eq!(trial.number(), 0);
/// assert_eq!(runner.invocations()[1].subcommand(), Some("ask"));
/// ```
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<String>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    /// Creates a runner with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner pre-loaded with `responses`.
    #[must_use]
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Queues stdout for a later invocation.
    pub fn push_response(&self, stdout: impl Into<String>) {
        self.responses.lock().push_back(stdout.into());
    }

    /// Returns a copy of every invocation seen so far.
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().clone()
    }

    /// Returns the most recent invocation.
    #[must_use]
    pub fn last_invocation(&self) -> Option<Invocation> {
        self.invocations.lock().last().cloned()
    }

    /// Returns the number of responses not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.responses.lock().len()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> String {
        self.invocations.lock().push(invocation.clone());
        self.responses.lock().pop_front().unwrap_or_default()
    }
}
