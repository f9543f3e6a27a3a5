use crate::error::{Error, Result};
use crate::search_space::SearchSpace;
use crate::trial::Trial;

use super::Study;

impl Study {
    /// Run `n_trials` ask → evaluate → tell rounds sequentially.
    ///
    /// The objective receives each trial and returns its value. An `Err`
    /// from the objective marks that trial failed and the loop moves on.
    ///
    /// # Errors
    ///
    /// Returns the parse error of the first `ask` that yields no trial,
    /// stopping the loop there. Returns [`Error::NoCompletedTrials`] if
    /// `n_trials > 0` and every evaluation failed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use optuna_bridge::{Direction, SearchSpace, Study};
    ///
    /// let study = Study::create("sqlite:///example.db", "quadratic", Direction::Minimize, true);
    /// let mut space = SearchSpace::new();
    /// space.add_float("x", -10.0, 10.0);
    ///
    /// study.optimize(20, &space, |trial| {
    ///     let x: f64 = trial.param("x")?;
    ///     Ok::<_, optuna_bridge::Error>((x - 2.0).powi(2))
    /// })?;
    /// # Ok::<(), optuna_bridge::Error>(())
    /// ```
    pub fn optimize<F, E>(
        &self,
        n_trials: usize,
        search_space: &SearchSpace,
        mut objective: F,
    ) -> Result<()>
    where
        F: FnMut(&Trial) -> core::result::Result<f64, E>,
        E: ToString,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "optimize",
            n_trials,
            study = %self.study_name,
            direction = %self.direction
        )
        .entered();

        let mut completed = 0_usize;
        for _ in 0..n_trials {
            let trial = self.ask(search_space)?;
            let result = objective(&trial);
            if result.is_ok() {
                completed += 1;
            }
            self.tell_result(trial, result);
        }

        if n_trials > 0 && completed == 0 {
            return Err(Error::NoCompletedTrials);
        }
        Ok(())
    }
}
