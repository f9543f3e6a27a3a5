//! Ask-and-tell against a real Optuna installation.
//!
//! Minimizes `x² + y²` (plus one when `c == "b"`) for ten trials and prints
//! every trial the tool has stored. Requires `optuna` on `PATH`.
//!
//! Run with: `cargo run --example quadratic --features tracing`

use optuna_bridge::prelude::*;

fn main() -> optuna_bridge::Result<()> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let study = Study::create("sqlite:///example.db", "test_study", Direction::Minimize, true);

    let mut space = SearchSpace::new();
    space
        .add_categorical("c", ["a", "b"])
        .add_float("x", -10.0, 10.0)
        .add_float("y", -10.0, 10.0);

    for _ in 0..10 {
        let trial = study.ask(&space)?;
        let c: String = trial.param("c")?;
        let x: f64 = trial.param("x")?;
        let y: f64 = trial.param("y")?;
        let value = if c == "a" {
            x * x + y * y
        } else {
            x * x + y * y + 1.0
        };
        study.tell(trial, value);
    }

    for trial in study.trials()? {
        println!(
            "{} {} {} {} {} {}",
            trial.number(),
            trial.state(),
            trial.param::<String>("c")?,
            trial.param::<f64>("x")?,
            trial.param::<f64>("y")?,
            trial.value(),
        );
    }

    Ok(())
}
