use optuna_bridge::{Direction, TrialState};

use super::scripted_study;

const TRIALS_JSON: &str = r#"[
    {
        "number": 0,
        "value": 2.25,
        "datetime_start": "2024-05-01 10:00:00",
        "datetime_complete": "2024-05-01 10:00:01",
        "duration": "0:00:01",
        "params": {"c": "a", "x": 1.5},
        "state": "COMPLETE"
    },
    {
        "number": 1,
        "value": null,
        "datetime_start": "2024-05-01 10:00:02",
        "datetime_complete": null,
        "duration": null,
        "params": {"c": "b", "x": -3.0},
        "state": "RUNNING"
    },
    {
        "number": 2,
        "value": null,
        "params": {"c": "a", "x": 0.0},
        "state": "FAIL"
    }
]"#;

#[test]
fn test_trials_parses_in_reported_order() {
    let (study, runner) = scripted_study(Direction::Minimize, [TRIALS_JSON]);
    let trials = study.trials().unwrap();

    let numbers: Vec<u64> = trials.iter().map(|t| t.number()).collect();
    assert_eq!(numbers, [0, 1, 2]);

    assert_eq!(trials[0].state(), &TrialState::Complete);
    assert_eq!(trials[0].value(), 2.25);
    assert_eq!(trials[0].param::<String>("c").unwrap(), "a");

    assert_eq!(trials[1].state(), &TrialState::Running);
    assert!(trials[1].value().is_nan());
    assert_eq!(trials[1].datetime_complete(), None);

    assert_eq!(trials[2].state(), &TrialState::Fail);
    assert!(trials[2].value().is_nan());

    let inv = runner.last_invocation().unwrap();
    assert_eq!(inv.subcommand(), Some("trials"));
    assert_eq!(inv.value_of("-f"), Some("json"));
}

#[test]
fn test_trials_is_reissued_every_call() {
    let (study, runner) = scripted_study(Direction::Minimize, ["[]", TRIALS_JSON]);
    assert!(study.trials().unwrap().is_empty());
    assert_eq!(study.trials().unwrap().len(), 3);
    assert_eq!(runner.invocations().len(), 3);
}

#[test]
fn test_n_trials_counts_every_state() {
    let (study, _runner) = scripted_study(Direction::Minimize, [TRIALS_JSON]);
    assert_eq!(study.n_trials().unwrap(), 3);
}

#[test]
fn test_trials_rejects_non_array() {
    let (study, _runner) = scripted_study(Direction::Minimize, [r#"{"number": 0}"#]);
    assert!(study.trials().is_err());
}

#[test]
fn test_best_trial() {
    let (study, runner) = scripted_study(
        Direction::Minimize,
        [r#"{"number": 4, "value": 0.125, "params": {"x": 0.25}, "state": "COMPLETE"}"#],
    );
    let best = study.best_trial().unwrap();
    assert_eq!(best.number(), 4);
    assert_eq!(best.value(), 0.125);
    assert_eq!(best.param::<f64>("x").unwrap(), 0.25);

    let inv = runner.last_invocation().unwrap();
    assert_eq!(inv.subcommand(), Some("best-trial"));
    assert_eq!(inv.value_of("-f"), Some("json"));
}

#[test]
fn test_best_trial_on_tool_error() {
    // With no completed trials the tool prints nothing on stdout.
    let (study, _runner) = scripted_study(Direction::Minimize, [""]);
    assert!(study.best_trial().is_err());
    assert!(study.best_value().is_err());
}

#[test]
fn test_best_value() {
    let (study, _runner) = scripted_study(
        Direction::Maximize,
        [r#"{"number": 0, "value": 9.5, "params": {}, "state": "COMPLETE"}"#],
    );
    assert_eq!(study.best_value().unwrap(), 9.5);
}

#[test]
fn test_param_on_frozen_trial_type_mismatch() {
    let (study, _runner) = scripted_study(Direction::Minimize, [TRIALS_JSON]);
    let trials = study.trials().unwrap();
    assert!(trials[0].param::<f64>("c").is_err());
    assert!(trials[0].param::<f64>("missing").is_err());
}
