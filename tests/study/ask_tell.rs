use optuna_bridge::{Direction, Error, SearchSpace, Trial};

use super::scripted_study;

#[test]
fn test_ask_parses_trial() {
    let (study, runner) = scripted_study(
        Direction::Minimize,
        [r#"{"number": 3, "params": {"x": 1.5}}"#],
    );
    let mut space = SearchSpace::new();
    space.add_float("x", -10.0, 10.0);

    let trial = study.ask(&space).unwrap();
    assert_eq!(trial.number(), 3);
    assert_eq!(trial.param::<f64>("x").unwrap(), 1.5);

    let inv = runner.last_invocation().unwrap();
    assert_eq!(inv.program(), "optuna");
    assert_eq!(inv.subcommand(), Some("ask"));
    assert_eq!(inv.value_of("--storage"), Some("sqlite:///test.db"));
    assert_eq!(inv.value_of("--study-name"), Some("test_study"));
    assert_eq!(inv.value_of("--direction"), Some("minimize"));
    assert_eq!(
        inv.value_of("--search-space"),
        Some(r#"{"x":{"name":"UniformDistribution","attributes":{"low":-10.0,"high":10.0}}}"#)
    );
    assert!(!inv.has_flag("--sampler"));
}

#[test]
fn test_ask_passes_maximize() {
    let (study, runner) = scripted_study(Direction::Maximize, [r#"{"number": 0, "params": {}}"#]);
    study.ask(&SearchSpace::new()).unwrap();
    assert_eq!(
        runner.last_invocation().unwrap().value_of("--direction"),
        Some("maximize")
    );
}

#[test]
fn test_ask_with_empty_output_fails_to_parse() {
    let (study, _runner) = scripted_study(Direction::Minimize, []);
    let result = study.ask(&SearchSpace::new());
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_ask_with_error_text_fails_to_parse() {
    let (study, _runner) = scripted_study(Direction::Minimize, ["Error: study not found"]);
    assert!(study.ask(&SearchSpace::new()).is_err());
}

#[test]
fn test_search_space_json_is_a_single_argument() {
    let (study, runner) = scripted_study(
        Direction::Minimize,
        [r#"{"number": 0, "params": {"it's": "a b"}}"#],
    );
    let mut space = SearchSpace::new();
    space.add_categorical("it's", ["a b", "c'd"]);

    let trial = study.ask(&space).unwrap();
    assert_eq!(trial.param::<String>("it's").unwrap(), "a b");

    let inv = runner.last_invocation().unwrap();
    let arg = inv.value_of("--search-space").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(arg).unwrap();
    assert_eq!(
        parsed["it's"]["attributes"]["choices"],
        serde_json::json!(["a b", "c'd"])
    );
}

#[test]
fn test_tell_sends_number_and_value() {
    let (study, runner) = scripted_study(Direction::Minimize, []);
    study.tell(Trial::new(5, serde_json::Map::new()), 2.25);

    let inv = runner.last_invocation().unwrap();
    assert_eq!(inv.subcommand(), Some("tell"));
    assert_eq!(inv.value_of("--trial-number"), Some("5"));
    assert_eq!(inv.value_of("--values"), Some("2.25"));
    assert!(!inv.has_flag("--state"));
}

#[test]
fn test_tell_negative_infinity_stays_attached_to_flag() {
    let (study, runner) = scripted_study(Direction::Minimize, []);
    study.tell(Trial::new(2, serde_json::Map::new()), f64::NEG_INFINITY);

    let inv = runner.last_invocation().unwrap();
    assert!(inv.args().iter().any(|a| a == "--values=-inf"));
    assert!(!inv.args().iter().any(|a| a == "-inf"));
    assert_eq!(inv.value_of("--values"), Some("-inf"));
}

#[test]
fn test_tell_unknown_trial_is_not_validated() {
    // The tool rejects this on its side; the runner hands back empty text
    // and tell returns normally.
    let (study, runner) = scripted_study(Direction::Minimize, []);
    study.tell(Trial::new(999, serde_json::Map::new()), 1.0);
    assert_eq!(runner.invocations().len(), 2);
}

#[test]
fn test_tell_result_err_marks_failed() {
    let (study, runner) = scripted_study(Direction::Minimize, []);
    study.tell_result(Trial::new(1, serde_json::Map::new()), Err::<f64, _>("diverged"));

    let inv = runner.last_invocation().unwrap();
    assert_eq!(inv.value_of("--trial-number"), Some("1"));
    assert_eq!(inv.value_of("--state"), Some("fail"));
    assert!(!inv.has_flag("--values"));
}

#[test]
fn test_tell_result_ok_completes() {
    let (study, runner) = scripted_study(Direction::Minimize, []);
    study.tell_result(Trial::new(1, serde_json::Map::new()), Ok::<_, &str>(0.5));
    assert_eq!(
        runner.last_invocation().unwrap().value_of("--values"),
        Some("0.5")
    );
}

#[test]
fn test_prune_sends_pruned_state() {
    let (study, runner) = scripted_study(Direction::Minimize, []);
    study.prune(Trial::new(4, serde_json::Map::new()));
    assert_eq!(
        runner.last_invocation().unwrap().value_of("--state"),
        Some("pruned")
    );
}

#[test]
fn test_ask_and_tell_loop() {
    let (study, runner) = scripted_study(
        Direction::Minimize,
        [
            r#"{"number": 0, "params": {"c": "a", "x": 1.0}}"#,
            "",
            r#"{"number": 1, "params": {"c": "b", "x": -2.0}}"#,
            "",
        ],
    );
    let mut space = SearchSpace::new();
    space.add_categorical("c", ["a", "b"]).add_float("x", -10.0, 10.0);

    for _ in 0..2 {
        let trial = study.ask(&space).unwrap();
        let c: String = trial.param("c").unwrap();
        let x: f64 = trial.param("x").unwrap();
        let value = if c == "a" { x * x } else { x * x + 1.0 };
        study.tell(trial, value);
    }

    let told: Vec<_> = runner
        .invocations()
        .into_iter()
        .filter(|inv| inv.subcommand() == Some("tell"))
        .map(|inv| {
            (
                inv.value_of("--trial-number").unwrap().to_owned(),
                inv.value_of("--values").unwrap().to_owned(),
            )
        })
        .collect();
    assert_eq!(
        told,
        [
            ("0".to_owned(), "1".to_owned()),
            ("1".to_owned(), "5".to_owned())
        ]
    );
}
