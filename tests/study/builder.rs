use std::sync::Arc;

use optuna_bridge::runner::ScriptedRunner;
use optuna_bridge::{Direction, SearchSpace, Study};

#[test]
fn test_create_issues_create_study() {
    let runner = Arc::new(ScriptedRunner::new());
    let study = Study::builder("sqlite:///example.db", "test_study")
        .runner(Arc::clone(&runner))
        .create();

    assert_eq!(study.direction(), Direction::Minimize);
    assert_eq!(study.storage(), "sqlite:///example.db");
    assert_eq!(study.study_name(), "test_study");

    let calls = runner.invocations();
    assert_eq!(calls.len(), 1);
    let inv = &calls[0];
    assert_eq!(inv.program(), "optuna");
    assert_eq!(
        inv.args(),
        [
            "create-study",
            "--storage=sqlite:///example.db",
            "--study-name=test_study",
            "--direction=minimize",
        ]
    );
}

#[test]
fn test_create_with_skip_if_exists() {
    let runner = Arc::new(ScriptedRunner::new());
    let _study = Study::builder("sqlite:///example.db", "s")
        .maximize()
        .skip_if_exists(true)
        .runner(Arc::clone(&runner))
        .create();

    let inv = runner.last_invocation().unwrap();
    assert_eq!(inv.value_of("--direction"), Some("maximize"));
    assert!(inv.has_flag("--skip-if-exists"));
}

#[test]
fn test_open_issues_nothing() {
    let runner = Arc::new(ScriptedRunner::new());
    let study = Study::builder("sqlite:///example.db", "s")
        .runner(Arc::clone(&runner))
        .open();

    assert!(runner.invocations().is_empty());
    assert_eq!(study.executable(), "optuna");
}

#[test]
fn test_custom_executable() {
    let runner = Arc::new(ScriptedRunner::new());
    let _study = Study::builder("sqlite:///example.db", "s")
        .executable("/opt/venv/bin/optuna")
        .runner(Arc::clone(&runner))
        .create();

    assert_eq!(
        runner.last_invocation().unwrap().program(),
        "/opt/venv/bin/optuna"
    );
}

#[test]
fn test_sampler_flags_are_sent_on_ask() {
    let runner = Arc::new(ScriptedRunner::new());
    let study = Study::builder("sqlite:///example.db", "s")
        .sampler("TPESampler")
        .sampler_kwargs(serde_json::json!({"seed": 42}))
        .runner(Arc::clone(&runner))
        .open();

    runner.push_response(r#"{"number": 0, "params": {}}"#);
    study.ask(&SearchSpace::new()).unwrap();

    let inv = runner.last_invocation().unwrap();
    assert_eq!(inv.value_of("--sampler"), Some("TPESampler"));
    assert_eq!(inv.value_of("--sampler-kwargs"), Some(r#"{"seed":42}"#));
}

#[test]
fn test_missing_executable_surfaces_as_parse_error() {
    // The default process runner turns a spawn failure into empty output.
    let study = Study::builder("sqlite:///example.db", "s")
        .executable("optuna-bridge-missing-executable")
        .create();
    assert!(study.trials().is_err());
}

#[test]
fn test_study_stays_identical_across_calls() {
    let runner = Arc::new(ScriptedRunner::new());
    let study = Study::builder("sqlite:///a.db", "s")
        .runner(Arc::clone(&runner))
        .open();

    let _ = study.trials();
    let _ = study.trials();
    let calls = runner.invocations();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[test]
fn test_debug_omits_runner() {
    let study = Study::builder("sqlite:///a.db", "s")
        .runner(ScriptedRunner::new())
        .open();
    let text = format!("{study:?}");
    assert!(text.contains("sqlite:///a.db"));
    assert!(text.contains(".."));
}

#[test]
fn test_study_name_starting_with_dash_reaches_every_subcommand() {
    let runner = Arc::new(ScriptedRunner::with_responses([
        "",
        r#"{"number": 0, "params": {}}"#,
    ]));
    let study = Study::builder("sqlite:///example.db", "-exp1")
        .runner(Arc::clone(&runner))
        .create();
    study.ask(&SearchSpace::new()).unwrap();

    for inv in runner.invocations() {
        assert!(inv.args().iter().any(|a| a == "--study-name=-exp1"), "{inv}");
        assert_eq!(inv.value_of("--study-name"), Some("-exp1"));
    }
}
