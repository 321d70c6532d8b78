use dont_core::{handlers, register_handler, Dont, Object};
use dont_test_utils::{capture_logs, shouter_class};
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_warn_logs_then_runs_original() {
    let mut klass = shouter_class();
    Dont::with_warn().dont_use(&mut klass, "scream");
    let mut obj = Object::new(Arc::new(klass));

    let (result, logs) = capture_logs(|| obj.call("scream", &[json!("hello")]));

    assert_eq!(result.unwrap(), json!("HELLO"));
    assert!(logs.contains("WARN"));
    assert!(logs.contains("DEPRECATED: Don't use Shouter#scream. It's deprecated."));
}

#[test]
fn test_warn_registered_by_key() {
    register_handler("logging_tests_warn", handlers::warn());
    let mut klass = shouter_class();
    Dont::new("logging_tests_warn")
        .unwrap()
        .dont_use(&mut klass, "shout");
    let mut obj = Object::new(Arc::new(klass));

    let (result, logs) = capture_logs(|| obj.call("shout", &[json!("hi")]));

    assert_eq!(result.unwrap(), json!("HI"));
    assert!(logs
        .lines()
        .any(|line| line.contains("DEPRECATED:") && line.contains("shout")));
}

#[test]
fn test_wrapping_is_logged() {
    let (_, logs) = capture_logs(|| {
        let mut klass = shouter_class();
        Dont::with_warn().dont_use(&mut klass, "shout");
    });
    assert!(logs.contains("method deprecated"));
}

#[test]
fn test_exception_does_not_warn() {
    let mut klass = shouter_class();
    Dont::with_exception().unwrap().dont_use(&mut klass, "shout");
    let mut obj = Object::new(Arc::new(klass));

    let (result, logs) = capture_logs(|| obj.call("shout", &[json!("hi")]));

    assert!(result.unwrap_err().is_deprecation());
    assert!(!logs.contains("WARN"));
}

#[test]
fn test_misspelled_method_warns_at_marking() {
    let mut klass = shouter_class();
    let (_, logs) = capture_logs(|| {
        Dont::with_exception()
            .unwrap()
            .apply(&mut klass)
            .dont_use("shuot")
            .dont_use("shout");
    });

    let warnings: Vec<&str> = logs.lines().filter(|line| line.contains("WARN")).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("deprecated method has no implementation"));
    assert!(warnings[0].contains("shuot"));
}
