//! End-to-end tests for the deprecation emitter

mod common;

use common::{Host, FIXTURE_CLASS, FIXTURE_FUNCTION, TEST_CLASS};
use deprecate::{CallerSpec, CollectingSink, Deprecated, DeprecationError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

// ============================================================================
// Explicit callers
// ============================================================================

#[test]
fn test_method() {
    let host = Host::new();

    host.deprecate_method(Some("3.0"), Some("baz"), "Foo::bar".into())
        .unwrap();
    host.assert_deprecation(
        "Foo::bar() is deprecated since 3.0 and will be removed in 4.0. Use baz() instead.",
    );

    host.deprecate_method(Some("3.0"), Some(TEST_CLASS), "Foo::bar".into())
        .unwrap();
    host.assert_deprecation(&format!(
        "Foo::bar() is deprecated since 3.0 and will be removed in 4.0. Use {} instead.",
        TEST_CLASS
    ));

    host.deprecate_method(Some("3.0"), Some("Do it this way instead."), "Foo::bar".into())
        .unwrap();
    host.assert_deprecation(
        "Foo::bar() is deprecated since 3.0 and will be removed in 4.0. Do it this way instead.",
    );
}

// ============================================================================
// Stack-derived callers
// ============================================================================

#[test]
fn test_method_using_backtrace() {
    let host = Host::new();

    host.static_foo().unwrap();
    host.assert_deprecation(&format!("{}::foo() is deprecated.", FIXTURE_CLASS));

    host.deprecated_function().unwrap();
    host.assert_deprecation(&format!("{}() is deprecated.", FIXTURE_FUNCTION));

    host.call_static_missing("magicStatic").unwrap();
    host.assert_deprecation(&format!("{}::magicStatic() is deprecated.", FIXTURE_CLASS));

    host.call_missing("magic").unwrap();
    host.assert_deprecation(&format!("{}::magic() is deprecated.", FIXTURE_CLASS));

    host.property_hook("__get", vec![json!("magic")]).unwrap();
    host.assert_deprecation(&format!("Getting {}::magic is deprecated.", FIXTURE_CLASS));

    host.property_hook("__set", vec![json!("magic"), json!("derp")])
        .unwrap();
    host.assert_deprecation(&format!("Setting {}::magic is deprecated.", FIXTURE_CLASS));

    host.property_hook("__isset", vec![json!("magic")]).unwrap();
    host.assert_deprecation(&format!("isset({}::magic) is deprecated.", FIXTURE_CLASS));

    host.property_hook("__unset", vec![json!("magic")]).unwrap();
    host.assert_deprecation(&format!("unset({}::magic) is deprecated.", FIXTURE_CLASS));

    host.construct().unwrap();
    host.assert_deprecation(&format!(
        "{} is deprecated. Use ArrayObject instead.",
        FIXTURE_CLASS
    ));

    host.get_array_copy().unwrap();
    host.assert_deprecation(&format!(
        "{}::getArrayCopy() is deprecated. Use ArrayObject::getArrayCopy() instead.",
        FIXTURE_CLASS
    ));

    host.some_method().unwrap();
    host.assert_deprecation(&format!(
        "{}::someMethod() is deprecated since 1.1 and will be removed in 2.0. Use ArrayObject instead.",
        FIXTURE_CLASS
    ));
}

#[test]
fn test_stack_index_selects_ancestor() {
    let host = Host::new();

    host.delegating().unwrap();
    host.assert_deprecation(&format!("{}::delegating() is deprecated.", FIXTURE_CLASS));
}

#[test]
fn test_ownerless_hook_names_are_plain_functions() {
    use deprecate::CallFrame;

    let deprecated = Deprecated::new(CollectingSink::new());
    let getter = vec![CallFrame::function("__get").with_args([json!("x")])];
    let ctor = vec![CallFrame::function("__construct")];

    deprecated.method(&getter, None, None, CallerSpec::Auto).unwrap();
    deprecated.method(&ctor, None, None, CallerSpec::Auto).unwrap();

    assert_eq!(
        deprecated.sink().take(),
        vec!["__get() is deprecated.", "__construct() is deprecated."]
    );
}

#[test]
fn test_each_call_emits_once() {
    let host = Host::new();

    host.static_foo().unwrap();
    host.static_foo().unwrap();

    assert_eq!(host.notices().len(), 2);
}

// ============================================================================
// Invalid callers
// ============================================================================

#[test]
fn test_method_index_negative() {
    let host = Host::new();

    let err = host
        .deprecate_method(None, None, CallerSpec::StackIndex(-1))
        .unwrap_err();

    assert!(matches!(err, DeprecationError::InvalidArgument(_)));
    assert_eq!(
        err.to_string(),
        "Expected a value greater than or equal to 0. Got: -1"
    );
    assert!(host.notices().is_empty());
}

#[test]
fn test_method_index_out_of_bounds() {
    let host = Host::new();

    let err = host
        .deprecate_method(None, None, CallerSpec::StackIndex(9000))
        .unwrap_err();

    assert_eq!(err, DeprecationError::OutOfBounds { index: 9000 });
    assert_eq!(err.to_string(), "9000 is greater than the current call stack");
}

#[test]
fn test_method_not_int_or_string() {
    let err = CallerSpec::try_from(&json!(false)).unwrap_err();
    assert_eq!(err.to_string(), "Expected a non-empty string. Got: boolean");
}

#[rstest]
#[case(CallerSpec::try_from(&json!("")).map(|_| ()))]
#[case(Host::new().deprecate_method(None, None, CallerSpec::Explicit(String::new())))]
fn test_method_empty_string(#[case] result: Result<(), DeprecationError>) {
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Expected a non-empty string. Got: \"\"");
}

#[test]
fn test_method_not_function() {
    let host = Host::bare();

    let err = host.eval_top_level().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Deprecated::method() must be called from within a function/method."
    );

    let err = host
        .deprecate_method(None, None, CallerSpec::Auto)
        .unwrap_err();
    assert!(err
        .to_string()
        .ends_with("must be called from within a function/method."));
}

#[test]
fn test_invalid_version() {
    let host = Host::new();

    let err = host
        .deprecate_method(Some("next"), None, "Foo::bar".into())
        .unwrap_err();
    assert_eq!(err.to_string(), "Expected a version number. Got: \"next\"");
    assert!(host.notices().is_empty());
}

// ============================================================================
// Types, free-form subjects and raw messages
// ============================================================================

#[test]
fn test_class() {
    let deprecated = Deprecated::new(CollectingSink::new());

    deprecated.cls("Foo\\Bar", None, None).unwrap();
    deprecated.cls("Foo\\Bar", None, Some("Bar\\Baz")).unwrap();
    deprecated
        .cls("Foo\\Bar", None, Some("Do it this way instead."))
        .unwrap();

    assert_eq!(
        deprecated.sink().take(),
        vec![
            "Foo\\Bar is deprecated.",
            "Foo\\Bar is deprecated. Use Bar\\Baz instead.",
            "Foo\\Bar is deprecated. Do it this way instead.",
        ]
    );
}

#[test]
fn test_class_empty_name() {
    let deprecated = Deprecated::new(CollectingSink::new());
    let err = deprecated.cls("", None, None).unwrap_err();
    assert_eq!(err.to_string(), "Expected a non-empty string. Got: \"\"");
}

#[rstest]
#[case(None, None, "Foo bar is deprecated.")]
#[case(Some("3.0"), None, "Foo bar is deprecated since 3.0 and will be removed in 4.0.")]
#[case(Some("3.3"), None, "Foo bar is deprecated since 3.3 and will be removed in 4.0.")]
#[case(None, Some("Use baz instead."), "Foo bar is deprecated. Use baz instead.")]
#[case(
    Some("3.0"),
    Some("Use baz instead."),
    "Foo bar is deprecated since 3.0 and will be removed in 4.0. Use baz instead."
)]
#[case(Some(""), Some(""), "Foo bar is deprecated.")]
fn test_warn(#[case] since: Option<&str>, #[case] hint: Option<&str>, #[case] expected: &str) {
    let deprecated = Deprecated::new(CollectingSink::new());

    deprecated.warn("Foo bar", since, hint).unwrap();

    assert_eq!(deprecated.sink().take(), vec![expected]);
}

#[test]
fn test_raw() {
    let deprecated = Deprecated::new(CollectingSink::new());

    deprecated.raw("Hello world.");

    insta::assert_snapshot!(deprecated.sink().take().join("\n"), @"Hello world.");
}

#[test]
fn test_fn_sink_sees_deprecation_severity() {
    use deprecate::FnSink;
    use std::cell::RefCell;

    let seen = RefCell::new(Vec::new());
    {
        let deprecated = Deprecated::new(FnSink::new(|severity: &str, message: &str| {
            seen.borrow_mut()
                .push((severity.to_string(), message.to_string()))
        }));
        deprecated.warn("The legacy mode", Some("2.5"), None).unwrap();
    }

    insta::assert_debug_snapshot!(seen.into_inner(), @r#"
    [
        (
            "deprecation",
            "The legacy mode is deprecated since 2.5 and will be removed in 3.0.",
        ),
    ]
    "#);
}
