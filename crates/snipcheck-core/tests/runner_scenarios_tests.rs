// Runner scenarios: pass, mismatch, raising bodies, unknown ids

#![allow(clippy::unwrap_used, clippy::expect_used)]

use snipcheck_core::capture::emit;
use snipcheck_core::errors::ExErrorKind;
use snipcheck_core::{DiffKind, ExpectationSyntax, InlineExecutor, Runner, SnippetRegistry};

fn registry(sources: &[(&str, &str)]) -> SnippetRegistry {
    SnippetRegistry::from_sources(sources.iter().copied(), &ExpectationSyntax::javascript())
        .expect("sources should register")
}

#[test]
fn test_matching_output_passes() {
    // Given: a snippet annotated with "a" then "b", whose body emits a then b
    let registry = registry(&[(
        "ab",
        "console.log('a'); // a\nconsole.log('b'); // b\n",
    )]);
    let executor = InlineExecutor::new().with_body("ab", || {
        emit("a");
        emit("b");
        Ok(())
    });
    let runner = Runner::new(&registry, executor);

    // When
    let result = runner.run("ab").unwrap();

    // Then
    assert!(result.passed);
    assert!(result.diff.is_empty());
    assert_eq!(result.actual_lines, vec!["a", "b"]);
    assert_eq!(result.expected_lines, vec!["a", "b"]);
}

#[test]
fn test_mismatched_output_fails_with_one_entry() {
    let registry = registry(&[("xy", "console.log(x); // y\n")]);
    let executor = InlineExecutor::new().with_body("xy", || {
        emit("x");
        Ok(())
    });
    let runner = Runner::new(&registry, executor);

    let result = runner.run("xy").unwrap();

    assert!(!result.passed);
    assert_eq!(result.diff.len(), 1);
    assert_eq!(result.diff[0].as_triple(), (0, "y", "x"));
    assert_eq!(result.diff[0].kind, DiffKind::Mismatch);
}

#[test]
fn test_body_error_is_recorded_not_propagated() {
    // Given: a body that prints once and then raises
    let registry = registry(&[("throws", "console.log(1); // 1\nconsole.log(2); // 2\n")]);
    let executor = InlineExecutor::new().with_body("throws", || {
        emit("1");
        Err("ReferenceError: x is not defined".into())
    });
    let runner = Runner::new(&registry, executor);

    // When
    let result = runner.run("throws").expect("execution errors never propagate");

    // Then: exactly one ExecutionError entry, output up to the failure kept
    assert!(!result.passed);
    assert_eq!(result.diff.len(), 1);
    let entry = &result.diff[0];
    assert_eq!(entry.kind, DiffKind::ExecutionError);
    assert_eq!(entry.line_index, 1);
    assert_eq!(
        entry.actual.as_deref(),
        Some("ReferenceError: x is not defined")
    );
    assert_eq!(result.actual_lines, vec!["1"]);
    assert!(result.execution_error().is_some());
}

#[test]
fn test_panicking_body_is_recorded_as_execution_error() {
    let registry = registry(&[("panics", "")]);
    let executor = InlineExecutor::new().with_body("panics", || panic!("kaboom"));
    let runner = Runner::new(&registry, executor);

    let result = runner.run("panics").unwrap();

    assert!(!result.passed);
    assert_eq!(result.diff.len(), 1);
    assert_eq!(result.diff[0].kind, DiffKind::ExecutionError);
    assert!(result.diff[0].actual.as_deref().unwrap().contains("kaboom"));

    // The sink was released: later runs capture normally.
    assert!(!snipcheck_core::capture::is_capturing());
}

#[test]
fn test_unannotated_snippet_passes_whatever_it_prints() {
    let registry = registry(&[("dom", "console.log(listItems);\n")]);
    let executor = InlineExecutor::new().with_body("dom", || {
        emit("NodeList(3) [li, li, li]");
        Ok(())
    });
    let runner = Runner::new(&registry, executor);

    let result = runner.run("dom").unwrap();

    assert!(result.passed);
    assert_eq!(result.actual_lines.len(), 1);
}

#[test]
fn test_unannotated_snippet_fails_only_on_execution_error() {
    let registry = registry(&[("dom", "document.querySelector('x').remove()\n")]);
    let executor = InlineExecutor::new()
        .with_body("dom", || Err("ReferenceError: document is not defined".into()));
    let runner = Runner::new(&registry, executor);

    let result = runner.run("dom").unwrap();

    assert!(!result.passed);
    assert_eq!(result.diff[0].kind, DiffKind::ExecutionError);
}

#[test]
fn test_fewer_lines_than_expected_reports_missing() {
    let registry = registry(&[("short", "console.log(1); // 1\nconsole.log(2); // 2\n")]);
    let executor = InlineExecutor::new().with_body("short", || {
        emit("1");
        Ok(())
    });
    let runner = Runner::new(&registry, executor);

    let result = runner.run("short").unwrap();

    assert!(!result.passed);
    assert_eq!(result.diff.len(), 1);
    assert_eq!(result.diff[0].kind, DiffKind::MissingLine);
    assert_eq!(result.diff[0].expected.as_deref(), Some("2"));
}

#[test]
fn test_unknown_id_fails_with_not_found() {
    let registry = registry(&[("a", "")]);
    let runner = Runner::new(&registry, InlineExecutor::new());

    let err = runner.run("zzz").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_rerun_is_idempotent() {
    let registry = registry(&[("loop", "")]);
    let executor = InlineExecutor::new().with_body("loop", || {
        for i in 0..5 {
            emit(format!("{} :- {}", i, i * 10));
        }
        Ok(())
    });
    let runner = Runner::new(&registry, executor);

    let first = runner.run("loop").unwrap();
    let second = runner.run("loop").unwrap();

    assert_eq!(first.actual_lines, second.actual_lines);
    assert_eq!(first.actual_lines.len(), 5);
}

#[test]
fn test_batch_continues_past_failures() {
    // Given: three snippets, the middle one raising
    let registry = registry(&[
        ("a", "console.log(1); // 1\n"),
        ("b", ""),
        ("c", "console.log(3); // 3\n"),
    ]);
    let executor = InlineExecutor::new()
        .with_body("a", || {
            emit("1");
            Ok(())
        })
        .with_body("b", || Err("boom".into()))
        .with_body("c", || {
            emit("3");
            Ok(())
        });
    let runner = Runner::new(&registry, executor);

    // When
    let results = runner.run_all().unwrap();

    // Then: every snippet ran, in id order
    let ids: Vec<_> = results.iter().map(|r| r.snippet_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    let passed: Vec<_> = results.iter().map(|r| r.passed).collect();
    assert_eq!(passed, vec![true, false, true]);
}

#[test]
fn test_batch_with_unknown_id_stops_with_not_found() {
    let registry = registry(&[("a", "")]);
    let runner = Runner::new(&registry, InlineExecutor::new());

    let err = runner.run_ids(["a", "missing"]).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
}
