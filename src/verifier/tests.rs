//! Unit tests for the verification engine.
//!
//! This module contains tests for:
//! - Line filtering and numbering
//! - Brace balance and scope structure
//! - Method registration, bodies and returns
//! - Declarations, assignments, calls and conditions

use crate::{
    config::Config,
    errors::errors::{Error, ErrorImpl, ErrorKind},
    types::variable::VariableLookup,
};

use super::{
    source::{LineSource, SourceLines, StrSource},
    verifier::{VerificationState, Verifier},
};

fn program(lines: &[&str]) -> String {
    lines.join("\n")
}

fn verify(lines: &[&str]) -> Result<VerificationState, Error> {
    Verifier::new(StrSource::new(&program(lines)), Config::default()).verify()
}

fn failure(lines: &[&str]) -> (ErrorImpl, u32) {
    let error = verify(lines).unwrap_err();
    (error.get_impl().clone(), error.get_position().0)
}

#[test]
fn test_source_lines_skip_blank_and_comments() {
    let text = "int a;\n\n   \n// note\n  int b;\r\n";
    let lines: Vec<_> = SourceLines::new(StrSource::new(text).open().unwrap(), "//")
        .map(|line| line.unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].number, 1);
    assert_eq!(lines[0].text, "int a;");
    assert_eq!(lines[1].number, 5);
    assert_eq!(lines[1].text, "int b;");
}

#[test]
fn test_source_lines_custom_comment_marker() {
    let text = "# note\nint a;";
    let lines: Vec<_> = SourceLines::new(StrSource::new(text).open().unwrap(), "#")
        .map(|line| line.unwrap().text)
        .collect();

    assert_eq!(lines, vec!["int a;".to_string()]);
}

#[test]
fn test_valid_program() {
    let state = verify(&[
        "// globals",
        "int count = 5;",
        "final double rate = 2.5;",
        "String name = \"hi\";",
        "",
        "void foo(int a, double b) {",
        "    boolean flag = a;",
        "    if (flag && b || true) {",
        "        while (count) {",
        "            count = 3;",
        "        }",
        "    }",
        "    bar(\"x\");",
        "    return;",
        "}",
        "",
        "void bar(String s) {",
        "    char c = 'q';",
        "    return;",
        "}",
    ])
    .unwrap();

    assert_eq!(state.methods.len(), 2);
    assert!(state.methods.contains_key("foo"));
    assert!(state.methods.contains_key("bar"));
    assert!(state.scopes.is_global_scope());
}

#[test]
fn test_empty_source() {
    assert!(verify(&[]).is_ok());
    assert!(verify(&["// only a comment", ""]).is_ok());
}

#[test]
fn test_indented_comment_is_not_a_comment() {
    assert_eq!(failure(&["  // note"]), (ErrorImpl::MissingTerminator, 1));
}

#[test]
fn test_missing_terminator() {
    let (error, line) = failure(&["int a = 5"]);
    assert_eq!(error, ErrorImpl::MissingTerminator);
    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(line, 1);
}

#[test]
fn test_unbalanced_braces() {
    let (error, line) = failure(&["void foo() {", "return;"]);
    assert_eq!(error, ErrorImpl::UnclosedScope);
    assert_eq!(error.kind(), ErrorKind::Structure);
    assert_eq!(line, 2);
}

#[test]
fn test_close_before_open() {
    assert_eq!(failure(&["}", "void foo() {", "return;"]), (ErrorImpl::NoScopeToExit, 1));
    assert_eq!(
        failure(&["}", "void foo() {", "return;", "{"]).0,
        ErrorImpl::UnclosedScope
    );
}

#[test]
fn test_braces_inside_strings_are_ignored() {
    assert!(verify(&["String s = \"{\";", "String t = \"}\";"]).is_ok());
}

#[test]
fn test_call_in_global_scope() {
    let (error, line) = failure(&["void foo() {", "return;", "}", "foo();"]);
    assert_eq!(error, ErrorImpl::StatementInGlobalScope);
    assert_eq!(error.kind(), ErrorKind::Structure);
    assert_eq!(line, 4);
}

#[test]
fn test_return_in_global_scope() {
    assert_eq!(failure(&["return;"]).0, ErrorImpl::StatementInGlobalScope);
}

#[test]
fn test_condition_in_global_scope() {
    assert_eq!(
        failure(&["if (true) {", "}"]),
        (ErrorImpl::ConditionInGlobalScope, 1)
    );
}

#[test]
fn test_duplicate_method() {
    let (error, line) = failure(&[
        "void foo() {",
        "return;",
        "}",
        "void foo(int a) {",
        "return;",
        "}",
    ]);
    assert_eq!(error, ErrorImpl::MethodAlreadyDeclared { name: "foo".to_string() });
    assert_eq!(line, 4);
}

#[test]
fn test_nested_method() {
    let (error, line) = failure(&[
        "void outer() {",
        "void inner() {",
        "return;",
        "}",
        "return;",
        "}",
    ]);
    assert_eq!(error, ErrorImpl::NestedMethod);
    assert_eq!(line, 2);
}

#[test]
fn test_invalid_method_header() {
    assert_eq!(failure(&["void foo( {", "}"]).0, ErrorImpl::InvalidMethodDeclaration);
    assert_eq!(
        failure(&["void foo(int) {", "return;", "}"]).0,
        ErrorImpl::InvalidParameters
    );
    assert_eq!(
        failure(&["void while() {", "return;", "}"]).0,
        ErrorImpl::ReservedName { name: "while".to_string() }
    );
}

#[test]
fn test_missing_return() {
    let (error, line) = failure(&["void foo() {", "int a = 5;", "}"]);
    assert_eq!(error, ErrorImpl::MissingReturn { method: "foo".to_string() });
    assert_eq!(line, 3);

    assert_eq!(
        failure(&["void foo() {", "}"]).0,
        ErrorImpl::MissingReturn { method: "foo".to_string() }
    );
}

#[test]
fn test_return_inside_block_is_not_final_return() {
    let (error, _) = failure(&[
        "void foo() {",
        "if (true) {",
        "return;",
        "}",
        "}",
    ]);
    assert_eq!(error, ErrorImpl::MissingReturn { method: "foo".to_string() });
}

#[test]
fn test_early_return_is_allowed() {
    assert!(verify(&[
        "void foo() {",
        "if (true) {",
        "return;",
        "}",
        "return;",
        "}",
    ])
    .is_ok());
}

#[test]
fn test_forward_call() {
    assert!(verify(&[
        "void first() {",
        "second(1);",
        "return;",
        "}",
        "void second(int a) {",
        "return;",
        "}",
    ])
    .is_ok());
}

#[test]
fn test_unknown_method() {
    let (error, line) = failure(&["void foo() {", "bar();", "return;", "}"]);
    assert_eq!(error, ErrorImpl::MethodNotDeclared { name: "bar".to_string() });
    assert_eq!(error.kind(), ErrorKind::Name);
    assert_eq!(line, 2);
}

#[test]
fn test_argument_count() {
    let (error, line) = failure(&[
        "void foo(int a) {",
        "return;",
        "}",
        "void bar() {",
        "foo(1, 2);",
        "return;",
        "}",
    ]);
    assert_eq!(error, ErrorImpl::ArgumentCount { expected: 1, received: 2 });
    assert_eq!(error.kind(), ErrorKind::Value);
    assert_eq!(line, 5);
}

/// `lines` become the body of `bar`, which may call `foo(int a)`.
fn call(lines: &[&str]) -> Result<VerificationState, Error> {
    let mut source = vec!["void foo(int a) {", "return;", "}", "void bar() {"];
    source.extend_from_slice(lines);
    source.extend_from_slice(&["return;", "}"]);
    verify(&source)
}

#[test]
fn test_argument_types() {
    assert!(call(&["foo(-3);"]).is_ok());
    assert!(call(&["int x = 4;", "foo(x);"]).is_ok());
    assert_eq!(
        call(&["double x = 4.5;", "foo(x);"]).unwrap_err().get_impl(),
        &ErrorImpl::IncompatibleTypes { expected: "int".to_string(), received: "double".to_string() }
    );
    assert_eq!(
        call(&["foo('c');"]).unwrap_err().get_impl(),
        &ErrorImpl::InvalidValue { type_: "int".to_string(), value: "'c'".to_string() }
    );
    assert_eq!(
        call(&["foo(y);"]).unwrap_err().get_impl(),
        &ErrorImpl::VariableNotDeclared { name: "y".to_string() }
    );
}

#[test]
fn test_literal_widening() {
    assert!(verify(&["boolean b = 5;"]).is_ok());
    assert!(verify(&["double d = 3;"]).is_ok());

    assert_eq!(
        failure(&["char c = 5;"]).0,
        ErrorImpl::InvalidValue { type_: "char".to_string(), value: "5".to_string() }
    );
    assert_eq!(
        failure(&["int i = 3.0;"]).0,
        ErrorImpl::InvalidValue { type_: "int".to_string(), value: "3.0".to_string() }
    );
}

#[test]
fn test_variable_widening() {
    assert!(verify(&["int i = 3;", "double d = i;", "boolean b = d;"]).is_ok());

    let (error, line) = failure(&["double d = 3.5;", "int i = d;"]);
    assert_eq!(
        error,
        ErrorImpl::IncompatibleTypes { expected: "int".to_string(), received: "double".to_string() }
    );
    assert_eq!(error.kind(), ErrorKind::Type);
    assert_eq!(line, 2);
}

#[test]
fn test_multiple_declarations() {
    assert!(verify(&["int a = 1, b, c = -2;", "b = a;"]).is_ok());
    assert_eq!(
        failure(&["int a = 1, b = a;"]).0,
        ErrorImpl::VariableNotDeclared { name: "a".to_string() }
    );
    assert_eq!(
        failure(&["int a = 1, a = 2;"]).0,
        ErrorImpl::VariableAlreadyDeclared { name: "a".to_string() }
    );
}

#[test]
fn test_bad_declarations() {
    assert_eq!(
        failure(&["int 1a = 5;"]).0,
        ErrorImpl::InvalidName { name: "1a".to_string() }
    );
    assert_eq!(
        failure(&["int final = 5;"]).0,
        ErrorImpl::ReservedName { name: "final".to_string() }
    );
    assert_eq!(failure(&["long a = 5;"]).0, ErrorImpl::InvalidLineFormat);
    assert_eq!(failure(&["int a = b = 5;"]).0, ErrorImpl::InvalidLineFormat);
}

#[test]
fn test_final_without_value() {
    let (error, _) = failure(&["final int x;"]);
    assert_eq!(error, ErrorImpl::FinalNotInitialized { name: "x".to_string() });
    assert_eq!(error.kind(), ErrorKind::Value);
}

#[test]
fn test_final_reassignment() {
    assert_eq!(
        failure(&["final int x = 1;", "x = 2;"]),
        (ErrorImpl::FinalReassignment { name: "x".to_string() }, 2)
    );
    assert_eq!(
        failure(&["void foo(final int a) {", "a = 5;", "return;", "}"]).0,
        ErrorImpl::FinalReassignment { name: "a".to_string() }
    );
}

#[test]
fn test_assignments() {
    assert!(verify(&["int a;", "double b;", "a = 4, b = a;"]).is_ok());
    assert_eq!(
        failure(&["x = 4;"]).0,
        ErrorImpl::VariableNotDeclared { name: "x".to_string() }
    );
    assert_eq!(
        failure(&["int a;", "a = 'c';"]).0,
        ErrorImpl::InvalidValue { type_: "int".to_string(), value: "'c'".to_string() }
    );
}

#[test]
fn test_uninitialized_use() {
    assert_eq!(
        failure(&["int a;", "int b = a;"]),
        (ErrorImpl::VariableNotInitialized { name: "a".to_string() }, 2)
    );
}

#[test]
fn test_parameters_are_initialized_locals() {
    assert!(verify(&["void foo(char c) {", "char d = c;", "return;", "}"]).is_ok());
    assert_eq!(
        failure(&["void foo(int a) {", "int a = 5;", "return;", "}"]).0,
        ErrorImpl::VariableAlreadyDeclared { name: "a".to_string() }
    );
}

#[test]
fn test_shadowing() {
    assert!(verify(&[
        "int a = 1;",
        "void foo(int b) {",
        "String a = \"x\";",
        "if (b) {",
        "double b = 2.5;",
        "}",
        "return;",
        "}",
    ])
    .is_ok());
}

#[test]
fn test_block_locals_do_not_outlive_block() {
    let (error, line) = failure(&[
        "void foo() {",
        "if (true) {",
        "int x = 1;",
        "}",
        "x = 2;",
        "return;",
        "}",
    ]);
    assert_eq!(error, ErrorImpl::VariableNotDeclared { name: "x".to_string() });
    assert_eq!(line, 5);
}

#[test]
fn test_global_changes_do_not_leak_between_methods() {
    let lines = [
        "int g;",
        "void a() {",
        "g = 5;",
        "int x = g;",
        "return;",
        "}",
        "void b() {",
        "int y = g;",
        "return;",
        "}",
    ];
    assert_eq!(
        failure(&lines),
        (ErrorImpl::VariableNotInitialized { name: "g".to_string() }, 8)
    );

    let state = verify(&lines[..6]).unwrap();
    assert!(!state.scopes.lookup_variable("g").unwrap().is_initialized());
}

#[test]
fn test_globals_declared_after_methods_are_visible() {
    assert!(verify(&["void foo() {", "int x = later;", "return;", "}", "int later = 1;"]).is_ok());
}

/// `lines` become the body of a method that sees `int i`, an uninitialized `double d`
/// and `String s`.
fn body(lines: &[&str]) -> Result<VerificationState, ErrorImpl> {
    let mut source = vec!["int i = 1;", "double d;", "String s = \"a\";", "void foo() {"];
    source.extend_from_slice(lines);
    source.extend_from_slice(&["return;", "}"]);
    verify(&source).map_err(|error| error.get_impl().clone())
}

#[test]
fn test_conditions() {
    assert!(body(&["if (i || 5 && -1.5 || false) {", "}"]).is_ok());
    assert!(body(&["while (true) {", "}"]).is_ok());
    assert_eq!(
        body(&["if (s) {", "}"]).unwrap_err(),
        ErrorImpl::InvalidConditionOperand { name: "s".to_string(), type_: "String".to_string() }
    );
    assert_eq!(
        body(&["if (d) {", "}"]).unwrap_err(),
        ErrorImpl::VariableNotInitialized { name: "d".to_string() }
    );
    assert_eq!(
        body(&["if (missing) {", "}"]).unwrap_err(),
        ErrorImpl::VariableNotDeclared { name: "missing".to_string() }
    );
    assert_eq!(
        body(&["if (\"s\") {", "}"]).unwrap_err(),
        ErrorImpl::InvalidValue { type_: "boolean".to_string(), value: "\"s\"".to_string() }
    );
    assert_eq!(body(&["if (i ||) {", "}"]).unwrap_err(), ErrorImpl::InvalidCondition);
    assert_eq!(body(&["if (i && && i) {", "}"]).unwrap_err(), ErrorImpl::InvalidCondition);
}

#[test]
fn test_verify_is_repeatable() {
    let text = program(&["int g;", "void a() {", "g = 5;", "return;", "}", "int b = g;"]);
    let verifier = Verifier::new(StrSource::new(&text), Config::default());

    let first = verifier.verify().unwrap_err();
    let second = verifier.verify().unwrap_err();
    assert_eq!(first.get_impl(), second.get_impl());
    assert_eq!(first.get_position().0, second.get_position().0);

    let text = program(&["int g = 1;", "void a() {", "g = 5;", "return;", "}"]);
    let verifier = Verifier::new(StrSource::new(&text), Config::default());
    assert!(verifier.verify().is_ok());
    assert!(verifier.verify().is_ok());
}

#[test]
fn test_error_names_source() {
    let error = verify(&["int a = 5"]).unwrap_err();
    assert_eq!(error.get_position().1.as_str(), "<source>");
    assert_eq!(
        error.to_string(),
        "SyntaxError: invalid line - missing ; or { or } (line 1)"
    );
}
