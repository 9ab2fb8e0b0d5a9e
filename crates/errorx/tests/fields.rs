//! Field collection tests
//!
//! Tests for the structured map produced from a chain: which keys appear,
//! which layer wins on collisions, and how the name filter applies.

use nebula_errorx::core::fields::{CALLER, ERROR, MESSAGE, STACK, STATUS, VALIDATION_ERRORS};
use nebula_errorx::{Cause, ErrorX, FieldValue, ValidationErrors, Violation, Violations};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use std::io;

/// Validation result of an engine this crate knows nothing about
#[derive(Debug)]
struct FormErrors(Vec<(&'static str, &'static str)>);

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid fields", self.0.len())
    }
}

impl std::error::Error for FormErrors {}

impl Violations for FormErrors {
    fn violations(&self) -> Vec<Violation> {
        self.0
            .iter()
            .map(|(field, tag)| Violation::new(*field, *tag))
            .collect()
    }
}

fn violations_of(err: &ErrorX) -> BTreeMap<String, String> {
    err.fields(&[VALIDATION_ERRORS])
        .get(VALIDATION_ERRORS)
        .and_then(FieldValue::as_violations)
        .cloned()
        .unwrap_or_default()
}

/// Test: no filter includes caller and stack
#[test]
fn test_unfiltered_fields_include_caller_and_stack() {
    let err = ErrorX::new("m");
    let fields = err.fields(&[]);

    assert_eq!(fields.get(MESSAGE).and_then(FieldValue::as_str), Some("m"));
    assert_eq!(fields.get(CALLER).and_then(FieldValue::as_str), Some(err.caller()));
    let stack = fields.get(STACK).and_then(FieldValue::as_stack).unwrap();
    assert_eq!(stack, err.stack());
    assert!(!stack.is_empty());
    assert!(!fields.contains_key(ERROR));
}

#[rstest]
#[case::message_only(&[MESSAGE], &[MESSAGE])]
#[case::caller_only(&[CALLER], &[CALLER])]
#[case::stack_without_caller(&[STACK], &[STACK])]
#[case::status_and_error(&[STATUS, ERROR], &[ERROR, STATUS])]
#[case::unknown_key(&["request_id"], &[])]
#[case::unknown_mixed_with_known(&["request_id", MESSAGE], &[MESSAGE])]
fn test_filter_restricts_keys(#[case] names: &[&str], #[case] expected: &[&str]) {
    let err = ErrorX::status(422, "bad input").wrap(io::Error::other("x"));
    let fields = err.fields(names);

    assert_eq!(fields.keys().collect::<Vec<_>>(), expected.to_vec());
}

/// Test: status is reported regardless of wrap depth
#[test]
fn test_status_and_error_after_wrap() {
    let err = ErrorX::status(422, "bad input").wrap(io::Error::other("x"));
    let fields = err.fields(&[]);

    assert_eq!(fields.get(STATUS).and_then(FieldValue::as_status), Some(422));
    assert!(fields.get(ERROR).and_then(FieldValue::as_str).unwrap().contains('x'));

    let deeper = err
        .wrap(io::Error::other("y"))
        .wrap(ValidationErrors::new().with("Name", "required"))
        .wrap(io::Error::other("z"));
    assert_eq!(
        deeper.fields(&[STATUS]).get(STATUS).and_then(FieldValue::as_status),
        Some(422)
    );
}

/// Test: zero violations produce no key at all
#[test]
fn test_empty_violations_add_no_key() {
    let err = ErrorX::with_cause(ValidationErrors::new(), "m");
    assert!(!err.fields(&[]).contains_key(VALIDATION_ERRORS));

    let err = ErrorX::new("m").wrap(Cause::validation(FormErrors(vec![])));
    assert!(!err.fields(&[]).contains_key(VALIDATION_ERRORS));
}

#[test]
fn test_foreign_violations_promote_through_capability() {
    let err = ErrorX::new("signup").wrap(Cause::validation(FormErrors(vec![
        ("Email", "email"),
        ("Password", "min"),
    ])));

    assert_eq!(
        violations_of(&err),
        BTreeMap::from([
            ("Email".to_string(), "email".to_string()),
            ("Password".to_string(), "min".to_string()),
        ])
    );
    assert_eq!(
        err.fields(&[ERROR]).get(ERROR).and_then(FieldValue::as_str),
        Some("2 invalid fields")
    );
}

#[test]
fn test_plain_wrap_of_foreign_violations_does_not_promote() {
    let err = ErrorX::new("signup").wrap(FormErrors(vec![("Email", "email")]));

    assert!(err.violations().is_empty());
    assert!(!err.fields(&[]).contains_key(VALIDATION_ERRORS));
}

/// Test: the most recently attached violations are the ones reported
#[test]
fn test_newest_violations_win() {
    let err = ErrorX::with_cause(ValidationErrors::new().with("Name", "required"), "m")
        .wrap(ValidationErrors::new().with("Email", "email"));

    assert_eq!(
        violations_of(&err),
        BTreeMap::from([("Email".to_string(), "email".to_string())])
    );
    assert_eq!(err.violations(), vec![Violation::new("Email", "email")]);
}

#[test]
fn test_newest_violations_win_under_status() {
    let err = ErrorX::status(400, "m")
        .wrap(ValidationErrors::new().with("A", "required"))
        .wrap(ValidationErrors::new().with("B", "email"));

    assert_eq!(
        violations_of(&err),
        BTreeMap::from([("B".to_string(), "email".to_string())])
    );
    assert_eq!(err.violations(), vec![Violation::new("B", "email")]);
    assert_eq!(err.status_code(), Some(400));
    assert!(err.to_string().contains(": status 400 ["));
}

#[test]
fn test_response_matches_fields() {
    let err = ErrorX::status(404, "missing");

    assert_eq!(err.response(&[MESSAGE, STATUS]), err.fields(&[MESSAGE, STATUS]));
    assert_eq!(
        err.response(&[MESSAGE, STATUS]).into_json().unwrap(),
        json!({ "message": "missing", "status": 404 })
    );
}

#[test]
fn test_fields_snapshot() {
    let err = ErrorX::status(422, "bad input")
        .wrap(io::Error::other("x"))
        .wrap(ValidationErrors::new().with("Name", "required"));

    insta::assert_json_snapshot!(err.fields(&[]), {
        ".caller" => "[caller]",
        ".stack" => "[stack]",
    }, @r#"
    {
      "caller": "[caller]",
      "error": "x: Field validation for 'Name' failed on the 'required' tag",
      "message": "bad input",
      "stack": "[stack]",
      "status": 422,
      "validation_errors": {
        "Name": "required"
      }
    }
    "#);
}

#[test]
fn test_stack_serializes_as_records() {
    let err = ErrorX::new("m");
    let json = err.fields(&[STACK]).into_json().unwrap();

    let frames = json[STACK].as_array().unwrap();
    assert_eq!(frames.len(), err.stack().len());
    let first = &frames[0];
    assert!(first["function"].is_string());
    assert!(first["file"].is_string());
    assert!(first["line"].is_u64());
}
