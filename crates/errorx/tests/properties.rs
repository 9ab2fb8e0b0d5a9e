//! Property-based tests for nebula-errorx.

use nebula_errorx::core::fields::{MESSAGE, STATUS, VALIDATION_ERRORS};
use nebula_errorx::{ErrorX, FieldValue, ValidationErrors};
use proptest::prelude::*;
use std::io;

fn site(err: &ErrorX) -> String {
    format!(" [{}]", err.caller())
}

// ============================================================================
// RENDER: base text leads, causes follow in wrap order
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn render_joins_causes_in_order(
        message in "[a-z]{1,8}",
        causes in prop::collection::vec("[a-z]{1,8}", 0..5),
    ) {
        let err = causes
            .iter()
            .fold(ErrorX::new(message.clone()), |err, cause| err.wrap(io::Error::other(cause.clone())));

        let expected = std::iter::once(message.as_str())
            .chain(causes.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(": ");
        prop_assert_eq!(err.to_string(), format!("{expected}{}", site(&err)));
    }

    #[test]
    fn render_is_idempotent(message in ".{0,16}", status in 100u16..600) {
        let err = ErrorX::status(status, message).wrap(io::Error::other("cause"));
        prop_assert_eq!(err.to_string(), err.to_string());
    }

    #[test]
    fn wrap_never_changes_original(message in "[a-z]{1,8}", cause in "[a-z]{1,8}") {
        let original = ErrorX::new(message);
        let before = original.to_string();
        let _wrapped = original.wrap(io::Error::other(cause));
        prop_assert_eq!(original.to_string(), before);
    }
}

// ============================================================================
// COLLECT: status survives any wrap depth, filters only ever remove keys
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn status_survives_wraps(status in 100u16..600, depth in 0usize..6) {
        let err = (0..depth).fold(ErrorX::status(status, "m"), |err, i| {
            if i % 2 == 0 {
                err.wrap(io::Error::other(format!("c{i}")))
            } else {
                err.wrap(ValidationErrors::new().with(format!("f{i}"), "required"))
            }
        });

        prop_assert_eq!(err.status_code(), Some(status));
        prop_assert_eq!(
            err.fields(&[STATUS]).get(STATUS).and_then(FieldValue::as_status),
            Some(status)
        );
    }

    #[test]
    fn filtered_fields_are_subset(names in prop::sample::subsequence(
        vec![MESSAGE, STATUS, VALIDATION_ERRORS, "error", "caller", "stack", "unknown"],
        0..7,
    )) {
        let err = ErrorX::status(400, "m")
            .wrap(ValidationErrors::new().with("Name", "required"));
        let all = err.fields(&[]);
        let filtered = err.fields(&names);

        for (key, value) in filtered.iter() {
            prop_assert!(names.is_empty() || names.iter().any(|name| *name == key));
            prop_assert_eq!(all.get(key), Some(value));
        }
    }
}
