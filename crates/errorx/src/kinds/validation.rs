//! Field violations and the validation layer

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::chain::Layer;
use crate::core::fields::{FieldValue, Fields, VALIDATION_ERRORS};

/// A single failed rule on a single field
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[error("Field validation for '{field}' failed on the '{tag}' tag")]
pub struct Violation {
    /// Field name
    pub field: String,
    /// Rule tag, e.g. `required` or `email`
    pub tag: String,
}

impl Violation {
    /// Create a violation
    pub fn new(field: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            tag: tag.into(),
        }
    }
}

/// Capability of errors that report structured field violations
///
/// Implement this on a validation engine's result type and attach it with
/// [`Cause::validation`](crate::Cause::validation). Implementing the trait
/// alone is not enough: a plain `wrap(err)` goes through the blanket
/// `From<E: Error>` conversion, which cannot see the capability, so the
/// violations would be dropped. Only [`ValidationErrors`] is recognised
/// without the explicit call.
pub trait Violations {
    /// The violations, in the order the engine reported them
    fn violations(&self) -> Vec<Violation>;
}

/// Ordered list of violations usable directly as a cause
///
/// Recognised automatically when wrapped: no explicit
/// [`Cause::validation`](crate::Cause::validation) is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, tag: impl Into<String>) -> Self {
        self.push(Violation::new(field, tag));
        self
    }

    /// Append a violation in place
    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Iterate over violations
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was violated
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl Violations for ValidationErrors {
    fn violations(&self) -> Vec<Violation> {
        self.0.clone()
    }
}

impl FromIterator<Violation> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Decorator carrying field violations; contributes no text
#[derive(Debug)]
pub(crate) struct ValidationLayer {
    pub(crate) inner: Arc<Layer>,
    pub(crate) violations: Vec<Violation>,
}

impl ValidationLayer {
    /// Layer `violations` over `layer` when there are any to carry
    ///
    /// An empty list still promotes: the cause was violations-bearing, it
    /// just reported nothing.
    pub(crate) fn promote(layer: Layer, violations: Option<Vec<Violation>>) -> Layer {
        match violations {
            Some(violations) => Layer::Validation(Self {
                inner: Arc::new(layer),
                violations,
            }),
            None => layer,
        }
    }

    pub(crate) fn text(&self) -> &str {
        ""
    }

    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        if self.violations.is_empty() {
            return fields;
        }

        let by_field: BTreeMap<String, String> = self
            .violations
            .iter()
            .map(|violation| (violation.field.clone(), violation.tag.clone()))
            .collect();
        fields.insert(VALIDATION_ERRORS, FieldValue::Violations(by_field));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layer(violations: Vec<Violation>) -> ValidationLayer {
        ValidationLayer {
            inner: Arc::new(Layer::Base(crate::core::base::Base::detached("m"))),
            violations,
        }
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(
            Violation::new("Email", "email").to_string(),
            "Field validation for 'Email' failed on the 'email' tag"
        );
    }

    #[test]
    fn test_validation_errors_display() {
        let errors = ValidationErrors::new()
            .with("Name", "required")
            .with("Email", "email");
        assert_eq!(
            errors.to_string(),
            "Field validation for 'Name' failed on the 'required' tag\n\
             Field validation for 'Email' failed on the 'email' tag"
        );
        assert_eq!(ValidationErrors::new().to_string(), "");
    }

    #[test]
    fn test_layer_contributes_no_text() {
        assert_eq!(layer(vec![Violation::new("Name", "required")]).text(), "");
    }

    #[test]
    fn test_empty_violations_add_no_key() {
        assert!(layer(Vec::new()).fields().is_empty());
    }

    #[test]
    fn test_violations_keyed_by_field() {
        let fields = layer(vec![
            Violation::new("Name", "required"),
            Violation::new("Email", "required"),
            Violation::new("Email", "email"),
        ])
        .fields();

        let expected = BTreeMap::from([
            ("Email".to_string(), "email".to_string()),
            ("Name".to_string(), "required".to_string()),
        ]);
        assert_eq!(
            fields.get(VALIDATION_ERRORS),
            Some(&FieldValue::Violations(expected))
        );
    }
}
