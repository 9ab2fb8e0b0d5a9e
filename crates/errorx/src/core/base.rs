//! Base layer: message, cause, call site and stack

use std::borrow::Cow;
use std::panic::Location;
use std::sync::Arc;

use crate::config::CaptureConfig;
use crate::core::cause::{self, Cause, SharedError};
use crate::core::chain::Layer;
use crate::core::fields::{ERROR, FieldValue, Fields, MESSAGE};
use crate::core::stack::{self, Capture, Stack};
use crate::kinds::validation::ValidationLayer;

static NO_STACK: Stack = Stack::empty();

/// Innermost layer of every chain; sole owner of the capture data
#[derive(Debug, Clone)]
pub(crate) struct Base {
    pub(crate) message: String,
    pub(crate) cause: Option<SharedError>,
    origin: Arc<Capture>,
}

impl Base {
    /// Build a base layer attributed to `location`
    ///
    /// `skip` drops frames above `location` from the retained stack, for
    /// helpers that raise on behalf of their own caller.
    pub(crate) fn capture(
        message: String,
        cause: Option<SharedError>,
        location: &Location<'_>,
        skip: usize,
    ) -> Self {
        let origin = stack::capture(location, skip, CaptureConfig::current());
        Self {
            message,
            cause,
            origin: Arc::new(origin),
        }
    }

    /// Raise a new chain, promoting it when the cause reports violations
    pub(crate) fn raise(
        message: String,
        cause: Option<Cause>,
        location: &Location<'_>,
        skip: usize,
    ) -> Layer {
        let (error, violations) = match cause.map(Cause::into_parts) {
            Some((error, violations)) => (Some(error), violations),
            None => (None, None),
        };
        let base = Self::capture(message, error, location, skip);
        ValidationLayer::promote(Layer::Base(base), violations)
    }

    /// Join `cause` after the current cause, returning a new layer
    pub(crate) fn wrap(&self, cause: Cause) -> Layer {
        let (error, violations) = cause.into_parts();
        let base = Self {
            cause: Some(cause::join(self.cause.as_ref(), error)),
            ..self.clone()
        };
        ValidationLayer::promote(Layer::Base(base), violations)
    }

    pub(crate) fn text(&self) -> Cow<'_, str> {
        match &self.cause {
            Some(cause) => Cow::Owned(format!("{}: {cause}", self.message)),
            None => Cow::Borrowed(&self.message),
        }
    }

    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(MESSAGE, FieldValue::Text(self.message.clone()));
        if let Some(cause) = &self.cause {
            fields.insert(ERROR, FieldValue::Text(cause.to_string()));
        }
        fields
    }

    pub(crate) fn caller(&self) -> &str {
        &self.origin.caller
    }

    /// `None` when stack retention was disabled at capture time
    pub(crate) fn captured_stack(&self) -> Option<&Stack> {
        self.origin.stack.as_ref()
    }

    pub(crate) fn stack(&self) -> &Stack {
        self.captured_stack().unwrap_or(&NO_STACK)
    }

    /// Base layer with a fixed call site and no stack
    #[cfg(test)]
    pub(crate) fn detached(message: &str) -> Self {
        Self {
            message: message.to_string(),
            cause: None,
            origin: Arc::new(Capture {
                caller: "test::detached src/test.rs:1".to_string(),
                stack: None,
            }),
        }
    }
}
