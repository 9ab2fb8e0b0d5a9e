//! Main [`ErrorX`] handle

use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use crate::core::base::Base;
use crate::core::cause::Cause;
use crate::core::chain::{self, Layer};
use crate::core::fields::{FieldFilter, Fields};
use crate::core::stack::Stack;
use crate::kinds::status::StatusLayer;
use crate::kinds::validation::Violation;

/// A decorated error
///
/// An `ErrorX` is a handle to an immutable chain of layers: one base layer
/// holding the message, the cause and the capture data, optionally wrapped in
/// status and validation decorators. Cloning is cheap and [`wrap`](Self::wrap)
/// never changes what other holders of the same chain observe.
///
/// # Examples
///
/// ```rust
/// use nebula_errorx::ErrorX;
///
/// let err = ErrorX::status(404, "user not found")
///     .wrap(std::io::Error::other("no such row"));
///
/// assert!(err.to_string().starts_with("user not found: no such row: status 404 ["));
/// assert_eq!(err.status_code(), Some(404));
/// ```
#[derive(Debug, Clone)]
pub struct ErrorX {
    layer: Arc<Layer>,
}

impl ErrorX {
    /// Create an error raised at the caller's location
    #[must_use]
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::raise(message.into(), None, None, Location::caller(), 0)
    }

    /// Create an error caused by `cause`
    ///
    /// A violations-bearing cause promotes the error the same way a later
    /// [`wrap`](Self::wrap) would.
    #[must_use]
    #[track_caller]
    pub fn with_cause(cause: impl Into<Cause>, message: impl Into<String>) -> Self {
        Self::raise(
            message.into(),
            Some(cause.into()),
            None,
            Location::caller(),
            0,
        )
    }

    /// Create an error carrying a status code
    #[must_use]
    #[track_caller]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::raise(message.into(), None, Some(status), Location::caller(), 0)
    }

    /// Create an error carrying a status code and caused by `cause`
    #[must_use]
    #[track_caller]
    pub fn status_with_cause(
        cause: impl Into<Cause>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::raise(
            message.into(),
            Some(cause.into()),
            Some(status),
            Location::caller(),
            0,
        )
    }

    /// Build a chain attributed to `location`
    ///
    /// `skip` is forwarded to stack capture so helpers raising on behalf of
    /// their own caller can drop their frames.
    pub(crate) fn raise(
        message: String,
        cause: Option<Cause>,
        status: Option<u16>,
        location: &Location<'_>,
        skip: usize,
    ) -> Self {
        let layer = Base::raise(message, cause, location, skip);
        let layer = match status {
            Some(status) => Layer::Status(StatusLayer::new(layer, status)),
            None => layer,
        };
        Self {
            layer: Arc::new(layer),
        }
    }

    /// Attach `cause`, returning a new error
    ///
    /// The cause is joined after any earlier one. Decorators keep their place
    /// and value; a violations-bearing cause adds a validation layer under any
    /// status layer, and its violations become the reported ones. `self` is
    /// left untouched.
    ///
    /// Violations are only picked up from [`ValidationErrors`](crate::ValidationErrors)
    /// or from a cause built with [`Cause::validation`]. Any other error, even
    /// one implementing [`Violations`](crate::Violations), is attached as a
    /// plain cause.
    #[must_use]
    pub fn wrap(&self, cause: impl Into<Cause>) -> Self {
        Self {
            layer: Arc::new(self.layer.wrap(cause.into())),
        }
    }

    /// [`wrap`](Self::wrap) when there is a cause, otherwise the same chain
    #[must_use]
    pub fn wrap_opt<C: Into<Cause>>(&self, cause: Option<C>) -> Self {
        match cause {
            Some(cause) => self.wrap(cause),
            None => self.clone(),
        }
    }

    /// Message given at construction
    pub fn message(&self) -> &str {
        &self.layer.base().message
    }

    /// The joined cause, if any
    ///
    /// Every layer exposes the base layer's cause: a single cause is returned
    /// exactly as attached, several are returned as a
    /// [`JoinedError`](crate::JoinedError).
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.layer.base().cause.as_deref()
    }

    /// `"<function> <file>:<line>"` of the code that raised this error
    pub fn caller(&self) -> &str {
        self.layer.base().caller()
    }

    /// Stack captured when this error was raised, innermost frame first
    ///
    /// Empty when stack capture is disabled.
    pub fn stack(&self) -> &Stack {
        self.layer.base().stack()
    }

    /// Status of the outermost status layer
    pub fn status_code(&self) -> Option<u16> {
        self.layer.layers().find_map(|layer| match layer {
            Layer::Status(status) => Some(status.status),
            _ => None,
        })
    }

    /// Violations of the outermost validation layer
    pub fn violations(&self) -> Vec<Violation> {
        self.layer
            .layers()
            .find_map(|layer| match layer {
                Layer::Validation(validation) => Some(validation.violations.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Collect the chain into a field map
    ///
    /// `names` restricts the result to those keys; an empty slice keeps
    /// everything. Outer layers win on key collisions.
    pub fn fields(&self, names: &[&str]) -> Fields {
        chain::collect(&self.layer, FieldFilter::new(names))
    }

    /// Field map for an API response body
    ///
    /// Same collection as [`fields`](Self::fields); callers usually restrict it
    /// to keys safe to expose.
    pub fn response(&self, names: &[&str]) -> Fields {
        self.fields(names)
    }
}

impl fmt::Display for ErrorX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&chain::render(&self.layer))
    }
}

impl Error for ErrorX {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.layer
            .base()
            .cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}
