//! Result type and extension traits

use std::panic::Location;

use crate::core::cause::Cause;
use crate::core::error::ErrorX;

/// Result type for operations failing with [`ErrorX`]
pub type Result<T, E = ErrorX> = std::result::Result<T, E>;

/// Extension trait raising an [`ErrorX`] from any failed `Result`
///
/// The error is attributed to the code calling these methods.
///
/// # Examples
///
/// ```rust
/// use nebula_errorx::{ResultExt, Result};
///
/// fn read_config(path: &str) -> Result<String> {
///     std::fs::read_to_string(path).with_status(500, "config unavailable")
/// }
///
/// let err = read_config("/definitely/not/here").unwrap_err();
/// assert_eq!(err.status_code(), Some(500));
/// assert_eq!(err.message(), "config unavailable");
/// ```
pub trait ResultExt<T> {
    /// Raise an error with `message`, caused by the failure
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Like [`context`](Self::context), building the message only on failure
    fn with_context<M, F>(self, message: F) -> Result<T>
    where
        M: Into<String>,
        F: FnOnce() -> M;

    /// Raise a status error with `message`, caused by the failure
    fn with_status(self, status: u16, message: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Cause>,
{
    #[track_caller]
    fn context(self, message: impl Into<String>) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(ErrorX::raise(
                message.into(),
                Some(error.into()),
                None,
                Location::caller(),
                0,
            )),
        }
    }

    #[track_caller]
    fn with_context<M, F>(self, message: F) -> Result<T>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(ErrorX::raise(
                message().into(),
                Some(error.into()),
                None,
                Location::caller(),
                0,
            )),
        }
    }

    #[track_caller]
    fn with_status(self, status: u16, message: impl Into<String>) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(ErrorX::raise(
                message.into(),
                Some(error.into()),
                Some(status),
                Location::caller(),
                0,
            )),
        }
    }
}
