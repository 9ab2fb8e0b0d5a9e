//! Convenient error macros for common patterns
//!
//! The macros format their message like [`format!`] and raise the error at
//! the macro call site.

/// Create an [`ErrorX`](crate::ErrorX) with a formatted message
///
/// # Examples
///
/// ```rust
/// use nebula_errorx::errorx;
///
/// let id = 42;
/// let err = errorx!("user {id} not found");
/// assert_eq!(err.message(), "user 42 not found");
///
/// let io = std::io::Error::other("connection reset");
/// let err = errorx!(cause = io, "fetching user {}", id);
/// assert!(err.to_string().starts_with("fetching user 42: connection reset ["));
/// ```
#[macro_export]
macro_rules! errorx {
    (cause = $cause:expr, $($arg:tt)+) => {
        $crate::ErrorX::with_cause($cause, ::std::format!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::ErrorX::new(::std::format!($($arg)+))
    };
}

/// Create an [`ErrorX`](crate::ErrorX) carrying a status and a formatted message
///
/// # Examples
///
/// ```rust
/// use nebula_errorx::status_errorx;
///
/// let err = status_errorx!(404, "order {} not found", "A-17");
/// assert_eq!(err.status_code(), Some(404));
///
/// let io = std::io::Error::other("timeout");
/// let err = status_errorx!(504, cause = io, "calling {}", "billing");
/// assert_eq!(err.message(), "calling billing");
/// ```
#[macro_export]
macro_rules! status_errorx {
    ($status:expr, cause = $cause:expr, $($arg:tt)+) => {
        $crate::ErrorX::status_with_cause($cause, $status, ::std::format!($($arg)+))
    };
    ($status:expr, $($arg:tt)+) => {
        $crate::ErrorX::status($status, ::std::format!($($arg)+))
    };
}

/// Return early with an error if a condition is not satisfied
///
/// The error expression is only evaluated when the condition fails, and is
/// converted with [`Into`] into the function's error type.
///
/// # Examples
///
/// ```rust
/// use nebula_errorx::{ensure, status_errorx, Result};
///
/// fn check_quantity(quantity: u32) -> Result<u32> {
///     ensure!(quantity > 0, status_errorx!(400, "quantity must be positive"));
///     Ok(quantity)
/// }
///
/// assert!(check_quantity(3).is_ok());
/// assert_eq!(check_quantity(0).unwrap_err().status_code(), Some(400));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::std::result::Result::Err(::std::convert::Into::into($err));
        }
    };
}
