//! # Nebula ErrorX
//!
//! Layered errors that remember where they were raised.
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_errorx::prelude::*;
//!
//! fn find_user(id: u32) -> Result<String> {
//!     ensure!(id != 0, status_errorx!(400, "user id must be non-zero"));
//!     Err(ErrorX::status(404, "user not found"))
//! }
//!
//! let err = find_user(7).unwrap_err().wrap(std::io::Error::other("no rows"));
//!
//! // Render: base text first, then decorators, then the call site
//! assert!(err.to_string().starts_with("user not found: no rows: status 404 ["));
//!
//! // Collect: a field map for logs or API bodies
//! let body = err.response(&["message", "status"]).into_json().unwrap();
//! assert_eq!(body["status"], 404);
//! ```
//!
//! ## Features
//!
//! - **Chain**: a base layer (message, cause, call site, stack) wrapped by
//!   status and validation decorators
//! - **Copy-on-write**: [`ErrorX::wrap`] returns a new chain, clones are cheap
//! - **Validation**: causes reporting [`Violations`] promote the chain and
//!   surface as `validation_errors`
//! - **Capture**: call site via `#[track_caller]`, stack via `backtrace`,
//!   configurable with [`CaptureConfig`]
//! - **Logging**: [`ErrorX::log`] emits a structured `tracing` event

#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod core;
pub mod kinds;
pub mod macros;

mod log;

// === Public API Exports ===

/// Main error type
pub use crate::core::ErrorX;

/// Result type alias for `Result<T, ErrorX>`
pub use crate::core::Result;

/// Extension trait raising an [`ErrorX`] from a failed `Result`
pub use crate::core::ResultExt;

/// Causes and how several of them are joined
pub use crate::core::{Cause, JoinedError, SharedError};

/// Collected field map
pub use crate::core::{FieldFilter, FieldValue, Fields};

/// Captured frames
pub use crate::core::{Frame, Stack};

/// Field violations and the capability reporting them
pub use kinds::{ValidationErrors, Violation, Violations};

/// Capture configuration
pub use config::{CaptureConfig, ConfigError};

/// Convenient prelude with everything you need
pub mod prelude {
    pub use super::{
        CaptureConfig, Cause, ErrorX, Fields, Result, ResultExt, ValidationErrors, Violation,
        Violations,
    };

    pub use crate::{ensure, errorx, status_errorx};
}
