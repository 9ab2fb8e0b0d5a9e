//! Core error types and structures
//!
//! This module contains the chain and everything it is built from:
//! - [`error`](crate::core::error) - Main [`ErrorX`](crate::ErrorX) handle
//! - [`cause`](crate::core::cause) - Causes attached to a chain and how they join
//! - [`fields`](crate::core::fields) - Field map produced by collecting a chain
//! - [`stack`](crate::core::stack) - Call-site and stack capture
//! - [`result`](crate::core::result) - Result type and extension traits

pub(crate) mod base;
pub mod cause;
pub(crate) mod chain;
pub mod error;
pub mod fields;
pub mod result;
pub mod stack;

// Re-export core types
pub use cause::{Cause, JoinedError, SharedError};
pub use error::ErrorX;
pub use fields::{FieldFilter, FieldValue, Fields};
pub use result::{Result, ResultExt};
pub use stack::{Frame, Stack};
