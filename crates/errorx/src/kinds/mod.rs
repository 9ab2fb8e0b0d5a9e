//! Decorator layers
//!
//! A decorator wraps exactly one inner layer and adds one kind of metadata:
//!
//! - `status` - a transport status code, rendered as `status <N>` and
//!   collected as `status`
//! - [`validation`] - field violations, rendered as nothing and collected as
//!   `validation_errors` when non-empty
//!
//! Wrapping a decorated chain re-wraps the inner chain first and then
//! re-applies the decorator, so the decorator keeps its place and its value
//! no matter how many causes are attached later.

pub(crate) mod status;
pub mod validation;

pub use validation::{ValidationErrors, Violation, Violations};
