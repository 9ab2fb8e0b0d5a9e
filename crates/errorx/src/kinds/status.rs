//! Status layer

use std::sync::Arc;

use crate::core::chain::Layer;
use crate::core::fields::{FieldValue, Fields, STATUS};

/// Decorator carrying a transport status code
///
/// The code is opaque here; callers usually put an HTTP status in it.
#[derive(Debug)]
pub(crate) struct StatusLayer {
    pub(crate) inner: Arc<Layer>,
    pub(crate) status: u16,
}

impl StatusLayer {
    pub(crate) fn new(inner: Layer, status: u16) -> Self {
        Self {
            inner: Arc::new(inner),
            status,
        }
    }

    pub(crate) fn text(&self) -> String {
        format!("status {}", self.status)
    }

    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(STATUS, FieldValue::Status(self.status));
        fields
    }
}
