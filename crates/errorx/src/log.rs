//! Emitting an [`ErrorX`] as a `tracing` event

use tracing::Level;

use crate::core::error::ErrorX;
use crate::core::fields::{FieldValue, VALIDATION_ERRORS};

impl ErrorX {
    /// Emit this error as one event at `level`
    ///
    /// The rendered text is the event message. Structured fields:
    /// `error.message`, `error.caller`, and when present `error.cause`,
    /// `error.status` and `error.validation` (violations as JSON text).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nebula_errorx::ErrorX;
    /// use tracing::Level;
    ///
    /// ErrorX::status(503, "upstream unavailable").log(Level::WARN);
    /// ```
    pub fn log(&self, level: Level) {
        let rendered = self.to_string();
        let message = self.message();
        let caller = self.caller();
        let cause = self.cause().map(ToString::to_string);
        let cause = cause.as_deref();
        let status = self.status_code();
        let validation = self
            .fields(&[VALIDATION_ERRORS])
            .get(VALIDATION_ERRORS)
            .and_then(FieldValue::as_violations)
            .and_then(|violations| serde_json::to_string(violations).ok());
        let validation = validation.as_deref();

        macro_rules! emit {
            ($level:expr) => {
                tracing::event!(
                    $level,
                    error.message = message,
                    error.cause = cause,
                    error.status = status,
                    error.validation = validation,
                    error.caller = caller,
                    "{}",
                    rendered
                )
            };
        }

        match level {
            Level::ERROR => emit!(Level::ERROR),
            Level::WARN => emit!(Level::WARN),
            Level::INFO => emit!(Level::INFO),
            Level::DEBUG => emit!(Level::DEBUG),
            _ => emit!(Level::TRACE),
        }
    }
}
