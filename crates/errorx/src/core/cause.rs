//! Causes attached to a chain
//!
//! Any `std::error::Error + Send + Sync + 'static` converts into a [`Cause`].
//! Errors that can report field violations are recognised through the
//! [`Violations`] capability, which is what promotes a chain to carry
//! `validation_errors`.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::kinds::validation::{ValidationErrors, Violation, Violations};

/// Shared, type-erased error
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// An error being attached to a chain
#[derive(Debug, Clone)]
pub struct Cause {
    error: SharedError,
    violations: Option<Vec<Violation>>,
}

impl Cause {
    /// Attach a violations-bearing error
    ///
    /// Use this for validation results from any engine: the chain it is
    /// attached to is promoted to carry the reported violations.
    pub fn validation<E>(error: E) -> Self
    where
        E: Error + Violations + Send + Sync + 'static,
    {
        let violations = error.violations();
        Self {
            error: Arc::new(error),
            violations: Some(violations),
        }
    }

    /// Attach an already shared error
    pub fn from_shared(error: SharedError) -> Self {
        let violations = error
            .downcast_ref::<ValidationErrors>()
            .map(Violations::violations);
        Self { error, violations }
    }

    /// Attach a boxed error
    pub fn from_boxed(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Self::from_shared(Arc::from(error))
    }

    /// The error itself
    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.error
    }

    /// Violations carried by the error, if it has the capability
    pub fn violations(&self) -> Option<&[Violation]> {
        self.violations.as_deref()
    }

    /// Cause carrying no violations, whatever the error is
    pub(crate) fn plain(error: SharedError) -> Self {
        Self {
            error,
            violations: None,
        }
    }

    pub(crate) fn into_parts(self) -> (SharedError, Option<Vec<Violation>>) {
        (self.error, self.violations)
    }
}

impl<E> From<E> for Cause
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::from_shared(Arc::new(error))
    }
}

/// Several causes joined in the order they were attached
#[derive(Debug, Clone, Default)]
pub struct JoinedError {
    errors: Vec<SharedError>,
}

impl JoinedError {
    /// Iterate over the joined errors in attachment order
    pub fn errors(&self) -> impl Iterator<Item = &(dyn Error + Send + Sync + 'static)> {
        self.errors.iter().map(|error| &**error)
    }

    /// Number of joined errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether nothing was joined
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for JoinedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(": ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl Error for JoinedError {}

/// Join `next` after `current`
///
/// A lone cause is kept as-is; joining onto an existing [`JoinedError`]
/// extends it rather than nesting, so joins stay associative.
pub(crate) fn join(current: Option<&SharedError>, next: SharedError) -> SharedError {
    let Some(current) = current else {
        return next;
    };

    let mut errors = match current.downcast_ref::<JoinedError>() {
        Some(joined) => joined.errors.clone(),
        None => vec![Arc::clone(current)],
    };
    errors.push(next);

    Arc::new(JoinedError { errors })
}
