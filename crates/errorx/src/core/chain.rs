//! The layer chain and its two read algorithms
//!
//! A chain is a singly linked list of layers ending in exactly one
//! [`Base`]. Layers are immutable once built; every wrap builds a new outer
//! layer and shares the untouched inner ones through `Arc`.
//!
//! Rendering and collecting both walk from the outermost layer inwards:
//!
//! - render puts the base text first, then the non-empty decorator texts in
//!   visit order, joined with `": "`, then `" [<caller>]"`
//! - collect merges each layer's fields without overwriting keys already
//!   collected, then adds `caller` and `stack` from the base

use std::borrow::Cow;
use std::sync::Arc;

use crate::core::base::Base;
use crate::core::cause::Cause;
use crate::core::fields::{CALLER, FieldFilter, FieldValue, Fields, STACK};
use crate::kinds::status::StatusLayer;
use crate::kinds::validation::ValidationLayer;

/// One layer of error metadata
#[derive(Debug)]
pub(crate) enum Layer {
    Base(Base),
    Status(StatusLayer),
    Validation(ValidationLayer),
}

impl Layer {
    /// This layer's own contribution to the rendered text
    pub(crate) fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Base(base) => base.text(),
            Self::Status(status) => Cow::Owned(status.text()),
            Self::Validation(validation) => Cow::Borrowed(validation.text()),
        }
    }

    /// This layer's own contribution to the collected fields
    pub(crate) fn fields(&self) -> Fields {
        match self {
            Self::Base(base) => base.fields(),
            Self::Status(status) => status.fields(),
            Self::Validation(validation) => validation.fields(),
        }
    }

    /// The wrapped layer, `None` for the base
    pub(crate) fn inner(&self) -> Option<&Layer> {
        match self {
            Self::Base(_) => None,
            Self::Status(StatusLayer { inner, .. })
            | Self::Validation(ValidationLayer { inner, .. }) => Some(&**inner),
        }
    }

    /// The base layer terminating this chain
    pub(crate) fn base(&self) -> &Base {
        let mut layer = self;
        loop {
            match layer {
                Self::Base(base) => return base,
                Self::Status(StatusLayer { inner, .. })
                | Self::Validation(ValidationLayer { inner, .. }) => layer = &**inner,
            }
        }
    }

    /// Attach `cause`, returning a new outer layer
    ///
    /// Decorators re-wrap their inner chain and re-apply themselves on top of
    /// whatever it became, so the decorator order is kept. New violations are
    /// promoted directly over the innermost validation layer they meet, or
    /// over the base, and always under any status layer.
    pub(crate) fn wrap(&self, cause: Cause) -> Layer {
        match self {
            Self::Base(base) => base.wrap(cause),
            Self::Status(status) => {
                Self::Status(StatusLayer::new(status.inner.wrap(cause), status.status))
            }
            Self::Validation(validation) => {
                let (error, violations) = cause.into_parts();
                let rewrapped = Self::Validation(ValidationLayer {
                    inner: Arc::new(validation.inner.wrap(Cause::plain(error))),
                    violations: validation.violations.clone(),
                });
                ValidationLayer::promote(rewrapped, violations)
            }
        }
    }

    /// Iterate from this layer inwards, ending with the base
    pub(crate) fn layers(&self) -> Layers<'_> {
        Layers { next: Some(self) }
    }
}

/// Outer-to-inner walk over a chain
pub(crate) struct Layers<'a> {
    next: Option<&'a Layer>,
}

impl<'a> Iterator for Layers<'a> {
    type Item = &'a Layer;

    fn next(&mut self) -> Option<Self::Item> {
        let layer = self.next?;
        self.next = layer.inner();
        Some(layer)
    }
}

/// Flatten a chain into one line
pub(crate) fn render(top: &Layer) -> String {
    let base = top.base();
    let mut segments = vec![base.text()];
    segments.extend(
        top.layers()
            .filter(|layer| !matches!(layer, Layer::Base(_)))
            .map(Layer::text)
            .filter(|text| !text.is_empty()),
    );

    format!("{} [{}]", segments.join(": "), base.caller())
}

/// Flatten a chain into a field map
pub(crate) fn collect(top: &Layer, filter: FieldFilter<'_>) -> Fields {
    let mut fields = Fields::new();

    for layer in top.layers() {
        filter.merge(&mut fields, layer.fields());
    }

    let base = top.base();
    if filter.allows(CALLER) {
        fields.insert(CALLER, FieldValue::Text(base.caller().to_string()));
    }
    if filter.allows(STACK)
        && let Some(stack) = base.captured_stack()
    {
        fields.insert(STACK, FieldValue::Stack(stack.clone()));
    }

    fields
}
