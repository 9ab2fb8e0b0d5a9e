//! Structured field map produced by collecting a chain
//!
//! Keys are drawn from the constants below. Each layer contributes its own
//! keys; the first layer to write a key (the outermost) wins.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::core::stack::Stack;

/// Base message
pub const MESSAGE: &str = "message";
/// Joined cause text
pub const ERROR: &str = "error";
/// Status code
pub const STATUS: &str = "status";
/// Field violations, keyed by field name
pub const VALIDATION_ERRORS: &str = "validation_errors";
/// Call site of the base layer
pub const CALLER: &str = "caller";
/// Stack captured by the base layer
pub const STACK: &str = "stack";

/// One collected value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// `message`, `error`, `caller`
    Text(String),
    /// `status`
    Status(u16),
    /// `validation_errors`: field name to violation tag
    Violations(BTreeMap<String, String>),
    /// `stack`
    Stack(Stack),
}

impl FieldValue {
    /// Text value, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Status value, if this is one
    pub fn as_status(&self) -> Option<u16> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }

    /// Violations value, if this is one
    pub fn as_violations(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Violations(violations) => Some(violations),
            _ => None,
        }
    }

    /// Stack value, if this is one
    pub fn as_stack(&self) -> Option<&Stack> {
        match self {
            Self::Stack(stack) => Some(stack),
            _ => None,
        }
    }
}

/// Flattened fields of a chain, ready for a log record or an API body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, FieldValue>);

impl Fields {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Value under `key`
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no key is present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.0.insert(key.into(), value);
    }

    /// Convert into a JSON object
    pub fn into_json(self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl IntoIterator for Fields {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Restricts collection to a set of field names
///
/// An empty set means no restriction. Unknown names are not an error: they
/// simply never match.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldFilter<'a> {
    names: &'a [&'a str],
}

impl<'a> FieldFilter<'a> {
    /// Filter keeping only `names` (everything when empty)
    pub fn new(names: &'a [&'a str]) -> Self {
        Self { names }
    }

    /// Filter keeping everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether `key` passes the filter
    pub fn allows(&self, key: &str) -> bool {
        self.names.is_empty() || self.names.iter().any(|name| *name == key)
    }

    /// Copy allowed entries of `layer` into `into`, keeping existing keys
    pub(crate) fn merge(&self, into: &mut Fields, layer: Fields) {
        for (key, value) in layer {
            if self.allows(&key) {
                into.0.entry(key).or_insert(value);
            }
        }
    }
}
