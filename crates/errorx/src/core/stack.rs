//! Call-site and stack capture
//!
//! Capture happens once, when the base layer of a chain is built, so an error
//! rendered later or on another thread still reports where it was raised.
//! The raise location comes from `#[track_caller]`; the native stack is walked
//! with [`backtrace`] and every frame above the raise location (the capture
//! machinery itself) is dropped.

use std::fmt;
use std::panic::Location;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CaptureConfig;

/// Function name reported when symbols cannot be resolved
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

/// Frames resolved while looking for the raise location before giving up
const SEARCH_LIMIT: usize = 64;

/// One resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    /// Demangled function path, without the symbol hash
    pub function: String,
    /// Source file
    pub file: String,
    /// Source line
    pub line: u32,
}

impl Frame {
    /// Create a frame from its parts
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }

    fn from_symbol(symbol: &backtrace::Symbol) -> Self {
        Self {
            function: symbol
                .name()
                .map_or_else(|| UNKNOWN_FUNCTION.to_string(), |name| format!("{name:#}")),
            file: symbol
                .filename()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            line: symbol.lineno().unwrap_or(0),
        }
    }

    /// Whether this frame is the code at `location`
    fn is_at(&self, location: &Location<'_>) -> bool {
        self.line == location.line() && Path::new(&self.file).ends_with(location.file())
    }

    fn is_capture_machinery(&self) -> bool {
        self.function.starts_with("backtrace::") || self.function.contains("nebula_errorx::")
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\t{}:{}\n", self.function, self.file, self.line)
    }
}

/// Ordered frames, innermost (the raise site) first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack(Vec<Frame>);

impl Stack {
    /// Wrap already resolved frames
    pub fn new(frames: Vec<Frame>) -> Self {
        Self(frames)
    }

    /// Stack with no frames
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Capture the current stack
    ///
    /// The first frame is the caller of `capture`; `skip` drops that many
    /// further frames, and at most [`CaptureConfig::max_frames`] are kept.
    #[track_caller]
    pub fn capture(skip: usize) -> Self {
        let config = CaptureConfig {
            stack: true,
            ..CaptureConfig::current()
        };
        capture(Location::caller(), skip, config)
            .stack
            .unwrap_or_default()
    }

    /// The frames
    pub fn frames(&self) -> &[Frame] {
        &self.0
    }

    /// Iterate over frames, innermost first
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.0.iter()
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no frame was kept
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|frame| frame.fmt(f))
    }
}

impl FromIterator<Frame> for Stack {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Stack {
    type Item = Frame;
    type IntoIter = std::vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// What a base layer records about where it was raised
#[derive(Debug)]
pub(crate) struct Capture {
    /// `"<function> <file>:<line>"`
    pub(crate) caller: String,
    /// `None` when stack retention is disabled
    pub(crate) stack: Option<Stack>,
}

/// Resolve the call site of `location` and, if enabled, the stack below it
pub(crate) fn capture(location: &Location<'_>, skip: usize, config: CaptureConfig) -> Capture {
    let mut frames: Vec<Frame> = Vec::new();
    let mut raise_at = None;

    backtrace::trace(|frame| {
        let resolved_from = frames.len();
        // Inlined calls resolve to several symbols for one frame.
        backtrace::resolve_frame(frame, |symbol| frames.push(Frame::from_symbol(symbol)));

        if raise_at.is_none() {
            raise_at = frames[resolved_from..]
                .iter()
                .position(|f| f.is_at(location))
                .map(|offset| resolved_from + offset);
        }

        match raise_at {
            Some(start) => config.stack && frames.len() < start + skip + config.max_frames,
            None => frames.len() < SEARCH_LIMIT + skip + config.max_frames,
        }
    });

    let function = raise_at
        .and_then(|start| frames.get(start))
        .map_or(UNKNOWN_FUNCTION, |frame| frame.function.as_str());
    let caller = format!("{function} {}:{}", location.file(), location.line());

    let stack = config.stack.then(|| {
        let start = raise_at.unwrap_or_else(|| {
            frames
                .iter()
                .position(|frame| !frame.is_capture_machinery())
                .unwrap_or(0)
        });
        frames
            .into_iter()
            .skip(start + skip)
            .take(config.max_frames)
            .collect()
    });

    Capture { caller, stack }
}
