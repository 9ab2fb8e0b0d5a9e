//! Stack capture configuration
//!
//! Capture settings are process-wide: they are read once, either from an
//! explicit [`CaptureConfig::install`] or lazily from the environment the
//! first time an error is raised.
//!
//! | Variable                    | Values                          | Default |
//! |-----------------------------|---------------------------------|---------|
//! | `NEBULA_ERRORX_STACK`       | `1/true/on/yes`, `0/false/off/no` | on    |
//! | `NEBULA_ERRORX_STACK_DEPTH` | positive integer                | 32      |

use std::sync::OnceLock;

use thiserror::Error;

/// Environment variable toggling stack retention.
pub const STACK_ENV: &str = "NEBULA_ERRORX_STACK";

/// Environment variable bounding the number of retained frames.
pub const STACK_DEPTH_ENV: &str = "NEBULA_ERRORX_STACK_DEPTH";

/// Default upper bound on retained frames.
pub const DEFAULT_MAX_FRAMES: usize = 32;

static INSTALLED: OnceLock<CaptureConfig> = OnceLock::new();

/// Errors produced while loading or installing a [`CaptureConfig`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment value could not be parsed
    #[error("invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value found
        value: String,
        /// What the parser accepts
        expected: &'static str,
    },

    /// A configuration was already installed or loaded
    #[error("stack capture configuration is already installed")]
    AlreadyInstalled,
}

/// How much of the native stack an error keeps at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Retain the captured stack. The call site is resolved either way.
    pub stack: bool,
    /// Upper bound on retained frames
    pub max_frames: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            stack: true,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

impl CaptureConfig {
    /// Configuration that resolves call sites but keeps no frames
    #[must_use]
    pub fn without_stack() -> Self {
        Self {
            stack: false,
            ..Self::default()
        }
    }

    /// Override the frame bound
    #[must_use]
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(STACK_ENV) {
            config.stack = match value.trim().to_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => true,
                "0" | "false" | "off" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: STACK_ENV,
                        value,
                        expected: "a boolean (1/0, true/false, on/off, yes/no)",
                    });
                }
            };
        }

        if let Some(value) = lookup(STACK_DEPTH_ENV) {
            config.max_frames = match value.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: STACK_DEPTH_ENV,
                        value,
                        expected: "a positive integer",
                    });
                }
            };
        }

        Ok(config)
    }

    /// Install this configuration for the whole process
    ///
    /// Must run before the first error is raised: once any capture has
    /// happened the lazily loaded configuration is already in place.
    pub fn install(self) -> Result<(), ConfigError> {
        INSTALLED
            .set(self)
            .map_err(|_| ConfigError::AlreadyInstalled)
    }

    /// The configuration captures use
    pub fn current() -> Self {
        *INSTALLED.get_or_init(|| match Self::from_env() {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(%error, "invalid stack capture configuration, using defaults");
                Self::default()
            }
        })
    }
}
