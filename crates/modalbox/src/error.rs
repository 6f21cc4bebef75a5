#![forbid(unsafe_code)]

//! Error types.
//!
//! Redundant or masked transitions are not errors; they simply produce no
//! events. The failures surfaced here are rejected configuration and host
//! callbacks that returned an error.

use std::fmt;

use thiserror::Error;

/// Boxed error returned by host callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Rejected [`ModalConfig`](crate::ModalConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("backdrop opacity {0} is outside [0.0, 1.0]")]
    BackdropOpacityOutOfRange(f32),
    #[error("swipe threshold {0} must not be negative")]
    NegativeSwipeThreshold(f64),
    #[error("swipe area {0} must be positive")]
    NonPositiveSwipeArea(f64),
    #[error("fling velocity {0} must be positive")]
    NonPositiveFlingVelocity(f64),
    #[error("`{field}` must be a finite number")]
    NonFiniteValue { field: &'static str },
}

/// Which host callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    OnOpen,
    OnClosed,
    OnClosingState,
    OnRequestClose,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OnOpen => "on_open",
            Self::OnClosed => "on_closed",
            Self::OnClosingState => "on_closing_state",
            Self::OnRequestClose => "on_request_close",
        })
    }
}

/// Errors surfaced by [`Modal`](crate::Modal) and
/// [`ModalRegistry`](crate::ModalRegistry).
#[derive(Debug, Error)]
pub enum ModalError {
    #[error("invalid modal configuration: {0}")]
    Config(#[from] ConfigError),
    /// A host callback failed. The modal had already committed its state.
    #[error("{hook} callback failed")]
    Callback {
        hook: Hook,
        #[source]
        source: BoxError,
    },
}

impl ModalError {
    /// The failing hook, when this is a callback failure.
    pub fn hook(&self) -> Option<Hook> {
        match self {
            Self::Callback { hook, .. } => Some(*hook),
            Self::Config(_) => None,
        }
    }
}
