//! Shared provider error kinds and error value helpers.
//!
//! Streaming never produces a `ProviderError`: stream failures travel as
//! [`StreamEvent::Error`](crate::StreamEvent::Error) data. These errors cover
//! registry lookups and tool executors driven by `complete_with_tools`.
//!
//! ```rust
//! use cprovider::{ProviderError, ProviderErrorKind};
//!
//! let missing = ProviderError::unavailable("no provider registered for litellm");
//! assert_eq!(missing.kind, ProviderErrorKind::Unavailable);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// No provider is registered under the requested id.
    Unavailable,
    /// A tool executor failed to run a tool call.
    Tooling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message)
    }

    pub fn tooling(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Tooling, message)
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ProviderError {}
