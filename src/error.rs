//! Error types for pulsefield.
//!
//! Every failure here is recoverable by design: the scheduler responds to a
//! source error by skipping the tick and retaining the previous visual
//! state. Nothing in this crate is user-fatal.

use std::fmt;

/// Errors a snapshot source can report.
#[derive(Debug)]
pub enum SourceError {
    /// The source could not produce a snapshot for the requested mode.
    Unavailable(String),
    /// The source did not answer within its deadline.
    TimedOut,
    /// The snapshot payload was structurally undecodable.
    Decode(serde_json::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unavailable(msg) => write!(f, "snapshot unavailable: {}", msg),
            SourceError::TimedOut => write!(f, "snapshot request timed out"),
            SourceError::Decode(e) => write!(f, "failed to decode snapshot payload: {}", e),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Decode(e)
    }
}
