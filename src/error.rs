//! Error types for the search engine.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can surface from a search operation.
///
/// Cancellation is expected and caller-triggered; it must be handled as
/// "superseded by a newer search", never logged as an error. Anything
/// else is an unexpected fault and propagates to the caller.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The caller cancelled the search before it completed
    #[error("search cancelled")]
    Cancelled,

    /// A worker task failed to complete (e.g. panicked)
    #[error("search task failed: {0}")]
    TaskFailed(String),

    /// The consumer of a streaming search went away
    #[error("result channel closed")]
    ChannelClosed,
}

impl SearchError {
    /// Whether this error is the expected cancellation outcome rather
    /// than a real failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchError::Cancelled)
    }
}

/// Errors that can occur while validating search configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A threshold is outside its allowed range or ordering
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// Convenience type alias for Results with SearchError
pub type EngineResult<T> = Result<T, SearchError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
