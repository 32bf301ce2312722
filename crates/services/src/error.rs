//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::QuizError;

/// Errors emitted by `QuizSession`.
///
/// Storage failures are not listed: they never abort an operation and are
/// reported through `QuizSession::take_persistence_error` instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] QuizError),
}

impl SessionError {
    /// True when the error is a rejected digit width.
    #[must_use]
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::Config(QuizError::InvalidConfiguration { .. }))
    }
}
