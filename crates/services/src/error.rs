//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::SessionError;
use quiz_core::model::QuestionError;
use storage::repository::StorageError;

/// Errors emitted by a `QuestionSource`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("trivia request timed out")]
    Timeout,
    #[error("trivia request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("trivia request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("trivia api returned response code {code}")]
    Api { code: u8 },
    #[error("not enough questions: got {got}, need at least {required}")]
    InsufficientResults { got: usize, required: usize },
    #[error("malformed question: {0}")]
    Malformed(#[from] QuestionError),
    #[error("invalid trivia configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultsServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode results record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("not enough questions available: {available} of {required}")]
    InsufficientData { available: usize, required: usize },
    #[error("question source unavailable: {0}")]
    SourceUnavailable(#[source] SourceError),
    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
    #[error(transparent)]
    Results(#[from] ResultsServiceError),
}

impl QuizError {
    /// Whether the user can sensibly retry the same action.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::SourceUnavailable(_)
        )
    }
}

impl From<SourceError> for QuizError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::InsufficientResults { got, required } => Self::InsufficientData {
                available: got,
                required,
            },
            other => Self::SourceUnavailable(other),
        }
    }
}

impl From<SessionError> for QuizError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InsufficientData {
                available,
                required,
            } => Self::InsufficientData {
                available,
                required,
            },
        }
    }
}
