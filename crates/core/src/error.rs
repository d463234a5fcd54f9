use thiserror::Error;

use crate::model::{AnswerError, QuestionError, RecordError, SettingsError};

/// Errors raised by the session controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("not enough questions to start a session: {available} available, {required} required")]
    InsufficientData { available: usize, required: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
