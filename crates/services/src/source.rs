use async_trait::async_trait;

use quiz_core::model::{Difficulty, Question, QuestionCount, QuizSettings};

use crate::error::SourceError;

/// Fewest questions a source may return for a quiz to start.
pub const MIN_SOURCE_QUESTIONS: usize = 5;

/// Most questions used from a single response.
pub const MAX_SOURCE_QUESTIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionRequest {
    pub amount: QuestionCount,
    pub difficulty: Difficulty,
}

impl From<QuizSettings> for QuestionRequest {
    fn from(settings: QuizSettings) -> Self {
        Self {
            amount: settings.amount,
            difficulty: settings.difficulty,
        }
    }
}

/// Supplies question sets. Implementations return options already shuffled
/// and decoded to plain text.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch a question set for `request`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on network failure, timeout, malformed data, or
    /// when fewer than [`MIN_SOURCE_QUESTIONS`] questions are available.
    async fn fetch(&self, request: QuestionRequest) -> Result<Vec<Question>, SourceError>;
}
