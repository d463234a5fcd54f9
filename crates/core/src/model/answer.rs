use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::question::{Question, QuestionError, QuestionWire};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error("selected index {index} is out of range for {len} options")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("stored correctness flag disagrees with the selection")]
    CorrectnessMismatch,
}

/// A locked answer. Carries a copy of its question so results can be shown
/// (or the quiz retaken) without the original question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AnswerWire", into = "AnswerWire")]
pub struct Answer {
    question: Question,
    selected_index: Option<usize>,
    is_correct: bool,
}

impl Answer {
    /// Lock an answer for `question`. A selection outside the option list is
    /// recorded as absent.
    #[must_use]
    pub fn new(question: Question, selected_index: Option<usize>) -> Self {
        let selected_index = selected_index.filter(|&idx| question.has_option(idx));
        let is_correct = question.is_correct(selected_index);
        Self {
            question,
            selected_index,
            is_correct,
        }
    }

    /// Rehydrate an answer from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::SelectionOutOfRange` for a selection that does not
    /// address an option, or `AnswerError::CorrectnessMismatch` when the stored
    /// flag disagrees with the selection.
    pub fn from_persisted(
        question: Question,
        selected_index: Option<usize>,
        is_correct: bool,
    ) -> Result<Self, AnswerError> {
        if let Some(index) = selected_index {
            if !question.has_option(index) {
                return Err(AnswerError::SelectionOutOfRange {
                    index,
                    len: question.options().len(),
                });
            }
        }
        if question.is_correct(selected_index) != is_correct {
            return Err(AnswerError::CorrectnessMismatch);
        }
        Ok(Self {
            question,
            selected_index,
            is_correct,
        })
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.selected_index.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerWire {
    #[serde(flatten)]
    question: QuestionWire,
    #[serde(default)]
    selected_index: Option<usize>,
    is_correct: bool,
}

impl TryFrom<AnswerWire> for Answer {
    type Error = AnswerError;

    fn try_from(wire: AnswerWire) -> Result<Self, Self::Error> {
        let question = Question::try_from(wire.question)?;
        Self::from_persisted(question, wire.selected_index, wire.is_correct)
    }
}

impl From<Answer> for AnswerWire {
    fn from(answer: Answer) -> Self {
        Self {
            question: answer.question.into(),
            selected_index: answer.selected_index,
            is_correct: answer.is_correct,
        }
    }
}
