use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Answer, Question};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("score ({score}) does not match correct answers ({correct})")]
    ScoreMismatch { score: u32, correct: u32 },

    #[error("total ({total}) does not match answer count ({answers})")]
    TotalMismatch { total: u32, answers: u32 },
}

/// Durable summary of a completed quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResultsRecordWire", into = "ResultsRecordWire")]
pub struct ResultsRecord {
    answers: Vec<Answer>,
    score: u32,
    total: u32,
}

impl ResultsRecord {
    /// Aggregate a finished answer log, one answer per question.
    #[must_use]
    pub fn from_answers(answers: Vec<Answer>) -> Self {
        let total = u32::try_from(answers.len()).unwrap_or(u32::MAX);
        let score = count_correct(&answers);
        Self {
            answers,
            score,
            total,
        }
    }

    /// Rehydrate a record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if `score` or `total` disagree with the answers.
    pub fn from_persisted(
        answers: Vec<Answer>,
        score: u32,
        total: u32,
    ) -> Result<Self, RecordError> {
        let record = Self::from_answers(answers);
        if record.score != score {
            return Err(RecordError::ScoreMismatch {
                score,
                correct: record.score,
            });
        }
        if record.total != total {
            return Err(RecordError::TotalMismatch {
                total,
                answers: record.total,
            });
        }
        Ok(record)
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Questions in their original order, as needed to retake this quiz.
    #[must_use]
    pub fn questions(&self) -> Vec<Question> {
        self.answers
            .iter()
            .map(|answer| answer.question().clone())
            .collect()
    }
}

fn count_correct(answers: &[Answer]) -> u32 {
    answers
        .iter()
        .filter(|answer| answer.is_correct())
        .fold(0_u32, |acc, _| acc.saturating_add(1))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultsRecordWire {
    answers: Vec<Answer>,
    score: u32,
    total: u32,
}

impl TryFrom<ResultsRecordWire> for ResultsRecord {
    type Error = RecordError;

    fn try_from(wire: ResultsRecordWire) -> Result<Self, Self::Error> {
        Self::from_persisted(wire.answers, wire.score, wire.total)
    }
}

impl From<ResultsRecord> for ResultsRecordWire {
    fn from(record: ResultsRecord) -> Self {
        Self {
            answers: record.answers,
            score: record.score,
            total: record.total,
        }
    }
}
