use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of options a multiple-choice question must offer.
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("question needs at least {MIN_OPTIONS} options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

/// A multiple-choice question with a fixed option order.
///
/// The option order is decided once (see [`Question::shuffled`]) and never
/// changes afterwards; `correct_index` always points into `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionWire", into = "QuestionWire")]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
}

impl Question {
    /// Build a question from an already-ordered option list.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, fewer than two options
    /// are given, or `correct_index` does not address an option.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                len: options.len(),
            });
        }

        Ok(Self {
            prompt,
            options,
            correct_index,
        })
    }

    /// Build a question with a randomized option order.
    ///
    /// The correct answer is tracked through the permutation itself, so two
    /// options with identical text never confuse which one is correct.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` under the same rules as [`Question::new`].
    pub fn shuffled<R: Rng + ?Sized>(
        prompt: impl Into<String>,
        correct: impl Into<String>,
        incorrect: Vec<String>,
        rng: &mut R,
    ) -> Result<Self, QuestionError> {
        let mut pool = incorrect;
        let correct_slot = pool.len();
        pool.push(correct.into());

        let mut order: Vec<usize> = (0..pool.len()).collect();
        order.shuffle(rng);

        let correct_index = order
            .iter()
            .position(|&slot| slot == correct_slot)
            .unwrap_or(correct_slot);

        let mut slots: Vec<Option<String>> = pool.into_iter().map(Some).collect();
        let options = order
            .iter()
            .filter_map(|&slot| slots[slot].take())
            .collect();

        Self::new(prompt, options, correct_index)
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Whether `index` addresses one of this question's options.
    #[must_use]
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }

    /// An absent selection is never correct.
    #[must_use]
    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_index)
    }
}

/// Persisted shape of a question, shared with the answer log format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionWire {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl TryFrom<QuestionWire> for Question {
    type Error = QuestionError;

    fn try_from(wire: QuestionWire) -> Result<Self, Self::Error> {
        Self::new(wire.question, wire.options, wire.correct_index)
    }
}

impl From<Question> for QuestionWire {
    fn from(question: Question) -> Self {
        Self {
            question: question.prompt,
            options: question.options,
            correct_index: question.correct_index,
        }
    }
}
