use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("question count must be between {min} and {max}, got {value}")]
    CountOutOfRange { value: u32, min: u32, max: u32 },

    #[error("question count is not a number: {0}")]
    InvalidCount(String),
}

/// Difficulty filter passed to the question source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Any,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Any,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Any => "any",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Any => "Any difficulty",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// `None` for [`Difficulty::Any`], which means "no filter".
    #[must_use]
    pub fn as_filter(self) -> Option<&'static str> {
        match self {
            Difficulty::Any => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Difficulty::Any),
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(SettingsError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Number of questions requested per quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct QuestionCount(u32);

impl QuestionCount {
    pub const MIN: u32 = 5;
    pub const MAX: u32 = 10;

    /// # Errors
    ///
    /// Returns `SettingsError::CountOutOfRange` outside `MIN..=MAX`.
    pub fn new(value: u32) -> Result<Self, SettingsError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(SettingsError::CountOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Every selectable count, smallest first.
    pub fn choices() -> impl Iterator<Item = QuestionCount> {
        (Self::MIN..=Self::MAX).map(QuestionCount)
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u32> for QuestionCount {
    type Error = SettingsError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuestionCount> for u32 {
    fn from(count: QuestionCount) -> Self {
        count.0
    }
}

impl FromStr for QuestionCount {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| SettingsError::InvalidCount(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remembered quiz parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    pub difficulty: Difficulty,
    pub amount: QuestionCount,
}

impl QuizSettings {
    /// Build settings from raw stored strings, falling back to defaults for
    /// anything missing or unparseable.
    #[must_use]
    pub fn from_stored(difficulty: Option<&str>, amount: Option<&str>) -> Self {
        Self {
            difficulty: difficulty
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
            amount: amount.and_then(|raw| raw.parse().ok()).unwrap_or_default(),
        }
    }
}
