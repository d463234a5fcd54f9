use std::env;
use std::time::Duration;

use url::Url;

use crate::error::SourceError;

const DEFAULT_BASE_URL: &str = "https://opentdb.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriviaConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl TriviaConfig {
    /// Read `QUIZ_TRIVIA_BASE_URL` and `QUIZ_TRIVIA_TIMEOUT_SECS`, falling back
    /// to the public Open Trivia DB with a 10 second timeout.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Config` if the base URL is not a valid URL.
    pub fn from_env() -> Result<Self, SourceError> {
        let base_url = env::var("QUIZ_TRIVIA_BASE_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let timeout_secs = env::var("QUIZ_TRIVIA_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    /// # Errors
    ///
    /// Returns `SourceError::Config` if `base_url` is not a valid URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let base_url = base_url.into();
        if Url::parse(&base_url).is_err() {
            return Err(SourceError::Config(format!("invalid base URL: {base_url}")));
        }
        Ok(Self { base_url, timeout })
    }

    /// Full URL of the question endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/api.php", self.base_url.trim_end_matches('/'))
    }
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
