use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use quiz_core::model::Question;

use super::config::TriviaConfig;
use super::entities::decode_entities;
use crate::error::SourceError;
use crate::source::{MAX_SOURCE_QUESTIONS, MIN_SOURCE_QUESTIONS, QuestionRequest, QuestionSource};

// Open Trivia DB `response_code` values.
const RESPONSE_OK: u8 = 0;
const RESPONSE_NO_RESULTS: u8 = 1;

/// Question source backed by the Open Trivia DB HTTP API.
#[derive(Clone)]
pub struct OpenTdbSource {
    client: Client,
    config: TriviaConfig,
}

impl OpenTdbSource {
    /// # Errors
    ///
    /// Returns `SourceError` if the HTTP client cannot be built.
    pub fn new(config: TriviaConfig) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// # Errors
    ///
    /// Returns `SourceError` if the environment holds an invalid configuration
    /// or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, SourceError> {
        Self::new(TriviaConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &TriviaConfig {
        &self.config
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch(&self, request: QuestionRequest) -> Result<Vec<Question>, SourceError> {
        let url = self.config.endpoint();
        let params = query_params(&request);
        debug!(%url, amount = request.amount.get(), difficulty = %request.difficulty, "requesting trivia questions");

        let response = self.client.get(&url).query(&params).send().await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), "trivia request rejected");
            return Err(SourceError::HttpStatus(response.status()));
        }

        let body: TriviaResponse = response.json().await?;
        let mut rng = rand::rng();
        normalize_response(body, &mut rng)
    }
}

fn query_params(request: &QuestionRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("amount", request.amount.get().to_string()),
        ("type", "multiple".to_string()),
    ];
    if let Some(difficulty) = request.difficulty.as_filter() {
        params.push(("difficulty", difficulty.to_string()));
    }
    params
}

/// Turn a raw API response into decoded, shuffled questions.
pub(crate) fn normalize_response<R: Rng + ?Sized>(
    body: TriviaResponse,
    rng: &mut R,
) -> Result<Vec<Question>, SourceError> {
    match body.response_code {
        RESPONSE_OK => {}
        RESPONSE_NO_RESULTS => {
            return Err(SourceError::InsufficientResults {
                got: body.results.len(),
                required: MIN_SOURCE_QUESTIONS,
            });
        }
        code => return Err(SourceError::Api { code }),
    }

    if body.results.len() < MIN_SOURCE_QUESTIONS {
        return Err(SourceError::InsufficientResults {
            got: body.results.len(),
            required: MIN_SOURCE_QUESTIONS,
        });
    }

    body.results
        .into_iter()
        .take(MAX_SOURCE_QUESTIONS)
        .map(|item| {
            let incorrect = item
                .incorrect_answers
                .iter()
                .map(|text| decode_entities(text).into_owned())
                .collect();
            Question::shuffled(
                decode_entities(&item.question).into_owned(),
                decode_entities(&item.correct_answer).into_owned(),
                incorrect,
                rng,
            )
            .map_err(SourceError::from)
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub(crate) struct TriviaResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<TriviaItem>,
}

#[derive(Debug, Deserialize)]
struct TriviaItem {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Difficulty, QuestionCount};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn item_json(id: usize) -> String {
        format!(
            r#"{{"type":"multiple","difficulty":"easy","category":"General",
                "question":"Question {id} &quot;quoted&quot;?",
                "correct_answer":"Right &amp; true",
                "incorrect_answers":["Wrong 1","Wrong 2","Wrong 3"]}}"#
        )
    }

    fn response_json(code: u8, count: usize) -> TriviaResponse {
        let items: Vec<String> = (0..count).map(item_json).collect();
        let raw = format!(
            r#"{{"response_code":{code},"results":[{}]}}"#,
            items.join(",")
        );
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn decodes_and_shuffles_results() {
        let mut rng = StdRng::seed_from_u64(3);
        let questions = normalize_response(response_json(0, 6), &mut rng).unwrap();

        assert_eq!(questions.len(), 6);
        for (id, question) in questions.iter().enumerate() {
            assert_eq!(question.prompt(), format!("Question {id} \"quoted\"?"));
            assert_eq!(question.options().len(), 4);
            assert_eq!(question.correct_option(), "Right & true");
        }
    }

    #[test]
    fn caps_at_ten_questions() {
        let mut rng = StdRng::seed_from_u64(3);
        let questions = normalize_response(response_json(0, 12), &mut rng).unwrap();
        assert_eq!(questions.len(), MAX_SOURCE_QUESTIONS);
    }

    #[test]
    fn too_few_results_is_insufficient() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = normalize_response(response_json(0, 3), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SourceError::InsufficientResults { got: 3, required: 5 }
        ));

        let err = normalize_response(response_json(1, 0), &mut rng).unwrap_err();
        assert!(matches!(err, SourceError::InsufficientResults { got: 0, .. }));
    }

    #[test]
    fn other_response_codes_are_api_errors() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = normalize_response(response_json(5, 0), &mut rng).unwrap_err();
        assert!(matches!(err, SourceError::Api { code: 5 }));
    }

    #[test]
    fn query_omits_any_difficulty() {
        let request = QuestionRequest {
            amount: QuestionCount::new(7).unwrap(),
            difficulty: Difficulty::Any,
        };
        let params = query_params(&request);
        assert_eq!(
            params,
            vec![("amount", "7".to_string()), ("type", "multiple".to_string())]
        );

        let request = QuestionRequest {
            difficulty: Difficulty::Hard,
            ..request
        };
        assert!(query_params(&request).contains(&("difficulty", "hard".to_string())));
    }
}
