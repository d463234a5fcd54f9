#![forbid(unsafe_code)]

pub mod error;
pub mod quiz_loop;
pub mod results_service;
pub mod settings_service;
pub mod source;
pub mod trivia;

pub use error::{QuizError, ResultsServiceError, SettingsServiceError, SourceError};
pub use quiz_loop::{QuizLoopService, QuizStart, SessionOrigin, StartedQuiz};
pub use results_service::ResultsService;
pub use settings_service::SettingsService;
pub use source::{MAX_SOURCE_QUESTIONS, MIN_SOURCE_QUESTIONS, QuestionRequest, QuestionSource};
pub use trivia::{OpenTdbSource, TriviaConfig};
