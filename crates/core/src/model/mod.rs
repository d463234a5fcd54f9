mod answer;
mod question;
mod results;
mod settings;

pub use answer::{Answer, AnswerError};
pub use question::{MIN_OPTIONS, Question, QuestionError};
pub use results::{RecordError, ResultsRecord};
pub use settings::{Difficulty, QuestionCount, QuizSettings, SettingsError};
