mod quiz_vm;
mod results_vm;

pub use quiz_vm::{
    QuestionScreenVm, QuizIntent, QuizOutcome, QuizOptionVm, apply_intent, countdown_key,
    format_timer, map_question_screen,
};
pub use results_vm::{OptionMark, ResultItemVm, ResultOptionVm, ResultsVm, map_results};
