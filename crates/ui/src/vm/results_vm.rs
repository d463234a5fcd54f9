use quiz_core::model::{Answer, ResultsRecord};

/// How an option is highlighted on the results page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    /// The user's wrong pick.
    Incorrect,
    Plain,
}

impl OptionMark {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Correct => "option correct",
            Self::Incorrect => "option incorrect",
            Self::Plain => "option",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultOptionVm {
    pub label: String,
    pub mark: OptionMark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItemVm {
    pub number_label: String,
    pub question: String,
    pub options: Vec<ResultOptionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub headline: String,
    pub items: Vec<ResultItemVm>,
}

impl ResultsVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[must_use]
pub fn map_results(record: &ResultsRecord) -> ResultsVm {
    ResultsVm {
        headline: format!("You scored {}/{}", record.score(), record.total()),
        items: record
            .answers()
            .iter()
            .enumerate()
            .map(|(idx, answer)| map_answer(idx, answer))
            .collect(),
    }
}

fn map_answer(idx: usize, answer: &Answer) -> ResultItemVm {
    let question = answer.question();
    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mark = if i == question.correct_index() {
                OptionMark::Correct
            } else if answer.selected_index() == Some(i) {
                OptionMark::Incorrect
            } else {
                OptionMark::Plain
            };
            ResultOptionVm {
                label: label.clone(),
                mark,
            }
        })
        .collect();

    ResultItemVm {
        number_label: format!("Q{}.", idx + 1),
        question: question.prompt().to_string(),
        options,
    }
}
