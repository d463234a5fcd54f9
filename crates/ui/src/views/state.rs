use dioxus::prelude::*;
use services::QuizError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The question source could not be reached or returned unusable data.
    SourceUnavailable,
    /// The source had fewer questions than a quiz needs.
    InsufficientData,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::SourceUnavailable => "Could not load questions. Check your connection and try again.",
            Self::InsufficientData => "Not enough questions available. Try again or pick another difficulty.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&QuizError> for ViewError {
    fn from(err: &QuizError) -> Self {
        match err {
            QuizError::SourceUnavailable(_) => Self::SourceUnavailable,
            QuizError::InsufficientData { .. } => Self::InsufficientData,
            _ => Self::Unknown,
        }
    }
}

impl From<QuizError> for ViewError {
    fn from(err: QuizError) -> Self {
        Self::from(&err)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
