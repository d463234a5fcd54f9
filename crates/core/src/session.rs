use std::fmt;

use crate::error::SessionError;
use crate::model::{Answer, Question, ResultsRecord};
use crate::timer::{QuestionTimer, TIMER_BUDGET_SECS, TimerTick};

/// Fewest questions a session can run over.
pub const MIN_SESSION_QUESTIONS: usize = 1;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Active,
    Completed,
}

/// What happened after an answer was locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// Moved on to the question at `index`.
    Advanced { index: usize },
    /// The last question was locked; the record is final.
    Completed(ResultsRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No running timer; the tick was ignored.
    Stopped,
    Running { remaining: u32 },
    /// Time ran out and the current question was skipped.
    TimedOut(LockOutcome),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Session controller: steps through a fixed question set one question at a
/// time under a per-question countdown, collecting one answer per question.
///
/// Every operation except [`start`](Self::start) is a no-op unless the session
/// is active, so stray UI events after completion are harmless.
#[derive(Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Answer>,
    provisional: Option<usize>,
    timer: QuestionTimer,
    /// Bumped every time a question's countdown is (re)started.
    countdown_epoch: u64,
    state: SessionState,
    results: Option<ResultsRecord>,
}

impl QuizSession {
    /// An idle session with the default timer budget.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timer_budget(TIMER_BUDGET_SECS)
    }

    #[must_use]
    pub fn with_timer_budget(budget: u32) -> Self {
        Self {
            questions: Vec::new(),
            current: 0,
            answers: Vec::new(),
            provisional: None,
            timer: QuestionTimer::new(budget),
            countdown_epoch: 0,
            state: SessionState::Idle,
            results: None,
        }
    }

    /// Create an active session over `questions`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InsufficientData` if `questions` is empty.
    pub fn started(questions: Vec<Question>) -> Result<Self, SessionError> {
        let mut session = Self::new();
        session.start(questions)?;
        Ok(session)
    }

    /// Rebuild a fresh active session from a stored record, so the same
    /// questions can be taken again in the same order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InsufficientData` if the record has no answers.
    pub fn resume(record: &ResultsRecord) -> Result<Self, SessionError> {
        Self::started(record.questions())
    }

    /// Begin a new run, discarding any previous progress.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InsufficientData` if `questions` is empty; the
    /// session is left untouched in that case.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        if questions.len() < MIN_SESSION_QUESTIONS {
            return Err(SessionError::InsufficientData {
                available: questions.len(),
                required: MIN_SESSION_QUESTIONS,
            });
        }

        self.questions = questions;
        self.current = 0;
        self.answers.clear();
        self.provisional = None;
        self.results = None;
        self.state = SessionState::Active;
        self.restart_countdown();
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Completed
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_active() {
            self.questions.get(self.current)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn provisional(&self) -> Option<usize> {
        self.provisional
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.timer.remaining()
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Identifies the countdown of the question on screen. Changes on every
    /// question transition, never on a plain tick, so a driver can drop a
    /// pending tick that was scheduled for an earlier question.
    #[must_use]
    pub fn countdown_epoch(&self) -> u64 {
        self.countdown_epoch
    }

    /// Share of questions already passed, rounded to a whole percent.
    #[must_use]
    pub fn progress_pct(&self) -> u8 {
        let total = self.questions.len();
        if total == 0 {
            return 0;
        }
        let done = if self.is_complete() { total } else { self.current };
        let pct = (done * 100 + total / 2) / total;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }

    /// The final record, once the last question has been locked.
    #[must_use]
    pub fn results(&self) -> Option<&ResultsRecord> {
        self.results.as_ref()
    }

    /// Remember a provisional choice for the current question.
    ///
    /// Returns `false` (and changes nothing) if there is no current question
    /// or `option` does not address one of its options.
    pub fn select(&mut self, option: usize) -> bool {
        let valid = self
            .current_question()
            .is_some_and(|question| question.has_option(option));
        if valid {
            self.provisional = Some(option);
        }
        valid
    }

    /// Lock the current question with the provisional selection, if any.
    pub fn lock(&mut self) -> Option<LockOutcome> {
        let chosen = self.provisional;
        self.lock_with(chosen)
    }

    /// Skip the current question. Always recorded as incorrect.
    pub fn skip(&mut self) -> Option<LockOutcome> {
        self.lock_with(None)
    }

    /// Lock the current question with an explicit choice, ignoring the
    /// provisional selection.
    pub fn lock_with(&mut self, chosen: Option<usize>) -> Option<LockOutcome> {
        let question = self.current_question()?.clone();
        let answer = Answer::new(question, chosen);

        // Re-locking a question reached via `previous` replaces its answer.
        if self.current < self.answers.len() {
            self.answers[self.current] = answer;
        } else {
            self.answers.push(answer);
        }
        self.provisional = None;
        self.timer.stop();

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.restart_countdown();
            return Some(LockOutcome::Advanced {
                index: self.current,
            });
        }

        let record = ResultsRecord::from_answers(self.answers.clone());
        self.results = Some(record.clone());
        self.state = SessionState::Completed;
        Some(LockOutcome::Completed(record))
    }

    /// Consume one unit of the current question's time budget. Reaching zero
    /// skips the question.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Stopped;
        }
        match self.timer.tick() {
            TimerTick::Stopped => TickOutcome::Stopped,
            TimerTick::Running { remaining } => TickOutcome::Running { remaining },
            TimerTick::Expired => self
                .skip()
                .map_or(TickOutcome::Stopped, TickOutcome::TimedOut),
        }
    }

    /// Step back one question. Answers already locked are kept.
    ///
    /// Returns `false` if the session is on its first question or not active.
    pub fn previous(&mut self) -> bool {
        if !self.is_active() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.provisional = None;
        self.restart_countdown();
        true
    }

    fn restart_countdown(&mut self) {
        self.timer.restart();
        self.countdown_epoch = self.countdown_epoch.wrapping_add(1);
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("state", &self.state)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("provisional", &self.provisional)
            .field("remaining", &self.timer.remaining())
            .field("countdown_epoch", &self.countdown_epoch)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
