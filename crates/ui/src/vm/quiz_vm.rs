use quiz_core::model::ResultsRecord;
use quiz_core::{LockOutcome, QuizSession, TickOutcome};

/// User (or timer) input to the running quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Lock,
    Skip,
    Previous,
    Tick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Completed(ResultsRecord),
}

/// Feed one intent to the session and report whether it finished the quiz.
pub fn apply_intent(session: &mut QuizSession, intent: QuizIntent) -> QuizOutcome {
    let locked = match intent {
        QuizIntent::Select(option) => {
            session.select(option);
            None
        }
        QuizIntent::Lock => session.lock(),
        QuizIntent::Skip => session.skip(),
        QuizIntent::Previous => {
            session.previous();
            None
        }
        QuizIntent::Tick => match session.tick() {
            TickOutcome::TimedOut(outcome) => Some(outcome),
            TickOutcome::Stopped | TickOutcome::Running { .. } => None,
        },
    };

    match locked {
        Some(LockOutcome::Completed(record)) => QuizOutcome::Completed(record),
        Some(LockOutcome::Advanced { .. }) | None => QuizOutcome::Continue,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

impl QuizOptionVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.selected {
            "option selected"
        } else {
            "option"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionScreenVm {
    pub prompt: String,
    pub options: Vec<QuizOptionVm>,
    pub position_label: String,
    pub timer_label: String,
    pub progress_pct: u8,
    pub can_go_back: bool,
    pub can_lock: bool,
    pub lock_label: &'static str,
}

#[must_use]
pub fn format_timer(seconds: u32) -> String {
    format!("Time: {seconds}s")
}

/// Key for the countdown driving `session`: `None` while nothing counts down,
/// otherwise a value that changes on every question transition.
#[must_use]
pub fn countdown_key(session: &QuizSession) -> Option<u64> {
    session
        .timer_running()
        .then(|| session.countdown_epoch())
}

/// Project the current question of an active session for display.
#[must_use]
pub fn map_question_screen(session: &QuizSession) -> Option<QuestionScreenVm> {
    let question = session.current_question()?;
    let provisional = session.provisional();
    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(index, label)| QuizOptionVm {
            index,
            label: label.clone(),
            selected: provisional == Some(index),
        })
        .collect();

    Some(QuestionScreenVm {
        prompt: question.prompt().to_string(),
        options,
        position_label: format!(
            "Question {} of {}",
            session.current_index() + 1,
            session.total_questions()
        ),
        timer_label: format_timer(session.remaining_secs()),
        progress_pct: session.progress_pct(),
        can_go_back: session.current_index() > 0,
        can_lock: provisional.is_some(),
        lock_label: if session.is_last_question() {
            "Finish"
        } else {
            "Next"
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Question;

    fn build_session(count: usize) -> QuizSession {
        let questions = (0..count)
            .map(|id| {
                Question::new(
                    format!("Q{id}"),
                    vec!["A".into(), "B".into(), "C".into()],
                    1,
                )
                .unwrap()
            })
            .collect();
        QuizSession::started(questions).unwrap()
    }

    #[test]
    fn screen_reflects_selection_and_position() {
        let mut session = build_session(2);
        let screen = map_question_screen(&session).unwrap();
        assert_eq!(screen.position_label, "Question 1 of 2");
        assert_eq!(screen.timer_label, "Time: 30s");
        assert!(!screen.can_lock);
        assert!(!screen.can_go_back);
        assert_eq!(screen.lock_label, "Next");

        apply_intent(&mut session, QuizIntent::Select(2));
        let screen = map_question_screen(&session).unwrap();
        assert!(screen.can_lock);
        assert!(screen.options[2].selected);
        assert!(!screen.options[0].selected);
    }

    #[test]
    fn last_question_offers_finish() {
        let mut session = build_session(2);
        assert_eq!(apply_intent(&mut session, QuizIntent::Skip), QuizOutcome::Continue);

        let screen = map_question_screen(&session).unwrap();
        assert_eq!(screen.lock_label, "Finish");
        assert!(screen.can_go_back);
        assert_eq!(screen.progress_pct, 50);
    }

    #[test]
    fn locking_the_last_question_completes() {
        let mut session = build_session(2);
        apply_intent(&mut session, QuizIntent::Select(1));
        apply_intent(&mut session, QuizIntent::Lock);
        apply_intent(&mut session, QuizIntent::Select(0));

        let QuizOutcome::Completed(record) = apply_intent(&mut session, QuizIntent::Lock) else {
            panic!("expected completion");
        };
        assert_eq!(record.score(), 1);
        assert_eq!(record.total(), 2);
        assert!(map_question_screen(&session).is_none());
    }

    #[test]
    fn countdown_key_changes_per_question_not_per_tick() {
        let mut session = build_session(3);
        let first = countdown_key(&session);
        assert!(first.is_some());

        apply_intent(&mut session, QuizIntent::Tick);
        assert_eq!(countdown_key(&session), first);

        apply_intent(&mut session, QuizIntent::Select(0));
        apply_intent(&mut session, QuizIntent::Lock);
        let second = countdown_key(&session);
        assert_ne!(second, first);

        apply_intent(&mut session, QuizIntent::Previous);
        assert_ne!(countdown_key(&session), second);

        for _ in 0..3 {
            apply_intent(&mut session, QuizIntent::Skip);
        }
        assert!(session.is_complete());
        assert_eq!(countdown_key(&session), None);
    }

    #[test]
    fn tick_to_zero_times_out() {
        let questions = vec![Question::new("Q", vec!["A".into(), "B".into()], 0).unwrap()];
        let mut session = QuizSession::with_timer_budget(1);
        session.start(questions).unwrap();

        let QuizOutcome::Completed(record) = apply_intent(&mut session, QuizIntent::Tick) else {
            panic!("expected timeout to complete");
        };
        assert!(record.answers()[0].is_skipped());
        assert_eq!(apply_intent(&mut session, QuizIntent::Tick), QuizOutcome::Continue);
    }
}
