use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use quiz_core::model::{Question, QuizSettings, ResultsRecord};
use quiz_core::{QuizSession, TIMER_BUDGET_SECS};
use storage::repository::KeyValueStore;
use tracing::{debug, info, warn};

use crate::error::QuizError;
use crate::results_service::ResultsService;
use crate::settings_service::SettingsService;
use crate::source::{MIN_SOURCE_QUESTIONS, QuestionRequest, QuestionSource};

/// Where the questions of a started quiz came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    Fetched,
    /// Rebuilt from the stored results record.
    Resumed,
}

#[derive(Debug, Clone)]
pub struct StartedQuiz {
    pub session: QuizSession,
    pub settings: QuizSettings,
    pub origin: SessionOrigin,
}

#[derive(Debug, Clone)]
pub enum QuizStart {
    Ready(StartedQuiz),
    /// A newer start began while this one was fetching; its result was dropped.
    Superseded,
}

/// Orchestrates quiz start (resume or fetch) and persistence of results.
///
/// Every start takes a new generation ticket. A fetch whose ticket is no longer
/// current when it returns yields [`QuizStart::Superseded`].
#[derive(Clone)]
pub struct QuizLoopService {
    source: Arc<dyn QuestionSource>,
    settings: SettingsService,
    results: ResultsService,
    generation: Arc<AtomicU64>,
    timer_budget: u32,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            source,
            settings: SettingsService::new(Arc::clone(&kv)),
            results: ResultsService::new(kv),
            generation: Arc::new(AtomicU64::new(0)),
            timer_budget: TIMER_BUDGET_SECS,
        }
    }

    #[must_use]
    pub fn with_timer_budget(mut self, budget: u32) -> Self {
        self.timer_budget = budget;
        self
    }

    #[must_use]
    pub fn results(&self) -> &ResultsService {
        &self.results
    }

    /// Load the remembered settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Settings` on storage failures.
    pub async fn settings(&self) -> Result<QuizSettings, QuizError> {
        Ok(self.settings.load().await?)
    }

    /// Open the quiz view.
    ///
    /// Unless `restart` is set, a stored results record is resumed so the same
    /// questions can be retaken without a fetch. Otherwise a new question set
    /// is fetched with the remembered settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InsufficientData` or `QuizError::SourceUnavailable`
    /// when no question set could be obtained, or a storage error.
    pub async fn open(&self, restart: bool) -> Result<QuizStart, QuizError> {
        let settings = self.settings.load().await?;

        if !restart {
            if let Some(record) = self.results.stored().await? {
                if !record.is_empty() {
                    let session = self.session_over(record.questions())?;
                    // A resumed session is a start too; any fetch still in flight is stale.
                    let ticket = self.next_ticket();
                    info!(
                        ticket,
                        questions = session.total_questions(),
                        "resuming quiz from stored results"
                    );
                    return Ok(QuizStart::Ready(StartedQuiz {
                        session,
                        settings,
                        origin: SessionOrigin::Resumed,
                    }));
                }
            }
        }

        self.fetch(settings).await
    }

    /// Remember `settings` and fetch a new question set with them.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open).
    pub async fn start_fresh(&self, settings: QuizSettings) -> Result<QuizStart, QuizError> {
        self.settings.save(settings).await?;
        self.fetch(settings).await
    }

    /// Persist the record of a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Results` if the record cannot be stored.
    pub async fn finish(&self, record: &ResultsRecord) -> Result<(), QuizError> {
        self.results.save(record).await?;
        info!(
            score = record.score(),
            total = record.total(),
            "quiz completed"
        );
        Ok(())
    }

    async fn fetch(&self, settings: QuizSettings) -> Result<QuizStart, QuizError> {
        let ticket = self.next_ticket();
        debug!(
            ticket,
            amount = settings.amount.get(),
            difficulty = %settings.difficulty,
            "fetching question set"
        );

        let fetched = self.source.fetch(QuestionRequest::from(settings)).await;

        if self.generation.load(Ordering::Acquire) != ticket {
            debug!(ticket, "discarding stale question set");
            return Ok(QuizStart::Superseded);
        }

        let questions = fetched.inspect_err(|err| {
            warn!(error = %err, "question source failed");
        })?;
        if questions.len() < MIN_SOURCE_QUESTIONS {
            return Err(QuizError::InsufficientData {
                available: questions.len(),
                required: MIN_SOURCE_QUESTIONS,
            });
        }

        let session = self.session_over(questions)?;
        Ok(QuizStart::Ready(StartedQuiz {
            session,
            settings,
            origin: SessionOrigin::Fetched,
        }))
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn session_over(&self, questions: Vec<Question>) -> Result<QuizSession, QuizError> {
        let mut session = QuizSession::with_timer_budget(self.timer_budget);
        session.start(questions)?;
        Ok(session)
    }
}
