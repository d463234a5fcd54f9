#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod timer;

pub use error::{Error, SessionError};
pub use session::{LockOutcome, QuizSession, SessionState, TickOutcome};
pub use timer::{QuestionTimer, TIMER_BUDGET_SECS, TimerTick};
