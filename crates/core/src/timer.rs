/// Seconds allowed per question before it is skipped automatically.
pub const TIMER_BUDGET_SECS: u32 = 30;

/// Result of advancing a [`QuestionTimer`] by one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// The timer is not running; nothing changed.
    Stopped,
    Running { remaining: u32 },
    /// The countdown just reached zero. Reported once per restart.
    Expired,
}

/// Per-question countdown driven by discrete ticks.
///
/// The timer has no notion of wall-clock time: each call to [`tick`](Self::tick)
/// consumes exactly one unit, however late it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTimer {
    budget: u32,
    remaining: u32,
    running: bool,
}

impl QuestionTimer {
    /// A stopped timer with the given budget (at least one unit).
    #[must_use]
    pub fn new(budget: u32) -> Self {
        let budget = budget.max(1);
        Self {
            budget,
            remaining: budget,
            running: false,
        }
    }

    #[must_use]
    pub fn budget(&self) -> u32 {
        self.budget
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Refill to the full budget and start counting.
    pub fn restart(&mut self) {
        self.remaining = self.budget;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TimerTick::Expired
        } else {
            TimerTick::Running {
                remaining: self.remaining,
            }
        }
    }
}

impl Default for QuestionTimer {
    fn default() -> Self {
        Self::new(TIMER_BUDGET_SECS)
    }
}
