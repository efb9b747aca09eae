use std::time::Duration;

use quiz_core::{AnswerTicket, REVEAL_DELAY};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Countdown resolution.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Work that fires later and is handed back to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizEvent {
    Tick { generation: u64 },
    Reveal(AnswerTicket),
}

/// Owns the countdown task and the pending reveal task.
///
/// Tasks only post `QuizEvent`s; they never touch game state. Re-arming
/// aborts the previous task, and dropping the scheduler aborts both.
pub struct Scheduler {
    events: UnboundedSender<QuizEvent>,
    ticker: Option<JoinHandle<()>>,
    reveal: Option<JoinHandle<()>>,
}

impl Scheduler {
    #[must_use]
    pub fn new(events: UnboundedSender<QuizEvent>) -> Self {
        Self {
            events,
            ticker: None,
            reveal: None,
        }
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start a fresh countdown for `generation`, replacing any running one.
    ///
    /// The first tick fires one full period after arming.
    pub fn arm_ticker(&mut self, generation: u64) {
        self.cancel_ticker();

        let events = self.events.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(QuizEvent::Tick { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    /// Post `ticket` back once the reveal delay has passed.
    pub fn schedule_reveal(&mut self, ticket: AnswerTicket) {
        self.cancel_reveal();

        let events = self.events.clone();
        self.reveal = Some(tokio::spawn(async move {
            time::sleep(REVEAL_DELAY).await;
            let _ = events.send(QuizEvent::Reveal(ticket));
        }));
    }

    pub fn cancel_ticker(&mut self) {
        if let Some(task) = self.ticker.take() {
            task.abort();
        }
    }

    pub fn cancel_reveal(&mut self) {
        if let Some(task) = self.reveal.take() {
            task.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        self.cancel_ticker();
        self.cancel_reveal();
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
