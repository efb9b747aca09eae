use std::time::Duration;

use rand::Rng;
use thiserror::Error;

use crate::model::{Question, QuestionBank};
use crate::shuffle::shuffle;

/// Lives at the start of every session.
pub const STARTING_LIVES: u8 = 3;

/// Seconds allowed per question.
pub const QUESTION_TIME_SECS: u32 = 15;

/// How long the answer highlight stays on screen before the session moves on.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
}

/// Display state of one option of the current question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionHighlight {
    Neutral,
    Correct,
    Incorrect,
}

/// Proof that an answer was accepted; resolved after [`REVEAL_DELAY`].
///
/// A ticket only resolves while the session is still on the generation it
/// was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerTicket {
    generation: u64,
}

impl AnswerTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of an accepted answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Submission {
    pub correct: bool,
    pub ticket: AnswerTicket,
}

/// What happened once a question's outcome was settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Advanced { index: usize },
    Finished { score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Locked, finished, or the tick belongs to an older generation.
    Ignored,
    Counting { time_left: u32 },
    TimedOut(Resolution),
}

/// One playthrough: shuffled questions, score, lives and the per-question timer.
///
/// `generation` is bumped whenever the question changes or input is locked, so
/// ticks and answer tickets scheduled for an earlier state are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    index: usize,
    score: u32,
    lives: u8,
    time_left: u32,
    selected: Option<String>,
    locked: bool,
    finished: bool,
    generation: u64,
}

impl QuizSession {
    /// Create a session over `questions` in the given order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are given.
    pub fn new(questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self::fresh(questions))
    }

    /// Start a session from the bank: question order and each question's
    /// option order are shuffled independently.
    pub fn shuffled<R: Rng + ?Sized>(bank: &QuestionBank, rng: &mut R) -> Self {
        let mut questions = bank.questions().to_vec();
        shuffle(&mut questions, rng);
        for question in &mut questions {
            shuffle(question.options_mut(), rng);
        }

        Self::fresh(questions)
    }

    fn fresh(questions: Vec<Question>) -> Self {
        Self {
            questions,
            index: 0,
            score: 0,
            lives: STARTING_LIVES,
            time_left: QUESTION_TIME_SECS,
            selected: None,
            locked: false,
            finished: false,
            generation: 0,
        }
    }

    /// Continue numbering generations from `floor`, so work scheduled for an
    /// earlier session can never match this one.
    #[must_use]
    pub(crate) fn with_generation_floor(mut self, floor: u64) -> Self {
        self.generation = self.generation.max(floor);
        self
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question on screen, or `None` once the session has finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.finished {
            None
        } else {
            self.questions.get(self.index)
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn lives(&self) -> u8 {
        self.lives
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Generation the countdown should run for, or `None` while it must be stopped.
    #[must_use]
    pub fn timer_generation(&self) -> Option<u64> {
        (!self.locked && !self.finished).then_some(self.generation)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    /// Highlight for `option` of the current question.
    ///
    /// Everything is neutral until an option has been selected; afterwards the
    /// correct option is marked correct and a wrong selection incorrect.
    #[must_use]
    pub fn highlight(&self, option: &str) -> OptionHighlight {
        let (Some(selected), Some(question)) = (self.selected.as_deref(), self.current_question())
        else {
            return OptionHighlight::Neutral;
        };

        if question.is_correct(option) {
            OptionHighlight::Correct
        } else if option == selected {
            OptionHighlight::Incorrect
        } else {
            OptionHighlight::Neutral
        }
    }

    /// Answer the current question.
    ///
    /// Returns `None` when input is locked or the session is over. Otherwise
    /// input is locked until the returned ticket is resolved.
    pub fn submit(&mut self, option: &str) -> Option<Submission> {
        if self.locked || self.finished {
            return None;
        }
        let correct = self.questions.get(self.index)?.is_correct(option);

        if correct {
            self.score = self.score.saturating_add(1);
        } else {
            self.lives = self.lives.saturating_sub(1);
        }
        self.selected = Some(option.to_string());
        self.locked = true;
        self.generation += 1;

        Some(Submission {
            correct,
            ticket: AnswerTicket {
                generation: self.generation,
            },
        })
    }

    /// Settle a previously accepted answer.
    ///
    /// Returns `None` for stale tickets.
    pub fn resolve(&mut self, ticket: AnswerTicket) -> Option<Resolution> {
        if self.finished || !self.locked || ticket.generation != self.generation {
            return None;
        }
        Some(self.finish_or_advance())
    }

    /// Advance the countdown by one second.
    ///
    /// When the tick lands on the last second the question times out: one life
    /// is lost and the session advances or finishes.
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if self.timer_generation() != Some(generation) {
            return TickOutcome::Ignored;
        }

        if self.time_left <= 1 {
            self.lives = self.lives.saturating_sub(1);
            self.time_left = QUESTION_TIME_SECS;
            return TickOutcome::TimedOut(self.finish_or_advance());
        }

        self.time_left -= 1;
        TickOutcome::Counting {
            time_left: self.time_left,
        }
    }

    fn finish_or_advance(&mut self) -> Resolution {
        self.generation += 1;

        if self.is_last_question() || self.lives == 0 {
            self.finished = true;
            self.locked = true;
            return Resolution::Finished { score: self.score };
        }

        self.index += 1;
        self.selected = None;
        self.locked = false;
        self.time_left = QUESTION_TIME_SECS;
        Resolution::Advanced { index: self.index }
    }
}
