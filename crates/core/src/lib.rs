#![forbid(unsafe_code)]

pub mod game;
pub mod model;
pub mod session;
pub mod shuffle;

pub use game::{GamePhase, QuizGame, QuizResult};
pub use session::{
    AnswerTicket, OptionHighlight, QUESTION_TIME_SECS, QuizSession, REVEAL_DELAY, Resolution,
    STARTING_LIVES, SessionError, Submission, TickOutcome,
};
