mod bank;
mod question;

pub use bank::{BankError, QuestionBank};
pub use question::{Question, QuestionDraft, QuestionError};
