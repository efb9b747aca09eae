use thiserror::Error;

use crate::model::question::{Question, QuestionDraft, QuestionError};

const BUILTIN_BANK: &str = include_str!("../../assets/questions.json");

/// Validated, non-empty list of questions loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question #{index} is invalid: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("question bank is empty")]
    Empty,
}

impl QuestionBank {
    /// Build a bank from drafts, validating each question.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Invalid` for the first invalid draft and
    /// `BankError::Empty` if no drafts are given.
    pub fn from_drafts(drafts: Vec<QuestionDraft>) -> Result<Self, BankError> {
        if drafts.is_empty() {
            return Err(BankError::Empty);
        }

        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .validate()
                    .map_err(|source| BankError::Invalid { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { questions })
    }

    /// Parse a bank from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Parse` for malformed JSON, otherwise the same
    /// errors as [`QuestionBank::from_drafts`].
    pub fn from_json(raw: &str) -> Result<Self, BankError> {
        let drafts: Vec<QuestionDraft> = serde_json::from_str(raw)?;
        Self::from_drafts(drafts)
    }

    /// The question bank bundled with the game.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the bundled file is malformed.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(BUILTIN_BANK)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
