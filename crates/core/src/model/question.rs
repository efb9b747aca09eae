use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Raw question as it appears in a question bank file.
///
/// Field names follow the bank's JSON shape (`question`, `options`,
/// `correctAnswer`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }

    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are fewer than two
    /// options, an option is blank or repeated, or the correct answer is not
    /// one of the options.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                len: self.options.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption);
            }
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }

        if !seen.contains(self.correct_answer.as_str()) {
            return Err(QuestionError::AnswerNotInOptions(self.correct_answer));
        }

        Ok(Question {
            prompt,
            options: self.options,
            correct_answer: self.correct_answer,
        })
    }
}

/// A validated multiple-choice question.
///
/// The correct answer is always one of `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }

    pub(crate) fn options_mut(&mut self) -> &mut [String] {
        &mut self.options
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("a question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option text is empty")]
    EmptyOption,

    #[error("option listed twice: {0}")]
    DuplicateOption(String),

    #[error("correct answer is not one of the options: {0}")]
    AnswerNotInOptions(String),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_well_formed_question() {
        let question = QuestionDraft::new("  2 + 2?  ", ["3", "4", "5"], "4")
            .validate()
            .unwrap();

        assert_eq!(question.prompt(), "2 + 2?");
        assert_eq!(question.options().len(), 3);
        assert!(question.is_correct("4"));
        assert!(!question.is_correct("5"));
    }

    #[test]
    fn rejects_blank_prompt() {
        let err = QuestionDraft::new("   ", ["a", "b"], "a")
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_single_option() {
        let err = QuestionDraft::new("Q", ["a"], "a").validate().unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { len: 1 });
    }

    #[test]
    fn rejects_duplicate_options() {
        let err = QuestionDraft::new("Q", ["a", "b", "a"], "a")
            .validate()
            .unwrap_err();
        assert_eq!(err, QuestionError::DuplicateOption("a".into()));
    }

    #[test]
    fn rejects_answer_outside_options() {
        let err = QuestionDraft::new("Q", ["a", "b"], "c")
            .validate()
            .unwrap_err();
        assert!(matches!(err, QuestionError::AnswerNotInOptions(_)));
    }

    #[test]
    fn deserializes_bank_field_names() {
        let json = r#"{ "question": "Q", "options": ["a", "b"], "correctAnswer": "b" }"#;
        let draft: QuestionDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft, QuestionDraft::new("Q", ["a", "b"], "b"));
    }
}
