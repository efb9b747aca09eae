use quiz_core::{OptionHighlight, QuizSession};

const HEART: char = '❤';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreenVm {
    pub question_number: usize,
    pub total_questions: usize,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub lives: u8,
    pub hearts: String,
    pub score: u32,
    pub time_left: u32,
    pub locked: bool,
}

/// CSS class for an answer button.
#[must_use]
pub fn highlight_class(highlight: OptionHighlight) -> &'static str {
    match highlight {
        OptionHighlight::Neutral => "option",
        OptionHighlight::Correct => "option correct",
        OptionHighlight::Incorrect => "option incorrect",
    }
}

/// Returns `None` once the session has no current question.
#[must_use]
pub fn map_quiz_screen(session: &QuizSession) -> Option<QuizScreenVm> {
    let question = session.current_question()?;
    let options = question
        .options()
        .iter()
        .map(|option| OptionVm {
            label: option.clone(),
            class: highlight_class(session.highlight(option)),
        })
        .collect();

    Some(QuizScreenVm {
        question_number: session.index() + 1,
        total_questions: session.total_questions(),
        prompt: question.prompt().to_string(),
        options,
        lives: session.lives(),
        hearts: std::iter::repeat_n(HEART, usize::from(session.lives())).collect(),
        score: session.score(),
        time_left: session.time_left(),
        locked: session.is_locked(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;

    fn session() -> QuizSession {
        let question = QuestionDraft::new("2 + 2?", ["3", "4", "5"], "4")
            .validate()
            .unwrap();
        let other = QuestionDraft::new("Sky?", ["blue", "green"], "blue")
            .validate()
            .unwrap();
        QuizSession::new(vec![question, other]).unwrap()
    }

    #[test]
    fn fresh_question_is_neutral_and_unlocked() {
        let vm = map_quiz_screen(&session()).unwrap();
        assert_eq!(vm.question_number, 1);
        assert_eq!(vm.total_questions, 2);
        assert_eq!(vm.hearts, "❤❤❤");
        assert_eq!(vm.time_left, 15);
        assert!(!vm.locked);
        assert!(vm.options.iter().all(|option| option.class == "option"));
    }

    #[test]
    fn wrong_answer_marks_both_options() {
        let mut session = session();
        session.submit("5").unwrap();
        let vm = map_quiz_screen(&session).unwrap();
        let classes: Vec<_> = vm.options.iter().map(|option| option.class).collect();
        assert_eq!(classes, ["option", "option correct", "option incorrect"]);
        assert_eq!(vm.hearts, "❤❤");
        assert!(vm.locked);
    }
}
