use quiz_core::QuizResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score: u32,
    pub total_questions: usize,
    pub high_score: u32,
    pub out_of_lives: bool,
}

#[must_use]
pub fn map_result(result: QuizResult, high_score: u32) -> ResultVm {
    ResultVm {
        score: result.score,
        total_questions: result.total_questions,
        high_score,
        out_of_lives: result.lives_left == 0,
    }
}
