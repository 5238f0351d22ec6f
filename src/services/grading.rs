use std::collections::HashSet;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{QuestionKind, Quiz, QuizAnswer},
        dto::request::AnswerInput,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct GradedSubmission {
    pub answers: Vec<QuizAnswer>,
    pub earned_points: f64,
    pub total_points: u32,
}

/// Grade every submitted answer against `quiz`.
///
/// The whole submission is rejected if any answer names a question outside the
/// quiz or answers a question twice. Wrong or blank answers are graded, not errors.
/// Only submitted questions count towards `total_points`.
pub fn grade_submission(quiz: &Quiz, submitted: &[AnswerInput]) -> AppResult<GradedSubmission> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(submitted.len());
    let mut answers = Vec::with_capacity(submitted.len());
    let mut earned_points = 0.0;
    let mut total_points: u32 = 0;

    for input in submitted {
        let question = quiz.find_question(&input.question_id).ok_or_else(|| {
            AppError::InvalidQuestion(format!(
                "question '{}' does not belong to quiz '{}'",
                input.question_id, quiz.id
            ))
        })?;

        if !seen.insert(question.id.as_str()) {
            return Err(AppError::DuplicateAnswer(question.id.clone()));
        }

        if !matches!(question.kind, QuestionKind::ShortAnswer) && !question.is_scoreable() {
            log::warn!(
                "Question '{}' of quiz '{}' does not have exactly one correct choice",
                question.id,
                quiz.id
            );
        }

        let outcome = question.grade(input.selected_choice_id.as_deref());
        total_points = total_points.saturating_add(question.points);
        earned_points += outcome.points_earned;

        answers.push(QuizAnswer {
            question_id: question.id.clone(),
            selected_choice_id: input.selected_choice_id.clone(),
            text_answer: input.text_answer.clone(),
            is_correct: outcome.is_correct,
            points_earned: outcome.points_earned,
        });
    }

    Ok(GradedSubmission {
        answers,
        earned_points,
        total_points,
    })
}
