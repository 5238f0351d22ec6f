use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    AttemptStatus, Quiz, QuizAnswer, QuizAttempt, QuizQuestion, ScoreBreakdown,
};

#[derive(Debug, Clone, Serialize)]
pub struct QuizAttemptResponse {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    pub attempt_number: u32,
    pub status: AttemptStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub score: Option<f64>,
    pub total_points: Option<u32>,
    pub percentage: Option<f64>,
    pub is_passed: bool,
    pub time_taken_minutes: Option<i64>,
    pub answers: Vec<QuizAnswer>,
}

impl From<QuizAttempt> for QuizAttemptResponse {
    fn from(attempt: QuizAttempt) -> Self {
        QuizAttemptResponse {
            id: attempt.id,
            quiz_id: attempt.quiz_id,
            student_id: attempt.student_id,
            attempt_number: attempt.attempt_number,
            status: attempt.status,
            started_at: attempt.started_at,
            completed_at: attempt.completed_at,
            score: attempt.score,
            total_points: attempt.total_points,
            percentage: attempt.percentage,
            is_passed: attempt.is_passed,
            time_taken_minutes: attempt.time_taken_minutes,
            answers: attempt.answers,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StartAttemptResponse {
    pub message: String,
    pub resumed: bool,
    /// Advisory only; late submissions are still graded.
    pub deadline: DateTime<Utc>,
    pub attempt: QuizAttemptResponse,
}

#[derive(Debug, Serialize)]
pub struct SubmitAttemptResponse {
    pub message: String,
    pub attempt: QuizAttemptResponse,
    pub results: ScoreBreakdown,
}

#[derive(Debug, Serialize)]
pub struct BestScoreResponse {
    pub quiz_id: String,
    pub best_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CanAttemptResponse {
    pub quiz_id: String,
    pub can_attempt: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptSummary {
    pub quiz_id: String,
    pub attempts_count: usize,
    pub max_attempts: u32,
    pub best_score: Option<f64>,
    pub can_attempt: bool,
    pub in_progress_attempt_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaginationMetadata {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PaginationMetadata,
}

pub type PaginatedQuizAttempts = PaginatedResponse<QuizAttemptResponse>;

/// Quiz as shown to a student: correct flags are stripped.
#[derive(Debug, Clone, Serialize)]
pub struct QuizForTaking {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub time_limit_minutes: u32,
    pub max_attempts: u32,
    pub passing_score_percent: u32,
    pub total_points: u32,
    pub total_questions: usize,
    pub questions: Vec<QuestionForTaking>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionForTaking {
    pub id: String,
    pub text: String,
    pub question_type: &'static str,
    pub points: u32,
    pub order: u32,
    pub choices: Vec<ChoiceForTaking>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceForTaking {
    pub id: String,
    pub text: String,
    pub order: u32,
}

impl QuestionForTaking {
    fn from_question(question: &QuizQuestion) -> Self {
        let mut choices: Vec<ChoiceForTaking> = question
            .kind
            .choices()
            .iter()
            .map(|c| ChoiceForTaking {
                id: c.id.clone(),
                text: c.text.clone(),
                order: c.order,
            })
            .collect();
        choices.sort_by_key(|c| c.order);

        QuestionForTaking {
            id: question.id.clone(),
            text: question.text.clone(),
            question_type: question.kind.type_name(),
            points: question.points,
            order: question.order,
            choices,
        }
    }
}

impl QuizForTaking {
    pub fn from_quiz(quiz: &Quiz) -> Self {
        QuizForTaking {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            time_limit_minutes: quiz.time_limit_minutes,
            max_attempts: quiz.max_attempts,
            passing_score_percent: quiz.passing_score_percent,
            total_points: quiz.total_points(),
            total_questions: quiz.total_questions(),
            questions: quiz
                .ordered_questions()
                .into_iter()
                .map(QuestionForTaking::from_question)
                .collect(),
        }
    }
}
