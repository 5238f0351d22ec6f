use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    Open,
    Completed,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::Open => "open",
            AttemptStatus::Completed => "completed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub student_id: String,
    pub quiz_id: String,
    pub attempt_number: u32,
    pub status: AttemptStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub score: Option<f64>,
    pub total_points: Option<u32>,
    pub percentage: Option<f64>,
    pub is_passed: bool,
    pub time_taken_minutes: Option<i64>,
    #[serde(default)]
    pub answers: Vec<QuizAnswer>,
}

/// One graded answer. Written once, together with the attempt it completes.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAnswer {
    pub question_id: String,
    pub selected_choice_id: Option<String>,
    pub text_answer: Option<String>,
    pub is_correct: bool,
    pub points_earned: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub total_points: u32,
    pub percentage: f64,
    pub is_passed: bool,
    pub time_taken_minutes: i64,
}

impl ScoreBreakdown {
    /// `percentage` is 0 when nothing was worth points. Time is floored to whole minutes.
    pub fn compute(
        earned_points: f64,
        total_points: u32,
        passing_score_percent: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let percentage = if total_points > 0 {
            earned_points * 100.0 / f64::from(total_points)
        } else {
            0.0
        };

        Self {
            score: earned_points,
            total_points,
            percentage,
            is_passed: percentage >= f64::from(passing_score_percent),
            time_taken_minutes: (completed_at - started_at).num_minutes().max(0),
        }
    }
}

impl QuizAttempt {
    pub fn open(student_id: &str, quiz_id: &str, attempt_number: u32, started_at: DateTime<Utc>) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            quiz_id: quiz_id.to_string(),
            attempt_number,
            status: AttemptStatus::Open,
            started_at,
            completed_at: None,
            score: None,
            total_points: None,
            percentage: None,
            is_passed: false,
            time_taken_minutes: None,
            answers: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == AttemptStatus::Open
    }

    /// OPEN -> COMPLETED. A completed attempt is never reopened or regraded.
    pub fn complete(
        self,
        answers: Vec<QuizAnswer>,
        breakdown: &ScoreBreakdown,
        completed_at: DateTime<Utc>,
    ) -> AppResult<QuizAttempt> {
        match self.status {
            AttemptStatus::Open => Ok(QuizAttempt {
                status: AttemptStatus::Completed,
                completed_at: Some(completed_at),
                score: Some(breakdown.score),
                total_points: Some(breakdown.total_points),
                percentage: Some(breakdown.percentage),
                is_passed: breakdown.is_passed,
                time_taken_minutes: Some(breakdown.time_taken_minutes),
                answers,
                ..self
            }),
            AttemptStatus::Completed => Err(AppError::NoActiveAttempt(self.quiz_id)),
        }
    }
}
