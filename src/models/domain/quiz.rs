use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::QuizQuestion;

/// Graded assessment as published by the question bank. Read-only here.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub max_attempts: u32,
    pub passing_score_percent: u32,
    pub time_limit_minutes: u32,
    pub is_active: bool,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn find_question(&self, question_id: &str) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn total_points(&self) -> u32 {
        self.questions
            .iter()
            .fold(0u32, |total, q| total.saturating_add(q.points))
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Advisory deadline for an attempt started at `started_at`.
    pub fn deadline_for(&self, started_at: DateTime<Utc>) -> DateTime<Utc> {
        started_at + Duration::minutes(i64::from(self.time_limit_minutes))
    }

    /// Questions in presentation order.
    pub fn ordered_questions(&self) -> Vec<&QuizQuestion> {
        let mut questions: Vec<&QuizQuestion> = self.questions.iter().collect();
        questions.sort_by_key(|q| q.order);
        questions
    }
}
