use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AnswerInput {
    #[validate(length(min = 1, max = 64))]
    pub question_id: String,

    #[serde(default)]
    pub selected_choice_id: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10000))]
    pub text_answer: Option<String>,
}

impl AnswerInput {
    pub fn choice(question_id: &str, selected_choice_id: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            selected_choice_id: Some(selected_choice_id.to_string()),
            text_answer: None,
        }
    }

    pub fn text(question_id: &str, text_answer: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            selected_choice_id: None,
            text_answer: Some(text_answer.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SubmitAttemptRequest {
    #[validate(nested)]
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

/// Query string of the student's attempt history.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AttemptHistoryParams {
    #[validate(length(min = 1))]
    pub quiz_id: Option<String>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl AttemptHistoryParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            offset: self.offset,
            limit: self.limit,
        }
    }
}
