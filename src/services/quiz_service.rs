use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::dto::response::QuizForTaking,
    repositories::QuizRepository,
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    /// Active quiz with its questions, without the answer key.
    pub async fn get_quiz_for_taking(&self, id: &str) -> AppResult<QuizForTaking> {
        let quiz = self
            .repository
            .find_active_by_id(id)
            .await?
            .ok_or_else(|| AppError::QuizNotFound(id.to_string()))?;

        Ok(QuizForTaking::from_quiz(&quiz))
    }
}
