use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, identity::StudentIdentity};

#[get("/api/quizzes/{quiz_id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    _student: StudentIdentity,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz_for_taking(&quiz_id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}
