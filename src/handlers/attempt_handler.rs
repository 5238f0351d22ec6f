use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    identity::StudentIdentity,
    models::dto::{
        request::{AttemptHistoryParams, PaginationParams, SubmitAttemptRequest},
        response::{
            BestScoreResponse, CanAttemptResponse, QuizAttemptResponse, StartAttemptResponse,
            SubmitAttemptResponse,
        },
    },
};

#[post("/api/quizzes/{quiz_id}/start")]
pub async fn start_attempt(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    student: StudentIdentity,
) -> Result<HttpResponse, AppError> {
    let started = state
        .attempt_service
        .start_attempt(student.id(), &quiz_id)
        .await?;

    let resumed = started.outcome.is_resumed();
    let attempt = started.outcome.into_attempt();
    let body = StartAttemptResponse {
        message: if resumed {
            "Quiz already in progress".to_string()
        } else {
            "Quiz started successfully".to_string()
        },
        resumed,
        deadline: started.deadline,
        attempt: QuizAttemptResponse::from(attempt),
    };

    if resumed {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::Created().json(body))
    }
}

#[post("/api/quizzes/{quiz_id}/submit")]
pub async fn submit_attempt(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitAttemptRequest>,
    student: StudentIdentity,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let result = state
        .attempt_service
        .submit_attempt(student.id(), &quiz_id, &request.answers)
        .await?;

    Ok(HttpResponse::Ok().json(SubmitAttemptResponse {
        message: "Quiz submitted successfully".to_string(),
        attempt: QuizAttemptResponse::from(result.attempt),
        results: result.breakdown,
    }))
}

#[get("/api/quizzes/{quiz_id}/best-score")]
pub async fn best_score(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    student: StudentIdentity,
) -> Result<HttpResponse, AppError> {
    let quiz_id = quiz_id.into_inner();
    let best_score = state.attempt_service.best_score(student.id(), &quiz_id).await?;
    Ok(HttpResponse::Ok().json(BestScoreResponse { quiz_id, best_score }))
}

#[get("/api/quizzes/{quiz_id}/can-attempt")]
pub async fn can_attempt(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    student: StudentIdentity,
) -> Result<HttpResponse, AppError> {
    let quiz_id = quiz_id.into_inner();
    let can_attempt = state.attempt_service.can_attempt(student.id(), &quiz_id).await?;
    Ok(HttpResponse::Ok().json(CanAttemptResponse { quiz_id, can_attempt }))
}

#[get("/api/quizzes/{quiz_id}/summary")]
pub async fn attempt_summary(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    student: StudentIdentity,
) -> Result<HttpResponse, AppError> {
    let summary = state
        .attempt_service
        .attempt_summary(student.id(), &quiz_id)
        .await?;
    Ok(HttpResponse::Ok().json(summary))
}

// Faculty results view; the gateway decides who may call it.
#[get("/api/quizzes/{quiz_id}/attempts")]
pub async fn quiz_attempts(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    pagination.validate()?;

    let response = state
        .attempt_service
        .list_quiz_attempts(&quiz_id, &pagination)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/attempts")]
pub async fn my_attempts(
    state: web::Data<AppState>,
    query: web::Query<AttemptHistoryParams>,
    student: StudentIdentity,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;

    let response = state
        .attempt_service
        .list_student_attempts(student.id(), params.quiz_id.as_deref(), &params.pagination())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/attempts/{attempt_id}")]
pub async fn get_attempt(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
    student: StudentIdentity,
) -> Result<HttpResponse, AppError> {
    let attempt = state
        .attempt_service
        .get_attempt(student.id(), &attempt_id)
        .await?;
    Ok(HttpResponse::Ok().json(QuizAttemptResponse::from(attempt)))
}
