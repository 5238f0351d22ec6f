use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizAttempt, ScoreBreakdown},
        dto::{
            request::{AnswerInput, PaginationParams},
            response::{AttemptSummary, PaginatedQuizAttempts, PaginationMetadata, QuizAttemptResponse},
        },
    },
    repositories::{QuizAttemptRepository, QuizRepository},
    services::{attempt_locks::AttemptLocks, grading::grade_submission},
};

/// Store conflicts tolerated while starting an attempt before giving up.
const MAX_START_CONFLICTS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    Created(QuizAttempt),
    /// The student already had an open attempt; nothing was written.
    Resumed(QuizAttempt),
}

impl StartOutcome {
    pub fn attempt(&self) -> &QuizAttempt {
        match self {
            StartOutcome::Created(attempt) | StartOutcome::Resumed(attempt) => attempt,
        }
    }

    pub fn into_attempt(self) -> QuizAttempt {
        match self {
            StartOutcome::Created(attempt) | StartOutcome::Resumed(attempt) => attempt,
        }
    }

    pub fn is_resumed(&self) -> bool {
        matches!(self, StartOutcome::Resumed(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartedAttempt {
    pub outcome: StartOutcome,
    /// Advisory end of the quiz's time limit; not enforced on submit.
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub attempt: QuizAttempt,
    pub breakdown: ScoreBreakdown,
}

pub struct QuizAttemptService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    locks: AttemptLocks,
}

impl QuizAttemptService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, attempts: Arc<dyn QuizAttemptRepository>) -> Self {
        Self {
            quizzes,
            attempts,
            locks: AttemptLocks::new(),
        }
    }

    async fn active_quiz(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_active_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::QuizNotFound(quiz_id.to_string()))
    }

    async fn any_quiz(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::QuizNotFound(quiz_id.to_string()))
    }

    /// Open a new attempt, or hand back the one already in progress.
    pub async fn start_attempt(&self, student_id: &str, quiz_id: &str) -> AppResult<StartedAttempt> {
        let quiz = self.active_quiz(quiz_id).await?;
        let outcome = self.admit(&quiz, student_id).await?;
        let deadline = quiz.deadline_for(outcome.attempt().started_at);

        Ok(StartedAttempt { outcome, deadline })
    }

    async fn admit(&self, quiz: &Quiz, student_id: &str) -> AppResult<StartOutcome> {
        let quiz_id = quiz.id.as_str();
        let _guard = self.locks.acquire(student_id, quiz_id).await;

        for _ in 0..MAX_START_CONFLICTS {
            if let Some(open) = self.attempts.find_open(student_id, quiz_id).await? {
                log::info!(
                    "Resuming attempt {} of student {} on quiz {}",
                    open.id,
                    student_id,
                    quiz_id
                );
                return Ok(StartOutcome::Resumed(open));
            }

            let used = self.attempts.count_user_attempts(student_id, quiz_id).await?;
            if used >= quiz.max_attempts as usize {
                log::info!(
                    "Student {} has used {}/{} attempts on quiz {}",
                    student_id,
                    used,
                    quiz.max_attempts,
                    quiz_id
                );
                return Err(AppError::AttemptLimitExceeded(quiz.max_attempts));
            }

            let attempt = QuizAttempt::open(student_id, quiz_id, used as u32 + 1, Utc::now());
            match self.attempts.create(attempt).await {
                Ok(created) => {
                    log::info!(
                        "Started attempt {} (#{}) of student {} on quiz {}",
                        created.id,
                        created.attempt_number,
                        student_id,
                        quiz_id
                    );
                    return Ok(StartOutcome::Created(created));
                }
                // Another process won the race; re-read and decide again.
                Err(AppError::AlreadyExists(reason)) => {
                    log::warn!(
                        "Concurrent start for student {} on quiz {}: {}",
                        student_id,
                        quiz_id,
                        reason
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Err(AppError::InternalError(format!(
            "could not start attempt on quiz '{}' after repeated conflicts",
            quiz_id
        )))
    }

    /// Grade the open attempt and complete it in one write.
    pub async fn submit_attempt(
        &self,
        student_id: &str,
        quiz_id: &str,
        answers: &[AnswerInput],
    ) -> AppResult<SubmissionResult> {
        let quiz = self.active_quiz(quiz_id).await?;
        let _guard = self.locks.acquire(student_id, quiz_id).await;

        let attempt = self
            .attempts
            .find_open(student_id, quiz_id)
            .await?
            .ok_or_else(|| AppError::NoActiveAttempt(quiz_id.to_string()))?;

        let graded = grade_submission(&quiz, answers)?;

        let completed_at = Utc::now();
        let breakdown = ScoreBreakdown::compute(
            graded.earned_points,
            graded.total_points,
            quiz.passing_score_percent,
            attempt.started_at,
            completed_at,
        );
        let completed = attempt.complete(graded.answers, &breakdown, completed_at)?;

        if !self.attempts.complete(&completed).await? {
            log::warn!(
                "Attempt {} was completed concurrently; discarding this submission",
                completed.id
            );
            return Err(AppError::NoActiveAttempt(quiz_id.to_string()));
        }

        log::info!(
            "Completed attempt {} of student {} on quiz {}: {}/{} ({:.2}%), passed={}",
            completed.id,
            student_id,
            quiz_id,
            breakdown.score,
            breakdown.total_points,
            breakdown.percentage,
            breakdown.is_passed
        );

        Ok(SubmissionResult {
            attempt: completed,
            breakdown,
        })
    }

    /// Highest percentage over completed attempts; open attempts never count.
    pub async fn best_score(&self, student_id: &str, quiz_id: &str) -> AppResult<Option<f64>> {
        self.attempts.best_percentage(student_id, quiz_id).await
    }

    pub async fn can_attempt(&self, student_id: &str, quiz_id: &str) -> AppResult<bool> {
        let quiz = self.any_quiz(quiz_id).await?;
        let used = self.attempts.count_user_attempts(student_id, quiz_id).await?;
        Ok(used < quiz.max_attempts as usize)
    }

    pub async fn attempt_summary(&self, student_id: &str, quiz_id: &str) -> AppResult<AttemptSummary> {
        let quiz = self.any_quiz(quiz_id).await?;
        let attempts_count = self.attempts.count_user_attempts(student_id, quiz_id).await?;
        let best_score = self.attempts.best_percentage(student_id, quiz_id).await?;
        let in_progress = self.attempts.find_open(student_id, quiz_id).await?;

        Ok(AttemptSummary {
            quiz_id: quiz.id,
            attempts_count,
            max_attempts: quiz.max_attempts,
            best_score,
            can_attempt: attempts_count < quiz.max_attempts as usize,
            in_progress_attempt_id: in_progress.map(|attempt| attempt.id),
        })
    }

    pub async fn list_student_attempts(
        &self,
        student_id: &str,
        quiz_id: Option<&str>,
        pagination: &PaginationParams,
    ) -> AppResult<PaginatedQuizAttempts> {
        let (offset, limit) = (pagination.offset(), pagination.limit());
        let (attempts, total) = self
            .attempts
            .get_user_attempts(student_id, quiz_id, offset, limit)
            .await?;

        Ok(paginated(attempts, offset, limit, total))
    }

    pub async fn list_quiz_attempts(
        &self,
        quiz_id: &str,
        pagination: &PaginationParams,
    ) -> AppResult<PaginatedQuizAttempts> {
        self.any_quiz(quiz_id).await?;

        let (offset, limit) = (pagination.offset(), pagination.limit());
        let (attempts, total) = self.attempts.get_quiz_attempts(quiz_id, offset, limit).await?;

        Ok(paginated(attempts, offset, limit, total))
    }

    /// A student can only read their own attempts.
    pub async fn get_attempt(&self, student_id: &str, attempt_id: &str) -> AppResult<QuizAttempt> {
        self.attempts
            .find_by_id(attempt_id)
            .await?
            .filter(|attempt| attempt.student_id == student_id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz attempt '{}' not found", attempt_id)))
    }
}

fn paginated(attempts: Vec<QuizAttempt>, offset: i64, limit: i64, total: i64) -> PaginatedQuizAttempts {
    PaginatedQuizAttempts {
        data: attempts.into_iter().map(QuizAttemptResponse::from).collect(),
        pagination: PaginationMetadata {
            offset,
            limit,
            total,
        },
    }
}
