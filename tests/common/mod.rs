#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use quiz_attempt_server::{
    errors::{AppError, AppResult},
    models::{
        domain::{AttemptStatus, QuestionKind, Quiz, QuizAttempt, QuizChoice, QuizQuestion},
        dto::request::AnswerInput,
    },
    repositories::{QuizAttemptRepository, QuizRepository},
    services::quiz_attempt_service::QuizAttemptService,
};

pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn insert(&self, quiz: Quiz) {
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }

    async fn find_active_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).filter(|quiz| quiz.is_active).cloned())
    }
}

/// Mirrors the unique indexes of the Mongo store: one open attempt per
/// (student, quiz) and a unique attempt number per (student, quiz).
pub struct InMemoryQuizAttemptRepository {
    attempts: Arc<RwLock<HashMap<String, QuizAttempt>>>,
}

impl InMemoryQuizAttemptRepository {
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn all(&self) -> Vec<QuizAttempt> {
        self.attempts.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: &str) -> Option<QuizAttempt> {
        self.attempts.read().await.get(id).cloned()
    }
}

fn page(mut items: Vec<QuizAttempt>, offset: i64, limit: i64) -> (Vec<QuizAttempt>, i64) {
    items.sort_by(|a, b| b.started_at.cmp(&a.started_at));

    let total = items.len() as i64;
    let start = offset.max(0) as usize;
    let end = (start + limit.max(0) as usize).min(items.len());

    let page = if start >= items.len() {
        vec![]
    } else {
        items[start..end].to_vec()
    };

    (page, total)
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        let mut attempts = self.attempts.write().await;
        if attempts.contains_key(&attempt.id) {
            return Err(AppError::AlreadyExists(format!(
                "Attempt with id '{}' already exists",
                attempt.id
            )));
        }

        let same_pair = |a: &&QuizAttempt| {
            a.student_id == attempt.student_id && a.quiz_id == attempt.quiz_id
        };
        if attempts
            .values()
            .filter(same_pair)
            .any(|a| a.attempt_number == attempt.attempt_number)
        {
            return Err(AppError::AlreadyExists(format!(
                "Attempt number {} already used",
                attempt.attempt_number
            )));
        }
        if attempt.is_open() && attempts.values().filter(same_pair).any(|a| a.is_open()) {
            return Err(AppError::AlreadyExists(
                "An open attempt already exists".to_string(),
            ));
        }

        attempts.insert(attempt.id.clone(), attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.get(id).cloned())
    }

    async fn find_open(&self, student_id: &str, quiz_id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .values()
            .find(|a| a.student_id == student_id && a.quiz_id == quiz_id && a.is_open())
            .cloned())
    }

    async fn count_user_attempts(&self, student_id: &str, quiz_id: &str) -> AppResult<usize> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .values()
            .filter(|a| a.student_id == student_id && a.quiz_id == quiz_id)
            .count())
    }

    async fn best_percentage(&self, student_id: &str, quiz_id: &str) -> AppResult<Option<f64>> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .values()
            .filter(|a| a.student_id == student_id && a.quiz_id == quiz_id)
            .filter(|a| a.status == AttemptStatus::Completed)
            .filter_map(|a| a.percentage)
            .fold(None, |best: Option<f64>, p| Some(best.map_or(p, |b| b.max(p)))))
    }

    async fn complete(&self, attempt: &QuizAttempt) -> AppResult<bool> {
        let mut attempts = self.attempts.write().await;
        match attempts.get(&attempt.id) {
            Some(stored) if stored.is_open() => {
                attempts.insert(attempt.id.clone(), attempt.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get_user_attempts(
        &self,
        student_id: &str,
        quiz_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        let attempts = self.attempts.read().await;
        let items: Vec<_> = attempts
            .values()
            .filter(|a| a.student_id == student_id && quiz_id.map(|qid| a.quiz_id == qid).unwrap_or(true))
            .cloned()
            .collect();

        Ok(page(items, offset, limit))
    }

    async fn get_quiz_attempts(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        let attempts = self.attempts.read().await;
        let items: Vec<_> = attempts
            .values()
            .filter(|a| a.quiz_id == quiz_id)
            .cloned()
            .collect();

        Ok(page(items, offset, limit))
    }
}

pub fn choice_question(id: &str, points: u32, order: u32) -> QuizQuestion {
    let choices = ["a", "b", "c"]
        .iter()
        .enumerate()
        .map(|(index, suffix)| QuizChoice {
            id: format!("{}-{}", id, suffix),
            text: format!("Option {}", suffix),
            is_correct: *suffix == "a",
            order: index as u32,
        })
        .collect();

    QuizQuestion {
        id: id.to_string(),
        text: format!("Question {}", id),
        points,
        order,
        kind: QuestionKind::MultipleChoice { choices },
    }
}

/// Two questions: `q-1` worth 5 and `q-2` worth 10. Choice `{question}-a` is correct.
pub fn make_quiz(id: &str, max_attempts: u32, passing_score_percent: u32) -> Quiz {
    Quiz {
        id: id.to_string(),
        title: format!("Quiz {}", id),
        description: None,
        max_attempts,
        passing_score_percent,
        time_limit_minutes: 30,
        is_active: true,
        questions: vec![choice_question("q-1", 5, 1), choice_question("q-2", 10, 2)],
        created_at: Some(Utc::now()),
        modified_at: None,
    }
}

pub fn correct(question_id: &str) -> AnswerInput {
    AnswerInput::choice(question_id, &format!("{}-a", question_id))
}

pub fn wrong(question_id: &str) -> AnswerInput {
    AnswerInput::choice(question_id, &format!("{}-b", question_id))
}

/// An open attempt that began `minutes_ago` minutes in the past.
pub fn open_attempt_started(student_id: &str, quiz_id: &str, attempt_number: u32, minutes_ago: i64) -> QuizAttempt {
    QuizAttempt::open(
        student_id,
        quiz_id,
        attempt_number,
        Utc::now() - Duration::minutes(minutes_ago),
    )
}

pub struct Harness {
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub attempts: Arc<InMemoryQuizAttemptRepository>,
    pub service: QuizAttemptService,
}

impl Harness {
    pub async fn with_quizzes(quizzes: Vec<Quiz>) -> Self {
        let quiz_repository = Arc::new(InMemoryQuizRepository::new());
        for quiz in quizzes {
            quiz_repository.insert(quiz).await;
        }
        let attempt_repository = Arc::new(InMemoryQuizAttemptRepository::new());

        let service = QuizAttemptService::new(quiz_repository.clone(), attempt_repository.clone());

        Self {
            quizzes: quiz_repository,
            attempts: attempt_repository,
            service,
        }
    }

    /// A second service over the same stores, as another server process would see them.
    pub fn sibling_service(&self) -> QuizAttemptService {
        QuizAttemptService::new(self.quizzes.clone(), self.attempts.clone())
    }
}
