use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{AttemptStatus, QuizAttempt},
};

/// Attempt storage.
///
/// Implementations must enforce two uniqueness rules and report a violation
/// as `AppError::AlreadyExists`:
/// - at most one `Open` attempt per (student, quiz);
/// - `attempt_number` is unique per (student, quiz).
///
/// `complete` must only replace an attempt that is still `Open`, in one write.
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>>;
    async fn find_open(&self, student_id: &str, quiz_id: &str) -> AppResult<Option<QuizAttempt>>;
    async fn count_user_attempts(&self, student_id: &str, quiz_id: &str) -> AppResult<usize>;
    async fn best_percentage(&self, student_id: &str, quiz_id: &str) -> AppResult<Option<f64>>;
    /// Returns `false` when no open attempt with that id was left to complete.
    async fn complete(&self, attempt: &QuizAttempt) -> AppResult<bool>;
    async fn get_user_attempts(
        &self,
        student_id: &str,
        quiz_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)>;
    async fn get_quiz_attempts(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let attempt_number_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "quiz_id": 1, "attempt_number": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_quiz_attempt_number_unique".to_string())
                    .build(),
            )
            .build();

        let open_attempt_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "status": AttemptStatus::Open.as_str() })
                    .name("student_quiz_open_unique".to_string())
                    .build(),
            )
            .build();

        let student_history_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "started_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("student_started_at".to_string())
                    .build(),
            )
            .build();

        let quiz_history_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "started_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("quiz_started_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(attempt_number_index).await?;
        self.collection.create_index(open_attempt_index).await?;
        self.collection.create_index(student_history_index).await?;
        self.collection.create_index(quiz_history_index).await?;

        log::info!("Successfully created indexes for quiz_attempts collection");
        Ok(())
    }

    async fn paginate(
        &self,
        filter: Document,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        let total = self.collection.count_documents(filter.clone()).await?;

        let attempts = self
            .collection
            .find(filter)
            .skip(offset.max(0) as u64)
            .limit(limit)
            .sort(doc! { "started_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok((attempts, total as i64))
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn find_open(&self, student_id: &str, quiz_id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempt = self
            .collection
            .find_one(doc! {
                "student_id": student_id,
                "quiz_id": quiz_id,
                "status": AttemptStatus::Open.as_str(),
            })
            .await?;
        Ok(attempt)
    }

    async fn count_user_attempts(&self, student_id: &str, quiz_id: &str) -> AppResult<usize> {
        let count = self
            .collection
            .count_documents(doc! {
                "student_id": student_id,
                "quiz_id": quiz_id
            })
            .await?;
        Ok(count as usize)
    }

    async fn best_percentage(&self, student_id: &str, quiz_id: &str) -> AppResult<Option<f64>> {
        let best = self
            .collection
            .find_one(doc! {
                "student_id": student_id,
                "quiz_id": quiz_id,
                "status": AttemptStatus::Completed.as_str(),
            })
            .sort(doc! { "percentage": -1 })
            .await?;
        Ok(best.and_then(|attempt| attempt.percentage))
    }

    async fn complete(&self, attempt: &QuizAttempt) -> AppResult<bool> {
        let result = self
            .collection
            .replace_one(
                doc! { "id": &attempt.id, "status": AttemptStatus::Open.as_str() },
                attempt,
            )
            .await?;
        Ok(result.matched_count == 1)
    }

    async fn get_user_attempts(
        &self,
        student_id: &str,
        quiz_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        let mut filter = doc! { "student_id": student_id };

        if let Some(qid) = quiz_id {
            filter.insert("quiz_id", qid);
        }

        self.paginate(filter, offset, limit).await
    }

    async fn get_quiz_attempts(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        self.paginate(doc! { "quiz_id": quiz_id }, offset, limit).await
    }
}
