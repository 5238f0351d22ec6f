pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub use quiz::Quiz;
pub use quiz_attempt::{AttemptStatus, QuizAnswer, QuizAttempt, ScoreBreakdown};
pub use quiz_question::{QuestionKind, QuizChoice, QuizQuestion};
