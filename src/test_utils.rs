#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;

    use crate::models::domain::{QuestionKind, Quiz, QuizChoice, QuizQuestion};

    /// Multiple-choice question with choices `{id}-a`, `{id}-b`, `{id}-c`.
    pub fn choice_question(id: &str, points: u32, correct_choice_id: &str) -> QuizQuestion {
        let choices = ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(order, suffix)| {
                let choice_id = format!("{}-{}", id, suffix);
                QuizChoice {
                    is_correct: choice_id == correct_choice_id,
                    id: choice_id,
                    text: format!("Option {}", suffix.to_uppercase()),
                    order: order as u32,
                }
            })
            .collect();

        QuizQuestion {
            id: id.to_string(),
            text: format!("Question {}", id),
            points,
            order: 0,
            kind: QuestionKind::MultipleChoice { choices },
        }
    }

    pub fn short_answer_question(id: &str, points: u32) -> QuizQuestion {
        QuizQuestion {
            id: id.to_string(),
            text: format!("Explain {}", id),
            points,
            order: 100,
            kind: QuestionKind::ShortAnswer,
        }
    }

    /// Two multiple-choice questions worth 5 and 10 points, passing score 60.
    pub fn two_question_quiz() -> Quiz {
        let mut first = choice_question("q-1", 5, "q-1-a");
        first.order = 1;
        let mut second = choice_question("q-2", 10, "q-2-a");
        second.order = 2;

        Quiz {
            id: "quiz-1".to_string(),
            title: "Cell Biology".to_string(),
            description: None,
            max_attempts: 3,
            passing_score_percent: 60,
            time_limit_minutes: 30,
            is_active: true,
            questions: vec![first, second],
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_choice_question_marks_one_correct() {
        let question = choice_question("q-7", 3, "q-7-c");

        assert!(question.is_scoreable());
        assert_eq!(question.kind.choices().len(), 3);
        assert!(question.kind.choices()[2].is_correct);
    }

    #[test]
    fn test_two_question_quiz() {
        let quiz = two_question_quiz();

        assert!(quiz.is_active);
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.passing_score_percent, 60);
    }
}
