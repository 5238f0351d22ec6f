use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub points: u32,
    #[serde(default)]
    pub order: u32,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizChoice {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
    #[serde(default)]
    pub order: u32,
}

/// Question type together with the data its grading needs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "question_type", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice { choices: Vec<QuizChoice> },
    TrueFalse { choices: Vec<QuizChoice> },
    /// Stored for manual review, never auto-graded.
    ShortAnswer,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradeOutcome {
    pub is_correct: bool,
    pub points_earned: f64,
}

impl GradeOutcome {
    fn correct(points: u32) -> Self {
        Self {
            is_correct: true,
            points_earned: f64::from(points),
        }
    }

    fn incorrect() -> Self {
        Self {
            is_correct: false,
            points_earned: 0.0,
        }
    }
}

impl QuestionKind {
    pub fn grade(&self, points: u32, selected_choice_id: Option<&str>) -> GradeOutcome {
        match self {
            QuestionKind::MultipleChoice { choices } | QuestionKind::TrueFalse { choices } => {
                grade_choice(choices, points, selected_choice_id)
            }
            QuestionKind::ShortAnswer => GradeOutcome::incorrect(),
        }
    }

    pub fn choices(&self) -> &[QuizChoice] {
        match self {
            QuestionKind::MultipleChoice { choices } | QuestionKind::TrueFalse { choices } => {
                choices
            }
            QuestionKind::ShortAnswer => &[],
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple_choice",
            QuestionKind::TrueFalse { .. } => "true_false",
            QuestionKind::ShortAnswer => "short_answer",
        }
    }
}

fn grade_choice(choices: &[QuizChoice], points: u32, selected_choice_id: Option<&str>) -> GradeOutcome {
    let Some(selected) = selected_choice_id else {
        return GradeOutcome::incorrect();
    };

    match choices.iter().find(|c| c.id == selected) {
        Some(choice) if choice.is_correct => GradeOutcome::correct(points),
        _ => GradeOutcome::incorrect(),
    }
}

impl QuizQuestion {
    pub fn grade(&self, selected_choice_id: Option<&str>) -> GradeOutcome {
        self.kind.grade(self.points, selected_choice_id)
    }

    /// A choice question with no correct choice can never earn points.
    pub fn is_scoreable(&self) -> bool {
        match &self.kind {
            QuestionKind::MultipleChoice { choices } | QuestionKind::TrueFalse { choices } => {
                choices.iter().filter(|c| c.is_correct).count() == 1
            }
            QuestionKind::ShortAnswer => false,
        }
    }
}
