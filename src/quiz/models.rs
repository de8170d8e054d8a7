use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::error::ServerError;

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Question {
    #[serde(rename = "question", alias = "text")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer", alias = "answer")]
    pub correct_answer: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub score: usize,
    pub total: usize,
}

impl Quiz {
    /// Answers are matched to questions by position. Only a string equal to
    /// the correct answer scores; anything missing or of another type does not.
    pub fn score(&self, answers: &[serde_json::Value]) -> QuizScore {
        let score = self
            .questions
            .iter()
            .zip(answers)
            .filter(|(question, answer)| {
                answer.as_str() == Some(question.correct_answer.as_str())
            })
            .count();

        QuizScore {
            score,
            total: self.questions.len(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CreateQuizRequest {
    pub title: Option<String>,
    pub questions: Option<Vec<QuestionRequest>>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct QuestionRequest {
    #[serde(alias = "text")]
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    #[serde(rename = "correctAnswer", alias = "answer")]
    pub correct_answer: Option<String>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuiz {
    pub title: String,
    pub questions: Vec<Question>,
}

impl CreateQuizRequest {
    pub fn validate(self) -> Result<NewQuiz, ServerError> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => {
                return Err(ServerError::InvalidInput(
                    "Quiz must have a non-empty string title".into(),
                ));
            }
        };

        let requests = match self.questions {
            Some(questions) if !questions.is_empty() => questions,
            _ => {
                return Err(ServerError::InvalidInput(
                    "Quiz must have a non-empty array of questions".into(),
                ));
            }
        };

        let questions = requests
            .into_iter()
            .enumerate()
            .map(|(idx, request)| request.validate(idx + 1))
            .collect::<Result<Vec<Question>, ServerError>>()?;

        Ok(NewQuiz { title, questions })
    }
}

impl QuestionRequest {
    fn validate(self, number: usize) -> Result<Question, ServerError> {
        let invalid =
            |reason: &str| ServerError::InvalidInput(format!("Question {number} {reason}"));

        let text = match self.question {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(invalid("must have a non-empty prompt")),
        };

        let Some(options) = self.options else {
            return Err(invalid("is missing its options"));
        };

        if options.len() != OPTIONS_PER_QUESTION {
            return Err(invalid(&format!(
                "must have exactly {OPTIONS_PER_QUESTION} options, got {}",
                options.len()
            )));
        }

        if options.iter().any(|option| option.trim().is_empty()) {
            return Err(invalid("has an empty option"));
        }

        let distinct: HashSet<&String> = options.iter().collect();
        if distinct.len() != options.len() {
            return Err(invalid("has duplicate options"));
        }

        let Some(correct_answer) = self.correct_answer else {
            return Err(invalid("is missing its correct answer"));
        };

        if !options.contains(&correct_answer) {
            return Err(invalid("has a correct answer that is not one of its options"));
        }

        Ok(Question {
            text,
            options,
            correct_answer,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetQuizQuery {
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedQuizCode {
    pub quiz_code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizContent {
    pub title: String,
    pub questions: Vec<Question>,
}

impl From<Quiz> for QuizContent {
    fn from(quiz: Quiz) -> Self {
        Self {
            title: quiz.title,
            questions: quiz.questions,
        }
    }
}
