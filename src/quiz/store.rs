use std::sync::Arc;

use chrono::Utc;
use futures::future::BoxFuture;
use tracing::{error, info, warn};

use crate::{
    common::error::ServerError,
    quiz::{
        code_generator::{CodeGenerator, is_valid_code, normalize_code},
        models::{CreateQuizRequest, Quiz, QuizScore, QuizSummary},
    },
};

const MAX_CODE_ATTEMPTS: usize = 100;

/// Storage medium behind a [`QuizStore`].
pub trait QuizBackend: Send + Sync {
    /// Inserts the quiz unless its code is taken. Returns `false` on a
    /// collision, leaving the stored record untouched.
    fn insert<'a>(&'a self, quiz: &'a Quiz) -> BoxFuture<'a, Result<bool, ServerError>>;

    /// Id and title of every quiz in creation order.
    fn list(&self) -> BoxFuture<'_, Result<Vec<QuizSummary>, ServerError>>;

    fn find<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Option<Quiz>, ServerError>>;

    fn health_check(&self) -> BoxFuture<'_, Result<(), ServerError>>;
}

pub struct QuizStore {
    backend: Arc<dyn QuizBackend>,
    generator: CodeGenerator,
}

impl QuizStore {
    pub fn new(backend: Arc<dyn QuizBackend>, generator: CodeGenerator) -> Self {
        Self { backend, generator }
    }

    pub async fn create(&self, request: CreateQuizRequest) -> Result<Quiz, ServerError> {
        let new_quiz = request.validate()?;
        let mut quiz = Quiz {
            id: String::new(),
            title: new_quiz.title,
            questions: new_quiz.questions,
            created_at: Utc::now(),
        };

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            quiz.id = self.generator.generate()?;

            if self.backend.insert(&quiz).await? {
                info!("Created quiz: {} - {}", quiz.id, quiz.title);
                return Ok(quiz);
            }

            warn!(
                "Quiz code {} is already in use, retrying (attempt {})",
                quiz.id, attempt
            );
        }

        error!("Failed to find a free quiz code after {MAX_CODE_ATTEMPTS} attempts");
        Err(ServerError::Internal(
            "Failed to generate a unique quiz code".into(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<QuizSummary>, ServerError> {
        self.backend.list().await
    }

    pub async fn get(&self, code: &str) -> Result<Quiz, ServerError> {
        let code = normalize_code(code);
        let not_found = || ServerError::NotFound(format!("No quiz found with code: {}", code));

        if !is_valid_code(&code) {
            return Err(not_found());
        }

        self.backend.find(&code).await?.ok_or_else(not_found)
    }

    /// `answers` is the raw `answers` field of the request, if any. The quiz
    /// is resolved before the answers are inspected.
    pub async fn submit(
        &self,
        code: &str,
        answers: Option<&serde_json::Value>,
    ) -> Result<QuizScore, ServerError> {
        let quiz = self.get(code).await?;

        let Some(answers) = answers.and_then(|answers| answers.as_array()) else {
            return Err(ServerError::InvalidInput(
                "Answers must be an array".into(),
            ));
        };

        let score = quiz.score(answers);
        info!(
            "Scored attempt on quiz {}: {}/{}",
            quiz.id, score.score, score.total
        );

        Ok(score)
    }

    pub async fn health_check(&self) -> Result<(), ServerError> {
        self.backend.health_check().await
    }
}
