use chrono::{DateTime, Utc};
use futures::{FutureExt, future::BoxFuture};
use sqlx::{Pool, Postgres, types::Json};
use tracing::{debug, info};

use crate::{
    common::error::ServerError,
    quiz::{
        models::{Question, Quiz, QuizSummary},
        store::QuizBackend,
    },
};

#[derive(Debug, sqlx::FromRow)]
struct QuizRow {
    id: String,
    title: String,
    questions: Json<Vec<Question>>,
    created_at: DateTime<Utc>,
}

impl From<QuizRow> for Quiz {
    fn from(row: QuizRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            questions: row.questions.0,
            created_at: row.created_at,
        }
    }
}

pub async fn create_quiz_table(pool: &Pool<Postgres>) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "quiz" (
            seq BIGSERIAL NOT NULL,
            quiz_code TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            questions JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database table 'quiz' checked/created successfully");
    Ok(())
}

/// Returns `false` when the code is already taken.
pub async fn insert_quiz(pool: &Pool<Postgres>, quiz: &Quiz) -> Result<bool, ServerError> {
    let row = sqlx::query(
        r#"
        INSERT INTO "quiz" (quiz_code, title, questions, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (quiz_code) DO NOTHING
        "#,
    )
    .bind(&quiz.id)
    .bind(&quiz.title)
    .bind(Json(&quiz.questions))
    .bind(quiz.created_at)
    .execute(pool)
    .await?;

    debug!("Insert of quiz {} affected {} rows", quiz.id, row.rows_affected());
    Ok(row.rows_affected() == 1)
}

pub async fn list_quizzes(pool: &Pool<Postgres>) -> Result<Vec<QuizSummary>, sqlx::Error> {
    sqlx::query_as::<_, QuizSummary>(
        r#"
        SELECT quiz_code AS id, title
        FROM "quiz"
        ORDER BY seq
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_quiz_by_code(
    pool: &Pool<Postgres>,
    code: &str,
) -> Result<Option<Quiz>, sqlx::Error> {
    let row = sqlx::query_as::<_, QuizRow>(
        r#"
        SELECT quiz_code AS id, title, questions, created_at
        FROM "quiz"
        WHERE quiz_code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Quiz::from))
}

pub async fn health_check(pool: &Pool<Postgres>) -> Result<(), sqlx::Error> {
    let _ = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}

pub struct PostgresBackend {
    pool: Pool<Postgres>,
}

impl PostgresBackend {
    pub async fn init(pool: Pool<Postgres>) -> Result<Self, ServerError> {
        create_quiz_table(&pool).await.map_err(|e| {
            ServerError::StorageUnavailable(format!("Database table initialization failed: {}", e))
        })?;

        Ok(Self { pool })
    }
}

impl QuizBackend for PostgresBackend {
    fn insert<'a>(&'a self, quiz: &'a Quiz) -> BoxFuture<'a, Result<bool, ServerError>> {
        insert_quiz(&self.pool, quiz).boxed()
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<QuizSummary>, ServerError>> {
        async move { list_quizzes(&self.pool).await.map_err(ServerError::from) }.boxed()
    }

    fn find<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Option<Quiz>, ServerError>> {
        async move {
            get_quiz_by_code(&self.pool, code)
                .await
                .map_err(ServerError::from)
        }
        .boxed()
    }

    fn health_check(&self) -> BoxFuture<'_, Result<(), ServerError>> {
        async move { health_check(&self.pool).await.map_err(ServerError::from) }.boxed()
    }
}
