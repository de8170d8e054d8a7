use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::info;

use crate::{
    common::{app_state::AppState, error::ServerError, handlers::route_not_found},
    quiz::{
        code_generator::{CODE_LENGTH, normalize_code},
        models::{CreateQuizRequest, CreatedQuizCode, GetQuizQuery, QuizContent},
    },
};

pub fn quiz_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/quizzes", get(list_quizzes).post(create_quiz))
        .route("/quizzes/{quiz_id}", get(get_quiz))
        .route("/quizzes/{quiz_id}/submit", post(submit_answers))
        .route("/create-quiz", post(legacy_create_quiz))
        .route("/get-quiz", get(legacy_get_quiz))
        .method_not_allowed_fallback(route_not_found)
        .with_state(state)
}

async fn create_quiz(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let Json(request) = payload?;
    let quiz = state.get_store().create(request).await?;

    Ok((StatusCode::CREATED, Json(quiz)))
}

async fn list_quizzes(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let quizzes = state.get_store().list().await?;
    Ok((StatusCode::OK, Json(quizzes)))
}

async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let quiz = state.get_store().get(&quiz_id).await?;
    Ok((StatusCode::OK, Json(quiz)))
}

async fn submit_answers(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    // A malformed body counts as missing answers so an unknown quiz still yields 404
    let body = payload.ok().map(|Json(body)| body);
    let answers = body.as_ref().and_then(|body| body.get("answers"));

    let score = state.get_store().submit(&quiz_id, answers).await?;
    Ok((StatusCode::OK, Json(score)))
}

/* Legacy routes */

async fn legacy_create_quiz(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let Json(request) = payload?;
    let quiz = state.get_store().create(request).await?;

    let response = CreatedQuizCode {
        quiz_code: quiz.id,
        message: "Quiz created successfully".into(),
    };

    Ok((StatusCode::OK, Json(response)))
}

async fn legacy_get_quiz(
    State(state): State<Arc<AppState>>,
    query: Result<Query<GetQuizQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let Query(query) = query?;
    let Some(code) = query.code.filter(|code| !code.trim().is_empty()) else {
        return Err(ServerError::InvalidInput(
            "Query parameter 'code' is required".into(),
        ));
    };

    if normalize_code(&code).len() != CODE_LENGTH {
        return Err(ServerError::InvalidInput(format!(
            "Quiz code must be a {CODE_LENGTH}-character string"
        )));
    }

    info!("Attempting to retrieve quiz: {}", code);
    let quiz = state.get_store().get(&code).await?;

    Ok((StatusCode::OK, Json(QuizContent::from(quiz))))
}
