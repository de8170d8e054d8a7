use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use serde_json::json;

use tracing::error;

use crate::common::{app_state::AppState, error::ServerError, handlers::route_not_found};

pub fn health_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/detailed", get(health_detailed))
        .method_not_allowed_fallback(route_not_found)
        .with_state(state.clone())
}

async fn health() -> impl IntoResponse {
    "OK".into_response()
}

async fn health_detailed(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let platform = true;

    let store_status = match state.get_store().health_check().await {
        Ok(_) => true,
        Err(e) => {
            error!("Failed quiz store health check: {}", e);
            false
        }
    };

    let json = json!({
        "platform": platform,
        "store": store_status,
    });

    Ok((StatusCode::OK, Json(json)))
}
