use axum::http::{Method, Uri};

use crate::common::error::ServerError;

/// Unknown paths and unsupported methods on known paths both answer 404.
pub async fn route_not_found(method: Method, uri: Uri) -> ServerError {
    ServerError::NotFound(format!("API Route Not Found: {} {}", method, uri.path()))
}
