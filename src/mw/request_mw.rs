use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

static REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_mw(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let span = info_span!("request", %request_id, %method, %path);
    let mut response = next.run(req).instrument(span.clone()).await;

    info!(
        parent: &span,
        "{} {} -> {} in {}ms",
        method,
        path,
        response.status(),
        started.elapsed().as_millis()
    );

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
