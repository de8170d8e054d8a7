use std::{str::FromStr, sync::Arc};

use axum::{Router, middleware::from_fn};
use dotenv::dotenv;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::FmtSubscriber;

use crate::{
    common::{app_state::AppState, handlers::route_not_found},
    config::config::CONFIG,
    health::handlers::health_routes,
    mw::{cors_mw::cors_mw, request_mw::request_mw},
    quiz::handlers::quiz_routes,
};

mod common;
mod config;
mod health;
mod mw;
mod quiz;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() {
    // Initialize .env
    dotenv().ok();

    // Initialize logging
    let level = LevelFilter::from_str(&CONFIG.server.log_level).unwrap_or(LevelFilter::DEBUG);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global tracing");

    // Initialize state
    let state = AppState::from_config(&CONFIG.store)
        .await
        .unwrap_or_else(|e| panic!("{}", e));

    let app = build_app(state);

    // Initialize webserver
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", CONFIG.server.address, CONFIG.server.port))
            .await
            .unwrap_or_else(|e| panic!("Failed to bind listener: {}", e));

    if let Ok(address) = listener.local_addr() {
        info!("Server listening on address: {}", address);
    }

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("Server stopped unexpectedly: {}", e));
}

pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/health", health_routes(state.clone()))
        .nest("/api", quiz_routes(state.clone()))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(from_fn(cors_mw))
        .layer(from_fn(request_mw))
}
