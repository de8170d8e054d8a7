pub mod app_state;
pub mod error;
pub mod handlers;
pub mod models;
