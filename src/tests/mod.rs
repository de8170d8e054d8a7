mod quiz_store;

use std::sync::Arc;

use axum::Router;
use tracing::level_filters::LevelFilter;

use crate::{
    build_app,
    common::app_state::AppState,
    quiz::{
        code_generator::CodeGenerator,
        memory::MemoryBackend,
        store::{QuizBackend, QuizStore},
    },
};

fn setup_logging() {
    let _ = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();
}

fn memory_store() -> QuizStore {
    QuizStore::new(Arc::new(MemoryBackend::new()), CodeGenerator::new())
}

fn memory_app() -> Router {
    app_with_backend(Arc::new(MemoryBackend::new()))
}

fn app_with_backend(backend: Arc<dyn QuizBackend>) -> Router {
    setup_logging();
    build_app(AppState::from_store(QuizStore::new(
        backend,
        CodeGenerator::new(),
    )))
}
