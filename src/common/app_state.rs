use std::sync::Arc;

use sqlx::{Pool, Postgres};
use tracing::info;

use crate::{
    common::error::ServerError,
    config::config::{StoreConfig, StoreKind},
    quiz::{
        code_generator::CodeGenerator,
        db::PostgresBackend,
        memory::MemoryBackend,
        store::{QuizBackend, QuizStore},
    },
};

pub struct AppState {
    store: QuizStore,
}

impl AppState {
    pub async fn from_config(config: &StoreConfig) -> Result<Arc<Self>, ServerError> {
        let backend: Arc<dyn QuizBackend> = match config.kind {
            StoreKind::Memory => {
                info!("Using in-memory quiz store");
                Arc::new(MemoryBackend::new())
            }
            StoreKind::Postgres => {
                let Some(connection_string) = &config.database_url else {
                    return Err(ServerError::StorageUnavailable(
                        "Database configuration missing. Set QUIZ__STORE__DATABASE_URL".into(),
                    ));
                };

                let pool = Pool::<Postgres>::connect(connection_string)
                    .await
                    .map_err(|e| {
                        ServerError::StorageUnavailable(format!(
                            "Database connection failed: {}",
                            e
                        ))
                    })?;

                info!("Using postgres quiz store");
                Arc::new(PostgresBackend::init(pool).await?)
            }
        };

        Ok(Self::from_store(QuizStore::new(backend, CodeGenerator::new())))
    }

    pub fn from_store(store: QuizStore) -> Arc<Self> {
        Arc::new(Self { store })
    }

    pub fn get_store(&self) -> &QuizStore {
        &self.store
    }
}
