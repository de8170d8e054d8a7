#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use futures::{FutureExt, future::BoxFuture};

    use crate::{
        common::error::ServerError,
        quiz::{
            code_generator::{CodeGenerator, is_valid_code},
            memory::MemoryBackend,
            models::{CreateQuizRequest, Quiz, QuestionRequest, QuizSummary},
            store::{QuizBackend, QuizStore},
        },
        tests::{memory_store, setup_logging},
    };

    /// Refuses every insert, as if the code space were full.
    struct FullBackend;

    impl QuizBackend for FullBackend {
        fn insert<'a>(&'a self, _quiz: &'a Quiz) -> BoxFuture<'a, Result<bool, ServerError>> {
            futures::future::ready(Ok(false)).boxed()
        }

        fn list(&self) -> BoxFuture<'_, Result<Vec<QuizSummary>, ServerError>> {
            futures::future::ready(Ok(vec![])).boxed()
        }

        fn find<'a>(&'a self, _code: &'a str) -> BoxFuture<'a, Result<Option<Quiz>, ServerError>> {
            futures::future::ready(Ok(None)).boxed()
        }

        fn health_check(&self) -> BoxFuture<'_, Result<(), ServerError>> {
            futures::future::ready(Ok(())).boxed()
        }
    }

    fn request(title: &str) -> CreateQuizRequest {
        CreateQuizRequest {
            title: Some(title.into()),
            questions: Some(vec![QuestionRequest {
                question: Some("Capital of France?".into()),
                options: Some(vec![
                    "Paris".into(),
                    "London".into(),
                    "Berlin".into(),
                    "Rome".into(),
                ]),
                correct_answer: Some("Paris".into()),
            }]),
        }
    }

    #[tokio::test]
    async fn create_assigns_valid_code() {
        setup_logging();
        let store = memory_store();

        let quiz = store.create(request("T")).await.unwrap();
        assert!(is_valid_code(&quiz.id));
        assert_eq!(store.get(&quiz.id).await.unwrap(), quiz);
    }

    #[tokio::test]
    async fn colliding_code_is_retried() {
        setup_logging();
        let backend: Arc<dyn QuizBackend> = Arc::new(MemoryBackend::new());

        let first = QuizStore::new(backend.clone(), CodeGenerator::from_seed(1))
            .create(request("first"))
            .await
            .unwrap();

        // Same seed, so the first code drawn is already taken
        let second = QuizStore::new(backend.clone(), CodeGenerator::from_seed(1))
            .create(request("second"))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);

        let store = QuizStore::new(backend, CodeGenerator::new());
        assert_eq!(store.get(&first.id).await.unwrap().title, "first");
        assert_eq!(store.get(&second.id).await.unwrap().title, "second");
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn exhausted_code_space_fails() {
        setup_logging();
        let store = QuizStore::new(Arc::new(FullBackend), CodeGenerator::new());

        match store.create(request("T")).await {
            Err(ServerError::Internal(_)) => {}
            other => panic!("Expected internal error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_create_leaves_store_untouched() {
        setup_logging();
        let store = memory_store();

        let mut invalid = request("T");
        invalid.questions = Some(vec![]);

        assert!(matches!(
            store.create(invalid).await,
            Err(ServerError::InvalidInput(_))
        ));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_checks_quiz_before_answers() {
        setup_logging();
        let store = memory_store();

        assert!(matches!(
            store.submit("ZZZZZZ", None).await,
            Err(ServerError::NotFound(_))
        ));

        let quiz = store.create(request("T")).await.unwrap();
        assert!(matches!(
            store.submit(&quiz.id, None).await,
            Err(ServerError::InvalidInput(_))
        ));

        let answers = serde_json::json!(["Paris"]);
        let score = store.submit(&quiz.id, Some(&answers)).await.unwrap();
        assert_eq!((score.score, score.total), (1, 1));
    }

    #[tokio::test]
    async fn concurrent_creates_never_share_a_code() {
        setup_logging();
        let store = Arc::new(memory_store());

        let mut handles = Vec::new();
        for i in 0..500 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create(request(&format!("quiz {i}"))).await
            }));
        }

        let results = futures::future::join_all(handles).await;

        let mut codes = HashSet::new();
        for result in results {
            let quiz = result.unwrap().unwrap();
            assert!(codes.insert(quiz.id.clone()), "Duplicate code: {}", quiz.id);
        }

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 500);

        for summary in listed {
            let quiz = store.get(&summary.id).await.unwrap();
            assert_eq!(quiz.title, summary.title);
        }
    }
}
