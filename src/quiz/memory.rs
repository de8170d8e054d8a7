use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::{DashMap, mapref::entry::Entry};
use futures::{FutureExt, future::BoxFuture};

use crate::{
    common::error::ServerError,
    quiz::{
        models::{Quiz, QuizSummary},
        store::QuizBackend,
    },
};

struct StoredQuiz {
    sequence: u64,
    quiz: Quiz,
}

/// Process-lifetime quiz storage. Nothing survives a restart.
pub struct MemoryBackend {
    quizzes: DashMap<String, StoredQuiz>,
    next_sequence: AtomicU64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            quizzes: DashMap::new(),
            next_sequence: AtomicU64::new(0),
        }
    }
}

impl QuizBackend for MemoryBackend {
    fn insert<'a>(&'a self, quiz: &'a Quiz) -> BoxFuture<'a, Result<bool, ServerError>> {
        let inserted = match self.quizzes.entry(quiz.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);
                slot.insert(StoredQuiz {
                    sequence,
                    quiz: quiz.clone(),
                });
                true
            }
        };

        futures::future::ready(Ok(inserted)).boxed()
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<QuizSummary>, ServerError>> {
        let mut entries: Vec<(u64, QuizSummary)> = self
            .quizzes
            .iter()
            .map(|entry| (entry.sequence, QuizSummary::from(&entry.quiz)))
            .collect();

        entries.sort_by_key(|(sequence, _)| *sequence);
        let summaries = entries.into_iter().map(|(_, summary)| summary).collect();

        futures::future::ready(Ok(summaries)).boxed()
    }

    fn find<'a>(&'a self, code: &'a str) -> BoxFuture<'a, Result<Option<Quiz>, ServerError>> {
        let quiz = self.quizzes.get(code).map(|entry| entry.quiz.clone());
        futures::future::ready(Ok(quiz)).boxed()
    }

    fn health_check(&self) -> BoxFuture<'_, Result<(), ServerError>> {
        futures::future::ready(Ok(())).boxed()
    }
}
