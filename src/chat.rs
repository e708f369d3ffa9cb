use thiserror::Error;
use tracing::{debug, error};

use crate::embedding::{Embedder, EmbeddingError};
use crate::matcher;
use crate::store::{AnswerStore, StoreAccessError};

/// Outcome of a successfully processed question. `NoMatch` is a defined
/// result, not an error: the corpus simply had no eligible record.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Answer(String),
    NoMatch,
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Store(#[from] StoreAccessError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation. History is plain state owned by the
/// front-end loop; nothing in the query path reads it.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub message: String,
}

pub type ChatHistory = Vec<ChatTurn>;

/// Answers one question: embed it, scan the corpus, return the best match.
/// An embedding failure is returned as-is and the store is never touched;
/// it is not downgraded into a "no match" result.
pub fn answer_query(
    embedder: &dyn Embedder,
    store: &dyn AnswerStore,
    question: &str,
) -> Result<Reply, QueryError> {
    let query = embedder.embed(question).inspect_err(|e| {
        error!(error = %e, "embedding the question failed");
    })?;

    let records = store.list_records_with_embedding()?;
    debug!(candidates = records.len(), "scanning corpus");

    match matcher::find_best(&query, &records) {
        Some(record) => Ok(Reply::Answer(record.answer_text.clone())),
        None => Ok(Reply::NoMatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AnswerRecord;
    use ndarray::Array1;
    use std::cell::Cell;

    struct FixedEmbedder(Vec<f32>);

    impl Embedder for FixedEmbedder {
        fn embed(&self, _text: &str) -> Result<Array1<f32>, EmbeddingError> {
            Ok(Array1::from(self.0.clone()))
        }
    }

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn embed(&self, _text: &str) -> Result<Array1<f32>, EmbeddingError> {
            Err(EmbeddingError::EmptyResponse)
        }
    }

    struct MemoryStore {
        records: Vec<AnswerRecord>,
        listed: Cell<bool>,
    }

    impl MemoryStore {
        fn new(records: Vec<AnswerRecord>) -> Self {
            MemoryStore {
                records,
                listed: Cell::new(false),
            }
        }
    }

    impl AnswerStore for MemoryStore {
        fn list_records_with_embedding(&self) -> Result<Vec<AnswerRecord>, StoreAccessError> {
            self.listed.set(true);
            Ok(self.records.clone())
        }
    }

    fn record(text: &str, embedding: Vec<f32>) -> AnswerRecord {
        AnswerRecord {
            answer_text: text.to_string(),
            answer_embedding: Array1::from(embedding),
        }
    }

    #[test]
    fn test_returns_best_matching_answer() {
        let store = MemoryStore::new(vec![
            record("A", vec![1.0, 0.0]),
            record("B", vec![0.0, 1.0]),
        ]);
        let embedder = FixedEmbedder(vec![1.0, 0.0]);

        let reply = answer_query(&embedder, &store, "anything").unwrap();
        assert_eq!(reply, Reply::Answer("A".to_string()));
    }

    #[test]
    fn test_empty_corpus_is_no_match() {
        let store = MemoryStore::new(vec![]);
        let embedder = FixedEmbedder(vec![1.0, 0.0]);

        let reply = answer_query(&embedder, &store, "anything").unwrap();
        assert_eq!(reply, Reply::NoMatch);
    }

    #[test]
    fn test_embedding_failure_skips_the_store() {
        let store = MemoryStore::new(vec![record("A", vec![1.0, 0.0])]);

        let result = answer_query(&FailingEmbedder, &store, "anything");
        assert!(matches!(result, Err(QueryError::Embedding(_))));
        assert!(!store.listed.get());
    }

    #[test]
    fn test_store_failure_is_surfaced() {
        struct BrokenStore;
        impl AnswerStore for BrokenStore {
            fn list_records_with_embedding(&self) -> Result<Vec<AnswerRecord>, StoreAccessError> {
                Err(StoreAccessError::Read {
                    path: "/corpus.json".into(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
                })
            }
        }

        let embedder = FixedEmbedder(vec![1.0, 0.0]);
        let result = answer_query(&embedder, &BrokenStore, "anything");
        assert!(matches!(result, Err(QueryError::Store(_))));
    }
}
