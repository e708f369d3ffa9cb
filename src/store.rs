use ndarray::Array1;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// One stored question/answer unit. The embedding is precomputed offline;
/// this program never writes it back.
#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub answer_text: String,
    pub answer_embedding: Array1<f32>,
}

#[derive(Debug, Error)]
pub enum StoreAccessError {
    #[error("failed to read corpus file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only view over the answer corpus. Records without an embedding are
/// never listed; they cannot participate in matching.
pub trait AnswerStore {
    fn list_records_with_embedding(&self) -> Result<Vec<AnswerRecord>, StoreAccessError>;
}

/// On-disk shape: a JSON array of objects. A missing `answer_embedding`
/// field deserializes to an empty vector and the record is filtered out.
#[derive(Debug, Deserialize)]
struct RawRecord {
    answer_text: String,
    #[serde(default)]
    answer_embedding: Vec<f32>,
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl AnswerStore for JsonFileStore {
    fn list_records_with_embedding(&self) -> Result<Vec<AnswerRecord>, StoreAccessError> {
        let text = fs::read_to_string(&self.path).map_err(|source| StoreAccessError::Read {
            path: self.path.clone(),
            source,
        })?;

        let raw: Vec<RawRecord> =
            serde_json::from_str(&text).map_err(|source| StoreAccessError::Parse {
                path: self.path.clone(),
                source,
            })?;

        Ok(raw
            .into_iter()
            .filter(|record| !record.answer_embedding.is_empty())
            .map(|record| AnswerRecord {
                answer_text: record.answer_text,
                answer_embedding: Array1::from(record.answer_embedding),
            })
            .collect())
    }
}
