//! Prompt error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt title cannot be empty")]
    EmptyTitle,

    #[error("Storage error: {0}")]
    Storage(#[from] promptvault_storage::StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
