//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] promptvault_storage::StorageError),

    #[error("License error: {0}")]
    License(#[from] promptvault_licenses::LicenseError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] promptvault_prompts::PromptError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
