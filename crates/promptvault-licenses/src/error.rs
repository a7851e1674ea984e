//! License error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LicenseError {
    #[error("License key already activated: {0}")]
    AlreadyActivated(String),

    #[error("License key cannot be empty")]
    EmptyKey,

    #[error("Storage error: {0}")]
    Storage(#[from] promptvault_storage::StorageError),
}
