//! PromptVault Storage Layer
//!
//! SQLite-based persistence for the assistant's on-device data:
//! prompt library, license activation log, and usage statistics.
//! All access goes through a single shared [`Database`] handle.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
