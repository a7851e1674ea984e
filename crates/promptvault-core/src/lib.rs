//! PromptVault Core
//!
//! On-device persistence service for the assistant UI: prompt library,
//! license activation log, chat types, and usage statistics. The UI
//! constructs one [`Vault`] at startup and threads it through call
//! sites; all state lives behind it.

mod chat;
mod config;
mod error;
mod stats;
mod vault;

pub use chat::{Message, Sender};
pub use config::Config;
pub use error::CoreError;
pub use stats::{Achievement, AchievementCategory, StatsManager, UserStats};
pub use vault::Vault;

// Re-export core components
pub use promptvault_licenses::{LicenseError, LicenseManager, LicenseRecord};
pub use promptvault_prompts::{NewPrompt, Prompt, PromptError, PromptManager, ALL_CATEGORIES};
pub use promptvault_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
