//! PromptVault Prompt Library
//!
//! User-authored prompts, browsable by category, searchable by text,
//! and upvotable. Ids are assigned by the store on insert.

mod error;
mod manager;
mod prompt;

pub use error::PromptError;
pub use manager::PromptManager;
pub use prompt::{normalize_tags, NewPrompt, Prompt};

pub type Result<T> = std::result::Result<T, PromptError>;

/// Category filter value meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";
