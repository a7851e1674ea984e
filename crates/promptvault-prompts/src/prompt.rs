//! Prompt data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    /// Engine-assigned row id
    pub id: i64,
    /// Display title
    pub title: String,
    /// The prompt text
    pub content: String,
    /// Browse category ("work", "creative", ...)
    pub category: String,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Community upvote count
    pub upvotes: i64,
    /// Author profile id, if known
    pub user_id: Option<String>,
    /// When the prompt was added
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new prompt; the id and creation time
/// are assigned on insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPrompt {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Trim tags and drop empty ones.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
