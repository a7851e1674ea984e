//! Chat turn data structures
//!
//! Messages are transient UI state; this layer never persists them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier
    pub id: String,
    /// Message body
    pub text: String,
    /// Who authored the turn
    pub sender: Sender,
    /// When the turn was produced
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(text: String, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            sender,
            timestamp: Utc::now(),
        }
    }

    /// A turn authored by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text.into(), Sender::User)
    }

    /// A turn produced by the assistant
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(text.into(), Sender::System)
    }
}
