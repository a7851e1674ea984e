//! Usage statistics and achievements
//!
//! One [`UserStats`] aggregate per local profile. Counters drive
//! achievement progress; an achievement unlocks at most once and keeps
//! its unlock timestamp.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use promptvault_storage::Database;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Usage,
    Performance,
    Social,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable identifier ("first-message", ...)
    pub id: String,
    /// Display name
    pub name: String,
    /// What the user has to do
    pub description: String,
    /// Display icon
    pub icon: String,
    /// Milestone family
    pub category: AchievementCategory,
    /// Counter value needed to unlock
    pub requirement: i64,
    /// Current counter value, capped at the requirement
    pub progress: i64,
    /// Whether the milestone has been reached
    pub unlocked: bool,
    /// When it was reached, if ever
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        category: AchievementCategory,
        requirement: i64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            category,
            requirement,
            progress: 0,
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// The built-in milestone catalog for a fresh profile.
fn default_achievements() -> Vec<Achievement> {
    vec![
        Achievement::new(
            "first-message",
            "First Words",
            "Send your first message",
            "💬",
            AchievementCategory::Usage,
            1,
        ),
        Achievement::new(
            "century-club",
            "Century Club",
            "Send 100 messages",
            "🏆",
            AchievementCategory::Usage,
            100,
        ),
        Achievement::new(
            "daily-habit",
            "Daily Habit",
            "Log in 7 times",
            "📅",
            AchievementCategory::Usage,
            7,
        ),
        Achievement::new(
            "token-marathon",
            "Token Marathon",
            "Use 10,000 tokens",
            "⚡",
            AchievementCategory::Performance,
            10_000,
        ),
        Achievement::new(
            "show-and-tell",
            "Show and Tell",
            "Share 5 prompts",
            "🔗",
            AchievementCategory::Social,
            5,
        ),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: String,
    pub messages_sent: i64,
    pub logins: i64,
    pub tokens_used: i64,
    pub shares: i64,
    pub last_login_at: Option<DateTime<Utc>>,
    pub achievements: Vec<Achievement>,
}

impl UserStats {
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            messages_sent: 0,
            logins: 0,
            tokens_used: 0,
            shares: 0,
            last_login_at: None,
            achievements: default_achievements(),
        }
    }

    /// Count a sent message and the tokens it consumed.
    pub fn record_message(&mut self, tokens: i64) {
        self.messages_sent += 1;
        self.tokens_used += tokens;
        self.refresh_achievements();
    }

    /// Count a login and stamp the login date.
    pub fn record_login(&mut self) {
        self.logins += 1;
        self.last_login_at = Some(Utc::now());
        self.refresh_achievements();
    }

    /// Count a shared prompt.
    pub fn record_share(&mut self) {
        self.shares += 1;
        self.refresh_achievements();
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }

    /// The counter an achievement tracks.
    fn metric(&self, achievement_id: &str) -> i64 {
        match achievement_id {
            "first-message" | "century-club" => self.messages_sent,
            "daily-habit" => self.logins,
            "token-marathon" => self.tokens_used,
            "show-and-tell" => self.shares,
            _ => 0,
        }
    }

    fn refresh_achievements(&mut self) {
        for i in 0..self.achievements.len() {
            let id = self.achievements[i].id.clone();
            let value = self.metric(&id);

            let achievement = &mut self.achievements[i];
            achievement.progress = value.min(achievement.requirement);

            if !achievement.unlocked && value >= achievement.requirement {
                achievement.unlocked = true;
                achievement.unlocked_at = Some(Utc::now());
                tracing::info!(achievement = %achievement.id, "Achievement unlocked");
            }
        }
    }
}

/// Database-backed statistics persistence.
pub struct StatsManager {
    db: Database,
}

impl StatsManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn load(&self, user_id: &str) -> Result<Option<UserStats>> {
        Ok(self.db.with_connection(|conn| read_stats(conn, user_id))?)
    }

    pub fn save(&self, stats: &UserStats) -> Result<()> {
        Ok(self.db.with_connection(|conn| write_stats(conn, stats))?)
    }

    /// Load-modify-store inside a single transaction.
    ///
    /// A missing row starts from a fresh [`UserStats`] for the profile.
    pub fn update<F>(&self, user_id: &str, f: F) -> Result<UserStats>
    where
        F: FnOnce(&mut UserStats),
    {
        Ok(self.db.transaction(|conn| {
            let mut stats =
                read_stats(conn, user_id)?.unwrap_or_else(|| UserStats::new(user_id.to_string()));
            f(&mut stats);
            write_stats(conn, &stats)?;
            Ok(stats)
        })?)
    }
}

impl Clone for StatsManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

fn read_stats(conn: &Connection, user_id: &str) -> promptvault_storage::Result<Option<UserStats>> {
    let stats = conn
        .query_row(
            "SELECT user_id, messages_sent, logins, tokens_used, shares, last_login_at, achievements
             FROM user_stats WHERE user_id = ?1",
            [user_id],
            |row| {
                let last_login_str: Option<String> = row.get(5)?;
                let last_login_at = last_login_str.and_then(|s| {
                    DateTime::parse_from_rfc3339(&s)
                        .map(|dt| dt.with_timezone(&Utc))
                        .ok()
                });

                let achievements_json: String = row.get(6)?;
                let achievements: Vec<Achievement> =
                    serde_json::from_str(&achievements_json).unwrap_or_default();

                Ok(UserStats {
                    user_id: row.get(0)?,
                    messages_sent: row.get(1)?,
                    logins: row.get(2)?,
                    tokens_used: row.get(3)?,
                    shares: row.get(4)?,
                    last_login_at,
                    achievements,
                })
            },
        )
        .optional()?;

    Ok(stats)
}

fn write_stats(conn: &Connection, stats: &UserStats) -> promptvault_storage::Result<()> {
    let achievements_json =
        serde_json::to_string(&stats.achievements).unwrap_or_else(|_| String::from("[]"));

    conn.execute(
        "INSERT OR REPLACE INTO user_stats
         (user_id, messages_sent, logins, tokens_used, shares, last_login_at, achievements, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            stats.user_id,
            stats.messages_sent,
            stats.logins,
            stats.tokens_used,
            stats.shares,
            stats.last_login_at.map(|t| t.to_rfc3339()),
            achievements_json,
            Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_unlocks() {
        let mut stats = UserStats::new("profile".to_string());
        assert_eq!(stats.unlocked_count(), 0);

        stats.record_message(42);

        let first = stats
            .achievements
            .iter()
            .find(|a| a.id == "first-message")
            .unwrap();
        assert!(first.unlocked);
        assert!(first.unlocked_at.is_some());
        assert_eq!(stats.unlocked_count(), 1);
    }

    #[test]
    fn test_unlock_timestamp_is_stable() {
        let mut stats = UserStats::new("profile".to_string());
        stats.record_message(1);

        let stamped = stats
            .achievements
            .iter()
            .find(|a| a.id == "first-message")
            .unwrap()
            .unlocked_at;

        stats.record_message(1);
        let after = stats
            .achievements
            .iter()
            .find(|a| a.id == "first-message")
            .unwrap()
            .unlocked_at;

        assert_eq!(stamped, after);
    }

    #[test]
    fn test_progress_caps_at_requirement() {
        let mut stats = UserStats::new("profile".to_string());
        for _ in 0..10 {
            stats.record_share();
        }

        let share = stats
            .achievements
            .iter()
            .find(|a| a.id == "show-and-tell")
            .unwrap();
        assert_eq!(share.progress, share.requirement);
        assert!(share.unlocked);
    }

    #[test]
    fn test_manager_persists_updates() {
        let manager = StatsManager::new(Database::open_in_memory().unwrap());

        assert!(manager.load("profile").unwrap().is_none());

        let stats = manager
            .update("profile", |s| s.record_message(100))
            .unwrap();
        assert_eq!(stats.messages_sent, 1);
        assert_eq!(stats.tokens_used, 100);

        let reloaded = manager.load("profile").unwrap().unwrap();
        assert_eq!(reloaded.messages_sent, 1);
        assert_eq!(reloaded.tokens_used, 100);
        assert_eq!(reloaded.unlocked_count(), 1);
    }

    #[test]
    fn test_manager_accumulates_logins() {
        let manager = StatsManager::new(Database::open_in_memory().unwrap());

        for _ in 0..7 {
            manager.update("profile", |s| s.record_login()).unwrap();
        }

        let stats = manager.load("profile").unwrap().unwrap();
        assert_eq!(stats.logins, 7);
        assert!(stats.last_login_at.is_some());

        let habit = stats
            .achievements
            .iter()
            .find(|a| a.id == "daily-habit")
            .unwrap();
        assert!(habit.unlocked);
    }
}
