//! Persistence service facade
//!
//! One `Vault` per application, constructed at startup and handed to
//! the UI layer. It owns the database handle and the managers; nothing
//! here is global.

use promptvault_licenses::{LicenseManager, LicenseRecord};
use promptvault_prompts::{NewPrompt, Prompt, PromptManager};
use promptvault_storage::Database;
use uuid::Uuid;

use crate::config::Config;
use crate::stats::{StatsManager, UserStats};
use crate::Result;

const PROFILE_ID_KEY: &str = "profile_id";

pub struct Vault {
    config: Config,
    db: Database,
    licenses: LicenseManager,
    prompts: PromptManager,
    stats: StatsManager,
    /// Local profile id, assigned on first open
    profile_id: String,
}

impl Vault {
    /// Open the on-disk store and build the service.
    pub fn open(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db)
    }

    /// Fully in-memory service, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_database(Config::default(), Database::open_in_memory()?)
    }

    fn with_database(config: Config, db: Database) -> Result<Self> {
        let profile_id = match db.get_meta(PROFILE_ID_KEY)? {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                db.set_meta(PROFILE_ID_KEY, &id)?;
                id
            }
        };

        tracing::info!(profile_id = %profile_id, "Opened vault");

        Ok(Self {
            config,
            licenses: LicenseManager::new(db.clone()),
            prompts: PromptManager::new(db.clone()),
            stats: StatsManager::new(db.clone()),
            db,
            profile_id,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    // ---- Licenses ----

    pub fn is_license_used(&self, key: &str) -> Result<bool> {
        Ok(self.licenses.is_key_used(key)?)
    }

    pub fn activate_license(&self, key: &str, product_id: &str) -> Result<LicenseRecord> {
        Ok(self.licenses.record_activation(key, product_id)?)
    }

    pub fn license_history(&self) -> Result<Vec<LicenseRecord>> {
        Ok(self.licenses.history()?)
    }

    // ---- Prompts ----

    /// Add a prompt to the library. A missing author defaults to the
    /// local profile.
    pub fn add_prompt(&self, mut new: NewPrompt) -> Result<Prompt> {
        if new.user_id.is_none() {
            new.user_id = Some(self.profile_id.clone());
        }
        Ok(self.prompts.create(new)?)
    }

    pub fn prompts(&self, category: Option<&str>) -> Result<Vec<Prompt>> {
        Ok(self.prompts.list(category)?)
    }

    pub fn prompt(&self, id: i64) -> Result<Option<Prompt>> {
        Ok(self.prompts.get(id)?)
    }

    pub fn upvote_prompt(&self, id: i64) -> Result<()> {
        Ok(self.prompts.upvote(id)?)
    }

    pub fn search_prompts(&self, query: &str) -> Result<Vec<Prompt>> {
        Ok(self.prompts.search(query)?)
    }

    // ---- Statistics ----

    /// Current statistics for the local profile; a fresh aggregate if
    /// nothing has been recorded yet.
    pub fn stats(&self) -> Result<UserStats> {
        Ok(self
            .stats
            .load(&self.profile_id)?
            .unwrap_or_else(|| UserStats::new(self.profile_id.clone())))
    }

    pub fn record_message(&self, tokens: i64) -> Result<UserStats> {
        self.stats.update(&self.profile_id, |s| s.record_message(tokens))
    }

    pub fn record_login(&self) -> Result<UserStats> {
        self.stats.update(&self.profile_id, |s| s.record_login())
    }

    pub fn record_share(&self) -> Result<UserStats> {
        self.stats.update(&self.profile_id, |s| s.record_share())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_surface() {
        let vault = Vault::open_in_memory().unwrap();

        assert!(!vault.is_license_used("KEY-1").unwrap());
        vault.activate_license("KEY-1", "assistant-pro").unwrap();
        assert!(vault.is_license_used("KEY-1").unwrap());

        let history = vault.license_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].license_key, "KEY-1");
    }

    #[test]
    fn test_prompt_surface() {
        let vault = Vault::open_in_memory().unwrap();

        let created = vault
            .add_prompt(NewPrompt {
                title: "Email tone".to_string(),
                content: "Rewrite this email".to_string(),
                category: "work".to_string(),
                tags: vec!["email".to_string()],
                user_id: None,
            })
            .unwrap();

        // Author defaults to the local profile
        assert_eq!(created.user_id.as_deref(), Some(vault.profile_id()));

        vault.upvote_prompt(created.id).unwrap();
        let stored = vault.prompt(created.id).unwrap().unwrap();
        assert_eq!(stored.upvotes, 1);

        assert_eq!(vault.prompts(Some("work")).unwrap().len(), 1);
        assert_eq!(vault.prompts(Some("all")).unwrap().len(), 1);
        assert_eq!(vault.search_prompts("EMAIL").unwrap().len(), 1);
    }

    #[test]
    fn test_stats_surface() {
        let vault = Vault::open_in_memory().unwrap();

        let fresh = vault.stats().unwrap();
        assert_eq!(fresh.messages_sent, 0);

        vault.record_message(250).unwrap();
        vault.record_login().unwrap();
        vault.record_share().unwrap();

        let stats = vault.stats().unwrap();
        assert_eq!(stats.messages_sent, 1);
        assert_eq!(stats.tokens_used, 250);
        assert_eq!(stats.logins, 1);
        assert_eq!(stats.shares, 1);
        assert!(stats.unlocked_count() >= 1);
    }

    #[test]
    fn test_profile_id_is_stable_per_store() {
        let vault = Vault::open_in_memory().unwrap();
        let id = vault.profile_id().to_string();

        // Same database handle, same profile
        let again = Vault::with_database(Config::default(), vault.database().clone()).unwrap();
        assert_eq!(again.profile_id(), id);
    }
}
