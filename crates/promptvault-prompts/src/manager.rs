//! Prompt library operations

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row};

use promptvault_storage::Database;

use crate::prompt::{normalize_tags, NewPrompt, Prompt};
use crate::{PromptError, Result, ALL_CATEGORIES};

const PROMPT_COLUMNS: &str = "id, title, content, category, tags, upvotes, user_id, created_at";

pub struct PromptManager {
    db: Database,
}

impl PromptManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a prompt and return the stored record with its new id.
    pub fn create(&self, new: NewPrompt) -> Result<Prompt> {
        if new.title.trim().is_empty() {
            return Err(PromptError::EmptyTitle);
        }

        let tags = normalize_tags(new.tags);
        let tags_json = serde_json::to_string(&tags)?;
        let created_at = Utc::now();

        let id = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO prompts (title, content, category, tags, upvotes, user_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6)",
                rusqlite::params![
                    new.title,
                    new.content,
                    new.category,
                    tags_json,
                    new.user_id,
                    created_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        tracing::debug!(prompt_id = id, category = %new.category, "Added prompt");

        Ok(Prompt {
            id,
            title: new.title,
            content: new.content,
            category: new.category,
            tags,
            upvotes: 0,
            user_id: new.user_id,
            created_at,
        })
    }

    /// List prompts, newest first.
    ///
    /// `Some(category)` restricts the result to that category unless it
    /// is the `"all"` sentinel, which behaves like `None`.
    pub fn list(&self, category: Option<&str>) -> Result<Vec<Prompt>> {
        Ok(self.db.with_connection(|conn| {
            let prompts = match category {
                Some(cat) if cat != ALL_CATEGORIES => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {PROMPT_COLUMNS} FROM prompts
                         WHERE category = ?1
                         ORDER BY created_at DESC, id DESC"
                    ))?;
                    let rows = stmt.query_map([cat], read_prompt)?;
                    rows.filter_map(|r| r.ok()).collect()
                }
                _ => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {PROMPT_COLUMNS} FROM prompts
                         ORDER BY created_at DESC, id DESC"
                    ))?;
                    let rows = stmt.query_map([], read_prompt)?;
                    rows.filter_map(|r| r.ok()).collect()
                }
            };

            Ok(prompts)
        })?)
    }

    /// Look up a single prompt by id.
    pub fn get(&self, id: i64) -> Result<Option<Prompt>> {
        Ok(self.db.with_connection(|conn| {
            let prompt = conn
                .query_row(
                    &format!("SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = ?1"),
                    [id],
                    read_prompt,
                )
                .optional()?;
            Ok(prompt)
        })?)
    }

    /// Add one upvote to a prompt. Unknown ids are a no-op.
    pub fn upvote(&self, id: i64) -> Result<()> {
        Ok(self.db.with_connection(|conn| {
            conn.execute("UPDATE prompts SET upvotes = upvotes + 1 WHERE id = ?1", [id])?;
            Ok(())
        })?)
    }

    /// Case-insensitive substring search over title, content, and tags.
    ///
    /// Results come back in store iteration order; no relevance ranking.
    pub fn search(&self, query: &str) -> Result<Vec<Prompt>> {
        Ok(self.db.with_connection(|conn| {
            let pattern = format!("%{}%", query.to_lowercase());

            let mut stmt = conn.prepare(&format!(
                "SELECT {PROMPT_COLUMNS} FROM prompts
                 WHERE LOWER(title) LIKE ?1 OR LOWER(content) LIKE ?1 OR LOWER(tags) LIKE ?1"
            ))?;

            let prompts: Vec<Prompt> = stmt
                .query_map([pattern], read_prompt)?
                .filter_map(|r| r.ok())
                .collect();

            Ok(prompts)
        })?)
    }
}

fn read_prompt(row: &Row<'_>) -> rusqlite::Result<Prompt> {
    let tags_json: String = row.get(4)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json).unwrap_or_default();

    let created_str: String = row.get(7)?;
    let created_at = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());

    Ok(Prompt {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        category: row.get(3)?,
        tags,
        upvotes: row.get(5)?,
        user_id: row.get(6)?,
        created_at,
    })
}

impl Clone for PromptManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> PromptManager {
        PromptManager::new(Database::open_in_memory().unwrap())
    }

    fn prompt(title: &str, content: &str, category: &str, tags: &[&str]) -> NewPrompt {
        NewPrompt {
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            user_id: None,
        }
    }

    #[test]
    fn test_create_assigns_id_and_lists() {
        let manager = manager();

        let created = manager
            .create(prompt("Email tone", "Rewrite this email", "work", &["email"]))
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.upvotes, 0);

        let listed = manager.list(None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].title, "Email tone");
        assert_eq!(listed[0].content, "Rewrite this email");
        assert_eq!(listed[0].category, "work");
        assert_eq!(listed[0].tags, vec!["email"]);
    }

    #[test]
    fn test_empty_title_rejected() {
        let manager = manager();
        let err = manager
            .create(prompt("   ", "content", "work", &[]))
            .unwrap_err();
        assert!(matches!(err, PromptError::EmptyTitle));
    }

    #[test]
    fn test_list_newest_first() {
        let manager = manager();

        let first = manager.create(prompt("First", "a", "work", &[])).unwrap();
        let second = manager.create(prompt("Second", "b", "work", &[])).unwrap();
        let third = manager.create(prompt("Third", "c", "creative", &[])).unwrap();

        let ids: Vec<i64> = manager.list(None).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[test]
    fn test_list_category_filter() {
        let manager = manager();

        manager.create(prompt("Standup", "a", "work", &[])).unwrap();
        manager.create(prompt("Poem", "b", "creative", &[])).unwrap();
        manager.create(prompt("Retro", "c", "work", &[])).unwrap();

        let work = manager.list(Some("work")).unwrap();
        assert_eq!(work.len(), 2);
        assert!(work.iter().all(|p| p.category == "work"));

        // The "all" sentinel behaves like no filter
        assert_eq!(manager.list(Some("all")).unwrap().len(), 3);
        assert_eq!(manager.list(Some("missing")).unwrap().len(), 0);
    }

    #[test]
    fn test_upvote_increments_by_one() {
        let manager = manager();
        let created = manager.create(prompt("Standup", "a", "work", &[])).unwrap();

        manager.upvote(created.id).unwrap();
        manager.upvote(created.id).unwrap();

        let stored = manager.get(created.id).unwrap().unwrap();
        assert_eq!(stored.upvotes, 2);
    }

    #[test]
    fn test_upvote_unknown_id_is_noop() {
        let manager = manager();
        manager.upvote(9999).unwrap();
        assert!(manager.get(9999).unwrap().is_none());
    }

    #[test]
    fn test_search_matches_title_content_and_tags() {
        let manager = manager();

        manager
            .create(prompt("Email rewriter", "Make it friendly", "work", &[]))
            .unwrap();
        manager
            .create(prompt("Poem starter", "Write about EMAIL etiquette", "creative", &[]))
            .unwrap();
        manager
            .create(prompt("Debug helper", "Explain the bug", "work", &["email-drafts"]))
            .unwrap();
        manager
            .create(prompt("Recipe ideas", "Dinner for four", "home", &[]))
            .unwrap();

        let results = manager.search("email").unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|p| p.title != "Recipe ideas"));

        assert!(manager.search("nothing-here").unwrap().is_empty());
    }
}
