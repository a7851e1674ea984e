//! License activation log operations

use chrono::{DateTime, Utc};

use promptvault_storage::{Database, StorageError};

use crate::license::LicenseRecord;
use crate::{LicenseError, Result};

pub struct LicenseManager {
    db: Database,
}

impl LicenseManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Check whether a key has already been activated.
    pub fn is_key_used(&self, key: &str) -> Result<bool> {
        Ok(self.db.with_connection(|conn| {
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM licenses WHERE license_key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .ok();

            Ok(existing.is_some())
        })?)
    }

    /// Append an activation record for a key.
    ///
    /// The store rejects a second activation of the same key; that
    /// surfaces as [`LicenseError::AlreadyActivated`].
    pub fn record_activation(&self, key: &str, product_id: &str) -> Result<LicenseRecord> {
        if key.trim().is_empty() {
            return Err(LicenseError::EmptyKey);
        }

        let activated_at = Utc::now();
        let result = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO licenses (license_key, product_id, activated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, product_id, activated_at.to_rfc3339()],
            )?;
            Ok(conn.last_insert_rowid())
        });

        match result {
            Ok(id) => {
                tracing::info!(license_key = %key, product_id = %product_id, "Recorded activation");
                Ok(LicenseRecord {
                    id,
                    license_key: key.to_string(),
                    product_id: product_id.to_string(),
                    activated_at,
                })
            }
            Err(StorageError::Database(e))
                if e.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) =>
            {
                Err(LicenseError::AlreadyActivated(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All activation records, most recent first.
    pub fn history(&self) -> Result<Vec<LicenseRecord>> {
        Ok(self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, license_key, product_id, activated_at FROM licenses
                 ORDER BY activated_at DESC, id DESC",
            )?;

            let records: Vec<LicenseRecord> = stmt
                .query_map([], |row| {
                    let activated_str: String = row.get(3)?;
                    let activated_at = DateTime::parse_from_rfc3339(&activated_str)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now());

                    Ok(LicenseRecord {
                        id: row.get(0)?,
                        license_key: row.get(1)?,
                        product_id: row.get(2)?,
                        activated_at,
                    })
                })?
                .filter_map(|r| r.ok())
                .collect();

            Ok(records)
        })?)
    }
}

impl Clone for LicenseManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
