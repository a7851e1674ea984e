//! License record data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the activation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Engine-assigned row id
    pub id: i64,
    /// The activated license key
    pub license_key: String,
    /// Product the key belongs to
    pub product_id: String,
    /// When the activation was recorded
    pub activated_at: DateTime<Utc>,
}
