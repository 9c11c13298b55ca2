//! List entry entity - a user's membership in the whitelist or blacklist

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rule::ListType;
use crate::value_objects::DiscordId;

/// Membership record; identity is `(discord_id, list_type)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    #[serde(default)]
    pub id: Option<i64>,
    pub discord_id: DiscordId,
    pub list_type: ListType,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ListEntry {
    /// Composite key the engine deletes by
    #[inline]
    pub fn key(&self) -> (DiscordId, ListType) {
        (self.discord_id, self.list_type)
    }

    /// Get display name (username if set, otherwise the raw ID)
    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .unwrap_or_else(|| self.discord_id.to_string())
    }
}

/// Engine reply to a bulk insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct BulkAddResult {
    #[serde(default)]
    pub processed: u64,
}
