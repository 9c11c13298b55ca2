//! Kick target entity - a member silently kicked after a voice timeout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::DiscordId;

/// Timed kick target as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickTarget {
    pub id: i64,
    pub discord_id: DiscordId,
    #[serde(default)]
    pub username: Option<String>,
    pub timeout_sec: i64,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
