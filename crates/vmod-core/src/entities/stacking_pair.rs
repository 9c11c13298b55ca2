//! Stacking pair entity - two members the engine moves together

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::DiscordId;

/// Stacking pair as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackingPair {
    pub id: i64,
    pub user_id_1: DiscordId,
    pub user_id_2: DiscordId,
    pub target_channel_id: DiscordId,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl StackingPair {
    /// Check if a member is one side of this pair
    pub fn involves(&self, user: DiscordId) -> bool {
        self.user_id_1 == user || self.user_id_2 == user
    }
}
