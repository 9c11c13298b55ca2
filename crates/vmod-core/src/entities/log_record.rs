//! Audit log record - an action the engine executed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::DiscordId;

/// Immutable record of an executed action
///
/// `action_type` stays a plain string: the log also carries engine-side
/// actions (timed kicks, stacking moves) outside the rule action set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    pub executed_at: DateTime<Utc>,
    pub discord_id: DiscordId,
    #[serde(default)]
    pub action_type: Option<String>,
    /// `None` for manual or unattributed actions
    #[serde(default)]
    pub rule_id: Option<i64>,
    #[serde(default)]
    pub channel_id: Option<DiscordId>,
    #[serde(default)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl LogRecord {
    /// Check if this action was triggered by a rule
    #[inline]
    pub fn is_attributed(&self) -> bool {
        self.rule_id.is_some()
    }
}
