//! Read-only aggregates: dashboard snapshot and action statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{LogRecord, Rule};
use crate::value_objects::DiscordId;

/// Dashboard snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub active_rules: Vec<Rule>,
    #[serde(default)]
    pub recent_logs: Vec<LogRecord>,
    /// Members currently in voice, if the engine knows
    #[serde(default)]
    pub voice_online_count: Option<i64>,
}

/// Action counts across the whole log
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsOverview {
    pub total_actions: i64,
    #[serde(default)]
    pub actions_by_type: BTreeMap<String, i64>,
}

/// Action counts for one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub discord_id: DiscordId,
    pub total_actions: i64,
    #[serde(default)]
    pub actions_by_type: BTreeMap<String, i64>,
}

impl StatsOverview {
    /// Most frequent action type, ties broken alphabetically
    pub fn top_action(&self) -> Option<(&str, i64)> {
        self.actions_by_type
            .iter()
            .fold(None, |best: Option<(&str, i64)>, (name, &count)| match best {
                Some((_, c)) if c >= count => best,
                _ => Some((name.as_str(), count)),
            })
    }
}
