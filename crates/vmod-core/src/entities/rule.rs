//! Rule entity - a named moderation policy with scope, action and priority

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::DiscordId;

/// Opaque per-action parameters (e.g. destination channel for `move`)
pub type ActionParams = serde_json::Map<String, serde_json::Value>;

/// What the engine does to a member when a rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[default]
    Mute,
    Unmute,
    Move,
    Kick,
}

impl ActionType {
    pub const ALL: [ActionType; 4] = [Self::Mute, Self::Unmute, Self::Move, Self::Kick];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mute => "mute",
            Self::Unmute => "unmute",
            Self::Move => "move",
            Self::Kick => "kick",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::InvalidActionType(s.to_string()))
    }
}

/// Which membership list gates a rule, and which list an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Whitelist,
    Blacklist,
}

impl ListType {
    pub const ALL: [ListType; 2] = [Self::Whitelist, Self::Blacklist];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whitelist => "whitelist",
            Self::Blacklist => "blacklist",
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ListType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::InvalidListType(s.to_string()))
    }
}

/// Rule as reported by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub target_list: Option<ListType>,
    /// `None` means every voice channel
    #[serde(default)]
    pub channel_ids: Option<Vec<DiscordId>>,
    #[serde(default)]
    pub max_time_sec: Option<i64>,
    pub action_type: ActionType,
    #[serde(default)]
    pub action_params: ActionParams,
    #[serde(default)]
    pub schedule_cron: Option<String>,
    #[serde(default = "default_timezone")]
    pub schedule_tz: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Rule {
    /// Check whether the rule applies to every channel
    #[inline]
    pub fn is_global(&self) -> bool {
        self.channel_ids.as_ref().map_or(true, Vec::is_empty)
    }

    /// Check whether the rule is scoped to a given channel
    pub fn applies_to_channel(&self, channel_id: DiscordId) -> bool {
        self.channel_ids
            .as_ref()
            .map_or(true, |ids| ids.is_empty() || ids.contains(&channel_id))
    }
}

pub(crate) fn default_timezone() -> String {
    "UTC".to_string()
}
