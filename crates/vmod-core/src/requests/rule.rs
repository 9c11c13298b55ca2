//! Rule editor input and its normalization into a request body

use serde::Serialize;
use validator::Validate;

use super::non_empty;
use super::normalized::{InputWarning, Normalized};
use crate::entities::{ActionParams, ActionType, ListType, Rule};
use crate::error::DomainError;
use crate::value_objects::DiscordId;

/// Raw rule editor contents, one string per form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDraft {
    pub name: String,
    pub description: String,
    pub is_active: bool,
    /// "", "whitelist" or "blacklist"
    pub target_list: String,
    /// Comma and/or whitespace separated channel IDs
    pub channel_ids: String,
    pub max_time_sec: String,
    pub action_type: String,
    /// JSON object text
    pub action_params: String,
    pub schedule_cron: String,
    pub schedule_tz: String,
    pub priority: String,
}

impl Default for RuleDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            is_active: true,
            target_list: String::new(),
            channel_ids: String::new(),
            max_time_sec: String::new(),
            action_type: ActionType::default().as_str().to_string(),
            action_params: "{}".to_string(),
            schedule_cron: String::new(),
            schedule_tz: "UTC".to_string(),
            priority: "0".to_string(),
        }
    }
}

/// Body sent on `POST /rules` and `PUT /rules/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct RuleRequest {
    #[validate(length(min = 1, max = 100, message = "Rule name must be 1-100 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub target_list: Option<ListType>,
    pub channel_ids: Option<Vec<DiscordId>>,
    pub max_time_sec: Option<i64>,
    pub action_type: ActionType,
    pub action_params: ActionParams,
    #[validate(length(max = 100, message = "Cron expression must be at most 100 characters"))]
    pub schedule_cron: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Timezone must be 1-50 characters"))]
    pub schedule_tz: String,
    pub priority: i32,
}

impl RuleDraft {
    /// Prefill the editor from an existing rule
    pub fn from_rule(rule: &Rule) -> Self {
        Self {
            name: rule.name.clone(),
            description: rule.description.clone().unwrap_or_default(),
            is_active: rule.is_active,
            target_list: rule
                .target_list
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            channel_ids: format_channel_ids(rule.channel_ids.as_deref()),
            max_time_sec: rule
                .max_time_sec
                .map(|v| v.to_string())
                .unwrap_or_default(),
            action_type: rule.action_type.as_str().to_string(),
            action_params: serde_json::to_string_pretty(&rule.action_params)
                .unwrap_or_else(|_| "{}".to_string()),
            schedule_cron: rule.schedule_cron.clone().unwrap_or_default(),
            schedule_tz: rule.schedule_tz.clone(),
            priority: rule.priority.to_string(),
        }
    }

    /// Shape the draft into a request body.
    ///
    /// Only an empty name, an unknown action type or an unknown target list
    /// reject the draft. Every other field degrades to a default and leaves
    /// a warning.
    pub fn normalize(&self) -> Result<Normalized<RuleRequest>, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyRuleName);
        }
        let action_type: ActionType = self.action_type.parse()?;
        let target_list = match non_empty(&self.target_list) {
            None => None,
            Some(raw) => Some(
                raw.parse::<ListType>()
                    .map_err(|_| DomainError::InvalidTargetList(raw.to_string()))?,
            ),
        };

        let mut warnings = Vec::new();

        let (channel_ids, dropped) = split_channel_ids(&self.channel_ids);
        if !dropped.is_empty() {
            warnings.push(InputWarning::DroppedTokens {
                field: "channel_ids",
                tokens: dropped,
            });
        }

        let max_time_sec = parse_max_time(&self.max_time_sec, &mut warnings);
        let action_params = parse_action_params(&self.action_params, &mut warnings);
        let priority = parse_priority(&self.priority, &mut warnings);

        let request = RuleRequest {
            name: name.to_string(),
            description: non_empty(&self.description).map(str::to_string),
            is_active: self.is_active,
            target_list,
            channel_ids: (!channel_ids.is_empty()).then_some(channel_ids),
            max_time_sec,
            action_type,
            action_params,
            schedule_cron: non_empty(&self.schedule_cron).map(str::to_string),
            schedule_tz: non_empty(&self.schedule_tz).unwrap_or("UTC").to_string(),
            priority,
        };
        request.validate()?;

        Ok(Normalized {
            value: request,
            warnings,
        })
    }
}

/// Parse channel ID text into a de-duplicated, order-preserving list.
///
/// Tokens are separated by commas and/or whitespace; anything that is not a
/// positive integer is discarded. An empty result collapses to `None`.
pub fn parse_channel_ids(input: &str) -> Option<Vec<DiscordId>> {
    let (ids, _) = split_channel_ids(input);
    (!ids.is_empty()).then_some(ids)
}

/// Render channel IDs back into editor text
pub fn format_channel_ids(ids: Option<&[DiscordId]>) -> String {
    ids.map(|ids| {
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    })
    .unwrap_or_default()
}

fn split_channel_ids(input: &str) -> (Vec<DiscordId>, Vec<String>) {
    let mut ids: Vec<DiscordId> = Vec::new();
    let mut dropped = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        match DiscordId::parse(token) {
            Ok(id) if !ids.contains(&id) => ids.push(id),
            Ok(_) => {}
            Err(_) => dropped.push(token.to_string()),
        }
    }
    (ids, dropped)
}

fn parse_max_time(input: &str, warnings: &mut Vec<InputWarning>) -> Option<i64> {
    let raw = non_empty(input)?;
    match raw.parse::<i64>() {
        Ok(v) if v >= 0 => Some(v),
        _ => {
            warnings.push(InputWarning::malformed("max_time_sec", raw, "no limit"));
            None
        }
    }
}

fn parse_action_params(input: &str, warnings: &mut Vec<InputWarning>) -> ActionParams {
    let Some(raw) = non_empty(input) else {
        return ActionParams::new();
    };
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(serde_json::Value::Null) => ActionParams::new(),
        _ => {
            warnings.push(InputWarning::malformed("action_params", raw, "{}"));
            ActionParams::new()
        }
    }
}

fn parse_priority(input: &str, warnings: &mut Vec<InputWarning>) -> i32 {
    let Some(raw) = non_empty(input) else {
        return 0;
    };
    raw.parse::<i32>().unwrap_or_else(|_| {
        warnings.push(InputWarning::malformed("priority", raw, "0"));
        0
    })
}
