//! Domain errors - local validation failures raised before any network call

use thiserror::Error;

use crate::value_objects::DiscordIdParseError;

/// Domain layer errors
///
/// Every variant is a precondition the console checks on its own side. The
/// engine stays authoritative; these only stop requests that cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Rule Input
    // =========================================================================
    #[error("Rule name is required")]
    EmptyRuleName,

    #[error("Unknown action type: {0} (expected mute, unmute, move or kick)")]
    InvalidActionType(String),

    #[error("Unknown target list: {0} (expected whitelist or blacklist)")]
    InvalidTargetList(String),

    // =========================================================================
    // Schedule Input
    // =========================================================================
    #[error("rule_id must be a positive integer, got {0:?}")]
    InvalidRuleId(String),

    #[error("cron_expr is required")]
    MissingCronExpression,

    #[error("Unknown schedule action: {0} (expected enable or disable)")]
    InvalidScheduleAction(String),

    #[error("Rule {0} is not in the current rule list")]
    UnknownRule(i64),

    // =========================================================================
    // Member Input
    // =========================================================================
    #[error("{field} must be a positive integer, got {input:?}: {reason}")]
    InvalidDiscordId {
        field: &'static str,
        input: String,
        reason: DiscordIdParseError,
    },

    #[error("Unknown list type: {0} (expected whitelist or blacklist)")]
    InvalidListType(String),

    #[error("No valid rows (format: discord_id, username, reason)")]
    NoValidRows,

    #[error("A stacking pair needs two different users")]
    SameUserPair,

    #[error("timeout_sec must be between {min} and {max}, got {value}")]
    TimeoutOutOfRange { value: i64, min: i64, max: i64 },

    // =========================================================================
    // Log Filter Input
    // =========================================================================
    #[error("Invalid {field} filter: {input:?}")]
    InvalidFilterValue { field: &'static str, input: String },

    #[error("Invalid {field} timestamp: {input:?}")]
    InvalidTimestamp { field: &'static str, input: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Get an error code string for display and scripting
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyRuleName => "EMPTY_RULE_NAME",
            Self::InvalidActionType(_) => "INVALID_ACTION_TYPE",
            Self::InvalidTargetList(_) => "INVALID_TARGET_LIST",
            Self::InvalidRuleId(_) => "INVALID_RULE_ID",
            Self::MissingCronExpression => "MISSING_CRON_EXPR",
            Self::InvalidScheduleAction(_) => "INVALID_SCHEDULE_ACTION",
            Self::UnknownRule(_) => "UNKNOWN_RULE",
            Self::InvalidDiscordId { .. } => "INVALID_DISCORD_ID",
            Self::InvalidListType(_) => "INVALID_LIST_TYPE",
            Self::NoValidRows => "NO_VALID_ROWS",
            Self::SameUserPair => "SAME_USER_PAIR",
            Self::TimeoutOutOfRange { .. } => "TIMEOUT_OUT_OF_RANGE",
            Self::InvalidFilterValue { .. } => "INVALID_FILTER",
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Check if the failure points at a missing cross-reference
    /// rather than at malformed input
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::UnknownRule(_))
    }

    /// Check if a required field was left empty
    pub fn is_missing_field(&self) -> bool {
        matches!(
            self,
            Self::EmptyRuleName | Self::MissingCronExpression | Self::NoValidRows
        ) || matches!(
            self,
            Self::InvalidDiscordId {
                reason: DiscordIdParseError::Empty,
                ..
            }
        ) || matches!(self, Self::InvalidRuleId(raw) if raw.is_empty())
    }

    /// Invalid ID error for `field`, keeping the rejected text
    pub fn discord_id(field: &'static str, input: &str, reason: DiscordIdParseError) -> Self {
        Self::InvalidDiscordId {
            field,
            input: input.to_string(),
            reason,
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
