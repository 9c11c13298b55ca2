//! Kick target input

use serde::Serialize;
use validator::Validate;

use super::non_empty;
use crate::error::DomainError;
use crate::value_objects::DiscordId;

/// Default voice timeout before the kick fires (1 hour)
pub const DEFAULT_KICK_TIMEOUT_SEC: i64 = 3600;
/// Shortest timeout the engine accepts
pub const MIN_KICK_TIMEOUT_SEC: i64 = 60;
/// Longest timeout the engine accepts (1 day)
pub const MAX_KICK_TIMEOUT_SEC: i64 = 86_400;

/// Raw kick target form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KickTargetDraft {
    pub discord_id: String,
    pub username: String,
    /// Empty means the default timeout
    pub timeout_sec: String,
}

/// Body sent on `POST /kick-targets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct KickTargetRequest {
    pub discord_id: DiscordId,
    #[validate(length(max = 100, message = "Username must be at most 100 characters"))]
    pub username: Option<String>,
    pub timeout_sec: i64,
}

/// Body sent on `PATCH /kick-targets/{discord_id}`; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct KickTargetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_sec: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "Username must be at most 100 characters"))]
    pub username: Option<String>,
}

impl KickTargetDraft {
    pub fn to_request(&self) -> Result<KickTargetRequest, DomainError> {
        let discord_id = DiscordId::parse(&self.discord_id)
            .map_err(|e| DomainError::discord_id("discord_id", self.discord_id.trim(), e))?;
        let timeout_sec = match non_empty(&self.timeout_sec) {
            None => DEFAULT_KICK_TIMEOUT_SEC,
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                DomainError::Validation(format!("timeout_sec must be an integer, got {raw:?}"))
            })?,
        };
        check_timeout(timeout_sec)?;

        let request = KickTargetRequest {
            discord_id,
            username: non_empty(&self.username).map(str::to_string),
            timeout_sec,
        };
        request.validate()?;
        Ok(request)
    }
}

impl KickTargetPatch {
    /// Check whether the patch would change anything
    pub fn is_empty(&self) -> bool {
        self.timeout_sec.is_none() && self.is_active.is_none() && self.username.is_none()
    }

    pub fn check(&self) -> Result<(), DomainError> {
        if let Some(timeout) = self.timeout_sec {
            check_timeout(timeout)?;
        }
        self.validate()?;
        Ok(())
    }
}

fn check_timeout(value: i64) -> Result<(), DomainError> {
    if (MIN_KICK_TIMEOUT_SEC..=MAX_KICK_TIMEOUT_SEC).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::TimeoutOutOfRange {
            value,
            min: MIN_KICK_TIMEOUT_SEC,
            max: MAX_KICK_TIMEOUT_SEC,
        })
    }
}
