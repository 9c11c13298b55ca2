//! Stacking pair input

use serde::Serialize;

use crate::error::DomainError;
use crate::value_objects::DiscordId;

/// Raw stacking pair form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackingPairDraft {
    pub user_id_1: String,
    pub user_id_2: String,
    pub target_channel_id: String,
}

/// Body sent on `POST /stacking-pairs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackingPairRequest {
    pub user_id_1: DiscordId,
    pub user_id_2: DiscordId,
    pub target_channel_id: DiscordId,
}

impl StackingPairDraft {
    pub fn to_request(&self) -> Result<StackingPairRequest, DomainError> {
        let parse = |field: &'static str, raw: &str| {
            DiscordId::parse(raw).map_err(|e| DomainError::discord_id(field, raw.trim(), e))
        };
        let user_id_1 = parse("user_id_1", &self.user_id_1)?;
        let user_id_2 = parse("user_id_2", &self.user_id_2)?;
        let target_channel_id = parse("target_channel_id", &self.target_channel_id)?;

        if user_id_1 == user_id_2 {
            return Err(DomainError::SameUserPair);
        }
        Ok(StackingPairRequest {
            user_id_1,
            user_id_2,
            target_channel_id,
        })
    }
}
