//! Kick target service
//!
//! Users who get disconnected after spending `timeout_sec` in voice.

use tracing::{info, instrument};
use vmod_common::ConsoleResult;
use vmod_core::{DiscordId, DomainError, KickTarget, KickTargetDraft, KickTargetPatch};

use super::context::ServiceContext;

const KICK_TARGETS_PATH: &str = "/api/kick-targets";

/// Kick target service
pub struct KickTargetService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> KickTargetService<'a> {
    /// Create a new KickTargetService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_kick_targets(&self) -> ConsoleResult<Vec<KickTarget>> {
        self.ctx.api().get(KICK_TARGETS_PATH).await
    }

    #[instrument(skip(self))]
    pub async fn get_kick_target(&self, discord_id: DiscordId) -> ConsoleResult<KickTarget> {
        self.ctx.api().get(&target_path(discord_id)).await
    }

    #[instrument(skip(self, draft))]
    pub async fn create_kick_target(&self, draft: &KickTargetDraft) -> ConsoleResult<KickTarget> {
        let request = draft.to_request()?;
        let target: KickTarget = self.ctx.api().post(KICK_TARGETS_PATH, &request).await?;
        info!(
            discord_id = %target.discord_id,
            timeout_sec = target.timeout_sec,
            "Kick target created"
        );
        Ok(target)
    }

    /// Send only the fields set in `patch`
    #[instrument(skip(self, patch))]
    pub async fn update_kick_target(
        &self,
        discord_id: DiscordId,
        patch: &KickTargetPatch,
    ) -> ConsoleResult<KickTarget> {
        if patch.is_empty() {
            return Err(DomainError::Validation("Nothing to update".to_string()).into());
        }
        patch.check()?;

        let target: KickTarget = self.ctx.api().patch(&target_path(discord_id), patch).await?;
        info!(%discord_id, is_active = target.is_active, "Kick target updated");
        Ok(target)
    }

    #[instrument(skip(self))]
    pub async fn delete_kick_target(&self, discord_id: DiscordId) -> ConsoleResult<()> {
        self.ctx.api().delete(&target_path(discord_id), &[]).await?;
        info!(%discord_id, "Kick target deleted");
        Ok(())
    }
}

fn target_path(discord_id: DiscordId) -> String {
    format!("{KICK_TARGETS_PATH}/{discord_id}")
}
