//! Dashboard and statistics

use tracing::instrument;
use vmod_common::ConsoleResult;
use vmod_core::{Dashboard, DiscordId, StatsOverview, UserStats};

use super::context::ServiceContext;

/// Read-only summaries the engine computes
pub struct OverviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OverviewService<'a> {
    /// Create a new OverviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Active rules, recent actions and the voice head count
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> ConsoleResult<Dashboard> {
        self.ctx.api().get("/api/dashboard").await
    }

    #[instrument(skip(self))]
    pub async fn stats_overview(&self) -> ConsoleResult<StatsOverview> {
        self.ctx.api().get("/api/stats/overview").await
    }

    #[instrument(skip(self))]
    pub async fn user_stats(&self, discord_id: DiscordId) -> ConsoleResult<UserStats> {
        self.ctx
            .api()
            .get(&format!("/api/stats/user/{discord_id}"))
            .await
    }
}
