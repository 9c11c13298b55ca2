//! Stacking pair service
//!
//! Two users who get moved into a target channel when they meet in voice.

use tracing::{info, instrument};
use vmod_common::ConsoleResult;
use vmod_core::{StackingPair, StackingPairDraft};

use super::context::ServiceContext;

const STACKING_PAIRS_PATH: &str = "/api/stacking-pairs";

/// Stacking pair service
pub struct StackingPairService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StackingPairService<'a> {
    /// Create a new StackingPairService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_stacking_pairs(&self) -> ConsoleResult<Vec<StackingPair>> {
        self.ctx.api().get(STACKING_PAIRS_PATH).await
    }

    #[instrument(skip(self, draft))]
    pub async fn create_stacking_pair(&self, draft: &StackingPairDraft) -> ConsoleResult<StackingPair> {
        let request = draft.to_request()?;
        let pair: StackingPair = self.ctx.api().post(STACKING_PAIRS_PATH, &request).await?;
        info!(pair_id = pair.id, "Stacking pair created");
        Ok(pair)
    }

    /// Flip `is_active` on the engine
    #[instrument(skip(self))]
    pub async fn toggle_stacking_pair(&self, pair_id: i64) -> ConsoleResult<StackingPair> {
        let pair: StackingPair = self
            .ctx
            .api()
            .patch_empty(&format!("{STACKING_PAIRS_PATH}/{pair_id}/toggle"))
            .await?;
        info!(pair_id, is_active = pair.is_active, "Stacking pair toggled");
        Ok(pair)
    }

    #[instrument(skip(self))]
    pub async fn delete_stacking_pair(&self, pair_id: i64) -> ConsoleResult<()> {
        self.ctx
            .api()
            .delete(&format!("{STACKING_PAIRS_PATH}/{pair_id}"), &[])
            .await?;
        info!(pair_id, "Stacking pair deleted");
        Ok(())
    }
}
