//! Member list service
//!
//! Whitelist and blacklist membership: listing, single add, bulk paste and
//! removal by `(discord_id, list_type)`.

use tracing::{info, instrument};
use vmod_common::ConsoleResult;
use vmod_core::requests::parse_bulk;
use vmod_core::{
    BulkAddResult, DiscordId, InputWarning, ListEntry, ListEntryDraft, ListType, Normalized,
};

use super::context::ServiceContext;
use super::report_warnings;

const USERS_PATH: &str = "/api/users";

/// Outcome of a bulk paste
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkAddOutcome {
    /// Entries sent to the engine
    pub submitted: usize,
    /// Rows the engine reports as written
    pub processed: u64,
    /// 1-based line numbers, within the pasted text, of lines skipped locally
    pub dropped_lines: Vec<usize>,
    /// Every repair made while parsing, skipped lines included
    pub warnings: Vec<InputWarning>,
}

/// Member list service
pub struct MemberListService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberListService<'a> {
    /// Create a new MemberListService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_members(&self, list_type: ListType) -> ConsoleResult<Vec<ListEntry>> {
        self.ctx
            .api()
            .get_with_query(USERS_PATH, &list_query(list_type))
            .await
    }

    /// Add one member; the ID must parse locally first
    #[instrument(skip(self, draft))]
    pub async fn add_member(&self, draft: &ListEntryDraft, list_type: ListType) -> ConsoleResult<ListEntry> {
        let request = draft.to_request(list_type)?;
        let entry: ListEntry = self.ctx.api().post(USERS_PATH, &request).await?;
        info!(discord_id = %entry.discord_id, list_type = %entry.list_type, "Member added");
        Ok(entry)
    }

    #[instrument(skip(self))]
    pub async fn remove_member(&self, discord_id: DiscordId, list_type: ListType) -> ConsoleResult<()> {
        self.ctx
            .api()
            .delete(&format!("{USERS_PATH}/{discord_id}"), &list_query(list_type))
            .await?;
        info!(%discord_id, %list_type, "Member removed");
        Ok(())
    }

    /// Parse pasted lines and submit the valid ones in one batch.
    ///
    /// Nothing is sent when no line is valid.
    #[instrument(skip(self, text))]
    pub async fn bulk_add(&self, text: &str, list_type: ListType) -> ConsoleResult<BulkAddOutcome> {
        let Normalized { value: batch, warnings } = parse_bulk(text, list_type)?;
        report_warnings("bulk_add", &warnings);

        let result: BulkAddResult = self
            .ctx
            .api()
            .post(&format!("{USERS_PATH}/bulk"), &batch)
            .await?;
        info!(
            submitted = batch.entries.len(),
            processed = result.processed,
            %list_type,
            "Bulk add finished"
        );

        Ok(BulkAddOutcome {
            submitted: batch.entries.len(),
            processed: result.processed,
            dropped_lines: dropped_lines(&warnings),
            warnings,
        })
    }
}

fn list_query(list_type: ListType) -> [(&'static str, String); 1] {
    [("list_type", list_type.as_str().to_string())]
}

fn dropped_lines(warnings: &[InputWarning]) -> Vec<usize> {
    warnings
        .iter()
        .filter_map(|w| match w {
            InputWarning::DroppedLines { lines } => Some(lines.as_slice()),
            _ => None,
        })
        .flatten()
        .copied()
        .collect()
}
