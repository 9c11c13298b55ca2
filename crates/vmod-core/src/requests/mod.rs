//! Operator input drafts and the request bodies they normalize into

mod kick_target;
mod member;
mod normalized;
mod rule;
mod schedule;
mod stacking_pair;

pub use kick_target::{
    KickTargetDraft, KickTargetPatch, KickTargetRequest, DEFAULT_KICK_TIMEOUT_SEC,
    MAX_KICK_TIMEOUT_SEC, MIN_KICK_TIMEOUT_SEC,
};
pub use member::{parse_bulk, BulkListRequest, ListEntryDraft, ListEntryRequest};
pub use normalized::{InputWarning, Normalized};
pub use rule::{format_channel_ids, parse_channel_ids, RuleDraft, RuleRequest};
pub use schedule::{parse_rule_id, ScheduleDraft, ScheduleRequest};
pub use stacking_pair::{StackingPairDraft, StackingPairRequest};

/// Trimmed text, or `None` when blank
pub(crate) fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
