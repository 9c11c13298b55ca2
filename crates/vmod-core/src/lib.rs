//! # vmod-core
//!
//! Domain layer for the voice-moderation console: the engine's resources
//! (rules, schedules, list entries, audit records), the normalization that
//! turns operator input into request bodies, and the audit log query.
//! No I/O happens here.

pub mod entities;
pub mod error;
pub mod query;
pub mod requests;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActionParams, ActionType, BulkAddResult, Dashboard, KickTarget, ListEntry, ListType,
    LogRecord, Rule, Schedule, ScheduleAction, StackingPair, StatsOverview, UserStats,
};
pub use error::DomainError;
pub use query::{LogFilter, LogFilterDraft, LogPage};
pub use requests::{
    InputWarning, KickTargetDraft, KickTargetPatch, KickTargetRequest, ListEntryDraft,
    ListEntryRequest, Normalized, RuleDraft, RuleRequest, ScheduleDraft, ScheduleRequest,
    StackingPairDraft, StackingPairRequest,
};
pub use value_objects::{DiscordId, DiscordIdParseError};
