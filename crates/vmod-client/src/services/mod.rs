//! Console services
//!
//! One service per engine resource. Each operation shapes operator input
//! locally, makes its gateway call, and returns the engine's answer; no
//! state is kept between calls, so views re-fetch after every mutation.

pub mod cancel;
pub mod context;
pub mod kick_target;
pub mod log;
pub mod member_list;
pub mod overview;
pub mod rule;
pub mod schedule;
pub mod stacking_pair;

use tracing::warn;
use vmod_core::InputWarning;

// Re-export all services for convenience
pub use cancel::unless_cancelled;
pub use context::ServiceContext;
pub use kick_target::KickTargetService;
pub use log::{LogPageResult, LogService};
pub use member_list::{BulkAddOutcome, MemberListService};
pub use overview::OverviewService;
pub use rule::RuleService;
pub use schedule::{ScheduleBoard, ScheduleService};
pub use stacking_pair::StackingPairService;

/// Log every input repair made while normalizing a draft
pub(crate) fn report_warnings(operation: &str, warnings: &[InputWarning]) {
    for warning in warnings {
        warn!(operation, field = warning.field(), "{warning}");
    }
}
