//! # vmod-client
//!
//! Application layer: the engine gateway and one service per resource.

pub mod gateway;
pub mod services;

pub use gateway::ApiClient;
pub use services::{
    unless_cancelled, BulkAddOutcome, KickTargetService, LogPageResult, LogService,
    MemberListService, OverviewService, RuleService, ScheduleBoard, ScheduleService,
    ServiceContext, StackingPairService,
};
