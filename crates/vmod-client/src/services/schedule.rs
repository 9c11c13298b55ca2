//! Schedule service
//!
//! Cron-driven enable/disable of rules. A schedule references its rule by
//! ID only, so the editor loads schedules and rules together.

use tracing::{info, instrument};
use vmod_common::ConsoleResult;
use vmod_core::{Rule, Schedule, ScheduleDraft};

use super::context::ServiceContext;
use super::rule::RuleService;

const SCHEDULES_PATH: &str = "/api/schedules";

/// Schedules plus the rules they can point at
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleBoard {
    pub schedules: Vec<Schedule>,
    pub rules: Vec<Rule>,
}

impl ScheduleBoard {
    /// Name of the rule a schedule points at, if it is still known
    pub fn rule_name(&self, rule_id: i64) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.id == rule_id)
            .map(|r| r.name.as_str())
    }
}

/// Schedule service
pub struct ScheduleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScheduleService<'a> {
    /// Create a new ScheduleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_schedules(&self) -> ConsoleResult<Vec<Schedule>> {
        self.ctx.api().get(SCHEDULES_PATH).await
    }

    /// Fetch schedules and rules in parallel; either failure fails both
    #[instrument(skip(self))]
    pub async fn load_board(&self) -> ConsoleResult<ScheduleBoard> {
        let rules = RuleService::new(self.ctx);
        let (schedules, rules) = tokio::try_join!(self.list_schedules(), rules.list_rules())?;
        Ok(ScheduleBoard { schedules, rules })
    }

    /// Create a schedule. A missing cron expression or rule ID fails here
    /// without contacting the engine.
    #[instrument(skip(self, draft))]
    pub async fn create_schedule(&self, draft: &ScheduleDraft) -> ConsoleResult<Schedule> {
        let request = draft.to_request()?;
        self.submit(&request).await
    }

    /// Like [`create_schedule`](Self::create_schedule), also requiring the
    /// rule to be in `known_rules`
    #[instrument(skip(self, draft, known_rules))]
    pub async fn create_schedule_for(
        &self,
        draft: &ScheduleDraft,
        known_rules: &[Rule],
    ) -> ConsoleResult<Schedule> {
        let request = draft.to_request_for(known_rules)?;
        self.submit(&request).await
    }

    async fn submit(&self, request: &vmod_core::ScheduleRequest) -> ConsoleResult<Schedule> {
        let schedule: Schedule = self.ctx.api().post(SCHEDULES_PATH, request).await?;
        info!(
            schedule_id = schedule.id,
            rule_id = schedule.rule_id,
            action = %schedule.action,
            "Schedule created"
        );
        Ok(schedule)
    }

    /// Delete a schedule. Confirmation is the caller's job.
    #[instrument(skip(self))]
    pub async fn delete_schedule(&self, schedule_id: i64) -> ConsoleResult<()> {
        self.ctx
            .api()
            .delete(&format!("{SCHEDULES_PATH}/{schedule_id}"), &[])
            .await?;
        info!(schedule_id, "Schedule deleted");
        Ok(())
    }
}
