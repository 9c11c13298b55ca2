//! Schedule editor input

use serde::Serialize;
use validator::Validate;

use super::non_empty;
use crate::entities::{Rule, ScheduleAction};
use crate::error::DomainError;

/// Raw schedule editor contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub rule_id: String,
    pub cron_expr: String,
    pub action: ScheduleAction,
    pub timezone: String,
}

impl Default for ScheduleDraft {
    fn default() -> Self {
        Self {
            rule_id: String::new(),
            cron_expr: String::new(),
            action: ScheduleAction::Enable,
            timezone: "UTC".to_string(),
        }
    }
}

/// Body sent on `POST /schedules`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ScheduleRequest {
    pub rule_id: i64,
    #[validate(length(min = 1, max = 100, message = "Cron expression must be 1-100 characters"))]
    pub cron_expr: String,
    pub action: ScheduleAction,
    #[validate(length(min = 1, max = 50, message = "Timezone must be 1-50 characters"))]
    pub timezone: String,
}

impl ScheduleDraft {
    /// Check the two required fields and build the request body.
    ///
    /// The cron expression itself is not parsed here.
    pub fn to_request(&self) -> Result<ScheduleRequest, DomainError> {
        let cron_expr = non_empty(&self.cron_expr).ok_or(DomainError::MissingCronExpression)?;
        let rule_id = parse_rule_id(&self.rule_id)?;

        let request = ScheduleRequest {
            rule_id,
            cron_expr: cron_expr.to_string(),
            action: self.action,
            timezone: non_empty(&self.timezone).unwrap_or("UTC").to_string(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Like [`to_request`](Self::to_request), additionally requiring the
    /// rule to be present in the locally known rule list
    pub fn to_request_for(&self, known_rules: &[Rule]) -> Result<ScheduleRequest, DomainError> {
        let request = self.to_request()?;
        if !known_rules.iter().any(|r| r.id == request.rule_id) {
            return Err(DomainError::UnknownRule(request.rule_id));
        }
        Ok(request)
    }
}

/// Parse an engine-assigned row ID typed by the operator
pub fn parse_rule_id(input: &str) -> Result<i64, DomainError> {
    match input.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DomainError::InvalidRuleId(input.trim().to_string())),
    }
}
