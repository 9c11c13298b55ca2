//! Rule service
//!
//! Lists, creates, edits, toggles and deletes moderation rules. Drafts are
//! normalized before anything is sent; the engine stays authoritative for
//! everything else, including the toggled `is_active` value.

use tracing::{info, instrument};
use vmod_common::ConsoleResult;
use vmod_core::{Normalized, Rule, RuleDraft};

use super::context::ServiceContext;
use super::report_warnings;

const RULES_PATH: &str = "/api/rules";

/// Rule service
pub struct RuleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RuleService<'a> {
    /// Create a new RuleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_rules(&self) -> ConsoleResult<Vec<Rule>> {
        self.ctx.api().get(RULES_PATH).await
    }

    #[instrument(skip(self))]
    pub async fn get_rule(&self, rule_id: i64) -> ConsoleResult<Rule> {
        self.ctx.api().get(&rule_path(rule_id)).await
    }

    /// Create a rule from editor input
    ///
    /// Repaired fields come back as warnings next to the created rule.
    #[instrument(skip(self, draft))]
    pub async fn create_rule(&self, draft: &RuleDraft) -> ConsoleResult<Normalized<Rule>> {
        let Normalized { value: request, warnings } = draft.normalize()?;
        report_warnings("create_rule", &warnings);

        let rule: Rule = self.ctx.api().post(RULES_PATH, &request).await?;
        info!(rule_id = rule.id, name = %rule.name, "Rule created");

        Ok(Normalized { value: rule, warnings })
    }

    /// Replace a rule with the normalized draft
    #[instrument(skip(self, draft))]
    pub async fn update_rule(&self, rule_id: i64, draft: &RuleDraft) -> ConsoleResult<Normalized<Rule>> {
        let Normalized { value: request, warnings } = draft.normalize()?;
        report_warnings("update_rule", &warnings);

        let rule: Rule = self.ctx.api().put(&rule_path(rule_id), &request).await?;
        info!(rule_id = rule.id, "Rule updated");

        Ok(Normalized { value: rule, warnings })
    }

    /// Flip `is_active` on the engine and return the rule as it now stands
    #[instrument(skip(self))]
    pub async fn toggle_rule(&self, rule_id: i64) -> ConsoleResult<Rule> {
        let rule: Rule = self
            .ctx
            .api()
            .patch_empty(&format!("{}/toggle", rule_path(rule_id)))
            .await?;
        info!(rule_id = rule.id, is_active = rule.is_active, "Rule toggled");
        Ok(rule)
    }

    /// Delete a rule. Confirmation is the caller's job.
    #[instrument(skip(self))]
    pub async fn delete_rule(&self, rule_id: i64) -> ConsoleResult<()> {
        self.ctx.api().delete(&rule_path(rule_id), &[]).await?;
        info!(rule_id, "Rule deleted");
        Ok(())
    }
}

fn rule_path(rule_id: i64) -> String {
    format!("{RULES_PATH}/{rule_id}")
}
