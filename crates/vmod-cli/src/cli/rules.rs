//! Rule command handlers.

use vmod_client::{RuleService, ServiceContext};
use vmod_core::{ActionType, Rule, RuleDraft};

use super::commands::{RuleCommands, RuleFields};
use super::output::{confirm, or_dash, Output};

/// Handle rule commands.
pub async fn handle_rule_command(cmd: RuleCommands, ctx: &ServiceContext, out: Output) -> anyhow::Result<()> {
    let rules = RuleService::new(ctx);
    match cmd {
        RuleCommands::List => {
            let list = rules.list_rules().await?;
            out.render(&list, |list| print_rules(list))
        }

        RuleCommands::Show { id } => {
            let rule = rules.get_rule(id).await?;
            out.render(&rule, print_rule)
        }

        RuleCommands::Create(fields) => {
            let created = rules.create_rule(&draft_from(&fields)).await?;
            out.warnings(&created.warnings);
            out.render(&created.value, |rule| {
                println!("Created rule #{} '{}'", rule.id, rule.name);
            })
        }

        RuleCommands::Update { id, fields } => {
            let updated = rules.update_rule(id, &draft_from(&fields)).await?;
            out.warnings(&updated.warnings);
            out.render(&updated.value, |rule| {
                println!("Saved rule #{} '{}'", rule.id, rule.name);
            })
        }

        RuleCommands::Toggle { id } => {
            let rule = rules.toggle_rule(id).await?;
            out.render(&rule, |rule| {
                let state = if rule.is_active { "enabled" } else { "disabled" };
                println!("Rule #{} is now {state}", rule.id);
            })
        }

        RuleCommands::Delete { id, yes } => {
            if !confirm(&format!("Delete rule #{id}?"), yes)? {
                return out.aborted();
            }
            rules.delete_rule(id).await?;
            out.done(&format!("Deleted rule #{id}"))
        }
    }
}

fn draft_from(fields: &RuleFields) -> RuleDraft {
    RuleDraft {
        name: fields.name.clone(),
        description: fields.description.clone(),
        is_active: !fields.inactive,
        target_list: fields.target_list.clone(),
        channel_ids: fields.channels.clone(),
        max_time_sec: fields.max_time.clone(),
        action_type: ActionType::from(fields.action).as_str().to_string(),
        action_params: fields.params.clone(),
        schedule_cron: fields.cron.clone(),
        schedule_tz: fields.tz.clone(),
        priority: fields.priority.clone(),
    }
}

fn print_rules(rules: &[Rule]) {
    println!(
        "{:<6} {:<4} {:<8} {:<10} {:<8} {:<10} NAME",
        "ID", "ON", "PRIORITY", "ACTION", "MAX", "LIST"
    );
    for rule in rules {
        println!(
            "{:<6} {:<4} {:<8} {:<10} {:<8} {:<10} {}",
            rule.id,
            if rule.is_active { "yes" } else { "no" },
            rule.priority,
            rule.action_type,
            or_dash(rule.max_time_sec),
            or_dash(rule.target_list),
            rule.name
        );
    }
    println!("Total: {} rules", rules.len());
}

fn print_rule(rule: &Rule) {
    let channels = match rule.channel_ids.as_deref() {
        Some(ids) if !ids.is_empty() => ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
        _ => "all".to_string(),
    };
    println!("Rule #{} '{}'", rule.id, rule.name);
    println!("  active:      {}", rule.is_active);
    println!("  description: {}", or_dash(rule.description.as_deref()));
    println!("  target list: {}", rule.target_list.map_or("everyone", |l| l.as_str()));
    println!("  channels:    {channels}");
    println!("  max time:    {}", or_dash(rule.max_time_sec));
    println!("  action:      {} {}", rule.action_type, serde_json::Value::Object(rule.action_params.clone()));
    println!("  cron:        {} ({})", or_dash(rule.schedule_cron.as_deref()), rule.schedule_tz);
    println!("  priority:    {}", rule.priority);
}
