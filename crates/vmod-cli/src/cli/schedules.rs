//! Schedule command handlers.

use vmod_client::{RuleService, ScheduleBoard, ScheduleService, ServiceContext};
use vmod_core::ScheduleDraft;

use super::commands::ScheduleCommands;
use super::output::{confirm, Output};

/// Handle schedule commands.
pub async fn handle_schedule_command(
    cmd: ScheduleCommands,
    ctx: &ServiceContext,
    out: Output,
) -> anyhow::Result<()> {
    let schedules = ScheduleService::new(ctx);
    match cmd {
        ScheduleCommands::List => {
            let board = schedules.load_board().await?;
            out.render(&board.schedules, |_| print_board(&board))
        }

        ScheduleCommands::Create {
            rule,
            cron,
            action,
            tz,
        } => {
            let draft = ScheduleDraft {
                rule_id: rule,
                cron_expr: cron,
                action: action.into(),
                timezone: tz,
            };
            // Fail on a missing cron before paying for the rule lookup
            draft.to_request()?;
            let known = RuleService::new(ctx).list_rules().await?;
            let schedule = schedules.create_schedule_for(&draft, &known).await?;
            out.render(&schedule, |s| {
                println!(
                    "Created schedule #{}: {} rule #{} at '{}' ({})",
                    s.id, s.action, s.rule_id, s.cron_expr, s.timezone
                );
            })
        }

        ScheduleCommands::Delete { id, yes } => {
            if !confirm(&format!("Delete schedule #{id}?"), yes)? {
                return out.aborted();
            }
            schedules.delete_schedule(id).await?;
            out.done(&format!("Deleted schedule #{id}"))
        }
    }
}

fn print_board(board: &ScheduleBoard) {
    println!("{:<6} {:<8} {:<20} {:<16} RULE", "ID", "ACTION", "CRON", "TIMEZONE");
    for s in &board.schedules {
        let rule = match board.rule_name(s.rule_id) {
            Some(name) => format!("#{} {name}", s.rule_id),
            None => format!("#{} (unknown)", s.rule_id),
        };
        println!(
            "{:<6} {:<8} {:<20} {:<16} {rule}",
            s.id, s.action, s.cron_expr, s.timezone
        );
    }
    println!("Total: {} schedules", board.schedules.len());
}
