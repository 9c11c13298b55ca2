//! Dashboard and statistics command handlers.

use std::collections::BTreeMap;
use vmod_client::{OverviewService, ServiceContext};
use vmod_core::Dashboard;

use super::commands::StatsCommands;
use super::output::{or_dash, Output};
use super::users::parse_id;

/// Handle the dashboard command.
pub async fn handle_dashboard(ctx: &ServiceContext, out: Output) -> anyhow::Result<()> {
    let dashboard = OverviewService::new(ctx).dashboard().await?;
    out.render(&dashboard, print_dashboard)
}

/// Handle statistics commands.
pub async fn handle_stats_command(cmd: StatsCommands, ctx: &ServiceContext, out: Output) -> anyhow::Result<()> {
    let overview = OverviewService::new(ctx);
    match cmd {
        StatsCommands::Overview => {
            let stats = overview.stats_overview().await?;
            out.render(&stats, |s| {
                println!("Total actions: {}", s.total_actions);
                if let Some((name, count)) = s.top_action() {
                    println!("Most frequent: {name} ({count})");
                }
                print_counts(&s.actions_by_type);
            })
        }

        StatsCommands::User { discord_id } => {
            let id = parse_id(&discord_id)?;
            let stats = overview.user_stats(id).await?;
            out.render(&stats, |s| {
                println!("Actions against {}: {}", s.discord_id, s.total_actions);
                print_counts(&s.actions_by_type);
            })
        }
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    println!("In voice: {}", or_dash(dashboard.voice_online_count));
    println!();
    println!("Active rules ({}):", dashboard.active_rules.len());
    for rule in &dashboard.active_rules {
        println!("  #{:<5} {} [{}]", rule.id, rule.name, rule.action_type);
    }
    println!();
    println!("Recent actions ({}):", dashboard.recent_logs.len());
    for record in &dashboard.recent_logs {
        println!(
            "  {} {} {}",
            record.executed_at.format("%Y-%m-%d %H:%M:%S"),
            or_dash(record.action_type.as_deref()),
            record.discord_id
        );
    }
}

fn print_counts(counts: &BTreeMap<String, i64>) {
    for (name, count) in counts {
        println!("  {name:<10} {count}");
    }
}
