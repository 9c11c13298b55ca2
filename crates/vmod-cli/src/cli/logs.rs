//! Audit log command handler.

use serde_json::json;
use vmod_client::{LogPageResult, LogService, ServiceContext};
use vmod_core::{LogFilterDraft, LogPage, LogRecord};

use super::commands::LogArgs;
use super::output::{or_dash, Output};

/// Handle the logs command.
pub async fn handle_logs_command(args: LogArgs, ctx: &ServiceContext, out: Output) -> anyhow::Result<()> {
    let draft = LogFilterDraft {
        discord_id: args.user,
        rule_id: args.rule,
        action_type: args.action,
        date_from: args.from,
        date_to: args.to,
    };
    let filter = draft.to_filter(LogPage::new(args.offset, args.limit))?;
    let result = LogService::new(ctx).query_logs(&filter).await?;

    let report = json!({
        "records": result.records,
        "offset": result.page.offset,
        "limit": result.page.limit,
        "has_next": result.has_next(),
        "next_offset": result.next_page().map(|p| p.offset),
        "prev_offset": result.prev_page().map(|p| p.offset),
    });
    out.render(&report, |_| print_page(&result))
}

fn print_page(result: &LogPageResult) {
    println!("{:<24} {:<20} {:<8} {:<6} CHANNEL", "WHEN", "USER", "ACTION", "RULE");
    for record in &result.records {
        print_record(record);
    }

    let first = u64::from(result.page.offset) + 1;
    let last = u64::from(result.page.offset) + result.records.len() as u64;
    if result.records.is_empty() {
        println!("No records at offset {}", result.page.offset);
    } else {
        println!("Records {first}-{last}");
    }
    if let Some(prev) = result.prev_page() {
        println!("Previous: --offset {}", prev.offset);
    }
    match result.next_page() {
        Some(next) => println!("Next: --offset {}", next.offset),
        None => println!("No further pages"),
    }
}

fn print_record(record: &LogRecord) {
    println!(
        "{:<24} {:<20} {:<8} {:<6} {}",
        record.executed_at.format("%Y-%m-%d %H:%M:%S UTC"),
        record.discord_id,
        or_dash(record.action_type.as_deref()),
        or_dash(record.rule_id),
        or_dash(record.channel_id),
    );
}
