//! List membership command handlers.

use anyhow::Context;
use serde_json::json;
use std::io::Read;
use std::path::Path;
use vmod_client::{MemberListService, ServiceContext};
use vmod_core::{DiscordId, DomainError, ListEntry, ListEntryDraft, ListType};

use super::commands::UserCommands;
use super::output::{confirm, or_dash, Output};

/// Handle list membership commands.
pub async fn handle_user_command(cmd: UserCommands, ctx: &ServiceContext, out: Output) -> anyhow::Result<()> {
    let members = MemberListService::new(ctx);
    match cmd {
        UserCommands::List { list } => {
            let list_type = ListType::from(list);
            let entries = members.list_members(list_type).await?;
            out.render(&entries, |entries| print_entries(list_type, entries))
        }

        UserCommands::Add {
            list,
            discord_id,
            username,
            reason,
        } => {
            let draft = ListEntryDraft {
                discord_id,
                username,
                reason,
            };
            let entry = members.add_member(&draft, list.into()).await?;
            out.render(&entry, |e| {
                println!("Added {} to the {}", e.display_name(), e.list_type);
            })
        }

        UserCommands::Remove {
            list,
            discord_id,
            yes,
        } => {
            let list_type = ListType::from(list);
            let id = parse_id(&discord_id)?;
            if !confirm(&format!("Remove {id} from the {list_type}?"), yes)? {
                return out.aborted();
            }
            members.remove_member(id, list_type).await?;
            out.done(&format!("Removed {id} from the {list_type}"))
        }

        UserCommands::Bulk { list, file } => {
            let text = read_input(file.as_deref())?;
            let outcome = members.bulk_add(&text, list.into()).await?;
            out.warnings(&outcome.warnings);
            let report = json!({
                "submitted": outcome.submitted,
                "processed": outcome.processed,
                "dropped_lines": outcome.dropped_lines,
            });
            out.render(&report, |_| {
                println!(
                    "Submitted {} entries, engine processed {}",
                    outcome.submitted, outcome.processed
                );
            })
        }
    }
}

pub(crate) fn parse_id(input: &str) -> Result<DiscordId, DomainError> {
    DiscordId::parse(input).map_err(|e| DomainError::discord_id("discord_id", input.trim(), e))
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_entries(list_type: ListType, entries: &[ListEntry]) {
    println!("{:<20} {:<24} REASON", "DISCORD ID", "USERNAME");
    for entry in entries {
        println!(
            "{:<20} {:<24} {}",
            entry.discord_id,
            or_dash(entry.username.as_deref()),
            or_dash(entry.reason.as_deref())
        );
    }
    println!("Total: {} on the {list_type}", entries.len());
}
