//! Kick target command handlers.

use vmod_client::{KickTargetService, ServiceContext};
use vmod_core::{KickTarget, KickTargetDraft, KickTargetPatch};

use super::commands::KickTargetCommands;
use super::output::{confirm, or_dash, Output};
use super::users::parse_id;

/// Handle kick target commands.
pub async fn handle_kick_target_command(
    cmd: KickTargetCommands,
    ctx: &ServiceContext,
    out: Output,
) -> anyhow::Result<()> {
    let targets = KickTargetService::new(ctx);
    match cmd {
        KickTargetCommands::List => {
            let list = targets.list_kick_targets().await?;
            out.render(&list, |list| {
                println!("{:<20} {:<24} {:<8} ACTIVE", "DISCORD ID", "USERNAME", "TIMEOUT");
                for target in list {
                    print_target(target);
                }
                println!("Total: {} kick targets", list.len());
            })
        }

        KickTargetCommands::Show { discord_id } => {
            let target = targets.get_kick_target(parse_id(&discord_id)?).await?;
            out.render(&target, print_target)
        }

        KickTargetCommands::Add {
            discord_id,
            username,
            timeout,
        } => {
            let draft = KickTargetDraft {
                discord_id,
                username,
                timeout_sec: timeout,
            };
            let target = targets.create_kick_target(&draft).await?;
            out.render(&target, |t| {
                println!("Kick target {} added, timeout {}s", t.discord_id, t.timeout_sec);
            })
        }

        KickTargetCommands::Update {
            discord_id,
            timeout,
            active,
            username,
        } => {
            let patch = KickTargetPatch {
                timeout_sec: timeout,
                is_active: active,
                username,
            };
            let target = targets.update_kick_target(parse_id(&discord_id)?, &patch).await?;
            out.render(&target, print_target)
        }

        KickTargetCommands::Remove { discord_id, yes } => {
            let id = parse_id(&discord_id)?;
            if !confirm(&format!("Remove kick target {id}?"), yes)? {
                return out.aborted();
            }
            targets.delete_kick_target(id).await?;
            out.done(&format!("Removed kick target {id}"))
        }
    }
}

fn print_target(target: &KickTarget) {
    println!(
        "{:<20} {:<24} {:<8} {}",
        target.discord_id,
        or_dash(target.username.as_deref()),
        format!("{}s", target.timeout_sec),
        if target.is_active { "yes" } else { "no" }
    );
}
