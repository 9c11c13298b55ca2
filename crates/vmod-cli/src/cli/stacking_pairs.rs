//! Stacking pair command handlers.

use vmod_client::{ServiceContext, StackingPairService};
use vmod_core::{StackingPair, StackingPairDraft};

use super::commands::StackingPairCommands;
use super::output::{confirm, Output};

/// Handle stacking pair commands.
pub async fn handle_stacking_pair_command(
    cmd: StackingPairCommands,
    ctx: &ServiceContext,
    out: Output,
) -> anyhow::Result<()> {
    let pairs = StackingPairService::new(ctx);
    match cmd {
        StackingPairCommands::List => {
            let list = pairs.list_stacking_pairs().await?;
            out.render(&list, |list| {
                println!("{:<6} {:<20} {:<20} {:<20} ACTIVE", "ID", "USER 1", "USER 2", "CHANNEL");
                for pair in list {
                    print_pair(pair);
                }
                println!("Total: {} stacking pairs", list.len());
            })
        }

        StackingPairCommands::Add {
            user_1,
            user_2,
            channel,
        } => {
            let draft = StackingPairDraft {
                user_id_1: user_1,
                user_id_2: user_2,
                target_channel_id: channel,
            };
            let pair = pairs.create_stacking_pair(&draft).await?;
            out.render(&pair, |p| {
                println!("Created stacking pair #{}", p.id);
            })
        }

        StackingPairCommands::Toggle { id } => {
            let pair = pairs.toggle_stacking_pair(id).await?;
            out.render(&pair, |p| {
                let state = if p.is_active { "active" } else { "inactive" };
                println!("Stacking pair #{} is now {state}", p.id);
            })
        }

        StackingPairCommands::Remove { id, yes } => {
            if !confirm(&format!("Remove stacking pair #{id}?"), yes)? {
                return out.aborted();
            }
            pairs.delete_stacking_pair(id).await?;
            out.done(&format!("Removed stacking pair #{id}"))
        }
    }
}

fn print_pair(pair: &StackingPair) {
    println!(
        "{:<6} {:<20} {:<20} {:<20} {}",
        pair.id,
        pair.user_id_1,
        pair.user_id_2,
        pair.target_channel_id,
        if pair.is_active { "yes" } else { "no" }
    );
}
