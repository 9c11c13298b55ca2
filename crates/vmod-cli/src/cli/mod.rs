//! CLI argument parsing and command handlers.

mod commands;
mod config;
mod kick_targets;
mod live;
mod logs;
mod output;
mod overview;
mod rules;
mod schedules;
mod stacking_pairs;
mod users;

pub use commands::{Cli, Commands, OutputFormat};
pub use config::handle_config_command;
pub use kick_targets::handle_kick_target_command;
pub use live::handle_live;
pub use logs::handle_logs_command;
pub use output::Output;
pub use overview::{handle_dashboard, handle_stats_command};
pub use rules::handle_rule_command;
pub use schedules::handle_schedule_command;
pub use stacking_pairs::handle_stacking_pair_command;
pub use users::handle_user_command;
