//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vmod_core::{ActionType, ListType, ScheduleAction};

/// vmod - operator console for the voice moderation engine
#[derive(Parser, Debug)]
#[command(name = "vmod")]
#[command(about = "Operator console for the voice moderation engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Settings file holding the engine connection
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change the engine connection
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Active rules, recent actions and voice head count
    Dashboard,

    /// Moderation rules
    #[command(subcommand)]
    Rules(RuleCommands),

    /// Cron schedules that enable or disable rules
    #[command(subcommand)]
    Schedules(ScheduleCommands),

    /// Query the audit log
    Logs(LogArgs),

    /// Whitelist and blacklist membership
    #[command(subcommand)]
    Users(UserCommands),

    /// Action statistics
    #[command(subcommand)]
    Stats(StatsCommands),

    /// Timed silent-kick targets
    #[command(subcommand)]
    KickTargets(KickTargetCommands),

    /// Pairs of members moved together
    #[command(subcommand)]
    StackingPairs(StackingPairCommands),

    /// Watch engine liveness until Ctrl-C
    Live,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    #[default]
    Human,
    /// JSON format
    Json,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the base URL and masked API key
    Show,

    /// Store new connection values; an empty value clears the key
    Set {
        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        base_url: Option<String>,
    },

    /// Forget the stored API key
    Clear,
}

/// Rule editor fields. Everything is text; the console normalizes it.
#[derive(Args, Debug, Clone)]
pub struct RuleFields {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Create or save the rule disabled
    #[arg(long)]
    pub inactive: bool,

    /// whitelist or blacklist; omit to apply to everyone
    #[arg(long, default_value = "")]
    pub target_list: String,

    /// Comma or whitespace separated channel IDs; omit for all channels
    #[arg(long, default_value = "")]
    pub channels: String,

    /// Seconds in voice before the action fires
    #[arg(long, default_value = "")]
    pub max_time: String,

    #[arg(long, value_enum, default_value_t = ActionArg::Mute)]
    pub action: ActionArg,

    /// Action parameters as a JSON object
    #[arg(long, default_value = "{}")]
    pub params: String,

    #[arg(long, default_value = "")]
    pub cron: String,

    #[arg(long, default_value = "UTC")]
    pub tz: String,

    #[arg(long, default_value = "0")]
    pub priority: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionArg {
    Mute,
    Unmute,
    Move,
    Kick,
}

impl From<ActionArg> for ActionType {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Mute => ActionType::Mute,
            ActionArg::Unmute => ActionType::Unmute,
            ActionArg::Move => ActionType::Move,
            ActionArg::Kick => ActionType::Kick,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum RuleCommands {
    List,

    Show { id: i64 },

    Create(RuleFields),

    /// Replace every field of a rule
    Update {
        id: i64,

        #[command(flatten)]
        fields: RuleFields,
    },

    /// Flip a rule between enabled and disabled
    Toggle { id: i64 },

    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleActionArg {
    Enable,
    Disable,
}

impl From<ScheduleActionArg> for ScheduleAction {
    fn from(arg: ScheduleActionArg) -> Self {
        match arg {
            ScheduleActionArg::Enable => ScheduleAction::Enable,
            ScheduleActionArg::Disable => ScheduleAction::Disable,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCommands {
    List,

    Create {
        /// Rule to enable or disable
        #[arg(long)]
        rule: String,

        /// Cron expression, forwarded verbatim
        #[arg(long, default_value = "")]
        cron: String,

        #[arg(long, value_enum, default_value_t = ScheduleActionArg::Enable)]
        action: ScheduleActionArg,

        #[arg(long, default_value = "UTC")]
        tz: String,
    },

    Delete {
        id: i64,

        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct LogArgs {
    #[arg(long, default_value = "")]
    pub user: String,

    #[arg(long, default_value = "")]
    pub rule: String,

    #[arg(long, default_value = "")]
    pub action: String,

    /// Earliest time, RFC 3339 or local `YYYY-MM-DD[ HH:MM[:SS]]`
    #[arg(long, default_value = "")]
    pub from: String,

    #[arg(long, default_value = "")]
    pub to: String,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    #[arg(long, default_value_t = vmod_core::query::DEFAULT_LOG_LIMIT)]
    pub limit: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListArg {
    Whitelist,
    Blacklist,
}

impl From<ListArg> for ListType {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::Whitelist => ListType::Whitelist,
            ListArg::Blacklist => ListType::Blacklist,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    List {
        #[arg(value_enum)]
        list: ListArg,
    },

    Add {
        #[arg(value_enum)]
        list: ListArg,

        discord_id: String,

        #[arg(long, default_value = "")]
        username: String,

        #[arg(long, default_value = "")]
        reason: String,
    },

    Remove {
        #[arg(value_enum)]
        list: ListArg,

        discord_id: String,

        #[arg(long)]
        yes: bool,
    },

    /// Add `id[,username[,reason]]` lines from a file, or stdin when omitted
    Bulk {
        #[arg(value_enum)]
        list: ListArg,

        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum StatsCommands {
    Overview,

    User { discord_id: String },
}

#[derive(Subcommand, Debug)]
pub enum KickTargetCommands {
    List,

    Show { discord_id: String },

    Add {
        discord_id: String,

        #[arg(long, default_value = "")]
        username: String,

        /// Seconds in voice before the kick; defaults to one hour
        #[arg(long, default_value = "")]
        timeout: String,
    },

    /// Change only the given fields
    Update {
        discord_id: String,

        #[arg(long)]
        timeout: Option<i64>,

        #[arg(long)]
        active: Option<bool>,

        #[arg(long)]
        username: Option<String>,
    },

    Remove {
        discord_id: String,

        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum StackingPairCommands {
    List,

    Add {
        user_1: String,

        user_2: String,

        /// Channel both members are moved into
        #[arg(long)]
        channel: String,
    },

    Toggle { id: i64 },

    Remove {
        id: i64,

        #[arg(long)]
        yes: bool,
    },
}
