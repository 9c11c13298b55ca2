//! Value objects - immutable types that represent domain concepts

mod discord_id;

pub use discord_id::{DiscordId, DiscordIdParseError};
