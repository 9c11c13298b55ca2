//! Discord ID - 64-bit identifier for users, channels and guilds
//!
//! The engine stores these as Postgres `BIGINT` and speaks them as JSON
//! integers, so we serialize as a number but accept strings on input.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A positive Discord snowflake (user, channel or guild ID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscordId(u64);

impl DiscordId {
    /// Create a new DiscordId from a raw value
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    #[inline]
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// Parse operator input, accepting only a positive integer.
    ///
    /// Surrounding whitespace is ignored. Zero, negatives and anything
    /// non-numeric are rejected.
    pub fn parse(s: &str) -> Result<Self, DiscordIdParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DiscordIdParseError::Empty);
        }
        match trimmed.parse::<u64>() {
            Ok(0) => Err(DiscordIdParseError::NotPositive),
            Ok(id) => Ok(Self(id)),
            Err(_) => Err(DiscordIdParseError::InvalidFormat),
        }
    }
}

/// Error when parsing a DiscordId from operator input
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DiscordIdParseError {
    #[error("empty id")]
    Empty,

    #[error("id must be a positive integer")]
    NotPositive,

    #[error("invalid id format")]
    InvalidFormat,
}

impl fmt::Display for DiscordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for DiscordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<DiscordId> for u64 {
    fn from(id: DiscordId) -> Self {
        id.0
    }
}

impl std::str::FromStr for DiscordId {
    type Err = DiscordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiscordId::parse(s)
    }
}

impl Serialize for DiscordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

// Deserialize from number or string
impl<'de> Deserialize<'de> for DiscordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DiscordIdVisitor;

        impl Visitor<'_> for DiscordIdVisitor {
            type Value = DiscordId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative integer or numeric string")
            }

            fn visit_u64<E>(self, value: u64) -> Result<DiscordId, E>
            where
                E: de::Error,
            {
                Ok(DiscordId(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<DiscordId, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(DiscordId)
                    .map_err(|_| de::Error::custom("negative discord id"))
            }

            fn visit_str<E>(self, value: &str) -> Result<DiscordId, E>
            where
                E: de::Error,
            {
                value
                    .parse::<u64>()
                    .map(DiscordId)
                    .map_err(|_| de::Error::custom("invalid discord id string"))
            }
        }

        deserializer.deserialize_any(DiscordIdVisitor)
    }
}
