//! Audit log filter and offset pagination

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::DomainError;
use crate::requests::non_empty;
use crate::value_objects::DiscordId;

/// Default page size
pub const DEFAULT_LOG_LIMIT: u32 = 50;
/// Maximum page size the engine serves
pub const MAX_LOG_LIMIT: u32 = 500;

/// Naive layouts a datetime picker or operator may type
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Offset-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPage {
    pub offset: u32,
    /// Always within 1..=MAX_LOG_LIMIT
    pub limit: u32,
}

impl Default for LogPage {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LOG_LIMIT,
        }
    }
}

impl LogPage {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_LOG_LIMIT),
        }
    }

    /// Window after this one
    pub fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            ..self
        }
    }

    /// Window before this one, floored at offset 0
    pub fn prev(self) -> Self {
        Self {
            offset: self.offset.saturating_sub(self.limit),
            ..self
        }
    }

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }

    /// A short page is taken as the end of the data; no total is fetched
    pub fn has_next(&self, page_len: usize) -> bool {
        page_len >= self.limit as usize
    }
}

/// Raw filter form; blank fields mean "no constraint"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilterDraft {
    pub discord_id: String,
    pub rule_id: String,
    pub action_type: String,
    /// RFC 3339 instant, or a naive local datetime
    pub date_from: String,
    pub date_to: String,
}

/// Validated audit log query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub discord_id: Option<DiscordId>,
    pub rule_id: Option<i64>,
    pub action_type: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub page: LogPage,
}

impl LogFilterDraft {
    /// Build a filter, reading naive datetimes in the machine's local zone
    pub fn to_filter(&self, page: LogPage) -> Result<LogFilter, DomainError> {
        self.to_filter_in(&Local, page)
    }

    /// Build a filter, reading naive datetimes in `tz`
    pub fn to_filter_in<Tz: TimeZone>(&self, tz: &Tz, page: LogPage) -> Result<LogFilter, DomainError> {
        let discord_id = non_empty(&self.discord_id)
            .map(|raw| {
                DiscordId::parse(raw).map_err(|_| DomainError::InvalidFilterValue {
                    field: "discord_id",
                    input: raw.to_string(),
                })
            })
            .transpose()?;

        let rule_id = non_empty(&self.rule_id)
            .map(|raw| {
                raw.parse::<i64>()
                    .ok()
                    .filter(|id| *id > 0)
                    .ok_or_else(|| DomainError::InvalidFilterValue {
                        field: "rule_id",
                        input: raw.to_string(),
                    })
            })
            .transpose()?;

        let date_from = non_empty(&self.date_from)
            .map(|raw| parse_timestamp_in(raw, tz).ok_or_else(|| timestamp_error("date_from", raw)))
            .transpose()?;
        let date_to = non_empty(&self.date_to)
            .map(|raw| parse_timestamp_in(raw, tz).ok_or_else(|| timestamp_error("date_to", raw)))
            .transpose()?;

        Ok(LogFilter {
            discord_id,
            rule_id,
            action_type: non_empty(&self.action_type).map(str::to_string),
            date_from,
            date_to,
            page,
        })
    }
}

impl LogFilter {
    /// Query pairs for `GET /logs`. Only set fields are emitted; the page
    /// window always is.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(7);
        if let Some(id) = self.discord_id {
            query.push(("discord_id", id.to_string()));
        }
        if let Some(id) = self.rule_id {
            query.push(("rule_id", id.to_string()));
        }
        if let Some(action) = &self.action_type {
            query.push(("action_type", action.clone()));
        }
        if let Some(from) = self.date_from {
            query.push(("date_from", to_iso(from)));
        }
        if let Some(to) = self.date_to {
            query.push(("date_to", to_iso(to)));
        }
        query.push(("offset", self.page.offset.to_string()));
        query.push(("limit", self.page.limit.to_string()));
        query
    }

    /// Same constraints, different window
    pub fn with_page(&self, page: LogPage) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// Parse an instant. Input with an offset is taken as is; a naive datetime
/// (or bare date, at midnight) is read in `tz`.
pub fn parse_timestamp_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    // Ambiguous wall-clock times (DST fall-back) take the earlier instant
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn timestamp_error(field: &'static str, input: &str) -> DomainError {
    DomainError::InvalidTimestamp {
        field,
        input: input.to_string(),
    }
}
