//! Whitelist/blacklist input: single entries and bulk paste

use serde::Serialize;
use validator::Validate;

use super::non_empty;
use super::normalized::{InputWarning, Normalized};
use crate::entities::ListType;
use crate::error::DomainError;
use crate::value_objects::DiscordId;

/// Separators accepted between columns of a bulk line
const BULK_SEPARATORS: [char; 3] = ['\t', ',', ';'];

/// Raw single-entry form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEntryDraft {
    pub discord_id: String,
    pub username: String,
    pub reason: String,
}

/// Body sent on `POST /users`, and one element of a bulk batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct ListEntryRequest {
    pub discord_id: DiscordId,
    pub list_type: ListType,
    #[validate(length(max = 100, message = "Username must be at most 100 characters"))]
    pub username: Option<String>,
    pub reason: Option<String>,
}

/// Body sent on `POST /users/bulk`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkListRequest {
    pub entries: Vec<ListEntryRequest>,
}

impl ListEntryDraft {
    /// Build a request for the given list; the ID must be a positive integer
    pub fn to_request(&self, list_type: ListType) -> Result<ListEntryRequest, DomainError> {
        let discord_id = DiscordId::parse(&self.discord_id)
            .map_err(|e| DomainError::discord_id("discord_id", self.discord_id.trim(), e))?;
        let request = ListEntryRequest {
            discord_id,
            list_type,
            username: non_empty(&self.username).map(str::to_string),
            reason: non_empty(&self.reason).map(str::to_string),
        };
        request.validate()?;
        Ok(request)
    }
}

/// Parse pasted bulk text, one member per line.
///
/// Each line is `discord_id[, username[, reason]]`, columns separated by
/// tabs, commas or semicolons (runs of separators count as one). Lines
/// without a positive integer ID are skipped and reported by their 1-based
/// position in `text`; if nothing survives the whole batch is rejected. A
/// username too long for the engine is dropped from its entry with a warning.
pub fn parse_bulk(text: &str, list_type: ListType) -> Result<Normalized<BulkListRequest>, DomainError> {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    let mut warnings = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_bulk_line(line, list_type) {
            Some(mut entry) => {
                // Username length is the only validated column
                if entry.validate().is_err() {
                    if let Some(username) = entry.username.take() {
                        warnings.push(InputWarning::malformed(
                            "username",
                            &username,
                            format!("no username on line {}", idx + 1),
                        ));
                    }
                }
                entries.push(entry);
            }
            None => skipped.push(idx + 1),
        }
    }

    if entries.is_empty() {
        return Err(DomainError::NoValidRows);
    }

    if !skipped.is_empty() {
        warnings.push(InputWarning::DroppedLines { lines: skipped });
    }
    Ok(Normalized {
        value: BulkListRequest { entries },
        warnings,
    })
}

fn parse_bulk_line(line: &str, list_type: ListType) -> Option<ListEntryRequest> {
    let columns = split_columns(line);
    let discord_id = DiscordId::parse(columns.first()?).ok()?;
    let column = |i: usize| {
        columns
            .get(i)
            .and_then(|c| non_empty(c))
            .map(str::to_string)
    };
    Some(ListEntryRequest {
        discord_id,
        list_type,
        username: column(1),
        reason: column(2),
    })
}

/// Split on separator runs. A leading separator still yields an empty
/// first column so a missing ID is not shifted in from the username.
fn split_columns(line: &str) -> Vec<&str> {
    line.split(&BULK_SEPARATORS[..])
        .enumerate()
        .filter(|(i, c)| *i == 0 || !c.is_empty())
        .map(|(_, c)| c.trim())
        .collect()
}
