//! Wire formats shared by the row-store backends.
//!
//! Timestamps travel as ISO-8601 strings in UTC with an explicit offset;
//! booleans travel as the literal strings "Sim" and "Não". Both match the
//! rows already in the store, so they cannot change shape.

use chrono::{DateTime, SecondsFormat, Utc};
use domain::DomainError;

/// Render a timestamp the way the store expects it, e.g.
/// `2025-06-02T14:30:00.000000+00:00`.
pub fn render_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse a stored timestamp back to UTC.
///
/// Accepts any RFC 3339 offset and normalizes to UTC; anything else is a
/// store-level error, not a validation problem the operator can fix.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::Store(format!("invalid stored timestamp {value:?}: {e}")))
}

/// Render a boolean flag column.
pub fn render_flag(value: bool) -> &'static str {
    if value { "Sim" } else { "Não" }
}

/// Parse a boolean flag column. Only the exact string "Sim" is true;
/// everything else, including legacy blanks, reads as false.
pub fn parse_flag(value: &str) -> bool {
    value == "Sim"
}
