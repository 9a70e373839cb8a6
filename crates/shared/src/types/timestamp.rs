//! Timestamp normalization at the store boundary.
//!
//! Document stores hand back a mix of native timestamps (RFC 3339) and
//! plain `YYYY-MM-DD` date strings, depending on which code path wrote the
//! record. Everything is normalized into `DateTime<Utc>` here, before it
//! reaches core logic; the audit compiler in particular sorts on these.
//!
//! This is a boundary helper for backends that deserialize raw documents.
//! The in-memory store holds typed values and never goes through it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a raw timestamp value into a canonical UTC timestamp.
///
/// Accepts, in order of preference:
/// - RFC 3339 (`2026-02-14T08:30:00Z`, with or without offset)
/// - A naive datetime (`2026-02-14T08:30:00` / `2026-02-14 08:30:00`), read as UTC
/// - A bare date (`2026-02-14`), read as midnight UTC
///
/// Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}
