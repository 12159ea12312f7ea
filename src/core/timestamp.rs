//! Serde adapter for persisted instants.
//!
//! Instants are written as RFC 3339 in UTC with a `Z` suffix and only as many
//! fractional digits as needed (0, 3, 6 or 9), which makes
//! serialize → parse → serialize byte-identical.
//!
//! Reading is more forgiving: any RFC 3339 offset is normalized to UTC, and a
//! naive ISO-8601 timestamp without an offset is taken to be UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Render an instant in the persisted format.
pub fn format(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an instant from the persisted format, or from a naive ISO-8601
/// timestamp interpreted as UTC.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(instant))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO-8601 instant: {raw:?}")))
}
