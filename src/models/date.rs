//! Calendar-day handling for dates coming off the wire.
//!
//! The API emits either plain `YYYY-MM-DD` dates or full RFC 3339 timestamps
//! (`2025-01-31T00:00:00.000Z`). Both collapse to the UTC calendar day.

use chrono::{DateTime, NaiveDate, Utc};

pub(crate) const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a wire date into a calendar day.
///
/// Returns `None` if the string is neither an ISO date nor an RFC 3339 timestamp.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(day) = NaiveDate::parse_from_str(s, DAY_FORMAT) {
        return Some(day);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// Serde adapter for `NaiveDate` fields.
pub(crate) mod day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(super::DAY_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_day(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s)))
    }
}

/// Serde adapter for `Option<NaiveDate>` fields. `null`, `""` and absent fields map to `None`.
pub(crate) mod optional_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.collect_str(&d.format(super::DAY_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => super::parse_day(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s))),
        }
    }
}
