// Serde helpers for the seed file formats.
// Dates come as "MM/DD/YYYY" in the data files, but ISO dates are accepted too.
// Empty strings are treated as absent values ("issuedBook": "").

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Parses a date in any of the accepted formats
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc().date())
        })
}

fn date_from_str<E: serde::de::Error>(raw: &str) -> Result<Option<NaiveDate>, E> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw)
        .map(Some)
        .ok_or_else(|| E::custom(format!("invalid date '{}', expected MM/DD/YYYY", raw)))
}

/// `Option<NaiveDate>` as "MM/DD/YYYY", blank or null meaning `None`
pub mod us_date {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => date_from_str(&raw),
            None => Ok(None),
        }
    }
}

/// `Option<String>` where "" is `None`
pub mod blank_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
    }
}

/// Patch field for an optional date: absent => `None`, null/"" => `Some(None)`
pub mod patch_date {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => date_from_str(&raw).map(Some),
            None => Ok(Some(None)),
        }
    }
}

/// Patch field for an optional string: absent => `None`, null/"" => `Some(None)`
pub mod patch_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Some(
            Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()),
        ))
    }
}
