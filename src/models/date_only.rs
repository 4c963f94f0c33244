// src/models/date_only.rs
// DOCUMENTATION: Calendar date (de)serialization for JSON bodies
// PURPOSE: Accept and emit `YYYY-MM-DD` only, nothing with a time component

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

pub const FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum DateError {
    #[error("expected exactly YYYY-MM-DD")]
    Shape,
    #[error(transparent)]
    Calendar(#[from] chrono::ParseError),
}

/// Parse a date-only string
/// DOCUMENTATION: Exactly ten characters, zero-padded fields and no sign,
/// whitespace, time component or timezone
pub fn parse(value: &str) -> Result<NaiveDate, DateError> {
    if !has_date_shape(value.as_bytes()) {
        return Err(DateError::Shape);
    }
    Ok(NaiveDate::parse_from_str(value, FORMAT)?)
}

// chrono alone accepts single-digit fields, leading spaces and signed years
fn has_date_shape(bytes: &[u8]) -> bool {
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid date {:?}: {}", raw, e)))
}

/// Same contract for fields where the date may be absent or null
pub mod option {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.collect_str(&d.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some).map_err(|e| {
                serde::de::Error::custom(format!("invalid date {:?}: {}", raw, e))
            }),
            None => Ok(None),
        }
    }
}
