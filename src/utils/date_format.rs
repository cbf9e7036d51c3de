//! `dd.mm.yyyy` dates as used by the results site and the dataset files.
//!
//! Usable as `#[serde(with = "crate::utils::date_format")]` on `NaiveDate` fields.

use crate::utils::error::{EngineError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%d.%m.%Y";

pub fn parse(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), FORMAT).map_err(|_| EngineError::InvalidDate {
        value: value.to_string(),
        expected: "dd.mm.yyyy".to_string(),
    })
}

pub fn format(date: NaiveDate) -> String {
    date.format(FORMAT).to_string()
}

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(*date))
}

pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}
