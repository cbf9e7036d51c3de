//! Turns a recorded performance value into a comparable ordinal.
//!
//! Three shapes are recognized, first match wins:
//!
//! | shape       | example   | ordinal                   |
//! |-------------|-----------|---------------------------|
//! | `H*:MM,SS`  | `1:02,33` | `3600*H + 60*MM + SS`     |
//! | `D*,DD`     | `14,53`   | digits without separator  |
//! | `D.DDD`     | `2.345`   | digits without separator  |
//!
//! The ordinal is only meaningful between values of the same discipline.
//! Matching is a search, not an anchored match, so annotated values such as
//! `14,53 (Q)` still parse.

use regex::Regex;
use std::sync::LazyLock;

/// Returned for values that are not comparable performances.
pub const UNPARSEABLE: i64 = -1;

static LONG_DISTANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]*):([0-9]{2}),([0-9]{2})").expect("valid pattern"));
static SPRINT_OR_TECHNICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]*,[0-9]{2}").expect("valid pattern"));
static MULTI_EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]\.[0-9]{3}").expect("valid pattern"));

pub fn parse(raw_value: &str) -> i64 {
    if let Some(caps) = LONG_DISTANCE.captures(raw_value) {
        return clock_seconds(&caps[1], &caps[2], &caps[3]).unwrap_or(UNPARSEABLE);
    }

    if let Some(found) = SPRINT_OR_TECHNICAL.find(raw_value) {
        return strip_separator(found.as_str(), ',');
    }

    if let Some(found) = MULTI_EVENT.find(raw_value) {
        return strip_separator(found.as_str(), '.');
    }

    UNPARSEABLE
}

pub fn is_comparable(raw_value: &str) -> bool {
    parse(raw_value) >= 0
}

fn clock_seconds(hours: &str, minutes: &str, seconds: &str) -> Option<i64> {
    let hours: i64 = if hours.is_empty() { 0 } else { hours.parse().ok()? };
    let minutes: i64 = minutes.parse().ok()?;
    let seconds: i64 = seconds.parse().ok()?;
    hours
        .checked_mul(3600)?
        .checked_add(60 * minutes)?
        .checked_add(seconds)
}

fn strip_separator(matched: &str, separator: char) -> i64 {
    matched
        .chars()
        .filter(|c| *c != separator)
        .collect::<String>()
        .parse()
        .unwrap_or(UNPARSEABLE)
}
