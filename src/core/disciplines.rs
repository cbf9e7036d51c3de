//! Static discipline tables: human name ↔ code, and per-code ranking direction.
//!
//! Both tables are known to be incomplete. A code missing from the direction
//! table ranks as lower-is-better (see [`direction`]).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Which way a discipline's ordinals improve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Larger ordinal is better: jumps, throws, multi-events.
    Ascending,
    /// Smaller ordinal is better: running and walking times.
    Descending,
}

impl Direction {
    pub fn is_ascending(&self) -> bool {
        matches!(self, Direction::Ascending)
    }

    /// True if ordinal `a` is strictly better than `b`.
    pub fn is_better(&self, a: i64, b: i64) -> bool {
        match self {
            Direction::Ascending => a > b,
            Direction::Descending => a < b,
        }
    }

    /// Ordering that sorts the best ordinal first.
    pub fn best_first(&self, a: i64, b: i64) -> Ordering {
        match self {
            Direction::Ascending => b.cmp(&a),
            Direction::Descending => a.cmp(&b),
        }
    }
}

/// Direction used for codes the table does not list. Times are the majority
/// of unlisted events, so the fallback is lower-is-better.
pub const DEFAULT_DIRECTION: Direction = Direction::Descending;

const DIRECTIONS: &[(&str, bool)] = &[
    ("60H", false),
    ("80H", false),
    ("100H", false),
    ("110H", false),
    ("300H", false),
    ("400H", false),
    ("HOC", true),
    ("4-K", true),
    ("SPE", true),
    ("BLL", true),
    ("DRE", true),
    ("9-K", true),
    ("600", false),
    ("60", false),
    ("BLM", true),
    ("4-M", true),
    ("WEI", true),
    ("1KO", false),
    ("3KO", false),
    ("10S", false),
    ("HALM", true),
    ("3X1", false),
    ("75", false),
    ("5S", false),
    ("MAR", false),
    ("30", false),
    ("7-M", true),
    ("3-M", true),
    ("400", false),
    ("HAL", false),
    ("KUG", true),
    ("BLS", true),
    ("5KO", false),
    ("100", false),
    ("DIS", true),
    ("2KO", false),
    ("BLB", true),
    ("50", false),
    ("4X7", false),
    ("200", false),
    ("9-M", true),
    ("10K", false),
    ("3-K", true),
    ("4X1", false),
    ("BAL", true),
    ("3X8", false),
    ("WEZ", true),
    ("4X4", false),
    ("15S", false),
    ("MEI", false),
    ("800", false),
    ("7-K", true),
    ("STA", true),
    ("1K5", false),
    ("5-K", true),
    ("10-K", true),
    ("SCH", false),
    ("4X5", false),
    ("BLW", true),
    ("300", false),
    ("4X2", false),
];

/// Human-readable names as published by the results site.
const NAMES: &[(&str, &str)] = &[
    ("60 m Hürden", "60H"),
    ("80 m Hürden", "80H"),
    ("100 m Hürden", "100H"),
    ("110 m Hürden", "110H"),
    ("300 m Hürden", "300H"),
    ("400 m Hürden", "400H"),
    ("Hochsprung", "HOC"),
    ("4-Kampf", "4-K"),
    ("Speer", "SPE"),
    ("Ball", "BLL"),
    ("Dreisprung", "DRE"),
    ("9-Kampf", "9-K"),
    ("600 m", "600"),
    ("60 m", "60"),
    ("blm", "BLM"),
    ("4-M", "4-M"),
    ("Weitsprung", "WEI"),
    ("1KO", "1KO"),
    ("3KO", "3KO"),
    ("10 km Straße", "10S"),
    ("HALM", "HALM"),
    ("3 x 1000 m", "3X1"),
    ("75 m", "75"),
    ("5 km Straße", "5S"),
    ("MAR", "MAR"),
    ("30 m", "30"),
    ("7-M", "7-M"),
    ("3-M", "3-M"),
    ("400 m", "400"),
    ("HAL", "HAL"),
    ("Kugel", "KUG"),
    ("BLS", "BLS"),
    ("5KO", "5KO"),
    ("100 m", "100"),
    ("Diskus", "DIS"),
    ("2KO", "2KO"),
    ("BLB", "BLB"),
    ("50 m", "50"),
    ("4 x 75 m", "4X7"),
    ("200 m", "200"),
    ("9-M", "9-M"),
    ("10 km", "10K"),
    ("3-Kampf", "3-K"),
    ("4 x 100 m", "4X1"),
    ("BAL", "BAL"),
    ("3 x 800 m", "3X8"),
    ("Zonenweitsprung", "WEZ"),
    ("4 x 400 m", "4X4"),
    ("15 km Straße", "15S"),
    ("MEI", "MEI"),
    ("800 m", "800"),
    ("Siebenkampf", "7-K"),
    ("Stabhochsprung", "STA"),
    ("1500 m", "1K5"),
    ("Fünfkampf", "5-K"),
    ("Zehnkampf", "10-K"),
    ("SCH", "SCH"),
    ("4 x 5000 m", "4X5"),
    ("BLW", "BLW"),
    ("300 m", "300"),
    ("4 x 200 m", "4X2"),
];

static DIRECTION_BY_CODE: LazyLock<HashMap<&'static str, Direction>> = LazyLock::new(|| {
    DIRECTIONS
        .iter()
        .map(|(code, ascending)| {
            let direction = if *ascending {
                Direction::Ascending
            } else {
                Direction::Descending
            };
            (*code, direction)
        })
        .collect()
});

static CODE_BY_NAME: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| NAMES.iter().copied().collect());

static NAME_BY_CODE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| NAMES.iter().map(|(name, code)| (*code, *name)).collect());

pub fn direction(code: &str) -> Direction {
    DIRECTION_BY_CODE
        .get(code)
        .copied()
        .unwrap_or(DEFAULT_DIRECTION)
}

pub fn is_ascending(code: &str) -> bool {
    direction(code).is_ascending()
}

/// Exact name lookup, e.g. `"Dreisprung"` → `"DRE"`.
pub fn code_for(name: &str) -> Option<&'static str> {
    CODE_BY_NAME.get(name).copied()
}

pub fn name_for(code: &str) -> Option<&'static str> {
    NAME_BY_CODE.get(code).copied()
}

/// Accepts either a known name or a known code.
pub fn resolve(name_or_code: &str) -> Option<&'static str> {
    code_for(name_or_code).or_else(|| {
        NAME_BY_CODE
            .get_key_value(name_or_code)
            .map(|(code, _)| *code)
    })
}

/// Maps a free-form event heading (e.g. `"100 m Hürden Frauen"`) to a code by
/// the longest known name it contains, so `"4 x 100 m"` is not read as `"100 m"`.
pub fn code_in_heading(heading: &str) -> Option<&'static str> {
    NAMES
        .iter()
        .filter(|(name, _)| heading.contains(name))
        .max_by_key(|(name, _)| name.len())
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jumps_and_throws_are_ascending() {
        assert!(is_ascending("DRE"));
        assert!(is_ascending("KUG"));
        assert!(is_ascending("10-K"));
    }

    #[test]
    fn test_times_are_descending() {
        assert!(!is_ascending("100"));
        assert!(!is_ascending("110H"));
        assert!(!is_ascending("MAR"));
    }

    #[test]
    fn test_unknown_code_defaults_to_lower_is_better() {
        assert_eq!(direction("XYZ"), Direction::Descending);
        assert_eq!(direction(""), DEFAULT_DIRECTION);
    }

    #[test]
    fn test_direction_comparisons() {
        assert!(Direction::Ascending.is_better(1453, 1400));
        assert!(!Direction::Ascending.is_better(1400, 1400));
        assert!(Direction::Descending.is_better(1084, 1100));
        assert_eq!(Direction::Descending.best_first(1084, 1100), Ordering::Less);
        assert_eq!(Direction::Ascending.best_first(1084, 1100), Ordering::Greater);
    }

    #[test]
    fn test_every_named_code_has_a_direction() {
        for (name, code) in NAMES {
            assert!(
                DIRECTION_BY_CODE.contains_key(code),
                "{} ({}) has no direction",
                name,
                code
            );
        }
    }

    #[test]
    fn test_name_code_roundtrip() {
        assert_eq!(code_for("Dreisprung"), Some("DRE"));
        assert_eq!(name_for("DRE"), Some("Dreisprung"));
        assert_eq!(code_for("Sackhüpfen"), None);
        assert_eq!(resolve("KUG"), Some("KUG"));
        assert_eq!(resolve("Kugel"), Some("KUG"));
        assert_eq!(resolve("XYZ"), None);
    }

    #[test]
    fn test_heading_prefers_longest_name() {
        assert_eq!(code_in_heading("4 x 100 m Staffel"), Some("4X1"));
        assert_eq!(code_in_heading("100 m Hürden"), Some("100H"));
        assert_eq!(code_in_heading("100 m Vorlauf"), Some("100"));
        assert_eq!(code_in_heading("Stabhochsprung"), Some("STA"));
        assert_eq!(code_in_heading("Sackhüpfen"), None);
    }
}
