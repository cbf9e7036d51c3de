use chrono::{Datelike, NaiveDate};

/// Start of the athletics season containing `date`.
///
/// The outdoor season covers April to October and starts on March 31. The
/// indoor season starts on November 1 and runs into the following year.
pub fn season_start(date: NaiveDate) -> NaiveDate {
    let month = date.month();
    if 3 < month && month < 11 {
        ymd(date.year(), 3, 31)
    } else if month <= 3 {
        ymd(date.year() - 1, 11, 1)
    } else {
        ymd(date.year(), 11, 1)
    }
}

/// True if `date` lies in `[season_start(reference), reference]`.
pub fn in_season_of(date: NaiveDate, reference: NaiveDate) -> bool {
    season_start(reference) <= date && date <= reference
}

/// Calendar date that saturates at the representable range instead of failing.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(if year < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}
