//! Which past performances may count toward a personal best.
//!
//! Hurdle heights and throwing implement weights change at age-group
//! boundaries, so a result from a younger age group in the same discipline
//! code is not comparable. The rules are irregular and kept as a literal
//! table; adjust rows, not logic.

use crate::core::season::ymd;
use crate::domain::model::Gender;
use chrono::{Datelike, NaiveDate};

/// Lower bound used when a discipline places no restriction on history.
pub const FAR_PAST: NaiveDate = NaiveDate::MIN;

/// Disciplines whose equipment or distance depends on the age group.
pub const RESTRICTED_DISCIPLINES: [&str; 6] = ["60H", "100H", "110H", "KUG", "SPE", "DIS"];

/// Youngest age at which restricted disciplines are compared at all.
const MIN_COMPARABLE_AGE: i32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Every past performance counts.
    Unrestricted,
    /// Only performances on or after this date count.
    From(NaiveDate),
    /// The athlete cannot hold a comparable result in this discipline.
    Ineligible,
}

impl Eligibility {
    pub fn admits(&self, date: NaiveDate) -> bool {
        match self {
            Eligibility::Unrestricted => true,
            Eligibility::From(start) => *start <= date,
            Eligibility::Ineligible => false,
        }
    }

    /// Earliest eligible date, `None` when nothing is eligible.
    pub fn lower_bound(&self) -> Option<NaiveDate> {
        match self {
            Eligibility::Unrestricted => Some(FAR_PAST),
            Eligibility::From(start) => Some(*start),
            Eligibility::Ineligible => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ages {
    Any,
    Under(i32),
    Over(i32),
}

impl Ages {
    fn contains(&self, age: i32) -> bool {
        match self {
            Ages::Any => true,
            Ages::Under(limit) => age < *limit,
            Ages::Over(limit) => age > *limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    Ineligible,
    /// January 1 of the year the athlete reached this age.
    FromAge(i32),
}

struct Rule {
    discipline: &'static str,
    gender: Option<Gender>,
    ages: Ages,
    window: Window,
}

const fn rule(discipline: &'static str, gender: Option<Gender>, ages: Ages, window: Window) -> Rule {
    Rule {
        discipline,
        gender,
        ages,
        window,
    }
}

const M: Option<Gender> = Some(Gender::Male);
const W: Option<Gender> = Some(Gender::Female);
const ANY: Option<Gender> = None;

// First matching row wins. Anything not listed resets with the biennial age group.
const RULES: &[Rule] = &[
    rule("60H", W, Ages::Over(19), Window::FromAge(18)),
    rule("60H", M, Ages::Over(19), Window::FromAge(20)),
    rule("100H", M, Ages::Any, Window::Ineligible),
    rule("100H", ANY, Ages::Under(18), Window::Ineligible),
    rule("100H", W, Ages::Over(19), Window::FromAge(18)),
    rule("110H", ANY, Ages::Over(19), Window::FromAge(20)),
    rule("KUG", W, Ages::Under(18), Window::Ineligible),
    rule("KUG", ANY, Ages::Over(19), Window::FromAge(20)),
    rule("SPE", W, Ages::Under(18), Window::FromAge(14)),
    rule("SPE", ANY, Ages::Over(19), Window::FromAge(18)),
    rule("DIS", W, Ages::Any, Window::FromAge(14)),
    rule("DIS", M, Ages::Over(19), Window::FromAge(20)),
];

pub fn is_restricted(discipline_code: &str) -> bool {
    RESTRICTED_DISCIPLINES.contains(&discipline_code)
}

pub fn eligible_from(
    discipline_code: &str,
    reference_date: NaiveDate,
    year_of_birth: i32,
    gender: Gender,
) -> Eligibility {
    if !is_restricted(discipline_code) {
        return Eligibility::Unrestricted;
    }

    let year = reference_date.year();
    let age = year.saturating_sub(year_of_birth);
    if age < MIN_COMPARABLE_AGE {
        return Eligibility::Ineligible;
    }

    let matched = RULES.iter().find(|r| {
        r.discipline == discipline_code
            && r.gender.map_or(true, |g| g == gender)
            && r.ages.contains(age)
    });

    match matched.map(|r| r.window) {
        Some(Window::Ineligible) => Eligibility::Ineligible,
        Some(Window::FromAge(from_age)) => Eligibility::From(ymd(year.saturating_sub(age.saturating_sub(from_age)), 1, 1)),
        None => Eligibility::From(ymd(year - age.rem_euclid(2), 1, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn jan1(y: i32) -> Eligibility {
        Eligibility::From(date(y, 1, 1))
    }

    /// Reference date in 2024, so the athlete's age is `2024 - born`.
    fn window(code: &str, born: i32, gender: Gender) -> Eligibility {
        eligible_from(code, date(2024, 6, 1), born, gender)
    }

    #[test]
    fn test_unrestricted_disciplines_ignore_age_and_gender() {
        for code in ["100", "DRE", "WEI", "800", "XYZ"] {
            for born in [1960, 2000, 2012, 2020] {
                for gender in [Gender::Male, Gender::Female] {
                    let e = window(code, born, gender);
                    assert_eq!(e, Eligibility::Unrestricted);
                    assert_eq!(e.lower_bound(), Some(FAR_PAST));
                }
            }
        }
    }

    #[test]
    fn test_under_fourteen_is_ineligible_in_restricted_disciplines() {
        for code in RESTRICTED_DISCIPLINES {
            assert_eq!(window(code, 2011, Gender::Female), Eligibility::Ineligible);
            assert_eq!(window(code, 2011, Gender::Male), Eligibility::Ineligible);
        }
    }

    #[test]
    fn test_60h_women_over_19_from_age_18() {
        // age 25, turned 18 in 2017
        assert_eq!(window("60H", 1999, Gender::Female), jan1(2017));
    }

    #[test]
    fn test_60h_men_over_19_from_age_20() {
        assert_eq!(window("60H", 1999, Gender::Male), jan1(2019));
    }

    #[test]
    fn test_60h_up_to_19_resets_biennially() {
        // age 19 → age group started at 18
        assert_eq!(window("60H", 2005, Gender::Female), jan1(2023));
        // age 16 → age group started this year
        assert_eq!(window("60H", 2008, Gender::Male), jan1(2024));
    }

    #[test]
    fn test_100h_men_are_ineligible_at_any_age() {
        assert_eq!(window("100H", 1990, Gender::Male), Eligibility::Ineligible);
        assert_eq!(window("100H", 2006, Gender::Male), Eligibility::Ineligible);
    }

    #[test]
    fn test_100h_under_18_is_ineligible() {
        assert_eq!(window("100H", 2008, Gender::Female), Eligibility::Ineligible);
        assert_eq!(window("100H", 2007, Gender::Female), Eligibility::Ineligible);
    }

    #[test]
    fn test_100h_women_over_19_from_age_18() {
        assert_eq!(window("100H", 2000, Gender::Female), jan1(2018));
    }

    #[test]
    fn test_100h_women_18_and_19_reset_biennially() {
        assert_eq!(window("100H", 2006, Gender::Female), jan1(2024));
        assert_eq!(window("100H", 2005, Gender::Female), jan1(2023));
    }

    #[test]
    fn test_110h_over_19_from_age_20() {
        assert_eq!(window("110H", 1998, Gender::Male), jan1(2018));
    }

    #[test]
    fn test_110h_up_to_19_resets_biennially() {
        assert_eq!(window("110H", 2005, Gender::Male), jan1(2023));
        assert_eq!(window("110H", 2010, Gender::Male), jan1(2024));
    }

    #[test]
    fn test_shot_put_women_under_18_ineligible() {
        assert_eq!(window("KUG", 2008, Gender::Female), Eligibility::Ineligible);
    }

    #[test]
    fn test_shot_put_over_19_from_age_20() {
        assert_eq!(window("KUG", 2000, Gender::Female), jan1(2020));
        assert_eq!(window("KUG", 2000, Gender::Male), jan1(2020));
    }

    #[test]
    fn test_shot_put_remaining_ages_reset_biennially() {
        assert_eq!(window("KUG", 2005, Gender::Female), jan1(2023));
        assert_eq!(window("KUG", 2009, Gender::Male), jan1(2023));
        assert_eq!(window("KUG", 2010, Gender::Male), jan1(2024));
    }

    #[test]
    fn test_javelin_women_under_18_from_age_14() {
        assert_eq!(window("SPE", 2008, Gender::Female), jan1(2022));
    }

    #[test]
    fn test_javelin_over_19_from_age_18() {
        assert_eq!(window("SPE", 1995, Gender::Male), jan1(2013));
        assert_eq!(window("SPE", 1995, Gender::Female), jan1(2013));
    }

    #[test]
    fn test_javelin_remaining_ages_reset_biennially() {
        assert_eq!(window("SPE", 2005, Gender::Female), jan1(2023));
        assert_eq!(window("SPE", 2007, Gender::Male), jan1(2023));
    }

    #[test]
    fn test_discus_women_any_age_from_age_14() {
        assert_eq!(window("DIS", 2009, Gender::Female), jan1(2023));
        assert_eq!(window("DIS", 1980, Gender::Female), jan1(1994));
    }

    #[test]
    fn test_discus_men_over_19_from_age_20() {
        assert_eq!(window("DIS", 1990, Gender::Male), jan1(2010));
    }

    #[test]
    fn test_discus_men_up_to_19_reset_biennially() {
        assert_eq!(window("DIS", 2006, Gender::Male), jan1(2024));
        assert_eq!(window("DIS", 2005, Gender::Male), jan1(2023));
    }

    #[test]
    fn test_window_admits_dates() {
        let start = date(2023, 1, 1);
        let e = Eligibility::From(start);
        assert!(e.admits(start));
        assert!(!e.admits(date(2022, 12, 31)));
        assert!(Eligibility::Unrestricted.admits(date(1950, 1, 1)));
        assert!(!Eligibility::Ineligible.admits(date(2024, 1, 1)));
        assert_eq!(Eligibility::Ineligible.lower_bound(), None);
    }

    #[test]
    fn test_absurd_birth_years_do_not_overflow() {
        for code in RESTRICTED_DISCIPLINES {
            for gender in [Gender::Male, Gender::Female] {
                assert_eq!(window(code, i32::MAX, gender), Eligibility::Ineligible);
                // far past birth years only ever widen the window
                let e = window(code, i32::MIN, gender);
                assert!(e.lower_bound().map_or(true, |start| start <= date(2024, 6, 1)));
            }
        }
    }
}
