//! Personal and season best lookups, and classification of new results.

use crate::core::disciplines::{self, Direction};
use crate::core::eligibility::{self, Eligibility};
use crate::core::season;
use crate::core::value;
use crate::domain::model::{Athlete, Performance, RecordDetail, RecordTag};
use chrono::NaiveDate;

/// Best performance in `candidates`; among equal ordinals the first one wins.
/// Values that do not parse to a positive ordinal never qualify.
pub fn best_of<'a, I>(candidates: I, direction: Direction) -> Option<&'a Performance>
where
    I: IntoIterator<Item = &'a Performance>,
{
    let mut best: Option<(&Performance, i64)> = None;
    for performance in candidates {
        let ordinal = performance.ordinal();
        if ordinal <= 0 {
            continue;
        }
        match best {
            Some((_, best_ordinal)) if !direction.is_better(ordinal, best_ordinal) => {}
            _ => best = Some((performance, ordinal)),
        }
    }
    best.map(|(performance, _)| performance)
}

fn eligible_history<'h, 'c>(
    discipline_code: &'c str,
    window: Eligibility,
    up_to: NaiveDate,
    history: &'h [Performance],
    athlete: &Athlete,
) -> impl Iterator<Item = &'h Performance> + 'c
where
    'h: 'c,
{
    let athlete_id = athlete.id;
    history.iter().filter(move |p| {
        p.athlete_id == athlete_id
            && p.discipline == discipline_code
            && window.admits(p.date)
            && p.date <= up_to
    })
}

fn window_for(discipline_code: &str, reference: NaiveDate, athlete: &Athlete) -> Eligibility {
    eligibility::eligible_from(discipline_code, reference, athlete.year_of_birth, athlete.gender)
}

/// Best eligible performance up to and including `as_of`.
pub fn personal_best<'h>(
    discipline_code: &str,
    as_of: NaiveDate,
    history: &'h [Performance],
    athlete: &Athlete,
) -> Option<&'h Performance> {
    let window = window_for(discipline_code, as_of, athlete);
    best_of(
        eligible_history(discipline_code, window, as_of, history, athlete),
        disciplines::direction(discipline_code),
    )
}

/// Best eligible performance of the season containing `as_of`, up to `as_of`.
pub fn season_best<'h>(
    discipline_code: &str,
    as_of: NaiveDate,
    history: &'h [Performance],
    athlete: &Athlete,
) -> Option<&'h Performance> {
    let window = window_for(discipline_code, as_of, athlete);
    best_of(
        eligible_history(discipline_code, window, as_of, history, athlete)
            .filter(move |p| season::in_season_of(p.date, as_of)),
        disciplines::direction(discipline_code),
    )
}

/// Classifies a new result against everything the athlete did before `new_date`.
///
/// Personal-best checks take precedence over season-best checks. Equality is
/// decided on the raw text, so `"14,50"` does not equal `"14,500"`.
pub fn classify(
    discipline_code: &str,
    new_value_raw: &str,
    new_date: NaiveDate,
    history: &[Performance],
    athlete: &Athlete,
) -> RecordDetail {
    let new_ordinal = value::parse(new_value_raw);
    if new_ordinal < 0 {
        return RecordDetail::none();
    }

    let window = window_for(discipline_code, new_date, athlete);
    if window == Eligibility::Ineligible {
        tracing::trace!(discipline_code, athlete = athlete.id, "not comparable in this age group");
        return RecordDetail::none();
    }

    // The result under classification may already be stored; only earlier days count.
    let Some(previous_day) = new_date.pred_opt() else {
        return RecordDetail::new(RecordTag::PersonalBest, None);
    };
    let direction = disciplines::direction(discipline_code);

    let previous_pb = best_of(
        eligible_history(discipline_code, window, previous_day, history, athlete),
        direction,
    );
    let Some(previous_pb) = previous_pb else {
        return RecordDetail::new(RecordTag::PersonalBest, None);
    };
    let previous_sb = best_of(
        eligible_history(discipline_code, window, previous_day, history, athlete)
            .filter(|p| season::in_season_of(p.date, previous_day)),
        direction,
    );

    if direction.is_better(new_ordinal, previous_pb.ordinal()) {
        return RecordDetail::new(RecordTag::PersonalBest, Some(previous_pb.clone()));
    }
    if new_value_raw == previous_pb.raw_value {
        return RecordDetail::new(RecordTag::EqualledPersonalBest, Some(previous_pb.clone()));
    }

    let Some(previous_sb) = previous_sb else {
        return RecordDetail::new(RecordTag::SeasonBest, None);
    };
    if direction.is_better(new_ordinal, previous_sb.ordinal()) {
        return RecordDetail::new(RecordTag::SeasonBest, Some(previous_sb.clone()));
    }
    if new_value_raw == previous_sb.raw_value {
        return RecordDetail::new(RecordTag::EqualledSeasonBest, Some(previous_sb.clone()));
    }

    RecordDetail::none()
}
