//! Club rankings: every athlete's best qualifying performance, best first.

use crate::core::disciplines;
use crate::core::records;
use crate::domain::model::{
    Athlete, AthleteId, Gender, Performance, PerformanceFilter, RankingRow, VenueFilter, YearFilter,
};
use chrono::Datelike;
use std::collections::HashMap;

/// Characters that only occur in non-numeric result markers ("aufg.", "disq.", "o.g.").
pub const RESULT_MARKERS: [char; 3] = ['a', 'd', 'o'];

pub const ALL_AGE_GROUPS: &str = "Alle";

/// Age-group selection as given by a label such as `WU20`, `MJU18` or `Alle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeGroupFilter {
    pub label: String,
    pub gender: Option<Gender>,
    /// Largest permitted `performance year - year of birth`.
    pub max_age: Option<i32>,
}

impl AgeGroupFilter {
    pub fn all() -> Self {
        Self {
            label: ALL_AGE_GROUPS.to_string(),
            gender: None,
            max_age: None,
        }
    }

    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label == ALL_AGE_GROUPS {
            return Self::all();
        }

        let mut chars = label.chars();
        let gender = chars.next().and_then(Gender::from_code);
        let group = if gender.is_some() { chars.as_str() } else { label };
        let group = group.strip_prefix('J').unwrap_or(group);

        Self {
            label: label.to_string(),
            gender,
            max_age: max_age_for(group),
        }
    }

    pub fn admits_athlete(&self, athlete: &Athlete) -> bool {
        self.gender.map_or(true, |g| g == athlete.gender)
    }

    pub fn admits_age(&self, age: i32) -> bool {
        self.max_age.map_or(true, |max| age <= max)
    }
}

fn max_age_for(group: &str) -> Option<i32> {
    match group {
        "U23" => Some(22),
        "U20" => Some(19),
        "U18" => Some(17),
        "U16" => Some(15),
        _ => None,
    }
}

/// Age group an athlete competed in, by age reached in the competition year.
pub fn competition_age_group(age: i32) -> &'static str {
    if age < 16 {
        "U16"
    } else if age < 18 {
        "U18"
    } else if age < 20 {
        "U20"
    } else if age < 23 {
        "U23"
    } else {
        ""
    }
}

pub fn has_result_marker(raw_value: &str) -> bool {
    raw_value.contains(RESULT_MARKERS)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRequest {
    pub discipline_code: String,
    pub year: YearFilter,
    pub age_group: AgeGroupFilter,
    pub venue: VenueFilter,
}

impl RankingRequest {
    pub fn filter(&self) -> PerformanceFilter {
        PerformanceFilter::new(self.year, self.venue)
    }

    /// Whether a stored performance takes part in this ranking at all.
    pub fn admits(&self, performance: &Performance) -> bool {
        performance.discipline == self.discipline_code
            && self.filter().matches(performance)
            && !has_result_marker(&performance.raw_value)
    }
}

/// Ranks `roster` on their best performances among `performances`.
///
/// Each athlete contributes at most one row. Within one athlete, the first of
/// several equal bests (in `performances` order) is reported. Rows are then
/// sorted best first; equal values keep roster order and get consecutive ranks.
pub fn rank(request: &RankingRequest, roster: &[Athlete], performances: &[Performance]) -> Vec<RankingRow> {
    let direction = disciplines::direction(&request.discipline_code);

    let mut by_athlete: HashMap<AthleteId, Vec<&Performance>> = HashMap::new();
    for performance in performances.iter().filter(|p| request.admits(p)) {
        by_athlete.entry(performance.athlete_id).or_default().push(performance);
    }

    let mut rows: Vec<(i64, RankingRow)> = Vec::new();
    for athlete in roster.iter().filter(|a| request.age_group.admits_athlete(a)) {
        let Some(candidates) = by_athlete.get(&athlete.id) else {
            continue;
        };

        let within_age_group = candidates
            .iter()
            .copied()
            .filter(|p| request.age_group.admits_age(athlete.age_in(p.date)));
        let Some(best) = records::best_of(within_age_group, direction) else {
            continue;
        };

        let class = format!(
            "{}{}",
            athlete.gender.code(),
            competition_age_group(athlete.age_in(best.date))
        );
        rows.push((
            best.ordinal(),
            RankingRow {
                rank: 0,
                raw_value: best.raw_value.clone(),
                name: athlete.name.clone(),
                class,
                result: best.display_value(),
                venue: best.venue_and_date(),
            },
        ));
    }

    rows.sort_by(|(a, _), (b, _)| direction.best_first(*a, *b));

    tracing::debug!(
        discipline = %request.discipline_code,
        rows = rows.len(),
        "ranking computed"
    );

    rows.into_iter()
        .enumerate()
        .map(|(i, (_, row))| RankingRow { rank: i + 1, ..row })
        .collect()
}
