use crate::core::ranking::{self, AgeGroupFilter, RankingRequest};
use crate::core::{disciplines, records, value};
use crate::domain::model::{
    AthleteId, AthleteOverview, Medal, MeetingResult, NewPerformance, PerformanceLine, RankingRow,
    RecordDetail, ResultAnnotation, VenueFilter, YearFilter,
};
use crate::domain::ports::{PerformanceSink, PerformanceStore, RosterStore};
use crate::utils::date_format;
use crate::utils::error::{EngineError, Result};
use crate::utils::validation;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Resolves names and ids through the collaborator stores, then hands the
/// data to the pure record and ranking functions.
pub struct RecordEngine<P: PerformanceStore, R: RosterStore> {
    performances: P,
    roster: R,
}

impl<P: PerformanceStore, R: RosterStore> RecordEngine<P, R> {
    pub fn new(performances: P, roster: R) -> Self {
        Self {
            performances,
            roster,
        }
    }

    pub fn classify(
        &self,
        athlete_id: AthleteId,
        discipline: &str,
        new_value_raw: &str,
        new_date: NaiveDate,
    ) -> Result<RecordDetail> {
        let code = validation::parse_discipline(discipline)?;
        let athlete = self
            .roster
            .athlete_by_id(athlete_id)?
            .ok_or(EngineError::UnknownAthlete { id: athlete_id })?;
        let history = self
            .performances
            .performances_by_athlete_and_discipline(athlete_id, code)?;

        let detail = records::classify(code, new_value_raw, new_date, &history, &athlete);
        tracing::debug!(
            athlete = athlete.id,
            discipline = code,
            value = new_value_raw,
            tag = %detail.tag,
            "performance classified"
        );
        Ok(detail)
    }

    /// Ranking for a discipline given by its human name (or code).
    pub fn rank(
        &self,
        discipline: &str,
        year: YearFilter,
        age_group: &str,
        venue: VenueFilter,
    ) -> Result<Vec<RankingRow>> {
        let code = validation::parse_discipline(discipline)?;
        let request = RankingRequest {
            discipline_code: code.to_string(),
            year,
            age_group: AgeGroupFilter::parse(age_group),
            venue,
        };
        self.rank_request(&request)
    }

    pub fn rank_request(&self, request: &RankingRequest) -> Result<Vec<RankingRow>> {
        let roster = self.roster.all_athletes()?;
        let performances = self
            .performances
            .performances_by_discipline(&request.discipline_code, &request.filter())?;

        tracing::debug!(
            discipline = %request.discipline_code,
            age_group = %request.age_group.label,
            candidates = performances.len(),
            "ranking requested"
        );
        Ok(ranking::rank(request, &roster, &performances))
    }

    /// Every comparable performance of one athlete plus personal bests as of `as_of`.
    pub fn athlete_overview(&self, athlete_id: AthleteId, as_of: NaiveDate) -> Result<AthleteOverview> {
        let athlete = self
            .roster
            .athlete_by_id(athlete_id)?
            .ok_or(EngineError::UnknownAthlete { id: athlete_id })?;
        let performances = self.performances.performances_by_athlete(athlete_id)?;

        let mut lines = Vec::new();
        let mut discipline_options = BTreeSet::new();
        let mut year_options = BTreeSet::new();
        let mut codes: Vec<&str> = Vec::new();

        for p in performances.iter().filter(|p| value::is_comparable(&p.raw_value)) {
            let name = display_name(&p.discipline);
            discipline_options.insert(name.clone());
            year_options.insert(p.date.year().to_string());
            if !codes.contains(&p.discipline.as_str()) {
                codes.push(&p.discipline);
            }
            lines.push(PerformanceLine {
                date: date_format::format(p.date),
                city: p.city.clone(),
                discipline: name,
                value: p.display_value(),
            });
        }

        let personal_bests = codes
            .iter()
            .filter_map(|code| records::personal_best(code, as_of, &performances, &athlete))
            .map(|pb| PerformanceLine {
                date: date_format::format(pb.date),
                city: pb.city.clone(),
                discipline: display_name(&pb.discipline),
                value: pb.display_value(),
            })
            .collect();

        Ok(AthleteOverview {
            athlete,
            performances: lines,
            discipline_options: discipline_options.into_iter().collect(),
            year_options: year_options.into_iter().collect(),
            personal_bests,
        })
    }
}

impl<P, R> RecordEngine<P, R>
where
    P: PerformanceStore + PerformanceSink,
    R: RosterStore,
{
    /// Stores the results of one meeting and tags each with its record status.
    ///
    /// Results of athletes missing from the roster are passed through with
    /// tag `?`. Every row is parsed before anything is stored, so a malformed
    /// date, wind or placement fails the batch and leaves the store untouched.
    pub fn annotate(
        &self,
        city: &str,
        championship: Option<&str>,
        results: &[MeetingResult],
    ) -> Result<Vec<ResultAnnotation>> {
        let mut prepared = Vec::with_capacity(results.len());
        for result in results {
            let entry = match self.roster.athlete_by_name(&result.name)? {
                Some(athlete) => {
                    let performance = NewPerformance {
                        athlete_id: athlete.id,
                        discipline: discipline_for_event(&result.event),
                        date: date_format::parse(&result.date)?,
                        city: city.to_string(),
                        raw_value: result.value.clone(),
                        wind: validation::parse_wind(&result.wind)?,
                        placement: validation::parse_placement(&result.rank)?,
                        indoor: None,
                        championship: championship.map(str::to_string),
                    };
                    Some((athlete, performance))
                }
                None => None,
            };
            prepared.push((result, entry));
        }

        let mut annotations = Vec::with_capacity(results.len());
        for (result, entry) in prepared {
            let Some((athlete, performance)) = entry else {
                tracing::warn!(name = %result.name, "athlete not in database");
                annotations.push(ResultAnnotation {
                    name: result.name.clone(),
                    athlete_id: None,
                    value: result.value.clone(),
                    tag: "?".to_string(),
                    tooltip: "athlete not in database".to_string(),
                    medal: None,
                });
                continue;
            };

            let placement = performance.placement;
            let outcome = self.performances.ingest(performance)?;
            let entry = outcome.performance();

            let history = self
                .performances
                .performances_by_athlete_and_discipline(athlete.id, &entry.discipline)?;
            let detail = records::classify(&entry.discipline, &entry.raw_value, entry.date, &history, &athlete);

            let medal = if result.final_round {
                placement.and_then(Medal::for_placement)
            } else {
                None
            };

            annotations.push(ResultAnnotation {
                name: result.name.clone(),
                athlete_id: Some(athlete.id),
                value: entry.raw_value.clone(),
                tag: detail.tag.to_string(),
                tooltip: detail.tooltip(),
                medal,
            });
        }

        tracing::info!(
            city,
            results = annotations.len(),
            records = annotations.iter().filter(|a| !a.tag.is_empty() && a.tag != "?").count(),
            "meeting results annotated"
        );
        Ok(annotations)
    }
}

fn discipline_for_event(event: &str) -> String {
    match disciplines::code_in_heading(event) {
        Some(code) => code.to_string(),
        None => {
            tracing::warn!(event, "no discipline mapping found");
            event.to_string()
        }
    }
}

fn display_name(code: &str) -> String {
    disciplines::name_for(code).unwrap_or(code).to_string()
}
