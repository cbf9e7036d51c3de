use crate::core::value;
use crate::utils::date_format;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type AthleteId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M", alias = "m")]
    Male,
    #[serde(rename = "W", alias = "w")]
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "W",
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'M' => Some(Gender::Male),
            'W' => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: AthleteId,
    pub name: String,
    pub year_of_birth: i32,
    pub gender: Gender,
}

impl Athlete {
    /// Age reached in the calendar year of `date`; the roster only knows birth years.
    pub fn age_in(&self, date: NaiveDate) -> i32 {
        date.year().saturating_sub(self.year_of_birth)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub athlete_id: AthleteId,
    pub discipline: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub city: String,
    #[serde(rename = "value")]
    pub raw_value: String,
    #[serde(default)]
    pub wind: Option<f64>,
    #[serde(default)]
    pub placement: Option<u32>,
    #[serde(default)]
    pub indoor: bool,
    #[serde(default)]
    pub championship: Option<String>,
}

impl Performance {
    pub fn ordinal(&self) -> i64 {
        value::parse(&self.raw_value)
    }

    /// Raw value with the wind reading appended, e.g. `10,84 (+1.2)`.
    pub fn display_value(&self) -> String {
        match self.wind {
            Some(wind) => {
                // avoid "-0.0" for a calm reading stored as negative zero
                let wind = if wind == 0.0 { 0.0 } else { wind };
                format!("{} ({:+.1})", self.raw_value, wind)
            }
            None => self.raw_value.clone(),
        }
    }

    pub fn venue_and_date(&self) -> String {
        format!("{}, den {}", self.city, date_format::format(self.date))
    }

    pub fn tooltip(&self) -> String {
        format!("{} - {}", self.raw_value, self.venue_and_date())
    }

    /// At most one performance may exist per key.
    pub fn is_same_result(&self, other: &Performance) -> bool {
        self.athlete_id == other.athlete_id
            && self.date == other.date
            && self.city == other.city
            && self.raw_value == other.raw_value
    }
}

/// Outdoor season runs March to October; everything else was contested indoors.
pub fn is_indoor_month(date: NaiveDate) -> bool {
    !(2 < date.month() && date.month() < 11)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordTag {
    #[serde(rename = "")]
    None,
    #[serde(rename = "PB")]
    PersonalBest,
    #[serde(rename = "=PB")]
    EqualledPersonalBest,
    #[serde(rename = "SB")]
    SeasonBest,
    #[serde(rename = "=SB")]
    EqualledSeasonBest,
}

impl RecordTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordTag::None => "",
            RecordTag::PersonalBest => "PB",
            RecordTag::EqualledPersonalBest => "=PB",
            RecordTag::SeasonBest => "SB",
            RecordTag::EqualledSeasonBest => "=SB",
        }
    }

    pub fn is_record(&self) -> bool {
        *self != RecordTag::None
    }
}

impl fmt::Display for RecordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a new performance against the athlete's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDetail {
    pub tag: RecordTag,
    pub reference: Option<Performance>,
}

impl RecordDetail {
    pub fn none() -> Self {
        Self {
            tag: RecordTag::None,
            reference: None,
        }
    }

    pub fn new(tag: RecordTag, reference: Option<Performance>) -> Self {
        Self { tag, reference }
    }

    pub fn tooltip(&self) -> String {
        self.reference
            .as_ref()
            .map(Performance::tooltip)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VenueFilter {
    All,
    Indoor,
    Outdoor,
}

impl VenueFilter {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "" | "Halle + Freiluft" | "all" => Some(VenueFilter::All),
            "Halle" | "indoor" => Some(VenueFilter::Indoor),
            "Freiluft" | "outdoor" => Some(VenueFilter::Outdoor),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VenueFilter::All => "all",
            VenueFilter::Indoor => "indoor",
            VenueFilter::Outdoor => "outdoor",
        }
    }

    pub fn admits(&self, indoor: bool) -> bool {
        match self {
            VenueFilter::All => true,
            VenueFilter::Indoor => indoor,
            VenueFilter::Outdoor => !indoor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearFilter {
    AllTime,
    Year(i32),
}

impl YearFilter {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Ewige" | "all" => Some(YearFilter::AllTime),
            year => year.parse().ok().map(YearFilter::Year),
        }
    }

    pub fn label(&self) -> String {
        match self {
            YearFilter::AllTime => "all".to_string(),
            YearFilter::Year(year) => year.to_string(),
        }
    }

    pub fn admits(&self, date: NaiveDate) -> bool {
        match self {
            YearFilter::AllTime => true,
            YearFilter::Year(year) => date.year() == *year,
        }
    }
}

/// Query filters a performance store applies for ranking lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceFilter {
    pub year: YearFilter,
    pub venue: VenueFilter,
}

impl PerformanceFilter {
    pub fn new(year: YearFilter, venue: VenueFilter) -> Self {
        Self { year, venue }
    }

    pub fn matches(&self, performance: &Performance) -> bool {
        self.year.admits(performance.date) && self.venue.admits(performance.indoor)
    }
}

/// A performance as handed over by result ingestion, before dedup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPerformance {
    pub athlete_id: AthleteId,
    pub discipline: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub city: String,
    #[serde(rename = "value")]
    pub raw_value: String,
    #[serde(default)]
    pub wind: Option<f64>,
    #[serde(default)]
    pub placement: Option<u32>,
    #[serde(default)]
    pub indoor: Option<bool>,
    #[serde(default)]
    pub championship: Option<String>,
}

impl NewPerformance {
    pub fn into_performance(self) -> Performance {
        let indoor = self.indoor.unwrap_or_else(|| is_indoor_month(self.date));
        Performance {
            athlete_id: self.athlete_id,
            discipline: self.discipline,
            date: self.date,
            city: self.city,
            raw_value: self.raw_value,
            wind: self.wind,
            placement: self.placement,
            indoor,
            championship: self.championship,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    Inserted(Performance),
    Existing(Performance),
}

impl IngestOutcome {
    pub fn performance(&self) -> &Performance {
        match self {
            IngestOutcome::Inserted(p) | IngestOutcome::Existing(p) => p,
        }
    }
}

/// One result row of a meeting, as scraped from the results site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingResult {
    pub name: String,
    pub event: String,
    pub date: String,
    pub value: String,
    #[serde(default)]
    pub wind: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub final_round: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_placement(placement: u32) -> Option<Self> {
        match placement {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

/// A meeting result annotated with its record status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultAnnotation {
    pub name: String,
    pub athlete_id: Option<AthleteId>,
    pub value: String,
    pub tag: String,
    pub tooltip: String,
    pub medal: Option<Medal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: usize,
    #[serde(skip)]
    pub raw_value: String,
    pub name: String,
    pub class: String,
    pub result: String,
    pub venue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceLine {
    pub date: String,
    pub city: String,
    pub discipline: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteOverview {
    pub athlete: Athlete,
    pub performances: Vec<PerformanceLine>,
    pub discipline_options: Vec<String>,
    pub year_options: Vec<String>,
    pub personal_bests: Vec<PerformanceLine>,
}
