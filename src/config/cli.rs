use crate::domain::model::{AthleteId, Gender, VenueFilter, YearFilter};
use crate::utils::error::{EngineError, Result};
use crate::utils::validation::{self, Validate};
use crate::utils::date_format;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "athletics-records")]
#[command(about = "Personal bests, season bests and rankings for a club database")]
pub struct CliConfig {
    /// Club dataset (JSON)
    #[arg(long, default_value = "./data/athletics.json")]
    pub data: String,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Best performance per athlete for one discipline
    Rank {
        /// Discipline name ("Dreisprung") or code ("DRE")
        discipline: String,
        #[arg(long, default_value = "Ewige")]
        year: String,
        #[arg(long, default_value = "Alle")]
        age_group: String,
        #[arg(long, default_value = "Halle + Freiluft")]
        venue: String,
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Record status a new value would get, without storing it
    Classify {
        athlete: AthleteId,
        discipline: String,
        value: String,
        /// Date as dd.mm.yyyy
        date: String,
    },
    /// Enter a single performance by hand
    Add {
        athlete: AthleteId,
        discipline: String,
        value: String,
        date: String,
        city: String,
        #[arg(long, default_value = "")]
        wind: String,
        #[arg(long, default_value = "")]
        placement: String,
        /// Overrides the indoor season derived from the month
        #[arg(long)]
        indoor: Option<bool>,
    },
    /// Store and annotate the results of one meeting (JSON list)
    Ingest {
        results: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        championship: Option<String>,
    },
    /// All performances and personal bests of one athlete
    Athlete {
        id: AthleteId,
        /// Reference date for personal bests, defaults to today
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Add an athlete to the roster
    AddAthlete {
        name: String,
        year_of_birth: i32,
        /// M or W
        gender: char,
    },
}

fn validate_year_label(label: &str) -> Result<()> {
    YearFilter::from_label(label)
        .map(|_| ())
        .ok_or_else(|| EngineError::InvalidConfigValueError {
            field: "year".to_string(),
            value: label.to_string(),
            reason: "Expected a year such as 2024 or \"Ewige\"".to_string(),
        })
}

fn validate_venue_label(label: &str) -> Result<()> {
    VenueFilter::from_label(label)
        .map(|_| ())
        .ok_or_else(|| EngineError::InvalidConfigValueError {
            field: "venue".to_string(),
            value: label.to_string(),
            reason: "Expected \"Halle\", \"Freiluft\" or \"Halle + Freiluft\"".to_string(),
        })
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data", &self.data)?;

        match &self.command {
            Command::Rank {
                discipline,
                year,
                venue,
                ..
            } => {
                validation::parse_discipline(discipline)?;
                validate_year_label(year)?;
                validate_venue_label(venue)?;
            }
            Command::Classify {
                discipline, date, ..
            } => {
                validation::parse_discipline(discipline)?;
                date_format::parse(date)?;
            }
            Command::Add {
                discipline,
                value,
                date,
                city,
                wind,
                placement,
                ..
            } => {
                validation::parse_discipline(discipline)?;
                validation::parse_value(value)?;
                date_format::parse(date)?;
                validation::validate_non_empty_string("city", city)?;
                validation::parse_wind(wind)?;
                validation::parse_placement(placement)?;
            }
            Command::Ingest { results, city, .. } => {
                validation::validate_path("results", results)?;
                validation::validate_non_empty_string("city", city)?;
            }
            Command::Athlete { as_of, .. } => {
                if let Some(as_of) = as_of {
                    date_format::parse(as_of)?;
                }
            }
            Command::AddAthlete { name, gender, .. } => {
                validation::validate_non_empty_string("name", name)?;
                if Gender::from_code(*gender).is_none() {
                    return Err(EngineError::InvalidConfigValueError {
                        field: "gender".to_string(),
                        value: gender.to_string(),
                        reason: "Expected M or W".to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("athletics-records").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_rank_defaults() {
        let config = parse(&["rank", "Dreisprung"]);
        assert_eq!(config.data, "./data/athletics.json");
        match &config.command {
            Command::Rank {
                year,
                age_group,
                venue,
                format,
                ..
            } => {
                assert_eq!(year, "Ewige");
                assert_eq!(age_group, "Alle");
                assert_eq!(venue, "Halle + Freiluft");
                assert_eq!(*format, OutputFormat::Table);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_boundary_input() {
        assert!(parse(&["rank", "Sackhüpfen"]).validate().is_err());
        assert!(parse(&["rank", "DRE", "--venue", "Strand"]).validate().is_err());
        assert!(parse(&["classify", "1", "DRE", "14,53", "2023-06-18"]).validate().is_err());
        assert!(parse(&["add", "1", "DRE", "14.53", "18.06.2023", "Essen"]).validate().is_err());
        assert!(parse(&["add-athlete", "Anna Berg", "2004", "X"]).validate().is_err());
    }

    #[test]
    fn test_add_accepts_comma_wind_and_dotted_placement() {
        let config = parse(&[
            "--data",
            "/tmp/club.json",
            "add",
            "1",
            "Dreisprung",
            "14,53",
            "18.06.2023",
            "Essen",
            "--wind",
            "+0,8",
            "--placement",
            "1.",
        ]);
        assert!(config.validate().is_ok());
    }
}
