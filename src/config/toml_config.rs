use crate::core::ranking::{AgeGroupFilter, RankingRequest, ALL_AGE_GROUPS};
use crate::domain::model::{VenueFilter, YearFilter};
use crate::utils::error::{EngineError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub report: ReportSection,
    pub data: DataConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub rankings: Vec<RankingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

/// One ranking table to export, in the labels the web frontend uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub discipline: String,
    pub year: String,
    #[serde(default = "default_age_group")]
    pub age_group: String,
    #[serde(default)]
    pub venue: String,
}

fn default_age_group() -> String {
    ALL_AGE_GROUPS.to_string()
}

impl RankingConfig {
    pub fn to_request(&self) -> Result<RankingRequest> {
        let code = validation::parse_discipline(&self.discipline)?;
        let year = YearFilter::from_label(&self.year).ok_or_else(|| EngineError::InvalidConfigValueError {
            field: "rankings.year".to_string(),
            value: self.year.clone(),
            reason: "Expected a year such as 2024 or \"Ewige\"".to_string(),
        })?;
        let venue = VenueFilter::from_label(&self.venue).ok_or_else(|| EngineError::InvalidConfigValueError {
            field: "rankings.venue".to_string(),
            value: self.venue.clone(),
            reason: "Expected \"Halle\", \"Freiluft\" or \"Halle + Freiluft\"".to_string(),
        })?;

        Ok(RankingRequest {
            discipline_code: code.to_string(),
            year,
            age_group: AgeGroupFilter::parse(&self.age_group),
            venue,
        })
    }
}

impl ReportConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EngineError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EngineError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("report.name", &self.report.name)?;
        validation::validate_path("data.path", &self.data.path)?;
        validation::validate_path("output.path", &self.output.path)?;

        if self.output.formats.is_empty() {
            return Err(EngineError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }
        for format in &self.output.formats {
            validation::validate_one_of("output.formats", format, &OUTPUT_FORMATS)?;
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validation::validate_one_of(
                "logging.level",
                level,
                &["trace", "debug", "info", "warn", "error"],
            )?;
        }

        for ranking in &self.rankings {
            ranking.to_request()?;
        }

        Ok(())
    }

    pub fn requests(&self) -> Result<Vec<RankingRequest>> {
        self.rankings.iter().map(RankingConfig::to_request).collect()
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
