use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown discipline: {name}")]
    UnknownDiscipline { name: String },

    #[error("Unknown athlete id: {id}")]
    UnknownAthlete { id: u32 },

    #[error("Invalid date '{value}': expected format {expected}")]
    InvalidDate { value: String, expected: String },

    #[error("Value format not recognized: '{value}'. Expected formats: long distance: H:MM,SS, sprint or technical event: S,HH, multi-event: P.PPP")]
    InvalidValue { value: String },

    #[error("Wind format not recognized: '{value}'")]
    InvalidWind { value: String },

    #[error("Placement format not recognized: '{value}'")]
    InvalidPlacement { value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("Athlete already exists: {name}")]
    DuplicateAthlete { name: String },

    #[error("Background task failed: {message}")]
    TaskFailed { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EngineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::UnknownDiscipline { .. }
            | EngineError::UnknownAthlete { .. }
            | EngineError::InvalidDate { .. }
            | EngineError::InvalidValue { .. }
            | EngineError::InvalidWind { .. }
            | EngineError::InvalidPlacement { .. }
            | EngineError::DuplicateAthlete { .. } => ErrorCategory::Input,
            EngineError::ConfigValidationError { .. }
            | EngineError::InvalidConfigValueError { .. }
            | EngineError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EngineError::StoreError { .. }
            | EngineError::SerializationError(_)
            | EngineError::CsvError(_) => ErrorCategory::Storage,
            EngineError::IoError(_) | EngineError::TaskFailed { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EngineError::UnknownDiscipline { .. } => {
                "Use one of the known discipline names, e.g. 'Dreisprung' or '100 m'".to_string()
            }
            EngineError::UnknownAthlete { .. } => {
                "Check the athlete id against the roster in the dataset".to_string()
            }
            EngineError::InvalidDate { .. } => "Write dates as dd.mm.yyyy, e.g. 18.06.2023".to_string(),
            EngineError::InvalidValue { .. } => {
                "Use a decimal comma, e.g. '14,53', '1:02,33' or '2.345'".to_string()
            }
            EngineError::InvalidWind { .. } => "Write wind as a signed decimal, e.g. '+1,2'".to_string(),
            EngineError::InvalidPlacement { .. } => "Write placement as a number, e.g. '3.'".to_string(),
            EngineError::DuplicateAthlete { .. } => {
                "The athlete is already on the roster; ingest results instead".to_string()
            }
            EngineError::IoError(_) => "Check that the file exists and is readable".to_string(),
            EngineError::TaskFailed { .. } => "Run the report again with --verbose".to_string(),
            EngineError::SerializationError(_) => "Check that the dataset is valid JSON".to_string(),
            EngineError::CsvError(_) => "Check that the output directory is writable".to_string(),
            EngineError::StoreError { .. } => "Reload the dataset and retry the request".to_string(),
            EngineError::ConfigValidationError { .. }
            | EngineError::InvalidConfigValueError { .. }
            | EngineError::MissingConfigError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Request rejected: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => format!("Data store problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
