//! Checks applied at the boundary, before anything reaches the engine.

use crate::core::{disciplines, value};
use crate::utils::error::{EngineError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EngineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EngineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(EngineError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
    })
}

/// Discipline given either by name (`"Kugel"`) or by code (`"KUG"`).
pub fn parse_discipline(name_or_code: &str) -> Result<&'static str> {
    disciplines::resolve(name_or_code.trim()).ok_or_else(|| EngineError::UnknownDiscipline {
        name: name_or_code.to_string(),
    })
}

/// Accepts the value only if it has one of the three recorded shapes.
pub fn parse_value(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if value::is_comparable(raw) {
        Ok(raw.to_string())
    } else {
        Err(EngineError::InvalidValue {
            value: raw.to_string(),
        })
    }
}

/// Wind with decimal comma or point; empty means no reading.
pub fn parse_wind(raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .map(Some)
        .ok_or_else(|| EngineError::InvalidWind {
            value: raw.to_string(),
        })
}

/// Placement as printed in result lists (`"3."`); empty means unplaced.
pub fn parse_placement(raw: &str) -> Result<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.replace('.', "")
        .parse::<u32>()
        .map(Some)
        .map_err(|_| EngineError::InvalidPlacement {
            value: raw.to_string(),
        })
}
