//! Parameter validation against [`ParamDescriptor`] metadata.
//!
//! Preset values and `key=value` overrides are resolved to a parameter index
//! and a plain value in display units before anything is written to a
//! processor. Out-of-range values are rejected here rather than clamped, so a
//! typo in a preset surfaces as an error instead of a silent limit.
//!
//! # Example
//!
//! ```rust
//! use attacca_config::{ParamValue, validate_param};
//! use attacca_effects::TransientDesigner;
//!
//! let designer = TransientDesigner::default();
//! let (index, value) = validate_param(&designer, "release_time", &"0.25 s".into()).unwrap();
//! assert_eq!(index, 5);
//! assert_eq!(value, 250.0);
//!
//! assert!(validate_param(&designer, "release_time", &ParamValue::Number(5000.0)).is_err());
//! ```

use attacca_core::{ParamDescriptor, ParamUnit, ParameterInfo};
use thiserror::Error;

use crate::error::ConfigError;
use crate::param_value::ParamValue;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// No parameter matches the key.
    #[error("unknown parameter '{param}'")]
    UnknownParameter {
        /// The unmatched key.
        param: String,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Fold a list of errors into one: `Ok` when empty, the error itself when
/// alone, [`ValidationError::Multiple`] otherwise.
pub fn collect_errors(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

fn invalid(desc: &ParamDescriptor, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidFormat {
        param: desc.string_id.to_string(),
        reason: reason.into(),
    }
}

/// Unit named by a text suffix, with the factor into the descriptor's unit.
fn suffix_unit(suffix: &str) -> Option<(ParamUnit, f32)> {
    match suffix.to_ascii_lowercase().as_str() {
        "db" => Some((ParamUnit::Decibels, 1.0)),
        "ms" => Some((ParamUnit::Milliseconds, 1.0)),
        "s" => Some((ParamUnit::Milliseconds, 1000.0)),
        "%" => Some((ParamUnit::Percent, 1.0)),
        _ => None,
    }
}

/// Parse a text value for `desc`.
///
/// Accepts, in order: a stepped parameter's labels, `on`/`off`-style words
/// for two-state switches, and a number with an optional unit suffix that
/// must agree with the descriptor's unit.
pub fn parse_text_value(desc: &ParamDescriptor, text: &str) -> ValidationResult<f32> {
    let text = text.trim();
    if let Some(value) = desc.label_value(text) {
        return Ok(value);
    }
    if desc.labels.len() == 2 {
        match text.to_ascii_lowercase().as_str() {
            "true" | "yes" | "enabled" => return Ok(desc.max),
            "false" | "no" | "disabled" => return Ok(desc.min),
            _ => {}
        }
    }

    let number = text.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    let suffix = text[number.len()..].trim();
    let value: f32 = number
        .trim()
        .parse()
        .map_err(|_| invalid(desc, format!("cannot parse '{text}'")))?;
    if !value.is_finite() {
        return Err(invalid(desc, format!("'{text}' is not finite")));
    }
    if suffix.is_empty() {
        return Ok(value);
    }

    match suffix_unit(suffix) {
        Some((unit, factor)) if unit == desc.unit => Ok(value * factor),
        Some(_) => Err(invalid(
            desc,
            format!("unit '{suffix}' does not match '{}'", desc.unit.suffix().trim()),
        )),
        None => Err(invalid(desc, format!("unknown unit '{suffix}'"))),
    }
}

/// Resolve `value` to a plain value for `desc` and check its range.
pub fn parse_param_value(desc: &ParamDescriptor, value: &ParamValue) -> ValidationResult<f32> {
    let plain = match value {
        ParamValue::Bool(on) => {
            if desc.labels.len() != 2 {
                return Err(invalid(desc, "boolean given for a non-switch parameter"));
            }
            if *on { desc.max } else { desc.min }
        }
        ParamValue::Number(n) => {
            let n = *n as f32;
            if !n.is_finite() {
                return Err(invalid(desc, format!("{n} is not finite")));
            }
            n
        }
        ParamValue::Text(text) => parse_text_value(desc, text)?,
    };

    if !desc.contains(plain) {
        return Err(ValidationError::OutOfRange {
            param: desc.string_id.to_string(),
            value: plain,
            min: desc.min,
            max: desc.max,
        });
    }
    Ok(plain)
}

/// Look up `key` on `target` and validate `value` for it.
///
/// Returns the parameter index and the plain value ready for
/// [`ParameterInfo::set_param`].
pub fn validate_param<P: ParameterInfo + ?Sized>(
    target: &P,
    key: &str,
    value: &ParamValue,
) -> ValidationResult<(usize, f32)> {
    let unknown = || ValidationError::UnknownParameter {
        param: key.to_string(),
    };
    let index = target.find_param(key).ok_or_else(unknown)?;
    let desc = target.param_info(index).ok_or_else(unknown)?;
    Ok((index, parse_param_value(&desc, value)?))
}

/// Split a `key=value` override. The value is always text, so units and
/// labels work the same as in preset files.
pub fn parse_assignment(assignment: &str) -> Option<(&str, ParamValue)> {
    let (key, value) = assignment.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, ParamValue::Text(value.trim().to_string())))
}

/// Parse, validate and apply one `key=value` override to `target`.
///
/// Returns the index and plain value that were written.
pub fn apply_assignment<P: ParameterInfo + ?Sized>(
    target: &mut P,
    assignment: &str,
) -> Result<(usize, f32), ConfigError> {
    let (key, value) = parse_assignment(assignment)
        .ok_or_else(|| ConfigError::InvalidAssignment(assignment.to_string()))?;
    let (index, plain) = validate_param(&*target, key, &value)?;
    target.set_param(index, plain);
    Ok((index, plain))
}
