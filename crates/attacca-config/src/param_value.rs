//! Preset parameter values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value in a preset's `[params]` table.
///
/// TOML numbers, booleans and strings are all accepted; strings may carry a
/// unit suffix (`"-6 dB"`, `"12ms"`, `"0.5 s"`, `"80%"`), a switch word
/// (`"on"`, `"off"`) or a choice label (`"arctangent"`).
///
/// # Example
///
/// ```rust
/// use attacca_config::ParamValue;
///
/// let values: Vec<ParamValue> = vec![50.0.into(), true.into(), "-6 dB".into()];
/// assert_eq!(values[2].to_string(), "\"-6 dB\"");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// `true` / `false`.
    Bool(bool),
    /// Integer or float.
    Number(f64),
    /// Text with optional unit or a label.
    Text(String),
}

impl ParamValue {
    /// Number rounded to four decimals so saved presets stay readable.
    pub fn rounded(value: f32) -> Self {
        ParamValue::Number((f64::from(value) * 1e4).round() / 1e4)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Number(f64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Text(s) => write!(f, "\"{s}\""),
        }
    }
}
