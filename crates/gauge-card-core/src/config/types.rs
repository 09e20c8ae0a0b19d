//! Card configuration data types.
//!
//! Field names follow the card's YAML/JSON keys (snake_case). Fields that
//! accept a live template keep the raw template string; resolution happens
//! outside the engine (see [`super::TemplatedConfig`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a card configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid card configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which gauge of the card a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gauge {
    /// The main (outer) gauge, configured at the top level
    Main,
    /// The optional inner gauge, configured under `inner`
    Inner,
}

/// Display mode of the inner gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnerMode {
    /// Arc filled with the severity color
    #[default]
    Severity,
    /// Static segment arcs, value shown by a marker
    Static,
    /// Needle over static segments
    Needle,
    /// Drawn on top of the main gauge arc
    OnMain,
}

impl InnerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severity => "severity",
            Self::Static => "static",
            Self::Needle => "needle",
            Self::OnMain => "on_main",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim() {
            "static" => Self::Static,
            "needle" => Self::Needle,
            "on_main" => Self::OnMain,
            _ => Self::Severity,
        }
    }

    /// Modes in which the value is conveyed by a marker, not by fill color.
    pub fn suppresses_severity(&self) -> bool {
        matches!(self, Self::Static | Self::Needle)
    }
}

/// Returns true if `s` looks like a backend template rather than a literal.
pub fn is_template(s: &str) -> bool {
    s.contains("{{") || s.contains("{%")
}

/// A numeric field that may instead hold a template string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Templatable {
    Number(f64),
    Template(String),
}

impl Templatable {
    /// Literal JSON value. Numeric strings that are not templates are
    /// converted to numbers.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Template(t) => match t.trim().parse::<f64>() {
                Ok(n) => Value::from(n),
                Err(_) => Value::String(t.clone()),
            },
        }
    }
}

impl From<f64> for Templatable {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

fn default_min() -> Templatable {
    Templatable::Number(0.0)
}

fn default_max() -> Templatable {
    Templatable::Number(100.0)
}

/// Top-level card configuration (the main gauge plus card-wide options).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Entity whose state feeds the main gauge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Explicit value (or template) overriding the entity state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Templatable>,

    #[serde(default = "default_min")]
    pub min: Templatable,
    #[serde(default = "default_max")]
    pub max: Templatable,

    /// Needle display instead of a filled arc
    #[serde(default)]
    pub needle: bool,

    /// Render segments as a continuous gradient arc
    #[serde(default)]
    pub gradient: bool,

    /// Interpolate the severity color between breakpoints
    #[serde(default)]
    pub color_interpolation: bool,

    /// Breakpoint list or a template; validated by the segment normalizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Value>,

    /// Marker drawn at a target value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setpoint: Option<Templatable>,

    /// Show markers at the lowest/highest value seen
    #[serde(default)]
    pub min_indicator: bool,
    #[serde(default)]
    pub max_indicator: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<InnerConfig>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            entity: None,
            value: None,
            min: default_min(),
            max: default_max(),
            needle: false,
            gradient: false,
            color_interpolation: false,
            segments: None,
            setpoint: None,
            min_indicator: false,
            max_indicator: false,
            inner: None,
        }
    }
}

impl CardConfig {
    /// Parse a card configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a card configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn has_inner(&self) -> bool {
        self.inner.is_some()
    }
}

/// Nested configuration of the optional inner gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InnerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Templatable>,

    #[serde(default = "default_min")]
    pub min: Templatable,
    #[serde(default = "default_max")]
    pub max: Templatable,

    #[serde(default)]
    pub mode: InnerMode,

    #[serde(default)]
    pub gradient: bool,

    #[serde(default)]
    pub color_interpolation: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Value>,
}

impl Default for InnerConfig {
    fn default() -> Self {
        Self {
            entity: None,
            value: None,
            min: default_min(),
            max: default_max(),
            mode: InnerMode::Severity,
            gradient: false,
            color_interpolation: false,
            segments: None,
        }
    }
}
