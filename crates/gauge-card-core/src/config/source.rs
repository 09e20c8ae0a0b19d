//! Config value access for the segment engine.
//!
//! The engine never reads [`CardConfig`] fields directly. It asks a
//! [`ConfigValueSource`] for a [`ConfigField`], which lets the rendering layer
//! substitute values that a template subscription has already resolved.

use super::types::{is_template, CardConfig, Gauge, Templatable};
use serde_json::Value;
use std::collections::HashMap;

/// Per-gauge configuration keys the engine can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Value,
    Min,
    Max,
    Segments,
    ColorInterpolation,
    /// Main gauge needle flag (bool)
    Needle,
    /// Inner gauge display mode (string)
    Mode,
    /// Main gauge setpoint
    Setpoint,
}

/// A configuration field of one gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigField {
    pub gauge: Gauge,
    pub key: FieldKey,
}

impl ConfigField {
    pub const fn new(gauge: Gauge, key: FieldKey) -> Self {
        Self { gauge, key }
    }
}

/// Capability to read a (possibly template-resolved) configuration value.
pub trait ConfigValueSource {
    /// Current value of `field`, or `None` when unset or not yet resolved.
    fn resolve(&self, field: ConfigField) -> Option<Value>;

    /// Whether the card declares an inner gauge.
    fn has_inner(&self) -> bool;

    /// Numeric value of `field`. Non-finite results ("nan", "inf") count as
    /// unset.
    fn resolve_f64(&self, field: ConfigField) -> Option<f64> {
        let value = match self.resolve(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        value.filter(|v: &f64| v.is_finite())
    }

    fn resolve_bool(&self, field: ConfigField) -> Option<bool> {
        match self.resolve(field)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" => Some(true),
                "false" | "off" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl CardConfig {
    /// Raw literal value of a field, templates included as strings.
    fn literal(&self, field: ConfigField) -> Option<Value> {
        match field.gauge {
            Gauge::Main => match field.key {
                FieldKey::Value => self.value.as_ref().map(Templatable::to_value),
                FieldKey::Min => Some(self.min.to_value()),
                FieldKey::Max => Some(self.max.to_value()),
                FieldKey::Segments => self.segments.clone(),
                FieldKey::ColorInterpolation => Some(Value::Bool(self.color_interpolation)),
                FieldKey::Needle => Some(Value::Bool(self.needle)),
                FieldKey::Mode => None,
                FieldKey::Setpoint => self.setpoint.as_ref().map(Templatable::to_value),
            },
            Gauge::Inner => {
                let inner = self.inner.as_ref()?;
                match field.key {
                    FieldKey::Value => inner.value.as_ref().map(Templatable::to_value),
                    FieldKey::Min => Some(inner.min.to_value()),
                    FieldKey::Max => Some(inner.max.to_value()),
                    FieldKey::Segments => inner.segments.clone(),
                    FieldKey::ColorInterpolation => {
                        Some(Value::Bool(inner.color_interpolation))
                    }
                    FieldKey::Needle | FieldKey::Setpoint => None,
                    FieldKey::Mode => Some(Value::String(inner.mode.as_str().to_string())),
                }
            }
        }
    }

    /// The template string behind `field`, if it is templated.
    pub fn template(&self, field: ConfigField) -> Option<String> {
        match self.literal(field)? {
            Value::String(s) if is_template(&s) => Some(s),
            _ => None,
        }
    }

    /// All templated fields, for the subscription layer to resolve.
    pub fn templated_fields(&self) -> Vec<ConfigField> {
        const KEYS: [FieldKey; 5] = [
            FieldKey::Value,
            FieldKey::Min,
            FieldKey::Max,
            FieldKey::Segments,
            FieldKey::Setpoint,
        ];
        [Gauge::Main, Gauge::Inner]
            .into_iter()
            .flat_map(|gauge| KEYS.into_iter().map(move |key| ConfigField::new(gauge, key)))
            .filter(|field| self.template(*field).is_some())
            .collect()
    }
}

/// Literal configuration values; templates come back as raw strings.
impl ConfigValueSource for CardConfig {
    fn resolve(&self, field: ConfigField) -> Option<Value> {
        self.literal(field)
    }

    fn has_inner(&self) -> bool {
        self.inner.is_some()
    }
}

/// A card configuration overlaid with template results.
///
/// Templated fields return their resolved value once one has been supplied,
/// and `None` until then. Literal fields pass through unchanged.
#[derive(Debug, Clone)]
pub struct TemplatedConfig<'a> {
    config: &'a CardConfig,
    resolved: HashMap<ConfigField, Value>,
}

impl<'a> TemplatedConfig<'a> {
    pub fn new(config: &'a CardConfig) -> Self {
        Self {
            config,
            resolved: HashMap::new(),
        }
    }

    pub fn config(&self) -> &CardConfig {
        self.config
    }

    /// Store the latest result of the template behind `field`.
    pub fn set_resolved(&mut self, field: ConfigField, value: Value) {
        self.resolved.insert(field, value);
    }

    pub fn clear_resolved(&mut self, field: ConfigField) -> Option<Value> {
        self.resolved.remove(&field)
    }

    /// Templated fields that have no result yet.
    pub fn pending(&self) -> Vec<ConfigField> {
        self.config
            .templated_fields()
            .into_iter()
            .filter(|f| !self.resolved.contains_key(f))
            .collect()
    }
}

impl ConfigValueSource for TemplatedConfig<'_> {
    fn resolve(&self, field: ConfigField) -> Option<Value> {
        if self.config.template(field).is_some() {
            let value = self.resolved.get(&field).cloned();
            if value.is_none() {
                tracing::trace!(?field, "template not resolved yet");
            }
            return value;
        }
        self.config.resolve(field)
    }

    fn has_inner(&self) -> bool {
        self.config.has_inner()
    }
}
