//! Breakpoint and gradient stop types.

use serde::{Deserialize, Serialize};

/// Fill color for the uncovered region below the first breakpoint and the
/// default severity color. Falls back to the stock info blue when the theme
/// does not define `--info-color`.
pub const INFO_COLOR: &str = "var(--info-color, #039be5)";

/// Color used when the segment configuration is malformed.
pub const ERROR_FALLBACK_COLOR: &str = "#FF0000";

/// A breakpoint: starting at `from`, the bucket/gradient color is `color`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeSegment {
    pub from: f64,
    pub color: String,
}

impl GaugeSegment {
    pub fn new(from: f64, color: impl Into<String>) -> Self {
        Self {
            from,
            color: color.into(),
        }
    }
}

/// A color anchor at a normalized position in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub pos: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl GradientStop {
    pub fn new(pos: f64, color: impl Into<String>) -> Self {
        Self {
            pos,
            color: Some(color.into()),
        }
    }
}

/// The `[min, max]` range a gauge displays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeDomain {
    pub min: f64,
    pub max: f64,
}

impl GaugeDomain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Unrounded normalized position of `value`; a zero-width domain maps to 0.
    pub fn position(&self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            0.0
        } else {
            (value - self.min) / span
        }
    }
}
