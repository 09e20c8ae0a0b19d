//! Card configuration validation and error reporting.
//!
//! The segment engine already degrades gracefully on bad input (red
//! fallback, info padding). This report explains to the user why a gauge
//! renders that way, for the configuration editor to display.

use super::source::{ConfigField, ConfigValueSource, FieldKey};
use super::types::Gauge;
use crate::segments::{validate_segments, GaugeSegment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration problems that make a gauge render incorrectly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum ValidationError {
    #[error("{gauge:?} gauge has invalid range: min={min} >= max={max}")]
    InvalidRange { gauge: Gauge, min: f64, max: f64 },

    #[error("{gauge:?} gauge has no numeric min/max")]
    MissingRange { gauge: Gauge },

    #[error("{gauge:?} gauge segments are malformed: {reason}")]
    MalformedSegments { gauge: Gauge, reason: String },
}

/// Non-critical issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationWarning {
    /// Segments are not listed in ascending order (they are sorted on use)
    UnsortedSegments { gauge: Gauge },
    /// The lowest segment starts above min; the gap renders in the info color
    UncoveredRange { gauge: Gauge, min: f64, lowest: f64 },
    /// Every segment starts at or above max; only one color is visible
    SegmentsBeyondMax { gauge: Gauge, max: f64 },
    /// The setpoint lies outside the main gauge range
    SetpointOutOfRange { setpoint: f64 },
}

/// Statistics about a card configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardStats {
    pub main_segment_count: usize,
    pub inner_segment_count: usize,
    pub has_inner: bool,
}

/// Complete validation report for a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub stats: CardStats,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

/// Validate a card configuration as seen through `source`.
pub fn validate_card<C: ConfigValueSource + ?Sized>(source: &C) -> ValidationReport {
    let mut report = ValidationReport {
        stats: CardStats {
            has_inner: source.has_inner(),
            ..CardStats::default()
        },
        ..ValidationReport::default()
    };

    let mut gauges = vec![Gauge::Main];
    if source.has_inner() {
        gauges.push(Gauge::Inner);
    }

    for gauge in gauges {
        let count = validate_gauge(source, gauge, &mut report);
        match gauge {
            Gauge::Main => report.stats.main_segment_count = count,
            Gauge::Inner => report.stats.inner_segment_count = count,
        }
    }

    if let (Some(setpoint), Some(min), Some(max)) = (
        source.resolve_f64(ConfigField::new(Gauge::Main, FieldKey::Setpoint)),
        source.resolve_f64(ConfigField::new(Gauge::Main, FieldKey::Min)),
        source.resolve_f64(ConfigField::new(Gauge::Main, FieldKey::Max)),
    ) {
        if setpoint < min || setpoint > max {
            report
                .warnings
                .push(ValidationWarning::SetpointOutOfRange { setpoint });
        }
    }

    report
}

/// Returns the number of configured segments.
fn validate_gauge<C: ConfigValueSource + ?Sized>(
    source: &C,
    gauge: Gauge,
    report: &mut ValidationReport,
) -> usize {
    let min = source.resolve_f64(ConfigField::new(gauge, FieldKey::Min));
    let max = source.resolve_f64(ConfigField::new(gauge, FieldKey::Max));

    let range = match (min, max) {
        (Some(min), Some(max)) if !min.is_finite() || !max.is_finite() => {
            report.errors.push(ValidationError::MissingRange { gauge });
            None
        }
        (Some(min), Some(max)) if min >= max => {
            report
                .errors
                .push(ValidationError::InvalidRange { gauge, min, max });
            None
        }
        (Some(min), Some(max)) => Some((min, max)),
        _ => {
            report.errors.push(ValidationError::MissingRange { gauge });
            None
        }
    };

    let Some(raw) = source.resolve(ConfigField::new(gauge, FieldKey::Segments)) else {
        return 0;
    };
    if raw.is_null() {
        return 0;
    }

    let segments: Vec<GaugeSegment> = match validate_segments(&raw) {
        Ok(segments) => segments,
        Err(e) => {
            report.errors.push(ValidationError::MalformedSegments {
                gauge,
                reason: e.to_string(),
            });
            return 0;
        }
    };

    if segments.windows(2).any(|w| w[0].from > w[1].from) {
        report
            .warnings
            .push(ValidationWarning::UnsortedSegments { gauge });
    }

    let lowest = segments.iter().map(|s| s.from).min_by(f64::total_cmp);
    if let (Some((min, max)), Some(lowest)) = (range, lowest) {
        if lowest >= max {
            report
                .warnings
                .push(ValidationWarning::SegmentsBeyondMax { gauge, max });
        } else if lowest > min {
            report
                .warnings
                .push(ValidationWarning::UncoveredRange { gauge, min, lowest });
        }
    }

    segments.len()
}
