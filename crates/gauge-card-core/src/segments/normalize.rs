//! Breakpoint validation and normalization.

use super::types::{GaugeSegment, ERROR_FALLBACK_COLOR, INFO_COLOR};
use crate::theme::ColorResolver;
use serde_json::Value;
use thiserror::Error;

/// Reasons a breakpoint list is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("Segments must be a list, got {0}")]
    NotAList(&'static str),

    #[error("Segment {index} is not an object")]
    NotAnObject { index: usize },

    #[error("Segment {index} has a missing or non-numeric 'from'")]
    InvalidFrom { index: usize },

    #[error("Segment {index} has a missing or non-string 'color'")]
    InvalidColor { index: usize },
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Check the shape of a raw breakpoint list.
///
/// Every element must be an object with a numeric `from` and a string
/// `color`. A string holding a JSON list (the usual output of a template) is
/// accepted as well. The result keeps input order.
pub fn validate_segments(raw: &Value) -> Result<Vec<GaugeSegment>, SegmentError> {
    let parsed;
    let items = match raw {
        Value::Array(items) => items,
        Value::String(s) => {
            parsed = serde_json::from_str::<Value>(s)
                .map_err(|_| SegmentError::NotAList("a string"))?;
            match &parsed {
                Value::Array(items) => items,
                other => return Err(SegmentError::NotAList(json_kind(other))),
            }
        }
        other => return Err(SegmentError::NotAList(json_kind(other))),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<GaugeSegment, SegmentError> {
            let obj = item
                .as_object()
                .ok_or(SegmentError::NotAnObject { index })?;
            let from = obj
                .get("from")
                .and_then(Value::as_f64)
                .ok_or(SegmentError::InvalidFrom { index })?;
            let color = obj
                .get("color")
                .and_then(Value::as_str)
                .ok_or(SegmentError::InvalidColor { index })?;
            Ok(GaugeSegment::new(from, color))
        })
        .collect()
}

fn is_empty_config(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Validate, sort and pad a breakpoint list for a gauge whose domain starts
/// at `domain_min`.
///
/// - no breakpoints: a single info-colored breakpoint at 0
/// - malformed breakpoints: a single red breakpoint at 0
/// - lowest breakpoint above `domain_min`: two info-colored breakpoints are
///   prepended, at `domain_min` and at the lowest `from`
///
/// Configured colors are resolved through `colors`. The domain maximum is
/// not consulted.
pub fn normalize_segments<R>(raw: Option<&Value>, domain_min: f64, colors: &R) -> Vec<GaugeSegment>
where
    R: ColorResolver + ?Sized,
{
    let Some(raw) = raw.filter(|r| !is_empty_config(r)) else {
        return vec![GaugeSegment::new(0.0, colors.resolve_color(INFO_COLOR))];
    };

    let validated = match validate_segments(raw) {
        Ok(segments) => segments,
        Err(e) => {
            tracing::warn!("Invalid segment configuration, falling back to error color: {e}");
            return vec![GaugeSegment::new(0.0, ERROR_FALLBACK_COLOR)];
        }
    };

    let mut segments: Vec<GaugeSegment> = validated
        .into_iter()
        .map(|s| GaugeSegment {
            color: colors.resolve_color(&s.color),
            ..s
        })
        .collect();
    segments.sort_by(|a, b| a.from.total_cmp(&b.from));

    if let Some(lowest) = segments.first().map(|s| s.from) {
        if lowest > domain_min {
            let info = colors.resolve_color(INFO_COLOR);
            tracing::trace!(domain_min, lowest, "padding uncovered region below first segment");
            segments.insert(0, GaugeSegment::new(lowest, info.clone()));
            segments.insert(0, GaugeSegment::new(domain_min, info));
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_list() {
        let raw = json!([{"from": 10, "color": "red"}, {"from": 0.5, "color": "#fff"}]);
        let segments = validate_segments(&raw).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].from, 0.5);
    }

    #[test]
    fn test_validate_accepts_json_string() {
        let raw = json!(r##"[{"from": 0, "color": "#00ff00"}]"##);
        assert_eq!(
            validate_segments(&raw).unwrap(),
            vec![GaugeSegment::new(0.0, "#00ff00")]
        );
    }

    #[test]
    fn test_validate_reports_first_bad_element() {
        let raw = json!([{"from": 0, "color": "red"}, {"from": "10", "color": "red"}]);
        assert_eq!(
            validate_segments(&raw),
            Err(SegmentError::InvalidFrom { index: 1 })
        );
        assert_eq!(
            validate_segments(&json!([{"from": 0, "color": 5}])),
            Err(SegmentError::InvalidColor { index: 0 })
        );
        assert_eq!(
            validate_segments(&json!([3])),
            Err(SegmentError::NotAnObject { index: 0 })
        );
        assert_eq!(
            validate_segments(&json!({"from": 0})),
            Err(SegmentError::NotAList("an object"))
        );
        assert_eq!(
            validate_segments(&json!("{{ states('sensor.x') }}")),
            Err(SegmentError::NotAList("a string"))
        );
    }
}
