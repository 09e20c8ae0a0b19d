//! Severity color resolution for a gauge value.

use super::gradient::gradient_stops;
use super::normalize::normalize_segments;
use super::types::{GaugeDomain, GaugeSegment, GradientStop, INFO_COLOR};
use crate::config::{ConfigField, ConfigValueSource, FieldKey, Gauge, InnerMode};
use crate::interpolate::{interpolate, Interpolation};
use crate::theme::ColorResolver;

/// Segment and severity color engine for one card.
///
/// Reads configuration through a [`ConfigValueSource`] on every call, so it
/// always reflects the latest config and template results. Holds no state of
/// its own; color references are resolved through the shared
/// [`ColorResolver`].
pub struct SegmentEngine<'a, C: ?Sized, R: ?Sized> {
    config: &'a C,
    colors: &'a R,
}

impl<'a, C, R> SegmentEngine<'a, C, R>
where
    C: ConfigValueSource + ?Sized,
    R: ColorResolver + ?Sized,
{
    pub fn new(config: &'a C, colors: &'a R) -> Self {
        Self { config, colors }
    }

    /// The resolved default severity color.
    pub fn info_color(&self) -> String {
        self.colors.resolve_color(INFO_COLOR)
    }

    /// Configured `[min, max]` of a gauge, if both are available.
    pub fn domain(&self, gauge: Gauge) -> Option<GaugeDomain> {
        if gauge == Gauge::Inner && !self.config.has_inner() {
            return None;
        }
        let min = self.config.resolve_f64(ConfigField::new(gauge, FieldKey::Min))?;
        let max = self.config.resolve_f64(ConfigField::new(gauge, FieldKey::Max))?;
        Some(GaugeDomain::new(min, max))
    }

    /// Normalized breakpoints of a gauge for a domain starting at `min`.
    pub fn segments(&self, gauge: Gauge, min: f64) -> Vec<GaugeSegment> {
        let raw = self.config.resolve(ConfigField::new(gauge, FieldKey::Segments));
        normalize_segments(raw.as_ref(), min, self.colors)
    }

    /// Gradient stops of a gauge over `[min, max]`.
    pub fn gradient(&self, gauge: Gauge, min: f64, max: f64) -> Vec<GradientStop> {
        gradient_stops(&self.segments(gauge, min), min, max)
    }

    /// Whether the gauge blends colors between breakpoints.
    pub fn interpolates(&self, gauge: Gauge) -> bool {
        self.config
            .resolve_bool(ConfigField::new(gauge, FieldKey::ColorInterpolation))
            .unwrap_or(false)
    }

    /// Whether discrete fill coloring is switched off by the display mode.
    fn severity_suppressed(&self, gauge: Gauge) -> bool {
        match gauge {
            Gauge::Main => self
                .config
                .resolve_bool(ConfigField::new(Gauge::Main, FieldKey::Needle))
                .unwrap_or(false),
            Gauge::Inner => self
                .config
                .resolve(ConfigField::new(Gauge::Inner, FieldKey::Mode))
                .and_then(|v| v.as_str().map(InnerMode::from_str_lossy))
                .is_some_and(|mode| mode.suppresses_severity()),
        }
    }

    /// Fill color for `value` on a gauge spanning `[min, max]`.
    ///
    /// With interpolation the value is clamped to `max` and sampled from the
    /// gradient; a value below `min` or a NaN reading falls back to the info
    /// color. Without interpolation the color of the bucket containing the
    /// value is returned, or the info color when no bucket matches. Needle display
    /// (and inner `static`/`needle` modes) returns `None`: there is no fill.
    pub fn compute_color(&self, gauge: Gauge, min: f64, max: f64, value: f64) -> Option<String> {
        if gauge == Gauge::Inner && !self.config.has_inner() {
            return None;
        }

        if self.interpolates(gauge) {
            if value.is_nan() {
                tracing::debug!(?gauge, "value is not a number, using info color");
                return Some(self.info_color());
            }
            let stops = self.gradient(gauge, min, max);
            let color = interpolate(Interpolation::Stops {
                stops: &stops,
                min,
                max,
                value: value.min(max),
            });
            return Some(color.unwrap_or_else(|| {
                tracing::debug!(?gauge, value, min, "no interpolated color, using info color");
                self.info_color()
            }));
        }

        if self.severity_suppressed(gauge) {
            return None;
        }

        let segments = self.segments(gauge, min);
        Some(
            bucket_color(&segments, value)
                .map(str::to_string)
                .unwrap_or_else(|| self.info_color()),
        )
    }

    /// [`compute_color`](Self::compute_color) using the configured domain.
    pub fn severity_color(&self, gauge: Gauge, value: f64) -> Option<String> {
        let domain = self.domain(gauge)?;
        self.compute_color(gauge, domain.min, domain.max, value)
    }
}

/// Color of the breakpoint whose band `[from_i, from_{i+1})` holds `value`.
/// The last band is open-ended.
pub fn bucket_color(segments: &[GaugeSegment], value: f64) -> Option<&str> {
    segments
        .iter()
        .enumerate()
        .find(|(i, segment)| {
            value >= segment.from && segments.get(i + 1).map_or(true, |next| value < next.from)
        })
        .map(|(_, segment)| segment.color.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let segments = vec![
            GaugeSegment::new(0.0, "a"),
            GaugeSegment::new(10.0, "b"),
            GaugeSegment::new(20.0, "c"),
        ];
        assert_eq!(bucket_color(&segments, 0.0), Some("a"));
        assert_eq!(bucket_color(&segments, 9.99), Some("a"));
        assert_eq!(bucket_color(&segments, 10.0), Some("b"));
        assert_eq!(bucket_color(&segments, 1e9), Some("c"));
        assert_eq!(bucket_color(&segments, -0.1), None);
    }

    #[test]
    fn test_duplicate_from_picks_later_bucket() {
        let segments = vec![
            GaugeSegment::new(0.0, "pad"),
            GaugeSegment::new(0.0, "real"),
        ];
        assert_eq!(bucket_color(&segments, 0.0), Some("real"));
    }
}
