//! Gradient stop construction.

use super::types::{GaugeDomain, GaugeSegment, GradientStop};
use crate::interpolate::{interpolate, Interpolation};

/// Turn normalized breakpoints into gradient stops over `[min, max]`.
///
/// Each breakpoint lands at its normalized position. A breakpoint below
/// `min` that is followed by a visible one is replaced by the color
/// interpolated at `min` (position 0); symmetrically, the first breakpoint
/// above `max` becomes the color interpolated at `max` (position 1). Fully
/// hidden breakpoints are dropped.
///
/// The result always holds at least two stops, all within `[0, 1]`.
pub fn gradient_stops(segments: &[GaugeSegment], min: f64, max: f64) -> Vec<GradientStop> {
    if segments.len() < 2 {
        let color = segments.first().map(|s| s.color.clone());
        return flat(color);
    }

    let domain = GaugeDomain::new(min, max);
    let mut stops = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        if segment.from < min {
            let Some(next) = segments.get(i + 1).filter(|n| n.from >= min) else {
                continue;
            };
            stops.push(GradientStop {
                pos: 0.0,
                color: edge_color(segment, next, min),
            });
        } else if segment.from > max {
            let Some(prev) = i
                .checked_sub(1)
                .map(|j| &segments[j])
                .filter(|p| p.from <= max)
            else {
                continue;
            };
            stops.push(GradientStop {
                pos: 1.0,
                color: edge_color(prev, segment, max),
            });
        } else {
            stops.push(GradientStop::new(domain.position(segment.from), segment.color.clone()));
        }
    }

    if stops.len() < 2 {
        let lowest = &segments[0];
        let highest = &segments[segments.len() - 1];
        let nearest = if max <= lowest.from { lowest } else { highest };
        tracing::debug!(min, max, "gauge domain outside all segments, using flat color");
        return flat(Some(nearest.color.clone()));
    }

    stops
}

fn flat(color: Option<String>) -> Vec<GradientStop> {
    vec![
        GradientStop {
            pos: 0.0,
            color: color.clone(),
        },
        GradientStop { pos: 1.0, color },
    ]
}

/// Color at `value` on the straight blend between two breakpoints.
fn edge_color(low: &GaugeSegment, high: &GaugeSegment, value: f64) -> Option<String> {
    interpolate(Interpolation::TwoPoint {
        min: low.from,
        color_min: &low.color,
        max: high.from,
        color_max: &high.color,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(from: f64, color: &str) -> GaugeSegment {
        GaugeSegment::new(from, color)
    }

    #[test]
    fn test_in_range_positions() {
        let stops = gradient_stops(
            &[seg(0.0, "#000000"), seg(50.0, "#ffffff")],
            0.0,
            100.0,
        );
        assert_eq!(
            stops,
            vec![GradientStop::new(0.0, "#000000"), GradientStop::new(0.5, "#ffffff")]
        );
    }

    #[test]
    fn test_low_edge_interpolated() {
        let stops = gradient_stops(
            &[seg(-100.0, "#000000"), seg(0.0, "#ffffff"), seg(100.0, "#ff0000")],
            -50.0,
            100.0,
        );
        assert_eq!(stops[0], GradientStop::new(0.0, "#808080"));
        assert_eq!(stops.len(), 3);
    }

    #[test]
    fn test_high_edge_interpolated_and_rest_dropped() {
        let stops = gradient_stops(
            &[seg(0.0, "#000000"), seg(200.0, "#ffffff"), seg(300.0, "#ff0000")],
            0.0,
            100.0,
        );
        assert_eq!(
            stops,
            vec![GradientStop::new(0.0, "#000000"), GradientStop::new(1.0, "#808080")]
        );
    }

    #[test]
    fn test_domain_above_all_segments() {
        let stops = gradient_stops(&[seg(0.0, "#000000"), seg(10.0, "#ffffff")], 50.0, 60.0);
        assert_eq!(
            stops,
            vec![GradientStop::new(0.0, "#ffffff"), GradientStop::new(1.0, "#ffffff")]
        );
    }

    #[test]
    fn test_empty_input_still_two_stops() {
        let stops = gradient_stops(&[], 0.0, 1.0);
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].color, None);
    }
}
