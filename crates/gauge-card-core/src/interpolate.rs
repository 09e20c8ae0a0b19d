//! Color interpolation over a gauge domain.
//!
//! A query value is mapped to a normalized position in `[0, 1]`, rounded to two
//! decimals, and sampled from a ramp built out of gradient stops. Values
//! outside the domain produce `None` rather than an error.

use crate::color::Rgba;
use crate::segments::GradientStop;

/// An interpolation query.
#[derive(Debug, Clone, Copy)]
pub enum Interpolation<'a> {
    /// Blend between two colors anchored at the domain ends.
    TwoPoint {
        min: f64,
        color_min: &'a str,
        max: f64,
        color_max: &'a str,
        value: f64,
    },
    /// Sample a multi-stop gradient laid out over the domain.
    Stops {
        stops: &'a [GradientStop],
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Round a normalized position to two decimals.
pub fn round_position(pos: f64) -> f64 {
    (pos * 100.0).round() / 100.0
}

/// Normalized, rounded position of `value` in `[min, max]`.
///
/// A zero-width domain maps every value to `0.0`.
pub fn normalized_position(min: f64, max: f64, value: f64) -> f64 {
    let span = max - min;
    if span == 0.0 {
        return 0.0;
    }
    round_position((value - min) / span)
}

/// Interpolate a color, returning `#rrggbb`.
///
/// Returns `None` when the value lies outside `[min, max]` or when no stop
/// carries a usable color.
pub fn interpolate(request: Interpolation<'_>) -> Option<String> {
    let (min, max, value) = match request {
        Interpolation::TwoPoint {
            min, max, value, ..
        }
        | Interpolation::Stops {
            min, max, value, ..
        } => (min, max, value),
    };

    if value.is_nan() || value < min || value > max {
        return None;
    }

    let pos = normalized_position(min, max, value);

    let ramp = match request {
        Interpolation::TwoPoint {
            color_min,
            color_max,
            ..
        } => ColorRamp::from_stops(&[
            GradientStop::new(0.0, color_min),
            GradientStop::new(1.0, color_max),
        ]),
        Interpolation::Stops { stops, .. } => ColorRamp::from_stops(stops),
    };

    ramp.sample(pos).map(|c| c.to_hex())
}

/// Parsed, position-sorted color stops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorRamp {
    stops: Vec<(f64, Rgba)>,
}

impl ColorRamp {
    /// Build a ramp, skipping stops without a color or with an unparseable one.
    pub fn from_stops(stops: &[GradientStop]) -> Self {
        let mut parsed: Vec<(f64, Rgba)> = stops
            .iter()
            .filter_map(|stop| {
                let color = stop.color.as_deref()?;
                match Rgba::parse(color) {
                    Ok(rgba) if stop.pos.is_finite() => Some((stop.pos, rgba)),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::warn!(pos = stop.pos, "Skipping gradient stop: {e}");
                        None
                    }
                }
            })
            .collect();
        parsed.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops: parsed }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Color at normalized position `pos`.
    ///
    /// Positions before the first or after the last stop take the nearest
    /// stop's color. A position exactly on a stop returns that stop (the last
    /// one, when several share the position).
    pub fn sample(&self, pos: f64) -> Option<Rgba> {
        let (first, last) = (self.stops.first()?, self.stops.last()?);
        if pos >= last.0 {
            return Some(last.1);
        }
        if pos < first.0 {
            return Some(first.1);
        }

        let upper = self.stops.iter().position(|(p, _)| *p > pos)?;
        let (p0, c0) = self.stops[upper - 1];
        let (p1, c1) = self.stops[upper];
        if p0 == pos {
            return Some(c0);
        }
        Some(c0.lerp(&c1, (pos - p0) / (p1 - p0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_rounding() {
        assert_eq!(normalized_position(0.0, 3.0, 1.0), 0.33);
        assert_eq!(normalized_position(0.0, 200.0, 50.0), 0.25);
        assert_eq!(normalized_position(5.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn test_two_point_midpoint() {
        let color = interpolate(Interpolation::TwoPoint {
            min: 0.0,
            color_min: "#000000",
            max: 10.0,
            color_max: "#ffffff",
            value: 5.0,
        });
        assert_eq!(color.as_deref(), Some("#808080"));
    }

    #[test]
    fn test_out_of_domain_is_none() {
        let stops = [GradientStop::new(0.0, "#ff0000"), GradientStop::new(1.0, "#00ff00")];
        for value in [-0.1, 100.1, f64::NAN] {
            assert_eq!(
                interpolate(Interpolation::Stops {
                    stops: &stops,
                    min: 0.0,
                    max: 100.0,
                    value,
                }),
                None
            );
        }
    }

    #[test]
    fn test_single_stop_ramp() {
        let stops = [GradientStop::new(0.4, "#123456")];
        let color = interpolate(Interpolation::Stops {
            stops: &stops,
            min: 0.0,
            max: 1.0,
            value: 0.9,
        });
        assert_eq!(color.as_deref(), Some("#123456"));
    }

    #[test]
    fn test_exact_stop_and_duplicates() {
        let ramp = ColorRamp::from_stops(&[
            GradientStop::new(0.0, "#000000"),
            GradientStop::new(0.5, "#ff0000"),
            GradientStop::new(0.5, "#00ff00"),
            GradientStop::new(1.0, "#0000ff"),
        ]);
        assert_eq!(ramp.sample(0.5), Some(Rgba::rgb(0, 255, 0)));
        assert_eq!(ramp.sample(0.0), Some(Rgba::rgb(0, 0, 0)));
    }

    #[test]
    fn test_unusable_stops_are_skipped() {
        let ramp = ColorRamp::from_stops(&[
            GradientStop {
                pos: 0.0,
                color: None,
            },
            GradientStop::new(0.5, "bogus"),
            GradientStop::new(1.0, "#0000ff"),
        ]);
        assert_eq!(ramp.len(), 1);

        let empty = ColorRamp::from_stops(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.sample(0.5), None);
    }
}
