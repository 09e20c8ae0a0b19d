//! Gradient render cache
//!
//! Rebuilding gradient-path geometry is the expensive part of drawing a
//! gradient arc. The renderer keeps the last `(min, max, stops)` it drew and
//! only rebuilds when that triple changes. One cache per rendered gauge.

use crate::segments::GradientStop;

/// The last gradient a renderer drew.
#[derive(Debug, Clone, Default)]
pub struct GradientRenderCache {
    previous: Option<(f64, f64, Vec<GradientStop>)>,
}

impl GradientRenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current triple and report whether it differs from the
    /// previous one.
    pub fn needs_update(&mut self, min: f64, max: f64, stops: &[GradientStop]) -> bool {
        let unchanged = matches!(
            &self.previous,
            Some((prev_min, prev_max, prev_stops))
                if *prev_min == min && *prev_max == max && prev_stops.as_slice() == stops
        );
        if unchanged {
            tracing::trace!(min, max, "gradient unchanged, skipping rebuild");
            return false;
        }
        self.previous = Some((min, max, stops.to_vec()));
        true
    }

    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn previous_stops(&self) -> Option<&[GradientStop]> {
        self.previous.as_ref().map(|(_, _, stops)| stops.as_slice())
    }
}
