//! Discrete severity bands.

use crate::segments::GaugeSegment;
use serde::{Deserialize, Serialize};

/// A solid-colored stretch of the gauge arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityBand {
    pub from: f64,
    pub to: f64,
    pub color: String,
}

/// Split normalized breakpoints into bands clipped to `[min, max]`.
///
/// Breakpoint `i` covers `[from_i, from_{i+1})`; the last one runs to `max`.
/// Bands that end up empty after clipping are dropped.
pub fn severity_bands(segments: &[GaugeSegment], min: f64, max: f64) -> Vec<SeverityBand> {
    segments
        .iter()
        .enumerate()
        .filter_map(|(i, segment)| {
            let end = segments.get(i + 1).map_or(max, |next| next.from);
            let from = segment.from.max(min);
            let to = end.min(max);
            (to > from).then(|| SeverityBand {
                from,
                to,
                color: segment.color.clone(),
            })
        })
        .collect()
}
