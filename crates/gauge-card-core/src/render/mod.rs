//! Helpers for the rendering layer.
//!
//! Everything here consumes the segment engine's output: discrete bands for
//! per-band arcs, CSS gradient strings, and the cache that lets a renderer
//! skip rebuilding gradient geometry when nothing changed.

mod bands;
mod cache;
mod css;

pub use bands::*;
pub use cache::*;
pub use css::*;

/// Fraction of the gauge sweep covered by `value`, clamped to `[0, 1]`.
///
/// Used to place the needle, min/max indicators and setpoint markers.
/// A zero-width or inverted domain yields 0.
pub fn value_fraction(min: f64, max: f64, value: f64) -> f64 {
    if max.is_nan() || min.is_nan() || max <= min || value.is_nan() {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}
