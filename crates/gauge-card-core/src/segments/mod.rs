//! Segment color engine.
//!
//! This module turns a gauge's breakpoint configuration into colors:
//! - [`normalize_segments`] validates, sorts and pads breakpoints
//! - [`gradient_stops`] lays breakpoints out as `[0, 1]` gradient stops
//! - [`SegmentEngine`] resolves the fill color for a value, discrete or
//!   interpolated, per gauge configuration

mod gradient;
mod normalize;
mod severity;
mod types;

pub use gradient::*;
pub use normalize::*;
pub use severity::*;
pub use types::*;
