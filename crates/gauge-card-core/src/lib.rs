//! # Gauge Card Core Library
//!
//! Color engine for a dashboard gauge card.
//!
//! This library provides:
//! - Segment (breakpoint) validation and normalization
//! - Gradient stop construction with boundary interpolation
//! - Discrete and interpolated severity colors
//! - Theme variable (`var(--name)`) resolution with a TTL cache
//! - Typed card configuration with template value overlay
//! - Render helpers: severity bands, CSS conic gradients, gradient cache
//!
//! ## Example
//!
//! ```rust
//! use gauge_card_core::prelude::*;
//!
//! let config = CardConfig::from_json(r##"{
//!     "min": 0,
//!     "max": 200,
//!     "segments": [
//!         {"from": 0, "color": "#ff0000"},
//!         {"from": 100, "color": "#00ff00"},
//!         {"from": 200, "color": "#0000ff"}
//!     ]
//! }"##).unwrap();
//!
//! let theme = ThemeColorResolver::new(ThemeProperties::new());
//! let engine = SegmentEngine::new(&config, &theme);
//!
//! assert_eq!(engine.severity_color(Gauge::Main, 150.0).as_deref(), Some("#00ff00"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod color;
pub mod config;
pub mod interpolate;
pub mod render;
pub mod segments;
pub mod theme;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::color::{ColorError, Rgba};
    pub use crate::config::{
        validate_card, CardConfig, ConfigError, ConfigField, ConfigValueSource, FieldKey, Gauge,
        InnerConfig, InnerMode, Templatable, TemplatedConfig, ValidationReport,
    };
    pub use crate::interpolate::{interpolate, Interpolation};
    pub use crate::render::{conic_gradient, severity_bands, value_fraction, GradientRenderCache};
    pub use crate::segments::{
        gradient_stops, normalize_segments, GaugeDomain, GaugeSegment, GradientStop,
        SegmentEngine, SegmentError,
    };
    pub use crate::theme::{ColorResolver, StyleSource, ThemeColorResolver, ThemeProperties};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
